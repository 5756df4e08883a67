use tui_curves::curves::{
    composite, high_half, low_half, project, slot_phases, ControlInput, CurveFamily, CurveIter,
    CurvePoint, GradientTable, PixelBuffer, Simulation, TransformState, WaveTable, ANG1_INC,
    ANG2_INC, DEFAULT_SPEED, ITERATIONS, SLOT_COUNT, TABLE_LEN,
};

fn collect_family(table: &WaveTable, t: i32) -> Vec<CurvePoint> {
    let mut pts = Vec::with_capacity(SLOT_COUNT * ITERATIONS);
    CurveFamily::new(table, t).for_each_point(|_, _, p| pts.push(p));
    pts
}

// ── Generator ───────────────────────────────────────────────────────────────

#[test]
fn first_point_of_slot_zero_doubles_table_zero() {
    let table = WaveTable::build();
    let mut curve = CurveIter::for_slot(&table, 0, 0);
    assert_eq!(curve.current(), CurvePoint { x: 0, y: 0 });

    let word = table.get(0).packed();
    let p = curve.next().expect("first point");
    assert_eq!(p.x, low_half(word) + low_half(word));
    assert_eq!(p.y, high_half(word) + high_half(word));
}

#[test]
fn second_point_folds_the_first() {
    let table = WaveTable::build();
    let mut curve = CurveIter::for_slot(&table, 0, 0);
    let p1 = curve.next().expect("first point");
    let p2 = curve.next().expect("second point");

    let a = table.lookup(p1.x);
    let b = table.lookup(p1.y);
    assert_eq!(p2.x, a.b as i32 + b.b as i32);
    assert_eq!(p2.y, a.a as i32 + b.a as i32);
}

#[test]
fn every_curve_has_exactly_iterations_points() {
    let table = WaveTable::build();
    let family = CurveFamily::new(&table, 1234);
    let mut slots = 0;
    for (k, curve) in family.slots() {
        assert_eq!(curve.len(), ITERATIONS);
        assert_eq!(curve.count(), ITERATIONS, "slot {k}");
        slots += 1;
    }
    assert_eq!(slots, SLOT_COUNT);
}

#[test]
fn generation_is_a_pure_function_of_phase() {
    let a = WaveTable::build();
    let b = WaveTable::build();
    for t in [0, 8, -40, 99_999, i32::MAX] {
        assert_eq!(collect_family(&a, t), collect_family(&b, t), "phase {t}");
    }
    assert_ne!(collect_family(&a, 0), collect_family(&a, 8));
}

#[test]
fn slot_phases_step_by_fixed_increments() {
    assert_eq!(slot_phases(0, 0), (0, 0));
    assert_eq!(slot_phases(100, 1), (100 + ANG1_INC, 100 + ANG2_INC));
    assert_eq!(slot_phases(0, 63), (63 * ANG1_INC, 63 * ANG2_INC));
    // Wraps rather than overflowing.
    let (p1, _) = slot_phases(i32::MAX, 2);
    assert_eq!(p1, i32::MAX.wrapping_add(2 * ANG1_INC));
}

#[test]
fn slots_can_be_generated_independently() {
    let table = WaveTable::build();
    let t = 777;
    let family = CurveFamily::new(&table, t);
    let mut from_family = Vec::new();
    family.for_each_point(|k, _, p| {
        if k == 41 {
            from_family.push(p);
        }
    });
    let alone = CurveIter::for_slot(&table, t, 41).collect::<Vec<_>>();
    assert_eq!(from_family, alone);
}

#[test]
fn phase_is_periodic_in_table_length() {
    let table = WaveTable::build();
    let a = CurveIter::for_slot(&table, 5, 3).collect::<Vec<_>>();
    let b = CurveIter::for_slot(&table, 5 + TABLE_LEN as i32, 3).collect::<Vec<_>>();
    assert_eq!(a, b);
}

// ── Compositor ──────────────────────────────────────────────────────────────

#[test]
fn projection_applies_fixed_point_scale_then_pan() {
    let mut t = TransformState::new(640, 480);
    t.scale_mul = 1 << 14;
    t.x_pan = 10;
    t.y_pan = -3;
    assert_eq!(project(CurvePoint { x: 7, y: -7 }, &t), (17, -10));

    t.scale_mul = 1 << 13;
    // Arithmetic shift rounds toward negative infinity.
    assert_eq!(project(CurvePoint { x: -3, y: 3 }, &t), (10 - 2, -3 + 1));
}

#[test]
fn default_view_fits_curves_on_screen() {
    let table = WaveTable::build();
    let gradient = GradientTable::build();
    let t = TransformState::new(320, 240);
    let mut buf = PixelBuffer::new(320, 240);
    let stats = composite(&mut buf, &table, &gradient, 0, &t);
    assert_eq!(stats.total(), SLOT_COUNT * ITERATIONS);
    assert_eq!(stats.discarded, 0, "default scale should keep every point on screen");
    assert!(buf.lit_pixels() > 0);
}

#[test]
fn compositor_never_writes_outside_the_surface() {
    let table = WaveTable::build();
    let gradient = GradientTable::build();
    let mut rng = fastrand::Rng::with_seed(0x5eed);

    for _ in 0..24 {
        let (w, h) = (rng.usize(1..97), rng.usize(1..61));
        let mut t = TransformState::new(w, h);
        t.scale_mul = match rng.u8(0..3) {
            0 => rng.i32(..),
            1 => rng.i32(-4096..4096),
            _ => rng.i32(0..1 << 16),
        };
        t.x_pan = rng.i32(-200..200);
        t.y_pan = rng.i32(-200..200);

        let mut buf = PixelBuffer::new(w, h);
        let phase = rng.i32(..);
        let stats = composite(&mut buf, &table, &gradient, phase, &t);

        let mut expected_in = 0;
        CurveFamily::new(&table, phase).for_each_point(|_, _, p| {
            let (x, y) = project(p, &t);
            if x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h {
                expected_in += 1;
            }
        });
        assert_eq!(stats.plotted, expected_in);
        assert_eq!(stats.total(), SLOT_COUNT * ITERATIONS);
        assert_eq!(buf.cells().len(), w.div_ceil(2) * h);
        assert!(buf.lit_pixels() <= stats.plotted);
    }
}

// ── Frame lifecycle ─────────────────────────────────────────────────────────

fn press_freeze() -> ControlInput {
    ControlInput {
        freeze_pressed: true,
        freeze_held: true,
        ..Default::default()
    }
}

fn press_trails() -> ControlInput {
    ControlInput {
        trails_pressed: true,
        trails_held: true,
        ..Default::default()
    }
}

#[test]
fn frozen_trails_accumulate_idempotently() {
    let mut sim = Simulation::new(96, 64);
    sim.set_phase(321);
    sim.finish_frame(&press_freeze());
    sim.finish_frame(&press_trails());
    assert!(sim.transform().trails);
    assert_eq!(sim.transform().speed, 0);

    sim.render_frame();
    sim.finish_frame(&ControlInput::default());
    let after_first = sim.surfaces().active().clone();
    assert!(after_first.lit_pixels() > 0);

    for _ in 0..5 {
        sim.render_frame();
        sim.finish_frame(&ControlInput::default());
    }
    assert_eq!(sim.surfaces().active(), &after_first);
}

#[test]
fn moving_trails_never_erase_strokes() {
    let mut sim = Simulation::new(80, 60);
    sim.finish_frame(&press_trails());

    sim.render_frame();
    sim.finish_frame(&ControlInput::default());
    let mut prev = sim.surfaces().active().clone();
    for _ in 0..6 {
        sim.render_frame();
        sim.finish_frame(&ControlInput::default());
        let cur = sim.surfaces().active();
        for y in 0..prev.height() {
            for x in 0..prev.width() {
                let was = prev.pixel(x, y).map(|p| p.y).unwrap_or(0);
                let now = cur.pixel(x, y).map(|p| p.y).unwrap_or(0);
                assert!(was == 0 || now != 0, "stroke at ({x},{y}) vanished");
            }
        }
        assert!(cur.lit_pixels() >= prev.lit_pixels());
        prev = cur.clone();
    }
}

#[test]
fn without_trails_each_frame_starts_clean() {
    let mut sim = Simulation::new(80, 60);
    for _ in 0..2 {
        sim.render_frame();
        sim.finish_frame(&ControlInput::default());
    }
    // Back on the first buffer, which still holds frame one.
    assert_eq!(sim.surfaces().active_index(), 0);
    sim.render_frame();
    let third = sim.surfaces().active().clone();

    let mut fresh = PixelBuffer::new(80, 60);
    composite(
        &mut fresh,
        sim.table(),
        sim.gradient(),
        2 * DEFAULT_SPEED,
        sim.transform(),
    );
    assert_eq!(third, fresh);
}

#[test]
fn phase_advances_by_speed_including_reverse() {
    let mut sim = Simulation::new(16, 16);
    sim.finish_frame(&ControlInput::default());
    assert_eq!(sim.phase(), DEFAULT_SPEED);

    for _ in 0..DEFAULT_SPEED + 2 {
        sim.finish_frame(&ControlInput {
            speed_down: true,
            ..Default::default()
        });
    }
    assert_eq!(sim.transform().speed, -2);
    let before = sim.phase();
    sim.finish_frame(&ControlInput::default());
    assert_eq!(sim.phase(), before - 2);
}

#[test]
fn independent_simulations_do_not_share_state() {
    let mut a = Simulation::new(32, 32);
    let b = Simulation::new(32, 32);
    a.finish_frame(&press_trails());
    a.finish_frame(&ControlInput {
        pan_left: true,
        ..Default::default()
    });
    assert!(a.transform().trails);
    assert!(!b.transform().trails);
    assert_ne!(a.transform().x_pan, b.transform().x_pan);
    assert_eq!(b.phase(), 0);
}
