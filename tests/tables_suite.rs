use tui_curves::curves::{
    fill_blue, high_half, iteration_green, low_half, rgb_to_yuv, slot_red, GradientTable,
    WaveTable, CURVE_STEP, ITERATIONS, QUARTER, SLOT_COUNT, TABLE_LEN,
};

// ── Waveform table ──────────────────────────────────────────────────────────

#[test]
fn waveform_half_period_negates() {
    let t = WaveTable::build();
    assert_eq!(t.len(), TABLE_LEN);
    for i in 0..TABLE_LEN {
        assert_eq!(
            t.get(i).a,
            -t.get((i + TABLE_LEN / 2) % TABLE_LEN).a,
            "negation symmetry broken at {i}"
        );
    }
}

#[test]
fn waveform_pairs_phase_with_quarter_ahead() {
    let t = WaveTable::build();
    for i in 0..TABLE_LEN {
        assert_eq!(t.get(i).b, t.get((i + QUARTER) % TABLE_LEN).a, "pairing broken at {i}");
    }
}

#[test]
fn waveform_quarter_mirror_is_exact() {
    let t = WaveTable::build();
    for i in 0..QUARTER {
        assert_eq!(t.get(i).a, t.get(TABLE_LEN / 2 - 1 - i).a);
    }
}

#[test]
fn waveform_rises_through_first_quarter() {
    let t = WaveTable::build();
    for i in 1..QUARTER {
        assert!(t.get(i).a >= t.get(i - 1).a, "not monotonic at {i}");
    }
    assert!(t.get(0).a >= 0);
    assert!(t.get(TABLE_LEN / 2).a <= 0);
}

#[test]
fn packed_halves_match_pair_fields() {
    let t = WaveTable::build();
    for i in [0, 1, QUARTER - 1, QUARTER, TABLE_LEN / 2 + 7, TABLE_LEN - 1] {
        let p = t.get(i);
        assert_eq!(high_half(p.packed()), p.a as i32);
        assert_eq!(low_half(p.packed()), p.b as i32);
    }
}

#[test]
fn custom_quarter_expands_into_four_quadrants() {
    let mut q = [0i16; QUARTER];
    for (i, v) in q.iter_mut().enumerate() {
        *v = i as i16;
    }
    let t = WaveTable::from_quarter(&q);
    assert_eq!(t.get(5).a, 5);
    assert_eq!(t.get(TABLE_LEN / 2 - 1 - 5).a, 5);
    assert_eq!(t.get(TABLE_LEN / 2 + 5).a, -5);
    assert_eq!(t.get(TABLE_LEN - 1 - 5).a, -5);
    assert_eq!(t.get(5).b, t.get(5 + QUARTER).a);
}

// ── Gradient table ──────────────────────────────────────────────────────────

#[test]
fn gradient_green_eases_from_zero_to_full() {
    assert_eq!(iteration_green(0), 0);
    assert_eq!(iteration_green(ITERATIONS - 1), 255);
    for j in 1..ITERATIONS {
        assert!(iteration_green(j) >= iteration_green(j - 1), "green fell at {j}");
    }
    // Quadratic ease-in: halfway through is already three quarters up.
    assert_eq!(iteration_green(ITERATIONS / 2), 192);
}

#[test]
fn gradient_red_ramps_with_slot() {
    assert_eq!(slot_red(0), 0);
    assert_eq!(slot_red(CURVE_STEP), 4);
    assert_eq!(slot_red((SLOT_COUNT - 1) * CURVE_STEP), 252);
}

#[test]
fn gradient_blue_fills_the_remainder() {
    assert_eq!(fill_blue(0, 0), 256);
    assert_eq!(fill_blue(252, 255), 2);
    assert_eq!(fill_blue(100, 100), 156);
}

#[test]
fn gradient_entries_follow_slot_then_iteration_order() {
    let g = GradientTable::build();
    assert_eq!(g.len(), SLOT_COUNT * ITERATIONS);
    for k in [0, 1, 31, SLOT_COUNT - 1] {
        let red = slot_red(k * CURVE_STEP);
        for j in [0, 1, 511, ITERATIONS - 1] {
            let green = iteration_green(j);
            let blue = fill_blue(red, green);
            let want = rgb_to_yuv(red as u8, green as u8, blue as u8);
            assert_eq!(g.get(k, j), want, "slot {k} iteration {j}");
            assert_eq!(g.entries()[k * ITERATIONS + j], want);
            assert_eq!(g.slot(k)[j], want);
        }
    }
}

#[test]
fn gradient_luma_brightens_along_each_curve() {
    let g = GradientTable::build();
    for k in 0..SLOT_COUNT {
        let first = g.get(k, 4).y;
        let last = g.get(k, ITERATIONS - 1).y;
        assert!(last > first, "slot {k}: luma {first} -> {last}");
    }
}
