use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tui_curves::curves::{ControlInput, Simulation, ITERATIONS, SLOT_COUNT};

#[derive(Parser, Debug)]
#[command(name = "benchmark", about = "Headless frame-time benchmark for the curve pipeline")]
struct Args {
    #[arg(long, default_value_t = 180)]
    frames: usize,

    #[arg(long, default_value_t = 640)]
    w: usize,

    #[arg(long, default_value_t = 480)]
    h: usize,

    /// Fail when any scenario averages above `--max-ms`.
    #[arg(long, default_value_t = false)]
    ci_smoke: bool,

    #[arg(long, default_value_t = 16.0)]
    max_ms: f64,

    #[arg(long, default_value_t = false)]
    quick: bool,
}

struct Scenario {
    name: &'static str,
    input: fn(usize) -> ControlInput,
    trails: bool,
}

fn idle(_: usize) -> ControlInput {
    ControlInput::default()
}

fn zoom_in(_: usize) -> ControlInput {
    ControlInput {
        zoom_in: true,
        ..ControlInput::default()
    }
}

fn wander(f: usize) -> ControlInput {
    ControlInput {
        pan_left: f % 90 < 45,
        pan_right: f % 90 >= 45,
        pan_up: f % 60 < 30,
        zoom_out: f % 120 < 20,
        speed_up: f % 30 == 0,
        ..ControlInput::default()
    }
}

struct Timing {
    avg_ms: f64,
    p95_ms: f64,
    plotted: usize,
    total: usize,
    lit: usize,
}

fn run_scenario(args: &Args, sc: &Scenario) -> Timing {
    let mut sim = Simulation::new(args.w, args.h);
    if sc.trails {
        sim.finish_frame(&ControlInput {
            trails_pressed: true,
            ..ControlInput::default()
        });
    }

    let mut samples = Vec::with_capacity(args.frames);
    let (mut plotted, mut total) = (0usize, 0usize);
    for f in 0..args.frames {
        let start = Instant::now();
        let stats = sim.render_frame();
        sim.finish_frame(&(sc.input)(f));
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
        plotted += stats.plotted;
        total += stats.total();
    }

    let avg_ms = samples.iter().sum::<f64>() / samples.len().max(1) as f64;
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let p95_idx = ((samples.len() as f64 - 1.0) * 0.95).round() as usize;
    let p95_ms = samples.get(p95_idx).copied().unwrap_or(0.0);
    // Without trails the last drawn buffer has already been swapped out.
    let last = if sim.transform().trails {
        sim.surfaces().active()
    } else {
        sim.surfaces().shown()
    };
    Timing {
        avg_ms,
        p95_ms,
        plotted,
        total,
        lit: last.lit_pixels(),
    }
}

fn main() -> Result<()> {
    let mut args = Args::parse();
    args.frames = args.frames.max(1);
    if args.quick {
        args.frames = args.frames.min(30);
    }

    let scenarios = [
        Scenario {
            name: "idle",
            input: idle,
            trails: false,
        },
        Scenario {
            name: "trails",
            input: idle,
            trails: true,
        },
        Scenario {
            name: "zoom-in",
            input: zoom_in,
            trails: false,
        },
        Scenario {
            name: "wander",
            input: wander,
            trails: false,
        },
    ];

    println!(
        "Curve benchmark: curves={} points/curve={} frames={} size={}x{}",
        SLOT_COUNT, ITERATIONS, args.frames, args.w, args.h
    );

    let mut slow = Vec::new();
    for sc in &scenarios {
        let t = run_scenario(&args, sc);
        let ratio = t.plotted as f64 / t.total.max(1) as f64;
        println!(
            "  {:<8} {:>8.3} ms/frame avg  {:>8.3} p95  plotted={:>5.1}%  lit={}",
            sc.name,
            t.avg_ms,
            t.p95_ms,
            ratio * 100.0,
            t.lit
        );
        if args.ci_smoke && t.avg_ms > args.max_ms {
            slow.push((sc.name, t.avg_ms));
        }
    }

    if args.ci_smoke {
        if !slow.is_empty() {
            eprintln!("CI smoke: FAIL");
            for (name, ms) in slow {
                eprintln!("  slow scenario: {} ({:.3} ms/frame > {:.3})", name, ms, args.max_ms);
            }
            anyhow::bail!("ci smoke failed");
        }
        println!("CI smoke: PASS (max_ms={:.3})", args.max_ms);
    }

    Ok(())
}
