use crate::config::Config;
use crate::display::TerminalDisplay;
use crate::frame_loop::{run_frames, start};
use crate::input::TerminalInput;
use log::info;
use std::time::{Duration, Instant};

pub fn run(cfg: Config) -> anyhow::Result<()> {
    info!(
        "starting: renderer={:?} fps={} sync_updates={} hold_ms={}",
        cfg.renderer, cfg.fps, cfg.sync_updates, cfg.hold_ms
    );

    let mut display = TerminalDisplay::new(&cfg)?;
    let mut input = TerminalInput::new(
        display.reports_key_release(),
        Duration::from_millis(cfg.hold_ms),
    );

    let started = Instant::now();
    let built = Instant::now();
    let mut sim = start(&mut display)?;
    info!("tables built in {:.2} ms", built.elapsed().as_secs_f32() * 1000.0);

    let summary = run_frames(&mut sim, &mut display, &mut input)?;
    let secs = started.elapsed().as_secs_f32().max(1e-6);
    info!(
        "stopped: {} frames in {:.1}s ({:.1} fps), {} mode changes, final phase {}",
        summary.frames,
        secs,
        summary.frames as f32 / secs,
        summary.resizes,
        sim.phase()
    );
    Ok(())
}
