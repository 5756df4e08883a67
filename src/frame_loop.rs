use crate::curves::{Simulation, SurfacePair};
use crate::display::DisplaySurface;
use crate::input::InputDevice;
use log::info;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub frames: u64,
    pub resizes: u32,
}

fn allocate_pair(display: &mut dyn DisplaySurface, w: usize, h: usize) -> SurfacePair {
    let first = display.allocate_buffer(w, h);
    let second = display.allocate_buffer(w, h);
    SurfacePair::from_buffers(first, second)
}

/// Negotiate a mode and build a simulation sized for it.
pub fn start(display: &mut dyn DisplaySurface) -> anyhow::Result<Simulation> {
    let (w, h) = display.negotiate_mode()?;
    info!("display {}: mode {w}x{h}", display.name());
    let sim = Simulation::with_surfaces(allocate_pair(display, w, h));
    info!(
        "waveform table: {} slots, peak {}",
        sim.table().len(),
        sim.table().amplitude()
    );
    Ok(sim)
}

/// Run until the input asks to quit.
///
/// Per frame: follow mode changes, draw, present, wait for vsync, then read
/// input and advance. Input is only polled between frames.
pub fn run_frames(
    sim: &mut Simulation,
    display: &mut dyn DisplaySurface,
    input: &mut dyn InputDevice,
) -> anyhow::Result<LoopSummary> {
    let mut summary = LoopSummary::default();
    loop {
        let mode = display.negotiate_mode()?;
        if mode != sim.size() {
            info!("display mode changed: {}x{} -> {}x{}", sim.size().0, sim.size().1, mode.0, mode.1);
            sim.replace_surfaces(allocate_pair(display, mode.0, mode.1));
            summary.resizes += 1;
        }

        sim.render_frame();
        display.present(sim.surfaces().active(), &sim.status())?;
        display.wait_vsync();
        summary.frames += 1;

        let controls = input.poll()?;
        display.observe_input(&controls);
        let ev = sim.finish_frame(&controls);
        if ev.quit {
            info!("quit after {} frames", summary.frames);
            return Ok(summary);
        }
    }
}
