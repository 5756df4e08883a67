//! Curve family generation and compositing.
//!
//! A [`Simulation`] owns everything one running instance needs: the lookup
//! tables, the transform state, the animation phase and the double-buffered
//! surface. Nothing here is global, so independent instances can coexist.

mod compositor;
mod generator;
mod gradient;
mod surface;
mod transform;
mod waveform;

pub use compositor::{composite, project, CompositeStats};
pub use generator::{slot_phases, CurveFamily, CurveIter, CurvePoint};
pub use gradient::{
    fill_blue, iteration_green, rgb_to_yuv, slot_red, yuv_to_rgb, GradientTable, Yuv,
};
pub use surface::{MacroPixel, PixelBuffer, SurfacePair};
pub use transform::{
    ControlInput, TransformEvents, TransformState, DEFAULT_SPEED, PAN_SPEED, SCALE_SPEED,
};
pub use waveform::{
    high_half, low_half, WavePair, WaveTable, QUARTER, TABLE_LEN, TABLE_MASK, TABLE_POWER,
};

use log::{debug, info};
use std::f64::consts::PI;

pub const CURVE_COUNT: usize = 256;
pub const CURVE_STEP: usize = 4;
pub const ITERATIONS: usize = 1024;
/// Curves actually drawn per frame.
pub const SLOT_COUNT: usize = CURVE_COUNT / CURVE_STEP;

/// Per-slot phase step for the first accumulator.
pub const ANG1_INC: i32 = ((CURVE_STEP * TABLE_LEN) / 235) as i32;
/// Per-slot phase step for the second accumulator.
pub const ANG2_INC: i32 = ((CURVE_STEP * TABLE_LEN) as f64 / (2.0 * PI)) as i32;

/// Snapshot of the state a display may want to show alongside a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStatus {
    pub frame: u64,
    pub phase: i32,
    pub speed: i32,
    pub frozen: bool,
    pub trails: bool,
    pub scale: f32,
    pub pan: (i32, i32),
    pub last: CompositeStats,
}

pub struct Simulation {
    table: WaveTable,
    gradient: GradientTable,
    transform: TransformState,
    surfaces: SurfacePair,
    phase: i32,
    frame: u64,
    last: CompositeStats,
}

impl Simulation {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_surfaces(SurfacePair::new(width, height))
    }

    pub fn with_surfaces(surfaces: SurfacePair) -> Self {
        let (w, h) = (surfaces.width(), surfaces.height());
        Self {
            table: WaveTable::build(),
            gradient: GradientTable::build(),
            transform: TransformState::new(w, h),
            surfaces,
            phase: 0,
            frame: 0,
            last: CompositeStats::default(),
        }
    }

    pub fn table(&self) -> &WaveTable {
        &self.table
    }

    pub fn gradient(&self) -> &GradientTable {
        &self.gradient
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn surfaces(&self) -> &SurfacePair {
        &self.surfaces
    }

    pub fn phase(&self) -> i32 {
        self.phase
    }

    pub fn set_phase(&mut self, phase: i32) {
        self.phase = phase;
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    pub fn size(&self) -> (usize, usize) {
        (self.surfaces.width(), self.surfaces.height())
    }

    /// Swap in freshly allocated buffers, e.g. after the display mode changed.
    pub fn replace_surfaces(&mut self, surfaces: SurfacePair) {
        let (w, h) = (surfaces.width(), surfaces.height());
        info!("surface replaced: {w}x{h}");
        self.surfaces = surfaces;
        self.transform.resize(w, h);
    }

    /// Draw the current phase into the active buffer. With trails off the
    /// buffer is cleared first; with trails on strokes accumulate.
    pub fn render_frame(&mut self) -> CompositeStats {
        let buffer = self.surfaces.active_mut();
        if !self.transform.trails {
            buffer.clear();
        }
        self.last = composite(
            buffer,
            &self.table,
            &self.gradient,
            self.phase,
            &self.transform,
        );
        self.last
    }

    /// Apply this frame's input, advance the phase, and hand the written
    /// buffer over for display unless trails keep it in place.
    pub fn finish_frame(&mut self, input: &ControlInput) -> TransformEvents {
        let ev = self.transform.apply(input);
        if ev.reset {
            info!("reset: speed={} scale={:.1}", self.transform.speed, self.transform.scale());
        }
        if ev.freeze_toggled {
            debug!(
                "freeze toggled: speed={} saved={}",
                self.transform.speed,
                self.transform.saved_speed()
            );
        }
        if ev.trails_toggled {
            debug!("trails {}", if self.transform.trails { "on" } else { "off" });
        }
        if ev.speed_changed {
            debug!("speed {}", self.transform.speed);
        }

        self.phase = self.phase.wrapping_add(self.transform.speed);
        self.frame += 1;
        if !self.transform.trails {
            self.surfaces.swap();
        }
        ev
    }

    pub fn status(&self) -> FrameStatus {
        FrameStatus {
            frame: self.frame,
            phase: self.phase,
            speed: self.transform.speed,
            frozen: self.transform.frozen(),
            trails: self.transform.trails,
            scale: self.transform.scale(),
            pan: (self.transform.x_pan, self.transform.y_pan),
            last: self.last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_increments_match_fixed_values() {
        assert_eq!(ANG1_INC, 278);
        assert_eq!(ANG2_INC, 10430);
        assert_eq!(SLOT_COUNT, 64);
    }

    #[test]
    fn trails_keep_the_same_buffer() {
        let mut sim = Simulation::new(64, 48);
        sim.render_frame();
        sim.finish_frame(&ControlInput::default());
        assert_eq!(sim.surfaces().active_index(), 1);

        sim.finish_frame(&ControlInput {
            trails_pressed: true,
            ..Default::default()
        });
        assert!(sim.transform().trails);
        assert_eq!(sim.surfaces().active_index(), 1);
        sim.finish_frame(&ControlInput::default());
        assert_eq!(sim.surfaces().active_index(), 1);
    }
}
