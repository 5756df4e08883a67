use super::generator::{CurveFamily, CurvePoint};
use super::gradient::GradientTable;
use super::surface::PixelBuffer;
use super::transform::TransformState;
use super::waveform::{WaveTable, TABLE_POWER};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompositeStats {
    pub plotted: usize,
    pub discarded: usize,
}

impl CompositeStats {
    pub fn total(&self) -> usize {
        self.plotted + self.discarded
    }
}

/// Curve space -> surface pixel. Fixed-point scale, then pan.
#[inline]
pub fn project(p: CurvePoint, t: &TransformState) -> (i32, i32) {
    (
        (p.x.wrapping_mul(t.scale_mul) >> TABLE_POWER).wrapping_add(t.x_pan),
        (p.y.wrapping_mul(t.scale_mul) >> TABLE_POWER).wrapping_add(t.y_pan),
    )
}

/// Plot every curve for phase `t` into `buffer`. Off-surface points are dropped.
pub fn composite(
    buffer: &mut PixelBuffer,
    table: &WaveTable,
    gradient: &GradientTable,
    phase: i32,
    transform: &TransformState,
) -> CompositeStats {
    let mut stats = CompositeStats::default();
    for (k, curve) in CurveFamily::new(table, phase).slots() {
        for (p, &color) in curve.zip(gradient.slot(k)) {
            let (px, py) = project(p, transform);
            if buffer.plot(px, py, color) {
                stats.plotted += 1;
            } else {
                stats.discarded += 1;
            }
        }
    }
    stats
}
