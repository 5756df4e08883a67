//! Per-curve color ramps, stored in video-range YUV.

use super::{CURVE_COUNT, CURVE_STEP, ITERATIONS, SLOT_COUNT};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Yuv {
    pub y: u8,
    pub u: u8,
    pub v: u8,
}

impl Yuv {
    /// `Y << 16 | U << 8 | V`
    #[inline]
    pub fn packed(self) -> u32 {
        ((self.y as u32) << 16) | ((self.u as u32) << 8) | self.v as u32
    }

    #[inline]
    pub fn from_packed(word: u32) -> Self {
        Self {
            y: (word >> 16) as u8,
            u: (word >> 8) as u8,
            v: word as u8,
        }
    }
}

/// Broadcast-style RGB -> YUV; each channel truncates toward zero.
pub fn rgb_to_yuv(r: u8, g: u8, b: u8) -> Yuv {
    let (r, g, b) = (r as f64, g as f64, b as f64);
    Yuv {
        y: (0.257 * r + 0.504 * g + 0.098 * b + 16.0) as u8,
        u: (-0.148 * r - 0.291 * g + 0.439 * b + 128.0) as u8,
        v: (0.439 * r - 0.368 * g - 0.071 * b + 128.0) as u8,
    }
}

/// Inverse of [`rgb_to_yuv`], clamped to 0..=255.
pub fn yuv_to_rgb(c: Yuv) -> (u8, u8, u8) {
    let y = 1.164 * (c.y as f32 - 16.0);
    let u = c.u as f32 - 128.0;
    let v = c.v as f32 - 128.0;
    let r = y + 1.596 * v;
    let g = y - 0.813 * v - 0.391 * u;
    let b = y + 2.018 * u;
    (
        r.round().clamp(0.0, 255.0) as u8,
        g.round().clamp(0.0, 255.0) as u8,
        b.round().clamp(0.0, 255.0) as u8,
    )
}

/// Red channel for a raw curve slot `s` (0, 4, ..., 252).
pub fn slot_red(s: usize) -> u32 {
    (256 * s / CURVE_COUNT) as u32
}

/// Green channel: quadratic ease over the iteration index.
pub fn iteration_green(j: usize) -> u32 {
    let rest = 1.0 - j as f32 / ITERATIONS as f32;
    (256.0 * (1.0 - rest * rest)) as u32
}

/// Blue channel: fills what red and green leave.
pub fn fill_blue(red: u32, green: u32) -> u32 {
    (512 - (red + green)) >> 1
}

/// Colors in (slot, iteration) order, matching the order points are generated.
pub struct GradientTable {
    entries: Box<[Yuv]>,
}

impl GradientTable {
    pub fn build() -> Self {
        let mut entries = Vec::with_capacity(SLOT_COUNT * ITERATIONS);
        for s in (0..CURVE_COUNT).step_by(CURVE_STEP) {
            let red = slot_red(s);
            for j in 0..ITERATIONS {
                let green = iteration_green(j);
                let blue = fill_blue(red, green);
                // 8-bit channels: a blue of 256 wraps to 0.
                entries.push(rgb_to_yuv(red as u8, green as u8, blue as u8));
            }
        }
        Self {
            entries: entries.into_boxed_slice(),
        }
    }

    /// Colors for slot `k` (raw slot `k * CURVE_STEP`).
    pub fn slot(&self, k: usize) -> &[Yuv] {
        let start = k * ITERATIONS;
        &self.entries[start..start + ITERATIONS]
    }

    pub fn get(&self, k: usize, j: usize) -> Yuv {
        self.entries[k * ITERATIONS + j]
    }

    pub fn entries(&self) -> &[Yuv] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
