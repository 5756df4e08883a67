//! Packed 4:2:2 pixel buffers: two horizontal pixels share one U/V pair.

use super::gradient::Yuv;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MacroPixel {
    pub y0: u8,
    pub u: u8,
    pub y1: u8,
    pub v: u8,
}

impl MacroPixel {
    /// Black in the packed layout (`0x00800080`).
    pub const BACKGROUND: Self = Self {
        y0: 0,
        u: 128,
        y1: 0,
        v: 128,
    };

    /// `Y0 << 24 | U << 16 | Y1 << 8 | V`
    #[inline]
    pub fn packed(self) -> u32 {
        ((self.y0 as u32) << 24) | ((self.u as u32) << 16) | ((self.y1 as u32) << 8) | self.v as u32
    }

    /// Write one pixel's luma; the neighbour keeps its luma, chroma is replaced.
    #[inline]
    pub fn plot(&mut self, odd: bool, c: Yuv) {
        if odd {
            self.y1 = c.y;
        } else {
            self.y0 = c.y;
        }
        self.u = c.u;
        self.v = c.v;
    }

    #[inline]
    pub fn pixel(self, odd: bool) -> Yuv {
        Yuv {
            y: if odd { self.y1 } else { self.y0 },
            u: self.u,
            v: self.v,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    stride: usize,
    cells: Vec<MacroPixel>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let stride = width.div_ceil(2);
        Self {
            width,
            height,
            stride,
            cells: vec![MacroPixel::BACKGROUND; stride * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Macro-pixels per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn cells(&self) -> &[MacroPixel] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(MacroPixel::BACKGROUND);
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Returns false (and writes nothing) when `(x, y)` is off the surface.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, c: Yuv) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        self.cells[y * self.stride + x / 2].plot(x & 1 == 1, c);
        true
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Yuv> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y * self.stride + x / 2].pixel(x & 1 == 1))
    }

    /// Count of pixels whose luma differs from the background.
    pub fn lit_pixels(&self) -> usize {
        let mut n = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if let Some(p) = self.pixel(x, y) {
                    if p.y != MacroPixel::BACKGROUND.y0 {
                        n += 1;
                    }
                }
            }
        }
        n
    }
}

/// Double-buffered surface. One buffer is written while the other is shown.
pub struct SurfacePair {
    buffers: [PixelBuffer; 2],
    active: usize,
}

impl SurfacePair {
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_buffers(PixelBuffer::new(width, height), PixelBuffer::new(width, height))
    }

    pub fn from_buffers(first: PixelBuffer, second: PixelBuffer) -> Self {
        Self {
            buffers: [first, second],
            active: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.buffers[0].width()
    }

    pub fn height(&self) -> usize {
        self.buffers[0].height()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &PixelBuffer {
        &self.buffers[self.active]
    }

    pub fn active_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffers[self.active]
    }

    /// The buffer not currently being written.
    pub fn shown(&self) -> &PixelBuffer {
        &self.buffers[self.active ^ 1]
    }

    pub fn swap(&mut self) {
        self.active ^= 1;
    }
}
