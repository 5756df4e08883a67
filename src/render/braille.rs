use crate::curves::{MacroPixel, PixelBuffer};
use crate::render::{begin_frame, end_frame, rgb_at, set_bg, set_fg, Frame, Renderer, Rgb};
use std::io::Write;

/// One cell = a 2x4 dot matrix. A dot is raised where the pixel's luma is above
/// the background; the cell takes the average color of its raised dots.
pub struct BrailleRenderer {
    last_fg: Option<Rgb>,
    last_bg: Option<Rgb>,
}

impl BrailleRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Default for BrailleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

const DOT_BITS: [u8; 8] = [0x01, 0x08, 0x02, 0x10, 0x04, 0x20, 0x40, 0x80];
const BACKGROUND: Rgb = (0, 0, 0);

/// Dot pattern and average lit color for the cell whose top-left pixel is `(x, y)`.
fn cell(surface: &PixelBuffer, x: usize, y: usize, floor: u8) -> (u8, Rgb) {
    let mut bits = 0u8;
    let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
    for dy in 0..4usize {
        for dx in 0..2usize {
            let Some(p) = surface.pixel(x + dx, y + dy) else {
                continue;
            };
            if p.y <= floor {
                continue;
            }
            bits |= DOT_BITS[dy * 2 + dx];
            let c = rgb_at(surface, x + dx, y + dy);
            r += c.0 as u32;
            g += c.1 as u32;
            b += c.2 as u32;
            n += 1;
        }
    }
    if n == 0 {
        return (0, BACKGROUND);
    }
    (bits, ((r / n) as u8, (g / n) as u8, (b / n) as u8))
}

impl Renderer for BrailleRenderer {
    fn name(&self) -> &'static str {
        "braille"
    }

    fn cell_pixels(&self) -> (usize, usize) {
        (2, 4)
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let cols = frame.term_cols as usize;
        let visual_rows = frame.visual_rows as usize;
        let surface = frame.surface;

        if cols == 0 || visual_rows == 0 || surface.width() == 0 || surface.height() == 0 {
            return Ok(());
        }
        if surface.width() != cols * 2 || surface.height() != visual_rows * 4 {
            return Ok(());
        }

        begin_frame(out, frame.sync_updates)?;
        self.last_fg = None;
        self.last_bg = None;
        set_bg(out, &mut self.last_bg, BACKGROUND)?;

        let floor = MacroPixel::BACKGROUND.y0;
        for row in 0..visual_rows {
            for col in 0..cols {
                let (bits, fg) = cell(surface, col * 2, row * 4, floor);
                if bits == 0 {
                    out.write_all(b" ")?;
                    continue;
                }
                set_fg(out, &mut self.last_fg, fg)?;
                let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                write!(out, "{ch}")?;
            }
            out.write_all(b"\r\n")?;
        }

        end_frame(out, frame)
    }
}
