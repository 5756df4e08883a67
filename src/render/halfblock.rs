use crate::render::{begin_frame, end_frame, rgb_at, set_bg, set_fg, Frame, Renderer, Rgb};
use std::io::Write;

/// One cell = two stacked pixels: `▀` with the top pixel as foreground and the
/// bottom pixel as background.
pub struct HalfBlockRenderer {
    last_fg: Option<Rgb>,
    last_bg: Option<Rgb>,
}

impl HalfBlockRenderer {
    pub fn new() -> Self {
        Self {
            last_fg: None,
            last_bg: None,
        }
    }
}

impl Default for HalfBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HalfBlockRenderer {
    fn name(&self) -> &'static str {
        "halfblock"
    }

    fn cell_pixels(&self) -> (usize, usize) {
        (1, 2)
    }

    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()> {
        let cols = frame.term_cols as usize;
        let visual_rows = frame.visual_rows as usize;
        let surface = frame.surface;

        if cols == 0 || visual_rows == 0 || surface.width() == 0 || surface.height() == 0 {
            return Ok(());
        }
        if surface.width() != cols || surface.height() != visual_rows * 2 {
            // Mode renegotiation is a frame behind the terminal; skip rather than misdraw.
            return Ok(());
        }

        begin_frame(out, frame.sync_updates)?;
        self.last_fg = None;
        self.last_bg = None;

        const HALF_BLOCK: char = '\u{2580}';

        for row in 0..visual_rows {
            let top_y = row * 2;
            for x in 0..cols {
                set_fg(out, &mut self.last_fg, rgb_at(surface, x, top_y))?;
                set_bg(out, &mut self.last_bg, rgb_at(surface, x, top_y + 1))?;
                write!(out, "{HALF_BLOCK}")?;
            }
            out.write_all(b"\r\n")?;
        }

        end_frame(out, frame)
    }
}
