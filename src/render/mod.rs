mod braille;
mod halfblock;

pub use braille::BrailleRenderer;
pub use halfblock::HalfBlockRenderer;

use crate::config::RendererMode;
use crate::curves::{yuv_to_rgb, PixelBuffer};
use std::io::Write;

pub struct Frame<'a> {
    pub term_cols: u16,
    pub term_rows: u16,
    pub visual_rows: u16,
    pub surface: &'a PixelBuffer,
    pub hud: &'a str,
    pub hud_rows: u16,
    pub overlay: Option<&'a str>,
    pub sync_updates: bool,
}

pub trait Renderer {
    fn name(&self) -> &'static str;
    /// Surface pixels per terminal cell, `(columns, rows)`.
    fn cell_pixels(&self) -> (usize, usize);
    fn render(&mut self, frame: &Frame<'_>, out: &mut dyn Write) -> anyhow::Result<()>;
}

pub fn make_renderer(mode: RendererMode) -> Box<dyn Renderer> {
    match mode {
        RendererMode::HalfBlock => Box::new(HalfBlockRenderer::new()),
        RendererMode::Braille => Box::new(BrailleRenderer::new()),
    }
}

type Rgb = (u8, u8, u8);

#[inline]
fn rgb_at(surface: &PixelBuffer, x: usize, y: usize) -> Rgb {
    surface.pixel(x, y).map(yuv_to_rgb).unwrap_or((0, 0, 0))
}

fn set_fg(out: &mut dyn Write, last: &mut Option<Rgb>, c: Rgb) -> std::io::Result<()> {
    if *last != Some(c) {
        write!(out, "\x1b[38;2;{};{};{}m", c.0, c.1, c.2)?;
        *last = Some(c);
    }
    Ok(())
}

fn set_bg(out: &mut dyn Write, last: &mut Option<Rgb>, c: Rgb) -> std::io::Result<()> {
    if *last != Some(c) {
        write!(out, "\x1b[48;2;{};{};{}m", c.0, c.1, c.2)?;
        *last = Some(c);
    }
    Ok(())
}

/// HUD rows, overlay, autowrap restore, end of synchronized update.
fn end_frame(out: &mut dyn Write, frame: &Frame<'_>) -> anyhow::Result<()> {
    let cols = frame.term_cols as usize;
    let mut hud_lines = frame.hud.lines();
    for i in 0..(frame.hud_rows as usize) {
        write_hud_line(out, frame.visual_rows as usize + i + 1, cols, hud_lines.next())?;
    }

    if let Some(text) = frame.overlay {
        draw_overlay_popup(out, frame.term_cols, frame.term_rows, text)?;
    }

    out.write_all(b"\x1b[?7h")?;
    if frame.sync_updates {
        out.write_all(b"\x1b[?2026l")?;
    }
    out.flush()?;
    Ok(())
}

/// Home the cursor and disable autowrap (DECAWM) while full-width rows are
/// painted; some terminals wrap when the last column is written.
fn begin_frame(out: &mut dyn Write, sync_updates: bool) -> std::io::Result<()> {
    if sync_updates {
        out.write_all(b"\x1b[?2026h")?;
    }
    out.write_all(b"\x1b[H\x1b[0m\x1b[?7l")
}

/// Paint one HUD row (1-based terminal `row`), truncated to `cols`.
pub fn write_hud_line(
    out: &mut dyn Write,
    row: usize,
    cols: usize,
    line: Option<&str>,
) -> anyhow::Result<()> {
    write!(out, "\x1b[{};1H\x1b[0m\x1b[2K", row)?;
    if let Some(line) = line {
        let clipped: String = line.chars().take(cols).collect();
        out.write_all(b"\x1b[38;2;200;208;224m")?;
        write!(out, "{clipped}")?;
        out.write_all(b"\x1b[0m")?;
    }
    Ok(())
}

/// Split into lines of at most `width` chars. Blank lines survive.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|raw| {
            let chars: Vec<char> = raw.chars().collect();
            if chars.is_empty() {
                vec![String::new()]
            } else {
                chars.chunks(width).map(|c| c.iter().collect()).collect()
            }
        })
        .collect()
}

/// Centered text box over a blanked screen. The first line is the title.
pub fn draw_overlay_popup(
    out: &mut dyn Write,
    term_cols: u16,
    term_rows: u16,
    text: &str,
) -> anyhow::Result<()> {
    let (cols, rows) = (term_cols as usize, term_rows as usize);
    if text.trim().is_empty() || cols < 8 || rows < 4 {
        return Ok(());
    }

    let lines = wrap_chars(text, cols - 6);
    let inner_w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(1);
    let body_h = lines.len().min(rows - 3);
    let (box_w, box_h) = (inner_w + 4, body_h + 2);
    let left = (cols - box_w) / 2 + 1;
    let top = (rows - box_h) / 2 + 1;
    let border = format!("+{}+", "-".repeat(box_w - 2));

    // EL2 per row; writing `cols` spaces would wrap at the right edge.
    out.write_all(b"\x1b[0m\x1b[48;2;2;4;10m")?;
    for row in 1..=rows {
        write!(out, "\x1b[{row};1H\x1b[2K")?;
    }

    out.write_all(b"\x1b[38;2;236;242;255m\x1b[48;2;10;14;24m")?;
    write!(out, "\x1b[{top};{left}H{border}")?;
    for (i, line) in lines.iter().take(body_h).enumerate() {
        write!(out, "\x1b[{};{left}H| ", top + 1 + i)?;
        if i == 0 {
            write!(out, "\x1b[1m\x1b[38;2;255;236;160m{line:<inner_w$}\x1b[22m\x1b[38;2;236;242;255m")?;
        } else {
            write!(out, "{line:<inner_w$}")?;
        }
        out.write_all(b" |")?;
    }
    write!(out, "\x1b[{};{left}H{border}", top + box_h - 1)?;
    out.write_all(b"\x1b[0m")?;
    Ok(())
}
