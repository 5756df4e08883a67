//! Where finished frames go.

use crate::config::Config;
use crate::curves::{ControlInput, FrameStatus, PixelBuffer};
use crate::render::{make_renderer, Frame, Renderer};
use crate::terminal::TerminalGuard;
use anyhow::Context;
use std::fmt::Write as _;
use std::io::{BufWriter, Stdout};
use std::time::{Duration, Instant};

pub trait DisplaySurface {
    fn name(&self) -> &'static str;

    /// Current surface size in pixels. Called every frame; a changed answer
    /// makes the loop reallocate its buffers.
    fn negotiate_mode(&mut self) -> anyhow::Result<(usize, usize)>;

    fn allocate_buffer(&mut self, width: usize, height: usize) -> PixelBuffer {
        PixelBuffer::new(width, height)
    }

    fn present(&mut self, buffer: &PixelBuffer, status: &FrameStatus) -> anyhow::Result<()>;

    /// Block until the next frame may be presented.
    fn wait_vsync(&mut self);

    /// Presentation-only controls (HUD, help).
    fn observe_input(&mut self, _input: &ControlInput) {}
}

/// In-memory display for tests and benchmarks.
pub struct HeadlessDisplay {
    width: usize,
    height: usize,
    keep_last: bool,
    presented: u64,
    last: Option<PixelBuffer>,
    statuses: Vec<FrameStatus>,
}

impl HeadlessDisplay {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            keep_last: false,
            presented: 0,
            last: None,
            statuses: Vec::new(),
        }
    }

    /// Keep a copy of every presented buffer's final state.
    pub fn keeping_frames(mut self) -> Self {
        self.keep_last = true;
        self
    }

    /// Takes effect at the next negotiation.
    pub fn set_mode(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&PixelBuffer> {
        self.last.as_ref()
    }

    pub fn statuses(&self) -> &[FrameStatus] {
        &self.statuses
    }
}

impl DisplaySurface for HeadlessDisplay {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn negotiate_mode(&mut self) -> anyhow::Result<(usize, usize)> {
        Ok((self.width, self.height))
    }

    fn present(&mut self, buffer: &PixelBuffer, status: &FrameStatus) -> anyhow::Result<()> {
        self.presented += 1;
        self.statuses.push(*status);
        if self.keep_last {
            self.last = Some(buffer.clone());
        }
        Ok(())
    }

    fn wait_vsync(&mut self) {}
}

/// True-color terminal display. Owns the terminal for its lifetime.
pub struct TerminalDisplay {
    out: BufWriter<Stdout>,
    renderer: Box<dyn Renderer>,
    sync_updates: bool,
    frame_interval: Duration,
    last_vsync: Instant,
    show_hud: bool,
    show_help: bool,
    size: (u16, u16),
    hud_rows: u16,
    fps: FpsCounter,
    // Last field: restores the terminal after everything above is dropped.
    guard: TerminalGuard,
}

impl TerminalDisplay {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let guard = TerminalGuard::new()?;
        let size = crossterm::terminal::size().context("get terminal size")?;
        Ok(Self {
            out: BufWriter::new(TerminalGuard::stdout()),
            renderer: make_renderer(cfg.renderer),
            sync_updates: cfg.sync_updates,
            frame_interval: cfg.frame_interval(),
            last_vsync: Instant::now(),
            show_hud: cfg.hud,
            show_help: false,
            size,
            hud_rows: hud_rows_for_size(size, cfg.hud),
            fps: FpsCounter::new(),
            guard,
        })
    }

    pub fn reports_key_release(&self) -> bool {
        self.guard.reports_key_release()
    }
}

impl DisplaySurface for TerminalDisplay {
    fn name(&self) -> &'static str {
        self.renderer.name()
    }

    fn negotiate_mode(&mut self) -> anyhow::Result<(usize, usize)> {
        // Resize events can be missed in some terminals; ask every frame.
        let size = crossterm::terminal::size().context("get terminal size")?;
        if size.1 < 2 || size.0 < 4 {
            return Err(anyhow::anyhow!(
                "terminal too small (need at least 4x2, got {}x{})",
                size.0,
                size.1
            ));
        }
        self.size = size;
        self.hud_rows = hud_rows_for_size(size, self.show_hud);
        let (px_w, px_h) = self.renderer.cell_pixels();
        let visual_rows = size.1.saturating_sub(self.hud_rows).max(1);
        Ok((size.0 as usize * px_w, visual_rows as usize * px_h))
    }

    fn present(&mut self, buffer: &PixelBuffer, status: &FrameStatus) -> anyhow::Result<()> {
        let (term_cols, term_rows) = self.size;
        self.fps.tick();
        let hud = if self.show_hud {
            build_hud(term_cols as usize, status, self.fps.fps(), self.renderer.name())
        } else {
            String::new()
        };
        let frame = Frame {
            term_cols,
            term_rows,
            visual_rows: term_rows.saturating_sub(self.hud_rows).max(1),
            surface: buffer,
            hud: &hud,
            hud_rows: self.hud_rows,
            overlay: self.show_help.then(help_popup_text),
            sync_updates: self.sync_updates,
        };
        self.renderer.render(&frame, &mut self.out)
    }

    fn wait_vsync(&mut self) {
        let elapsed = self.last_vsync.elapsed();
        if elapsed < self.frame_interval {
            std::thread::sleep(self.frame_interval - elapsed);
        }
        self.last_vsync = Instant::now();
    }

    fn observe_input(&mut self, input: &ControlInput) {
        if input.toggle_hud {
            self.show_hud = !self.show_hud;
        }
        if input.toggle_help {
            self.show_help = !self.show_help;
        }
    }
}

pub fn hud_rows_for_size(size: (u16, u16), show_hud: bool) -> u16 {
    if !show_hud || size.1 <= 1 {
        return 0;
    }
    (size.1 - 1).min(2)
}

pub fn build_hud(cols: usize, status: &FrameStatus, fps: f32, renderer_name: &str) -> String {
    let mut line = String::new();
    let _ = write!(
        line,
        "Speed: {}{} | Trails: {} | Scale: {:.1} | Pan: {},{} | Phase: {} | FPS: {:>4.1} | Renderer: {}",
        status.speed,
        if status.frozen { " (frozen)" } else { "" },
        if status.trails { "on" } else { "off" },
        status.scale,
        status.pan.0,
        status.pan.1,
        status.phase,
        fps,
        renderer_name,
    );
    let keys = "Keys: arrows pan | x/z zoom | +/- speed | 1 freeze | 2 trails | 1+2 or r reset | i HUD | ? help | q quit";
    let mut out = hard_wrap_line(&line, cols.max(1));
    out.extend(hard_wrap_line(keys, cols.max(1)));
    out.join("\n")
}

fn hard_wrap_line(line: &str, width: usize) -> Vec<String> {
    let chars = line.chars().collect::<Vec<_>>();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}

pub fn help_popup_text() -> &'static str {
    "Curve Renderer Hotkeys\n\
arrows or h/j/k/l  pan\n\
x / z  zoom in / out (hold)\n\
+ / -  speed up / down\n\
1 or space  freeze / resume\n\
2 or t  toggle trails\n\
1 and 2 together, or r  reset view\n\
i  show/hide HUD\n\
? or F1  toggle this help\n\
q or esc  quit"
}

struct FpsCounter {
    last: Instant,
    frames: u32,
    fps: f32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            last: Instant::now(),
            frames: 0,
            fps: 0.0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        if dt >= 0.5 {
            self.fps = (self.frames as f32) / dt;
            self.frames = 0;
            self.last = now;
        }
    }

    fn fps(&self) -> f32 {
        self.fps
    }
}
