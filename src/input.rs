//! Per-frame input: turns terminal key events into held levels and edges.

use crate::curves::ControlInput;
use anyhow::Context;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

pub trait InputDevice {
    /// Called once per frame, never while a frame is being drawn.
    fn poll(&mut self) -> anyhow::Result<ControlInput>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ZoomIn,
    ZoomOut,
    SpeedUp,
    SpeedDown,
    Freeze,
    Trails,
    Reset,
    Hud,
    Help,
    Quit,
}

pub fn binding(code: KeyCode, mods: KeyModifiers) -> Option<Control> {
    if mods.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        return Some(Control::Quit);
    }
    let c = match code {
        KeyCode::Left | KeyCode::Char('h') => Control::PanLeft,
        KeyCode::Right | KeyCode::Char('l') => Control::PanRight,
        KeyCode::Up | KeyCode::Char('k') => Control::PanUp,
        KeyCode::Down | KeyCode::Char('j') => Control::PanDown,
        KeyCode::Char('x') | KeyCode::Char('X') => Control::ZoomIn,
        KeyCode::Char('z') | KeyCode::Char('Z') => Control::ZoomOut,
        KeyCode::Char('+') | KeyCode::Char('=') => Control::SpeedUp,
        KeyCode::Char('-') | KeyCode::Char('_') => Control::SpeedDown,
        KeyCode::Char('1') | KeyCode::Char(' ') => Control::Freeze,
        KeyCode::Char('2') | KeyCode::Char('t') | KeyCode::Char('T') => Control::Trails,
        KeyCode::Char('r') | KeyCode::Char('R') => Control::Reset,
        KeyCode::Char('i') | KeyCode::Char('I') => Control::Hud,
        KeyCode::Char('?') | KeyCode::F(1) => Control::Help,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Control::Quit,
        _ => return None,
    };
    Some(c)
}

impl Control {
    /// Controls with no held level: every deliberate press counts.
    fn edge_only(self) -> bool {
        matches!(
            self,
            Control::SpeedUp
                | Control::SpeedDown
                | Control::Reset
                | Control::Hud
                | Control::Help
                | Control::Quit
        )
    }
}

/// Held/edge bookkeeping for controls.
///
/// A control goes down on press and up on release. When the terminal never
/// sends releases, it goes up once `hold` passes without a press or repeat.
#[derive(Debug)]
pub struct KeyTracker {
    hold: Option<Duration>,
    held: HashMap<Control, Instant>,
    edges: Vec<Control>,
}

impl KeyTracker {
    /// `hold = None` trusts release events.
    pub fn new(hold: Option<Duration>) -> Self {
        Self {
            hold,
            held: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// A key went down. Edge-only controls get an edge on every press, even
    /// inside the hold window, so quick double taps are not lost.
    pub fn press(&mut self, c: Control, now: Instant) {
        self.expire(now);
        let fresh = self.held.insert(c, now).is_none();
        if (fresh || c.edge_only()) && !self.edges.contains(&c) {
            self.edges.push(c);
        }
    }

    /// Autorepeat: keeps a level alive without an edge.
    pub fn repeat(&mut self, c: Control, now: Instant) {
        self.expire(now);
        self.held.insert(c, now);
    }

    pub fn release(&mut self, c: Control) {
        self.held.remove(&c);
    }

    pub fn expire(&mut self, now: Instant) {
        if let Some(hold) = self.hold {
            self.held
                .retain(|_, last| now.saturating_duration_since(*last) < hold);
        }
    }

    pub fn held(&self, c: Control) -> bool {
        self.held.contains_key(&c)
    }

    fn pressed(&self, c: Control) -> bool {
        self.edges.contains(&c)
    }

    /// Snapshot this frame's levels and edges, then clear the edges.
    pub fn take_frame(&mut self, now: Instant) -> ControlInput {
        self.expire(now);
        let reset = self.pressed(Control::Reset);
        let input = ControlInput {
            pan_left: self.held(Control::PanLeft),
            pan_right: self.held(Control::PanRight),
            pan_up: self.held(Control::PanUp),
            pan_down: self.held(Control::PanDown),
            zoom_in: self.held(Control::ZoomIn),
            zoom_out: self.held(Control::ZoomOut),
            speed_up: self.pressed(Control::SpeedUp),
            speed_down: self.pressed(Control::SpeedDown),
            freeze_pressed: self.pressed(Control::Freeze),
            trails_pressed: self.pressed(Control::Trails),
            // The reset key stands in for holding both toggles.
            freeze_held: self.held(Control::Freeze) || reset,
            trails_held: self.held(Control::Trails) || reset,
            toggle_hud: self.pressed(Control::Hud),
            toggle_help: self.pressed(Control::Help),
            quit: self.pressed(Control::Quit),
        };
        self.edges.clear();
        input
    }
}

pub struct TerminalInput {
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn new(reports_release: bool, hold: Duration) -> Self {
        Self {
            tracker: KeyTracker::new((!reports_release).then_some(hold)),
        }
    }

    fn on_key(&mut self, k: KeyEvent, now: Instant) {
        let Some(c) = binding(k.code, k.modifiers) else {
            return;
        };
        match k.kind {
            KeyEventKind::Press => self.tracker.press(c, now),
            KeyEventKind::Repeat => self.tracker.repeat(c, now),
            KeyEventKind::Release => self.tracker.release(c),
        }
    }
}

impl InputDevice for TerminalInput {
    fn poll(&mut self) -> anyhow::Result<ControlInput> {
        // Drain input events (non-blocking).
        while event::poll(Duration::from_millis(0)).context("poll terminal events")? {
            if let Event::Key(k) = event::read().context("read terminal event")? {
                self.on_key(k, Instant::now());
            }
        }
        Ok(self.tracker.take_frame(Instant::now()))
    }
}

/// Replays a fixed sequence of frames, then asks to quit.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<ControlInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = ControlInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// `n` frames of no input.
    pub fn idle(n: usize) -> Self {
        Self::new(std::iter::repeat_n(ControlInput::default(), n))
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputDevice for ScriptedInput {
    fn poll(&mut self) -> anyhow::Result<ControlInput> {
        Ok(self.frames.pop_front().unwrap_or(ControlInput {
            quit: true,
            ..ControlInput::default()
        }))
    }
}
