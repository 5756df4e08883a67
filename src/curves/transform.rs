//! Pan / zoom / speed state driven by per-frame input.

use std::f64::consts::PI;

/// Pixels per frame while a pan direction is held.
pub const PAN_SPEED: f32 = 2.0;
/// Zoom ratio per frame while a zoom input is held.
pub const SCALE_SPEED: f32 = 1.005;
pub const DEFAULT_SPEED: i32 = 8;

/// One frame of input. Held fields are levels, `*_pressed` and speed fields
/// are edges (true only on the frame the input went down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub pan_left: bool,
    pub pan_right: bool,
    pub pan_up: bool,
    pub pan_down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub speed_up: bool,
    pub speed_down: bool,
    pub freeze_pressed: bool,
    pub trails_pressed: bool,
    pub freeze_held: bool,
    pub trails_held: bool,
    pub toggle_hud: bool,
    pub toggle_help: bool,
    pub quit: bool,
}

impl ControlInput {
    /// Reset fires while both toggle inputs are held.
    pub fn reset_chord(&self) -> bool {
        self.freeze_held && self.trails_held
    }
}

/// What an [`TransformState::apply`] call changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransformEvents {
    pub reset: bool,
    pub freeze_toggled: bool,
    pub trails_toggled: bool,
    pub speed_changed: bool,
    pub quit: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransformState {
    width: usize,
    height: usize,

    x_float: f32,
    y_float: f32,
    scale_float: f32,

    pub x_pan: i32,
    pub y_pan: i32,
    pub scale_mul: i32,

    pub speed: i32,
    saved_speed: i32,
    pub trails: bool,
    just_reset: bool,
}

impl TransformState {
    pub fn new(width: usize, height: usize) -> Self {
        let mut s = Self {
            width,
            height,
            x_float: 0.0,
            y_float: 0.0,
            scale_float: 0.0,
            x_pan: 0,
            y_pan: 0,
            scale_mul: 0,
            speed: 0,
            saved_speed: 0,
            trails: false,
            just_reset: false,
        };
        s.reset();
        s
    }

    /// Center the pan, fit the curves to the surface height, default speed, trails off.
    pub fn reset(&mut self) {
        self.x_float = 0.0;
        self.y_float = 0.0;
        self.scale_float = ((self.height / 2) as f64 * PI) as f32;
        self.speed = DEFAULT_SPEED;
        self.trails = false;
        self.derive();
    }

    /// Move the pan center to a new surface size. Accumulators are kept.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.derive();
    }

    pub fn apply(&mut self, input: &ControlInput) -> TransformEvents {
        let mut ev = TransformEvents {
            quit: input.quit,
            ..TransformEvents::default()
        };

        // Directions move the view, so the picture slides the other way.
        if input.pan_left {
            self.x_float += PAN_SPEED;
        }
        if input.pan_right {
            self.x_float -= PAN_SPEED;
        }
        if input.pan_up {
            self.y_float += PAN_SPEED;
        }
        if input.pan_down {
            self.y_float -= PAN_SPEED;
        }
        if input.zoom_in {
            self.scale_float *= SCALE_SPEED;
            self.x_float *= SCALE_SPEED;
            self.y_float *= SCALE_SPEED;
        }
        if input.zoom_out {
            self.scale_float /= SCALE_SPEED;
            self.x_float /= SCALE_SPEED;
            self.y_float /= SCALE_SPEED;
        }
        if input.speed_up {
            self.speed = self.speed.saturating_add(1);
            ev.speed_changed = true;
        }
        if input.speed_down {
            self.speed = self.speed.saturating_sub(1);
            ev.speed_changed = true;
        }

        if !input.freeze_held && !input.trails_held {
            self.just_reset = false;
        }
        if input.reset_chord() {
            self.reset();
            self.just_reset = true;
            ev.reset = true;
        }

        if input.freeze_pressed && !self.just_reset {
            self.toggle_freeze();
            ev.freeze_toggled = true;
        }
        if input.trails_pressed && !self.just_reset {
            self.trails = !self.trails;
            ev.trails_toggled = true;
        }

        self.derive();
        ev
    }

    /// Park a nonzero speed, or bring the parked speed back.
    pub fn toggle_freeze(&mut self) {
        if self.speed != 0 {
            self.saved_speed = self.speed;
            self.speed = 0;
        } else {
            self.speed = self.saved_speed;
        }
    }

    fn derive(&mut self) {
        self.x_pan = (self.x_float + (self.width / 2) as f32) as i32;
        self.y_pan = (self.y_float + (self.height / 2) as f32) as i32;
        self.scale_mul = self.scale_float as i32;
    }

    pub fn frozen(&self) -> bool {
        self.speed == 0
    }

    pub fn saved_speed(&self) -> i32 {
        self.saved_speed
    }

    pub fn scale(&self) -> f32 {
        self.scale_float
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.x_float, self.y_float)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn debouncing(&self) -> bool {
        self.just_reset
    }
}
