//! Normalized input state
//!
//! Keyboard, on-screen buttons and the virtual joystick all write into one
//! `InputState`. The simulation only ever reads it.

use glam::Vec2;

/// Logical game buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    /// Fire (shooter) or jump (runner)
    Action,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Action,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of held buttons from a single input source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub fn press(&mut self, button: Button) {
        self.0 |= button.bit();
    }

    pub fn release(&mut self, button: Button) {
        self.0 &= !button.bit();
    }

    pub fn contains(&self, button: Button) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// Key-code layout for a game (`KeyboardEvent.code` values)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMap {
    /// Arrows move, Space fires
    Shooter,
    /// Space or ArrowUp jumps
    Runner,
}

impl KeyMap {
    pub fn button_for(self, code: &str) -> Option<Button> {
        match (self, code) {
            (_, "Space") => Some(Button::Action),
            (KeyMap::Runner, "ArrowUp") => Some(Button::Action),
            (KeyMap::Runner, _) => None,
            (KeyMap::Shooter, "ArrowUp") => Some(Button::Up),
            (KeyMap::Shooter, "ArrowDown") => Some(Button::Down),
            (KeyMap::Shooter, "ArrowLeft") => Some(Button::Left),
            (KeyMap::Shooter, "ArrowRight") => Some(Button::Right),
            (KeyMap::Shooter, _) => None,
        }
    }
}

/// Merged input from every source
///
/// Sources are tracked separately so releasing a touch button does not
/// cancel a key that is still held.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keyboard: ButtonSet,
    touch: ButtonSet,
    /// Analog vector from the virtual joystick, components in [-1, 1]
    stick: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key-down event. Returns the mapped button, if any.
    pub fn key_down(&mut self, map: KeyMap, code: &str) -> Option<Button> {
        let button = map.button_for(code)?;
        self.keyboard.press(button);
        Some(button)
    }

    /// Apply a key-up event. Returns the mapped button, if any.
    pub fn key_up(&mut self, map: KeyMap, code: &str) -> Option<Button> {
        let button = map.button_for(code)?;
        self.keyboard.release(button);
        Some(button)
    }

    /// On-screen button pressed (touch or mouse)
    pub fn touch_down(&mut self, button: Button) {
        self.touch.press(button);
    }

    /// On-screen button released (touch end, mouse up or mouse leave)
    pub fn touch_up(&mut self, button: Button) {
        self.touch.release(button);
    }

    pub fn set_stick(&mut self, stick: Vec2) {
        self.stick = stick.clamp(Vec2::NEG_ONE, Vec2::ONE);
    }

    /// Drop every held input (window blur, restart)
    pub fn release_all(&mut self) {
        self.keyboard.clear();
        self.touch.clear();
        self.stick = Vec2::ZERO;
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.keyboard.contains(button) || self.touch.contains(button)
    }

    /// Movement axis: digital directions plus joystick, each component
    /// clamped to [-1, 1]. Diagonals are not normalized.
    pub fn axis(&self) -> Vec2 {
        let mut digital = Vec2::ZERO;
        if self.pressed(Button::Left) {
            digital.x -= 1.0;
        }
        if self.pressed(Button::Right) {
            digital.x += 1.0;
        }
        if self.pressed(Button::Up) {
            digital.y -= 1.0;
        }
        if self.pressed(Button::Down) {
            digital.y += 1.0;
        }
        (digital + self.stick).clamp(Vec2::NEG_ONE, Vec2::ONE)
    }
}

/// Virtual on-screen joystick
///
/// Converts a drag from the stick origin into an analog vector. Offsets are
/// scaled by `radius`; anything inside `dead_zone` (fraction of radius)
/// reads as centered.
#[derive(Debug, Clone)]
pub struct VirtualJoystick {
    pub radius: f32,
    pub dead_zone: f32,
    origin: Option<Vec2>,
    vector: Vec2,
}

impl Default for VirtualJoystick {
    fn default() -> Self {
        Self::new(50.0, 0.15)
    }
}

impl VirtualJoystick {
    pub fn new(radius: f32, dead_zone: f32) -> Self {
        Self {
            radius: radius.max(1.0),
            dead_zone: dead_zone.clamp(0.0, 0.95),
            origin: None,
            vector: Vec2::ZERO,
        }
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// Start a drag anchored at `origin` (usually the stick's center)
    pub fn begin(&mut self, origin: Vec2, point: Vec2) -> Vec2 {
        self.origin = Some(origin);
        self.drag(point)
    }

    /// Update the drag position. Ignored when no drag is active.
    pub fn drag(&mut self, point: Vec2) -> Vec2 {
        if let Some(origin) = self.origin {
            self.vector = self.vector_for(point - origin);
        }
        self.vector
    }

    pub fn end(&mut self) -> Vec2 {
        self.origin = None;
        self.vector = Vec2::ZERO;
        self.vector
    }

    /// Map a raw pixel offset to a vector of length <= 1
    pub fn vector_for(&self, offset: Vec2) -> Vec2 {
        let scaled = offset / self.radius;
        let len = scaled.length();
        if len <= self.dead_zone {
            return Vec2::ZERO;
        }
        let magnitude = ((len.min(1.0) - self.dead_zone) / (1.0 - self.dead_zone)).clamp(0.0, 1.0);
        scaled / len * magnitude
    }
}
