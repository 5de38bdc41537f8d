//! Input snapshot for one frame.
//!
//! The host records raw events into an [`InputState`] and hands it to the
//! context once per frame. Every focus, hover and click decision in that
//! frame is made from the same snapshot. Edge-triggered queries compare the
//! current button mask against the previous frame's.

use crate::geometry::{Axis, Vec2};

/// Pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

impl MouseButton {
    /// Returns the bit mask for a button.
    const fn mask(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Right => 2,
            Self::Middle => 4,
        }
    }
}

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Space bar.
    Space,
    /// Any key without a dedicated variant, by host scan code.
    Other(u32),
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

/// Input state for the current frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer: Vec2,
    prev_pointer: Vec2,
    buttons_down: u8,
    prev_buttons_down: u8,
    wheel: Vec2,
    keys_down: Vec<Key>,
    keys_pressed: Vec<Key>,
    text: String,
    /// Modifier keys state.
    pub modifiers: Modifiers,
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rolls the current frame into the previous one and clears per-frame
    /// accumulators (wheel, pressed keys, text).
    pub fn begin_frame(&mut self) {
        self.prev_pointer = self.pointer;
        self.prev_buttons_down = self.buttons_down;
        self.wheel = Vec2::ZERO;
        self.keys_pressed.clear();
        self.text.clear();
    }

    /// Updates the pointer position.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Records a button going down.
    pub fn press(&mut self, button: MouseButton) {
        self.buttons_down |= button.mask();
    }

    /// Records a button going up.
    pub fn release(&mut self, button: MouseButton) {
        self.buttons_down &= !button.mask();
    }

    /// Accumulates wheel movement. Positive `dy` scrolls towards the start.
    pub fn scroll(&mut self, dx: f32, dy: f32) {
        self.wheel = self.wheel + Vec2::new(dx, dy);
    }

    /// Records a key press.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_down.contains(&key) {
            self.keys_pressed.push(key);
            self.keys_down.push(key);
        }
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: Key) {
        self.keys_down.retain(|&k| k != key);
    }

    /// Records typed text.
    pub fn type_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Pointer position in pixels.
    #[must_use]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Pointer movement since the previous frame.
    #[must_use]
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer - self.prev_pointer
    }

    /// Returns true if the button is currently held.
    #[must_use]
    pub fn is_down(&self, button: MouseButton) -> bool {
        (self.buttons_down & button.mask()) != 0
    }

    /// Returns true if the button went down this frame.
    #[must_use]
    pub fn was_pressed(&self, button: MouseButton) -> bool {
        (self.buttons_down & !self.prev_buttons_down & button.mask()) != 0
    }

    /// Returns true if the button went up this frame.
    #[must_use]
    pub fn was_released(&self, button: MouseButton) -> bool {
        (!self.buttons_down & self.prev_buttons_down & button.mask()) != 0
    }

    /// Wheel movement accumulated this frame.
    #[must_use]
    pub fn wheel(&self) -> Vec2 {
        self.wheel
    }

    /// Wheel movement along one axis.
    #[must_use]
    pub fn wheel_along(&self, axis: Axis) -> f32 {
        self.wheel.along(axis)
    }

    /// Returns true if the key is currently held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key went down this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Text typed this frame.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
