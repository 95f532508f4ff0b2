//! # Keyboard + Mouse Device
//!
//! Digital state for keys and mouse buttons, the tracked mouse position and
//! the one-shot wheel delta.
//!
//! The wheel pseudo-buttons (`mousewheelup` / `mousewheeldown`) read and
//! consume the pending delta, so a wheel notch fires an action at most once.

use super::buttons::ButtonStore;
use super::codes::KeyCode;

/// Platform mouse button numbering (1 = left, 2 = middle, 3 = right).
pub const PLATFORM_MOUSE_LEFT: u8 = 1;
pub const PLATFORM_MOUSE_MIDDLE: u8 = 2;
pub const PLATFORM_MOUSE_RIGHT: u8 = 3;

/// Maps platform mouse button numbers into the [`KeyCode`] namespace.
///
/// Returns `None` for buttons beyond the three physical ones.
#[must_use]
pub fn remap_mouse_button(button: u8) -> Option<KeyCode> {
    match button {
        PLATFORM_MOUSE_LEFT => Some(KeyCode::MOUSE_LEFT),
        PLATFORM_MOUSE_MIDDLE => Some(KeyCode::MOUSE_MIDDLE),
        PLATFORM_MOUSE_RIGHT => Some(KeyCode::MOUSE_RIGHT),
        _ => None,
    }
}

/// Mouse position and pending wheel movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    /// Pending wheel delta, reset to 0 when consumed.
    pub wheel: i32,
}

/// Keyboard and mouse input state.
#[derive(Debug, Clone, Default)]
pub struct KeyboardMouse {
    buttons: ButtonStore<KeyCode>,
    mouse: MouseState,
}

impl KeyboardMouse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key or mouse button state. No-op while disabled.
    pub fn set_button(&mut self, key: KeyCode, down: bool) {
        self.buttons.set(key, down);
    }

    /// Reads a key as 1.0/0.0.
    ///
    /// The wheel pseudo-buttons consume the pending wheel delta. A disabled
    /// device reads 0.0 for every code.
    pub fn button_value(&mut self, key: KeyCode) -> f32 {
        if !self.buttons.is_enabled() {
            return 0.0;
        }

        match key {
            KeyCode::MOUSE_WHEEL_UP => f32::from(u8::from(self.on_wheel_up())),
            KeyCode::MOUSE_WHEEL_DOWN => f32::from(u8::from(self.on_wheel_down())),
            _ => self.buttons.value(key),
        }
    }

    #[must_use]
    pub fn is_down(&self, key: KeyCode) -> bool {
        self.buttons.is_down(key)
    }

    /// Sets the tracked mouse position.
    pub fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.mouse.x = x;
        self.mouse.y = y;
    }

    /// Offsets the tracked mouse position.
    pub fn mod_mouse_position(&mut self, dx: i32, dy: i32) {
        self.mouse.x = self.mouse.x.saturating_add(dx);
        self.mouse.y = self.mouse.y.saturating_add(dy);
    }

    #[must_use]
    pub fn mouse_position(&self) -> (i32, i32) {
        (self.mouse.x, self.mouse.y)
    }

    #[must_use]
    pub fn mouse(&self) -> MouseState {
        self.mouse
    }

    /// Stores a wheel delta for the next wheel query.
    pub fn set_wheel(&mut self, delta: i32) {
        self.mouse.wheel = delta;
    }

    /// Returns true once per positive wheel delta.
    pub fn on_wheel_up(&mut self) -> bool {
        if self.mouse.wheel >= 1 {
            self.mouse.wheel = 0;
            true
        } else {
            false
        }
    }

    /// Returns true once per negative wheel delta.
    pub fn on_wheel_down(&mut self) -> bool {
        if self.mouse.wheel < 0 {
            self.mouse.wheel = 0;
            true
        } else {
            false
        }
    }

    pub fn enable(&mut self) {
        self.buttons.enable();
    }

    pub fn disable(&mut self) {
        self.buttons.disable();
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.buttons.is_enabled()
    }

    /// Clears every key and mouse button entry.
    pub fn flush(&mut self) {
        self.buttons.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled() -> KeyboardMouse {
        let mut km = KeyboardMouse::new();
        km.enable();
        km
    }

    #[test]
    fn test_remap_mouse_buttons() {
        assert_eq!(remap_mouse_button(1), Some(KeyCode::MOUSE_LEFT));
        assert_eq!(remap_mouse_button(2), Some(KeyCode::MOUSE_MIDDLE));
        assert_eq!(remap_mouse_button(3), Some(KeyCode::MOUSE_RIGHT));
        assert_eq!(remap_mouse_button(4), None);
        assert_eq!(remap_mouse_button(0), None);
    }

    #[test]
    fn test_key_value() {
        let mut km = enabled();
        km.set_button(KeyCode::W, true);
        assert_eq!(km.button_value(KeyCode::W), 1.0);
        assert_eq!(km.button_value(KeyCode::S), 0.0);
    }

    #[test]
    fn test_disabled_device_reads_zero() {
        let mut km = enabled();
        km.set_button(KeyCode::W, true);
        km.disable();
        assert_eq!(km.button_value(KeyCode::W), 0.0);
        km.enable();
        assert_eq!(km.button_value(KeyCode::W), 1.0);
    }

    #[test]
    fn test_wheel_up_fires_once() {
        let mut km = enabled();
        km.set_wheel(1);
        assert!(km.on_wheel_up());
        assert!(!km.on_wheel_up());
        assert!(!km.on_wheel_up());

        km.set_wheel(3);
        assert!(km.on_wheel_up());
        assert!(!km.on_wheel_up());
    }

    #[test]
    fn test_wheel_down_fires_once() {
        let mut km = enabled();
        km.set_wheel(-1);
        assert!(!km.on_wheel_up());
        assert!(km.on_wheel_down());
        assert!(!km.on_wheel_down());
    }

    #[test]
    fn test_wheel_zero_fires_nothing() {
        let mut km = enabled();
        km.set_wheel(0);
        assert!(!km.on_wheel_up());
        assert!(!km.on_wheel_down());
    }

    #[test]
    fn test_wheel_pseudo_buttons() {
        let mut km = enabled();
        km.set_wheel(2);
        assert_eq!(km.button_value(KeyCode::MOUSE_WHEEL_DOWN), 0.0);
        assert_eq!(km.button_value(KeyCode::MOUSE_WHEEL_UP), 1.0);
        assert_eq!(km.button_value(KeyCode::MOUSE_WHEEL_UP), 0.0);
    }

    #[test]
    fn test_mouse_position() {
        let mut km = KeyboardMouse::new();
        km.set_mouse_position(100, 50);
        assert_eq!(km.mouse_position(), (100, 50));

        km.mod_mouse_position(-10, 5);
        assert_eq!(km.mouse_position(), (90, 55));

        km.set_mouse_position(i32::MAX, 0);
        km.mod_mouse_position(1, 0);
        assert_eq!(km.mouse_position(), (i32::MAX, 0));
    }

    #[test]
    fn test_flush_clears_buttons_only() {
        let mut km = enabled();
        km.set_button(KeyCode::MOUSE_LEFT, true);
        km.set_mouse_position(5, 5);
        km.flush();

        assert!(!km.is_down(KeyCode::MOUSE_LEFT));
        assert_eq!(km.mouse_position(), (5, 5));
        assert!(km.is_enabled());
    }
}
