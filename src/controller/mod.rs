//! # Controller Module
//!
//! Device state behind the action layer.
//!
//! This module handles:
//! - Key and gamepad button code namespaces
//! - Keyboard + mouse button, position and wheel state
//! - Gamepad slots and their connect/disconnect lifecycle
//! - Axis deadzones, trigger thresholds and stick pseudo-buttons
//! - The platform backend seam, with a Linux evdev implementation

pub mod axis;
pub mod backend;
pub mod buttons;
pub mod codes;
pub mod evdev;
pub mod gamepad;
pub mod keyboard_mouse;

pub use axis::{AxisNormalizer, GamepadAxis, Stick};
pub use backend::{GamepadBackend, HeadlessBackend};
pub use codes::{KeyCode, PadButton};
pub use gamepad::{GamepadRegistry, RumbleTarget, MAX_GAMEPADS};
pub use keyboard_mouse::KeyboardMouse;
