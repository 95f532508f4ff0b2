//! # Input Events
//!
//! The tagged event records the core consumes, and the [`EventSource`] seam
//! that produces them.
//!
//! | Event | Payload | Device class |
//! |-------|---------|--------------|
//! | `GamepadConnected` | port | Gamepad |
//! | `GamepadDisconnected` | port | Keyboard + Mouse |
//! | `GamepadButton` | port, button, pressed | Gamepad |
//! | `GamepadAxis` | port, axis, raw i16 | Gamepad |
//! | `Key` | key code, pressed | Keyboard + Mouse |
//! | `MouseButton` | platform button number, pressed | Keyboard + Mouse |
//! | `MouseWheel` | vertical delta | none |
//! | `MouseMotion` | absolute x, y | none |
//! | `Unrecognized` | none | none |

use std::collections::VecDeque;

use crate::controller::axis::GamepadAxis;
use crate::controller::codes::{KeyCode, PadButton};

/// One discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    GamepadConnected { port: usize },
    GamepadDisconnected { port: usize },
    GamepadButton { port: usize, button: PadButton, pressed: bool },
    GamepadAxis { port: usize, axis: GamepadAxis, value: i16 },
    Key { key: KeyCode, pressed: bool },
    /// `button` uses platform numbering: 1 left, 2 middle, 3 right.
    MouseButton { button: u8, pressed: bool },
    MouseWheel { delta: i32 },
    MouseMotion { x: i32, y: i32 },
    /// Any event kind the core does not handle.
    Unrecognized,
}

/// Producer of input events, drained by `InputContext::poll_events`.
pub trait EventSource {
    /// Returns the next pending event, or `None` when drained.
    fn poll(&mut self) -> Option<InputEvent>;
}

/// In-memory FIFO source, for scripted input and tests.
#[derive(Debug, Clone, Default)]
pub struct QueuedEvents {
    queue: VecDeque<InputEvent>,
}

impl QueuedEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl FromIterator<InputEvent> for QueuedEvents {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self {
            queue: iter.into_iter().collect(),
        }
    }
}

impl EventSource for QueuedEvents {
    fn poll(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }
}
