//! # Action Input Library
//!
//! Device-agnostic input: game code asks for named actions ("jump",
//! "moveforward") and gets a float, whether the player is on a keyboard and
//! mouse or on a gamepad.
//!
//! The [`context::InputContext`] owns all state. Feed it [`event::InputEvent`]s,
//! register actions, then query them once per frame.

pub mod action;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod event;

pub use context::{DeviceClass, InputContext};
pub use error::{InputError, Result};
pub use event::{EventSource, InputEvent};
