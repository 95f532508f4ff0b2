//! Trait abstraction for the platform gamepad subsystem to enable testing

use crate::error::Result;

/// Maximum rumble motor intensity.
pub const RUMBLE_MAX: u16 = u16::MAX;

/// Half rumble motor intensity.
pub const RUMBLE_HALF: u16 = RUMBLE_MAX / 2;

/// Default rumble duration in milliseconds.
pub const RUMBLE_DEFAULT_MS: u32 = 1000;

/// Device-level operations the gamepad registry delegates to the platform.
#[cfg_attr(test, mockall::automock)]
pub trait GamepadBackend {
    /// Open the device behind `port` and return its display name
    fn open(&mut self, port: usize) -> Result<String>;

    /// Release the device behind `port`
    fn close(&mut self, port: usize);

    /// Refresh the platform's internal axis/button cache
    fn refresh(&mut self);

    /// Fire-and-forget rumble command
    fn rumble(&mut self, port: usize, low: u16, high: u16, duration_ms: u32) -> Result<()>;
}

/// Backend for headless use and for event sources that already carry
/// everything the core needs.
///
/// Every port opens as "Gamepad N"; rumble is accepted and dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessBackend;

impl GamepadBackend for HeadlessBackend {
    fn open(&mut self, port: usize) -> Result<String> {
        Ok(format!("Gamepad {}", port + 1))
    }

    fn close(&mut self, _port: usize) {}

    fn refresh(&mut self) {}

    fn rumble(&mut self, _port: usize, _low: u16, _high: u16, _duration_ms: u32) -> Result<()> {
        Ok(())
    }
}
