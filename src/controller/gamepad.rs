//! # Gamepad Device Registry
//!
//! Fixed-capacity array of gamepad slots with a connect/disconnect lifecycle.
//!
//! ## Slot States
//!
//! | State | Name | Enabled | Buttons / Axes |
//! |-------|------|---------|----------------|
//! | Empty | none | false | no entries, neutral |
//! | Open | device name | true | last recorded values |
//!
//! `connect` moves Empty → Open, `disconnect` moves Open → Empty. Both flush
//! the slot so stale input never survives a reconnect.
//!
//! ## Button Values
//!
//! Physical buttons read 1.0/0.0 from the slot's button store. Pseudo-buttons
//! (triggers, stick directions) resolve through the [`AxisNormalizer`]
//! against the slot's last axis samples.

use tracing::{debug, info, warn};

use super::axis::{pseudo_source, AxisNormalizer, GamepadAxis, Stick};
use super::backend::GamepadBackend;
use super::buttons::ButtonStore;
use super::codes::PadButton;
use crate::error::{InputError, Result};

/// Number of gamepad ports.
pub const MAX_GAMEPADS: usize = 4;

/// Port read by action queries that don't name one.
pub const PRIMARY_PORT: usize = 0;

/// Target of a rumble command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RumbleTarget {
    /// Every open slot.
    All,
    Port(usize),
}

/// One gamepad port.
#[derive(Debug, Clone, Default)]
pub struct GamepadSlot {
    /// Display name; `Some` while a device is open.
    name: Option<String>,
    buttons: ButtonStore<PadButton>,
    axes: [i16; GamepadAxis::COUNT],
}

impl GamepadSlot {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.name.is_some()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.buttons.is_enabled()
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Last raw sample for `axis`.
    #[must_use]
    pub fn axis(&self, axis: GamepadAxis) -> i16 {
        self.axes[axis.index()]
    }

    /// Number of buttons with a recorded state.
    #[must_use]
    pub fn recorded_buttons(&self) -> usize {
        self.buttons.len()
    }

    fn accepts_input(&self) -> bool {
        self.is_open() && self.is_enabled()
    }

    fn flush(&mut self) {
        self.buttons.flush();
        self.axes = [0; GamepadAxis::COUNT];
    }

    fn button_value(&self, button: PadButton, normalizer: &AxisNormalizer) -> f32 {
        if !self.is_enabled() {
            return 0.0;
        }

        if button.is_physical() {
            return self.buttons.value(button);
        }

        match pseudo_source(button) {
            Some(source) => normalizer.pseudo_value(source, self.axis(source.axis)),
            None => 0.0,
        }
    }
}

/// Owns every gamepad slot and the platform backend behind them.
pub struct GamepadRegistry<B> {
    backend: B,
    slots: [GamepadSlot; MAX_GAMEPADS],
    normalizer: AxisNormalizer,
}

impl<B> std::fmt::Debug for GamepadRegistry<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GamepadRegistry")
            .field("slots", &self.slots)
            .field("normalizer", &self.normalizer)
            .finish_non_exhaustive()
    }
}

impl<B: GamepadBackend> GamepadRegistry<B> {
    /// Creates a registry with every slot empty.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            slots: Default::default(),
            normalizer: AxisNormalizer::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn normalizer(&self) -> &AxisNormalizer {
        &self.normalizer
    }

    pub fn set_normalizer(&mut self, normalizer: AxisNormalizer) {
        self.normalizer = normalizer;
    }

    /// Returns the slot for `port`, if the port exists.
    pub fn slot(&self, port: usize) -> Option<&GamepadSlot> {
        self.slots.get(port)
    }

    fn check_port(port: usize) -> Result<()> {
        if port >= MAX_GAMEPADS {
            return Err(InputError::PortOutOfRange {
                port,
                max: MAX_GAMEPADS,
            });
        }
        Ok(())
    }

    /// Opens the device behind `port`.
    ///
    /// # Errors
    ///
    /// - `PortOutOfRange`: `port >= MAX_GAMEPADS`
    /// - `PortInUse`: the slot already holds an open device (left untouched)
    /// - `Backend`: the platform failed to open the device (slot stays empty)
    pub fn connect(&mut self, port: usize) -> Result<()> {
        Self::check_port(port)?;
        if self.slots[port].is_open() {
            return Err(InputError::PortInUse(port));
        }

        let name = self.backend.open(port)?;
        info!("Connected gamepad '{}' into port {}", name, port);

        let slot = &mut self.slots[port];
        slot.name = Some(name);
        slot.buttons.enable();
        slot.flush();
        Ok(())
    }

    /// Releases the device behind `port`. No-op on an empty slot.
    ///
    /// # Errors
    ///
    /// Returns `PortOutOfRange` if `port >= MAX_GAMEPADS`.
    pub fn disconnect(&mut self, port: usize) -> Result<()> {
        Self::check_port(port)?;
        if !self.slots[port].is_open() {
            debug!("Disconnect on empty port {} ignored", port);
            return Ok(());
        }

        info!("Disconnecting gamepad {}", port);
        let slot = &mut self.slots[port];
        slot.flush();
        self.backend.close(port);
        slot.name = None;
        slot.buttons.disable();
        Ok(())
    }

    #[must_use]
    pub fn is_open(&self, port: usize) -> bool {
        self.slots.get(port).is_some_and(GamepadSlot::is_open)
    }

    /// Display name of the device in `port`.
    #[must_use]
    pub fn name(&self, port: usize) -> Option<&str> {
        self.slots.get(port).and_then(GamepadSlot::name)
    }

    /// Number of open slots.
    #[must_use]
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_open()).count()
    }

    /// Records a physical button state. Returns false if the slot rejected it.
    pub fn set_button(&mut self, port: usize, button: PadButton, down: bool) -> bool {
        match self.slots.get_mut(port) {
            Some(slot) if slot.accepts_input() => {
                slot.buttons.set(button, down);
                true
            }
            _ => false,
        }
    }

    /// Records a raw axis sample. Returns false if the slot rejected it.
    pub fn set_axis(&mut self, port: usize, axis: GamepadAxis, raw: i16) -> bool {
        match self.slots.get_mut(port) {
            Some(slot) if slot.accepts_input() => {
                slot.axes[axis.index()] = raw;
                true
            }
            _ => false,
        }
    }

    /// Reads `button` on `port` as a float.
    ///
    /// Empty or unknown ports read 0.0.
    #[must_use]
    pub fn button_value(&self, button: PadButton, port: usize) -> f32 {
        self.slots
            .get(port)
            .map_or(0.0, |slot| slot.button_value(button, &self.normalizer))
    }

    /// Normalized gated reading of one axis.
    #[must_use]
    pub fn axis_float(&self, port: usize, axis: GamepadAxis, flip: bool) -> f32 {
        match self.slots.get(port) {
            Some(slot) if slot.is_enabled() => self.normalizer.axis_float(axis, slot.axis(axis), flip),
            _ => 0.0,
        }
    }

    /// Signed (x, y) deflection of a stick with the deadzone applied.
    #[must_use]
    pub fn stick_vector(&self, port: usize, stick: Stick) -> (f32, f32) {
        match self.slots.get(port) {
            Some(slot) if slot.is_enabled() => {
                let (x_axis, y_axis) = stick.axes();
                (
                    self.normalizer.stick_value(x_axis, slot.axis(x_axis)),
                    self.normalizer.stick_value(y_axis, slot.axis(y_axis)),
                )
            }
            _ => (0.0, 0.0),
        }
    }

    /// Clears the button and axis state of `port`. Safe on empty slots.
    pub fn flush(&mut self, port: usize) {
        if let Some(slot) = self.slots.get_mut(port) {
            slot.flush();
        }
    }

    pub fn flush_all(&mut self) {
        for slot in &mut self.slots {
            slot.flush();
        }
    }

    /// Asks the platform to refresh its device cache.
    pub fn refresh(&mut self) {
        self.backend.refresh();
    }

    /// Sends a rumble command to one port or to every open port.
    ///
    /// Returns the number of devices the command reached. Closed ports are
    /// skipped. A backend failure on one port does not stop the others.
    ///
    /// # Errors
    ///
    /// Returns `PortOutOfRange` for a bad port, or the first backend error
    /// once every port has been tried.
    pub fn rumble(&mut self, target: RumbleTarget, low: u16, high: u16, duration_ms: u32) -> Result<usize> {
        let ports: Vec<usize> = match target {
            RumbleTarget::All => (0..MAX_GAMEPADS).filter(|&port| self.is_open(port)).collect(),
            RumbleTarget::Port(port) => {
                Self::check_port(port)?;
                if self.is_open(port) {
                    vec![port]
                } else {
                    Vec::new()
                }
            }
        };

        let mut reached = 0;
        let mut first_error = None;
        for &port in &ports {
            match self.backend.rumble(port, low, high, duration_ms) {
                Ok(()) => reached += 1,
                Err(e) => {
                    warn!("Rumble on port {} failed: {}", port, e);
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(reached),
        }
    }
}
