//! # Linux evdev Backend
//!
//! Device discovery and event translation over the Linux evdev interface.
//!
//! ## Device Detection
//!
//! Every `/dev/input/event*` node is opened and classified by the keys it
//! advertises:
//!
//! | Advertises | Kind |
//! |------------|------|
//! | `BTN_SOUTH` | Gamepad |
//! | `KEY_A` or `BTN_LEFT` | Keyboard + Mouse |
//!
//! Anything else is skipped.
//!
//! ## Gamepad Axes (EV_ABS)
//!
//! | Axis | evdev Code | Rescaled to |
//! |------|------------|-------------|
//! | Left Stick X / Y | ABS_X / ABS_Y | -32768..=32767 |
//! | Right Stick X / Y | ABS_RX / ABS_RY | -32768..=32767 |
//! | Left / Right Trigger | ABS_Z / ABS_RZ | 0..=32767 |
//! | D-Pad | ABS_HAT0X / ABS_HAT0Y | d-pad buttons |
//!
//! Raw ranges default to the DualSense's 0-255 and can be overridden per
//! translator.
//!
//! ## Usage
//!
//! ```no_run
//! use action_input::controller::evdev::{scan_devices, EvdevTranslator, DeviceKind};
//!
//! let mut devices = scan_devices("/dev/input")?;
//! let mut translator = EvdevTranslator::gamepad(0);
//!
//! if let Some(device) = devices.iter_mut().find(|d| d.kind() == DeviceKind::Gamepad) {
//!     for event in device.fetch_events()? {
//!         for input in translator.translate(&event) {
//!             println!("{:?}", input);
//!         }
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use evdev::{AbsoluteAxisType, Device, InputEventKind, Key, RelativeAxisType};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::axis::GamepadAxis;
use super::backend::GamepadBackend;
use super::codes::{KeyCode, PadButton};
use super::gamepad::MAX_GAMEPADS;
use super::keyboard_mouse::{PLATFORM_MOUSE_LEFT, PLATFORM_MOUSE_MIDDLE, PLATFORM_MOUSE_RIGHT};
use crate::error::{InputError, Result};
use crate::event::InputEvent;

/// Raw range of an evdev absolute axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub min: i32,
    pub max: i32,
}

impl AxisRange {
    /// DualSense sticks and triggers.
    pub const DUALSENSE: Self = Self { min: 0, max: 255 };

    /// Controllers that already report signed 16-bit sticks.
    pub const SIGNED_16: Self = Self {
        min: i16::MIN as i32,
        max: i16::MAX as i32,
    };

    /// Maps a raw sample onto the full signed 16-bit range.
    #[must_use]
    pub fn rescale_stick(self, value: i32) -> i16 {
        let span = i64::from(self.max - self.min).max(1);
        let offset = i64::from(value.clamp(self.min, self.max) - self.min);
        let scaled = offset * 65535 / span + i64::from(i16::MIN);
        scaled.clamp(i64::from(i16::MIN), i64::from(i16::MAX)) as i16
    }

    /// Maps a raw sample onto 0..=32767.
    #[must_use]
    pub fn rescale_trigger(self, value: i32) -> i16 {
        let span = i64::from(self.max - self.min).max(1);
        let offset = i64::from(value.clamp(self.min, self.max) - self.min);
        (offset * i64::from(i16::MAX) / span) as i16
    }
}

/// What a discovered device is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Gamepad,
    KeyboardMouse,
}

/// Classifies a device from the keys it advertises.
pub fn classify_keys(has_key: impl Fn(Key) -> bool) -> Option<DeviceKind> {
    if has_key(Key::BTN_SOUTH) {
        Some(DeviceKind::Gamepad)
    } else if has_key(Key::KEY_A) || has_key(Key::BTN_LEFT) {
        Some(DeviceKind::KeyboardMouse)
    } else {
        None
    }
}

/// An opened evdev node.
pub struct EvdevDevice {
    device: Device,
    path: PathBuf,
    kind: DeviceKind,
}

impl std::fmt::Debug for EvdevDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevDevice")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("name", &self.device.name())
            .finish()
    }
}

impl EvdevDevice {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Human-readable device name, falling back to the node path.
    #[must_use]
    pub fn name(&self) -> String {
        self.device
            .name()
            .map_or_else(|| self.path.display().to_string(), str::to_string)
    }

    /// Fetches pending events. Blocks until at least one is available.
    ///
    /// # Errors
    ///
    /// Returns `Backend` if the read fails, typically because the device was
    /// unplugged.
    pub fn fetch_events(&mut self) -> Result<impl Iterator<Item = evdev::InputEvent> + '_> {
        self.device
            .fetch_events()
            .map_err(|e| InputError::Backend(format!("Failed to fetch events: {}", e)))
    }
}

/// Opens and classifies every `event*` node under `dir`.
///
/// Nodes that cannot be opened (usually permissions) or that are neither a
/// gamepad nor a keyboard/mouse are skipped. The result is sorted by path.
///
/// # Errors
///
/// Returns `Backend` if `dir` cannot be read.
pub fn scan_devices<P: AsRef<Path>>(dir: P) -> Result<Vec<EvdevDevice>> {
    let dir = dir.as_ref();
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| InputError::Backend(format!("Failed to read {}: {}", dir.display(), e)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    entries.sort_by_key(|entry| entry.path());

    let mut devices = Vec::new();
    for entry in entries {
        let path = entry.path();
        let is_event_node = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with("event"));
        if !is_event_node {
            continue;
        }

        let device = match Device::open(&path) {
            Ok(device) => device,
            Err(e) => {
                debug!("Could not open {}: {}", path.display(), e);
                continue;
            }
        };

        let kind = device
            .supported_keys()
            .and_then(|keys| classify_keys(|key| keys.contains(key)));

        match kind {
            Some(kind) => {
                info!(
                    "Found {:?} device '{}' at {}",
                    kind,
                    device.name().unwrap_or("unnamed"),
                    path.display()
                );
                devices.push(EvdevDevice { device, path, kind });
            }
            None => debug!("Skipping {}", path.display()),
        }
    }

    Ok(devices)
}

const PAD_BUTTONS: &[(Key, PadButton)] = &[
    (Key::BTN_SOUTH, PadButton::A),
    (Key::BTN_EAST, PadButton::B),
    (Key::BTN_WEST, PadButton::X),
    (Key::BTN_NORTH, PadButton::Y),
    (Key::BTN_SELECT, PadButton::BACK),
    (Key::BTN_MODE, PadButton::GUIDE),
    (Key::BTN_START, PadButton::START),
    (Key::BTN_THUMBL, PadButton::LEFT_STICK),
    (Key::BTN_THUMBR, PadButton::RIGHT_STICK),
    (Key::BTN_TL, PadButton::LEFT_SHOULDER),
    (Key::BTN_TR, PadButton::RIGHT_SHOULDER),
    (Key::BTN_DPAD_UP, PadButton::DPAD_UP),
    (Key::BTN_DPAD_DOWN, PadButton::DPAD_DOWN),
    (Key::BTN_DPAD_LEFT, PadButton::DPAD_LEFT),
    (Key::BTN_DPAD_RIGHT, PadButton::DPAD_RIGHT),
];

const KEYS: &[(Key, KeyCode)] = &[
    (Key::KEY_A, KeyCode::A),
    (Key::KEY_B, KeyCode::B),
    (Key::KEY_C, KeyCode::C),
    (Key::KEY_D, KeyCode::D),
    (Key::KEY_E, KeyCode::E),
    (Key::KEY_F, KeyCode::F),
    (Key::KEY_G, KeyCode::G),
    (Key::KEY_H, KeyCode::H),
    (Key::KEY_I, KeyCode::I),
    (Key::KEY_J, KeyCode::J),
    (Key::KEY_K, KeyCode::K),
    (Key::KEY_L, KeyCode::L),
    (Key::KEY_M, KeyCode::M),
    (Key::KEY_N, KeyCode::N),
    (Key::KEY_O, KeyCode::O),
    (Key::KEY_P, KeyCode::P),
    (Key::KEY_Q, KeyCode::Q),
    (Key::KEY_R, KeyCode::R),
    (Key::KEY_S, KeyCode::S),
    (Key::KEY_T, KeyCode::T),
    (Key::KEY_U, KeyCode::U),
    (Key::KEY_V, KeyCode::V),
    (Key::KEY_W, KeyCode::W),
    (Key::KEY_X, KeyCode::X),
    (Key::KEY_Y, KeyCode::Y),
    (Key::KEY_Z, KeyCode::Z),
    (Key::KEY_0, KeyCode::D0),
    (Key::KEY_1, KeyCode::D1),
    (Key::KEY_2, KeyCode::D2),
    (Key::KEY_3, KeyCode::D3),
    (Key::KEY_4, KeyCode::D4),
    (Key::KEY_5, KeyCode::D5),
    (Key::KEY_6, KeyCode::D6),
    (Key::KEY_7, KeyCode::D7),
    (Key::KEY_8, KeyCode::D8),
    (Key::KEY_9, KeyCode::D9),
    (Key::KEY_SPACE, KeyCode::SPACE),
    (Key::KEY_ENTER, KeyCode::ENTER),
    (Key::KEY_ESC, KeyCode::ESCAPE),
    (Key::KEY_TAB, KeyCode::TAB),
    (Key::KEY_BACKSPACE, KeyCode::BACKSPACE),
    (Key::KEY_DELETE, KeyCode::DELETE),
    (Key::KEY_MINUS, KeyCode::MINUS),
    (Key::KEY_EQUAL, KeyCode::EQUALS),
    (Key::KEY_COMMA, KeyCode::COMMA),
    (Key::KEY_DOT, KeyCode::PERIOD),
    (Key::KEY_SLASH, KeyCode::SLASH),
    (Key::KEY_SEMICOLON, KeyCode::SEMICOLON),
    (Key::KEY_APOSTROPHE, KeyCode::QUOTE),
    (Key::KEY_GRAVE, KeyCode::GRAVE),
    (Key::KEY_LEFTBRACE, KeyCode::LEFT_BRACKET),
    (Key::KEY_RIGHTBRACE, KeyCode::RIGHT_BRACKET),
    (Key::KEY_BACKSLASH, KeyCode::BACKSLASH),
    (Key::KEY_UP, KeyCode::UP),
    (Key::KEY_DOWN, KeyCode::DOWN),
    (Key::KEY_LEFT, KeyCode::LEFT),
    (Key::KEY_RIGHT, KeyCode::RIGHT),
    (Key::KEY_INSERT, KeyCode::INSERT),
    (Key::KEY_HOME, KeyCode::HOME),
    (Key::KEY_END, KeyCode::END),
    (Key::KEY_PAGEUP, KeyCode::PAGE_UP),
    (Key::KEY_PAGEDOWN, KeyCode::PAGE_DOWN),
    (Key::KEY_CAPSLOCK, KeyCode::CAPS_LOCK),
    (Key::KEY_LEFTSHIFT, KeyCode::LEFT_SHIFT),
    (Key::KEY_RIGHTSHIFT, KeyCode::RIGHT_SHIFT),
    (Key::KEY_LEFTCTRL, KeyCode::LEFT_CTRL),
    (Key::KEY_RIGHTCTRL, KeyCode::RIGHT_CTRL),
    (Key::KEY_LEFTALT, KeyCode::LEFT_ALT),
    (Key::KEY_RIGHTALT, KeyCode::RIGHT_ALT),
    (Key::KEY_F1, KeyCode::F1),
    (Key::KEY_F2, KeyCode::F2),
    (Key::KEY_F3, KeyCode::F3),
    (Key::KEY_F4, KeyCode::F4),
    (Key::KEY_F5, KeyCode::F5),
    (Key::KEY_F6, KeyCode::F6),
    (Key::KEY_F7, KeyCode::F7),
    (Key::KEY_F8, KeyCode::F8),
    (Key::KEY_F9, KeyCode::F9),
    (Key::KEY_F10, KeyCode::F10),
    (Key::KEY_F11, KeyCode::F11),
    (Key::KEY_F12, KeyCode::F12),
];

fn lookup<T: Copy>(table: &[(Key, T)], key: Key) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Gamepad(usize),
    KeyboardMouse,
}

/// Converts raw evdev events from one device into [`InputEvent`]s.
///
/// Relative mouse motion is accumulated into an absolute position.
#[derive(Debug, Clone)]
pub struct EvdevTranslator {
    target: Target,
    stick_range: AxisRange,
    trigger_range: AxisRange,
    mouse: (i32, i32),
}

impl EvdevTranslator {
    /// Translator for the gamepad feeding `port`.
    #[must_use]
    pub fn gamepad(port: usize) -> Self {
        Self {
            target: Target::Gamepad(port),
            stick_range: AxisRange::DUALSENSE,
            trigger_range: AxisRange::DUALSENSE,
            mouse: (0, 0),
        }
    }

    /// Translator for a keyboard, mouse, or combined device.
    #[must_use]
    pub fn keyboard_mouse() -> Self {
        Self {
            target: Target::KeyboardMouse,
            ..Self::gamepad(0)
        }
    }

    /// Overrides the raw stick and trigger ranges.
    #[must_use]
    pub fn with_ranges(mut self, stick_range: AxisRange, trigger_range: AxisRange) -> Self {
        self.stick_range = stick_range;
        self.trigger_range = trigger_range;
        self
    }

    /// Gamepad port this translator feeds, if any.
    #[must_use]
    pub fn port(&self) -> Option<usize> {
        match self.target {
            Target::Gamepad(port) => Some(port),
            Target::KeyboardMouse => None,
        }
    }

    /// Translates one raw event.
    ///
    /// Synchronization events produce nothing. A d-pad hat change produces
    /// two button events. Anything else unmapped becomes
    /// [`InputEvent::Unrecognized`].
    pub fn translate(&mut self, event: &evdev::InputEvent) -> Vec<InputEvent> {
        let value = event.value();
        match (event.kind(), self.target) {
            (InputEventKind::Synchronization(_), _) => Vec::new(),
            (InputEventKind::Key(key), Target::Gamepad(port)) => {
                let pressed = value != 0;
                vec![lookup(PAD_BUTTONS, key).map_or(InputEvent::Unrecognized, |button| {
                    InputEvent::GamepadButton { port, button, pressed }
                })]
            }
            (InputEventKind::AbsAxis(axis), Target::Gamepad(port)) => self.translate_abs(port, axis, value),
            (InputEventKind::Key(key), Target::KeyboardMouse) => vec![Self::translate_key(key, value != 0)],
            (InputEventKind::RelAxis(axis), Target::KeyboardMouse) => vec![self.translate_rel(axis, value)],
            _ => vec![InputEvent::Unrecognized],
        }
    }

    fn translate_abs(&self, port: usize, axis: AbsoluteAxisType, value: i32) -> Vec<InputEvent> {
        let stick = |axis| InputEvent::GamepadAxis {
            port,
            axis,
            value: self.stick_range.rescale_stick(value),
        };
        let trigger = |axis| InputEvent::GamepadAxis {
            port,
            axis,
            value: self.trigger_range.rescale_trigger(value),
        };
        let hat = |negative, positive| {
            vec![
                InputEvent::GamepadButton { port, button: negative, pressed: value < 0 },
                InputEvent::GamepadButton { port, button: positive, pressed: value > 0 },
            ]
        };

        match axis {
            AbsoluteAxisType::ABS_X => vec![stick(GamepadAxis::LeftX)],
            AbsoluteAxisType::ABS_Y => vec![stick(GamepadAxis::LeftY)],
            AbsoluteAxisType::ABS_RX => vec![stick(GamepadAxis::RightX)],
            AbsoluteAxisType::ABS_RY => vec![stick(GamepadAxis::RightY)],
            AbsoluteAxisType::ABS_Z => vec![trigger(GamepadAxis::TriggerLeft)],
            AbsoluteAxisType::ABS_RZ => vec![trigger(GamepadAxis::TriggerRight)],
            AbsoluteAxisType::ABS_HAT0X => hat(PadButton::DPAD_LEFT, PadButton::DPAD_RIGHT),
            AbsoluteAxisType::ABS_HAT0Y => hat(PadButton::DPAD_UP, PadButton::DPAD_DOWN),
            // Gyro, accelerometer, touchpad
            _ => vec![InputEvent::Unrecognized],
        }
    }

    fn translate_key(key: Key, pressed: bool) -> InputEvent {
        let mouse_button = match key {
            Key::BTN_LEFT => Some(PLATFORM_MOUSE_LEFT),
            Key::BTN_MIDDLE => Some(PLATFORM_MOUSE_MIDDLE),
            Key::BTN_RIGHT => Some(PLATFORM_MOUSE_RIGHT),
            _ => None,
        };

        if let Some(button) = mouse_button {
            return InputEvent::MouseButton { button, pressed };
        }

        lookup(KEYS, key).map_or(InputEvent::Unrecognized, |key| InputEvent::Key { key, pressed })
    }

    fn translate_rel(&mut self, axis: RelativeAxisType, value: i32) -> InputEvent {
        match axis {
            RelativeAxisType::REL_WHEEL => InputEvent::MouseWheel { delta: value },
            RelativeAxisType::REL_X => {
                self.mouse.0 = self.mouse.0.saturating_add(value);
                InputEvent::MouseMotion { x: self.mouse.0, y: self.mouse.1 }
            }
            RelativeAxisType::REL_Y => {
                self.mouse.1 = self.mouse.1.saturating_add(value);
                InputEvent::MouseMotion { x: self.mouse.0, y: self.mouse.1 }
            }
            _ => InputEvent::Unrecognized,
        }
    }
}

/// [`GamepadBackend`] over gamepads discovered with [`scan_devices`].
///
/// Reading is done by whoever owns the [`EvdevDevice`]s; this backend only
/// answers for the port names.
#[derive(Debug, Clone, Default)]
pub struct EvdevGamepads {
    names: Vec<String>,
}

impl EvdevGamepads {
    /// Assigns ports in order; devices past the last port are dropped.
    pub fn new<I: IntoIterator<Item = String>>(names: I) -> Self {
        Self {
            names: names.into_iter().take(MAX_GAMEPADS).collect(),
        }
    }

    /// Backend for the gamepads in `devices`, in order.
    #[must_use]
    pub fn from_devices(devices: &[EvdevDevice]) -> Self {
        Self::new(
            devices
                .iter()
                .filter(|device| device.kind() == DeviceKind::Gamepad)
                .map(EvdevDevice::name),
        )
    }

    /// Number of ports with a device behind them.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl GamepadBackend for EvdevGamepads {
    fn open(&mut self, port: usize) -> Result<String> {
        self.names
            .get(port)
            .cloned()
            .ok_or_else(|| InputError::Backend(format!("No evdev gamepad behind port {}", port)))
    }

    fn close(&mut self, port: usize) {
        debug!("Released evdev gamepad on port {}", port);
    }

    fn refresh(&mut self) {}

    fn rumble(&mut self, port: usize, _low: u16, _high: u16, _duration_ms: u32) -> Result<()> {
        Err(InputError::Backend(format!(
            "Rumble is not supported over evdev (port {})",
            port
        )))
    }
}
