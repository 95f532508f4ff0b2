//! # Input Context
//!
//! The single owner of all input state: the keyboard+mouse device, the
//! gamepad registry, the action registry and the active-device arbiter.
//!
//! ## Active Device
//!
//! Exactly one [`DeviceClass`] is active. Every recognized button or axis
//! event switches it to the class that produced the event, so action queries
//! always follow the device the user touched last. Gamepad events only count
//! while their port is connected. Connecting a gamepad forces `Gamepad`,
//! disconnecting one forces `KeyboardMouse`.
//!
//! ## Usage
//!
//! ```
//! use action_input::context::{DeviceClass, InputContext};
//! use action_input::controller::codes::{KeyCode, PadButton};
//! use action_input::event::InputEvent;
//!
//! let mut input = InputContext::headless();
//! input.register_action("jump", KeyCode::SPACE, PadButton::A, false);
//!
//! input.dispatch(InputEvent::Key { key: KeyCode::SPACE, pressed: true });
//! assert_eq!(input.active_device(), DeviceClass::KeyboardMouse);
//! assert_eq!(input.action_input("jump")?, 1.0);
//! assert_eq!(input.action_input("jump")?, 0.0); // edge-triggered
//! # Ok::<(), action_input::error::InputError>(())
//! ```

use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::action::{Action, ActionRegistry};
use crate::config::{ActionConfig, Bindings};
use crate::controller::axis::Stick;
use crate::controller::backend::{GamepadBackend, HeadlessBackend};
use crate::controller::codes::{KeyCode, PadButton};
use crate::controller::gamepad::{GamepadRegistry, RumbleTarget, PRIMARY_PORT};
use crate::controller::keyboard_mouse::{remap_mouse_button, KeyboardMouse};
use crate::error::{InputError, Result};
use crate::event::{EventSource, InputEvent};

/// Device class that answers action queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    #[default]
    KeyboardMouse,
    Gamepad,
}

impl DeviceClass {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeyboardMouse => "KeyboardMouse",
            Self::Gamepad => "GamePad",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns every piece of input state.
///
/// # Thread Safety
///
/// `InputContext` is not thread-safe. Dispatch and query from one thread.
#[derive(Debug)]
pub struct InputContext<B> {
    keyboard_mouse: KeyboardMouse,
    gamepads: GamepadRegistry<B>,
    actions: ActionRegistry,
    active: DeviceClass,
}

impl InputContext<HeadlessBackend> {
    /// Context without a platform device layer.
    #[must_use]
    pub fn headless() -> Self {
        Self::new(HeadlessBackend)
    }
}

impl<B: GamepadBackend> InputContext<B> {
    /// Creates a context with keyboard+mouse active and enabled.
    pub fn new(backend: B) -> Self {
        let mut keyboard_mouse = KeyboardMouse::new();
        keyboard_mouse.enable();

        Self {
            keyboard_mouse,
            gamepads: GamepadRegistry::new(backend),
            actions: ActionRegistry::new(),
            active: DeviceClass::KeyboardMouse,
        }
    }

    // ==================== Arbiter ====================

    #[must_use]
    pub fn active_device(&self) -> DeviceClass {
        self.active
    }

    /// Switches the active device class. No-op when unchanged.
    ///
    /// Switching to `KeyboardMouse` re-enables the keyboard+mouse device.
    pub fn set_active_device(&mut self, class: DeviceClass) {
        if self.active == class {
            return;
        }

        if class == DeviceClass::KeyboardMouse {
            self.keyboard_mouse.enable();
        }

        info!("{} is now the current device", class);
        self.active = class;
    }

    // ==================== Dispatcher ====================

    /// Routes one event into the device stores and the arbiter.
    ///
    /// When the gamepad class is active afterwards, the backend is asked to
    /// refresh its device cache.
    pub fn dispatch(&mut self, event: InputEvent) {
        match event {
            InputEvent::GamepadConnected { port } => {
                self.connect_gamepad(port);
            }
            InputEvent::GamepadDisconnected { port } => {
                self.disconnect_gamepad(port);
            }
            InputEvent::GamepadButton { port, button, pressed } => {
                if self.gamepads.set_button(port, button, pressed) {
                    self.set_active_device(DeviceClass::Gamepad);
                } else {
                    debug!("Ignoring button {} from unconnected port {}", button, port);
                }
            }
            InputEvent::GamepadAxis { port, axis, value } => {
                if self.gamepads.set_axis(port, axis, value) {
                    self.set_active_device(DeviceClass::Gamepad);
                }
            }
            InputEvent::Key { key, pressed } => {
                self.keyboard_mouse.set_button(key, pressed);
                self.set_active_device(DeviceClass::KeyboardMouse);
            }
            InputEvent::MouseButton { button, pressed } => match remap_mouse_button(button) {
                Some(key) => {
                    self.keyboard_mouse.set_button(key, pressed);
                    self.set_active_device(DeviceClass::KeyboardMouse);
                }
                None => debug!("Ignoring mouse button {}", button),
            },
            InputEvent::MouseWheel { delta } => {
                self.keyboard_mouse.set_wheel(delta);
            }
            InputEvent::MouseMotion { x, y } => {
                self.keyboard_mouse.set_mouse_position(x, y);
            }
            InputEvent::Unrecognized => {}
        }

        if self.active == DeviceClass::Gamepad {
            self.gamepads.refresh();
        }
    }

    /// Drains `source`, dispatching every event. Returns the number handled.
    pub fn poll_events<S: EventSource + ?Sized>(&mut self, source: &mut S) -> usize {
        let mut count = 0;
        while let Some(event) = source.poll() {
            self.dispatch(event);
            count += 1;
        }
        count
    }

    /// Opens the gamepad in `port` and makes the gamepad class active.
    ///
    /// Failures are logged and leave every slot as it was.
    pub fn connect_gamepad(&mut self, port: usize) {
        if let Err(e) = self.gamepads.connect(port) {
            warn!("Failed to connect gamepad to port {}: {}", port, e);
        }

        if self.gamepads.is_open(port) {
            self.set_active_device(DeviceClass::Gamepad);
        }
    }

    /// Releases the gamepad in `port` and makes keyboard+mouse active.
    ///
    /// An out-of-range port is logged and changes nothing.
    pub fn disconnect_gamepad(&mut self, port: usize) {
        match self.gamepads.disconnect(port) {
            Ok(()) => self.set_active_device(DeviceClass::KeyboardMouse),
            Err(e) => warn!("Failed to disconnect gamepad from port {}: {}", port, e),
        }
    }

    // ==================== Actions ====================

    /// Creates or overwrites an action. `consistent = true` makes it held.
    pub fn register_action(&mut self, name: &str, key: KeyCode, button: PadButton, consistent: bool) {
        self.actions.register(name, key, button, consistent);
    }

    /// Rebinds an action, creating it edge-triggered when missing.
    pub fn modify_action(&mut self, name: &str, key: KeyCode, button: PadButton) {
        self.actions.modify(name, key, button);
    }

    #[must_use]
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    #[must_use]
    pub fn actions(&self) -> &ActionRegistry {
        &self.actions
    }

    /// Reads an action from the active device class.
    ///
    /// Gamepad bindings read the primary port.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction` if no action is registered under `name`.
    pub fn action_input(&mut self, name: &str) -> Result<f32> {
        self.action_input_on(name, PRIMARY_PORT)
    }

    /// Reads an action, using `port` for gamepad bindings.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction` if no action is registered under `name`.
    pub fn action_input_on(&mut self, name: &str, port: usize) -> Result<f32> {
        let action = self
            .actions
            .get_mut(name)
            .ok_or_else(|| InputError::UnknownAction(name.to_string()))?;

        let raw = match self.active {
            DeviceClass::KeyboardMouse => self.keyboard_mouse.button_value(action.key),
            DeviceClass::Gamepad => self.gamepads.button_value(action.button, port),
        };

        Ok(action.resolve(raw))
    }

    /// Applies validated bindings from a binding file.
    ///
    /// Analog limits are replaced only when the file sets them.
    ///
    /// Entries with an explicit `consistent` flag are re-registered in that
    /// mode; all others go through [`InputContext::modify_action`].
    pub fn apply_bindings(&mut self, bindings: &Bindings) {
        if let Some(normalizer) = bindings.normalizer {
            self.gamepads.set_normalizer(normalizer);
        }
        for binding in &bindings.actions {
            match binding.consistent {
                Some(consistent) => {
                    self.register_action(&binding.name, binding.key, binding.button, consistent);
                }
                None => self.modify_action(&binding.name, binding.key, binding.button),
            }
        }
    }

    /// Loads a binding file and applies it.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the file is missing or invalid. Nothing is
    /// applied in that case.
    pub fn try_load_actions_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let bindings = ActionConfig::load(path)?;
        self.apply_bindings(&bindings);
        Ok(bindings.actions.len())
    }

    /// Loads a binding file, logging any failure.
    ///
    /// Returns false and keeps every existing action on failure.
    pub fn load_actions_from_file<P: AsRef<Path>>(&mut self, path: P) -> bool {
        let path = path.as_ref();
        match self.try_load_actions_from_file(path) {
            Ok(count) => {
                info!("Loaded {} action bindings from {}", count, path.display());
                true
            }
            Err(e) => {
                warn!("Failed to load actions from {}: {}", path.display(), e);
                false
            }
        }
    }

    // ==================== Devices ====================

    #[must_use]
    pub fn keyboard_mouse(&self) -> &KeyboardMouse {
        &self.keyboard_mouse
    }

    pub fn keyboard_mouse_mut(&mut self) -> &mut KeyboardMouse {
        &mut self.keyboard_mouse
    }

    #[must_use]
    pub fn gamepads(&self) -> &GamepadRegistry<B> {
        &self.gamepads
    }

    pub fn gamepads_mut(&mut self) -> &mut GamepadRegistry<B> {
        &mut self.gamepads
    }

    /// Number of connected gamepads.
    #[must_use]
    pub fn gamepad_count(&self) -> usize {
        self.gamepads.count()
    }

    /// Display name of the gamepad in `port`.
    #[must_use]
    pub fn gamepad_name(&self, port: usize) -> Option<&str> {
        self.gamepads.name(port)
    }

    #[must_use]
    pub fn mouse_position(&self) -> (i32, i32) {
        self.keyboard_mouse.mouse_position()
    }

    pub fn set_mouse_position(&mut self, x: i32, y: i32) {
        self.keyboard_mouse.set_mouse_position(x, y);
    }

    pub fn mod_mouse_position(&mut self, dx: i32, dy: i32) {
        self.keyboard_mouse.mod_mouse_position(dx, dy);
    }

    pub fn on_mouse_wheel_up(&mut self) -> bool {
        self.keyboard_mouse.on_wheel_up()
    }

    pub fn on_mouse_wheel_down(&mut self) -> bool {
        self.keyboard_mouse.on_wheel_down()
    }

    /// Offsets the mouse by the truncated deflection of a stick.
    ///
    /// Only a fully deflected stick moves the cursor, one unit per call.
    pub fn update_stick_as_mouse(&mut self, port: usize, stick: Stick) {
        let (x, y) = self.gamepads.stick_vector(port, stick);
        let (dx, dy) = (x as i32, y as i32);
        if dx != 0 || dy != 0 {
            self.keyboard_mouse.mod_mouse_position(dx, dy);
        }
    }

    /// Sends a fire-and-forget rumble command. Failures are logged.
    pub fn rumble(&mut self, target: RumbleTarget, low: u16, high: u16, duration_ms: u32) {
        match self.gamepads.rumble(target, low, high, duration_ms) {
            Ok(0) => debug!("Rumble {:?} reached no connected gamepad", target),
            Ok(_) => {}
            Err(e) => warn!("Rumble {:?} failed: {}", target, e),
        }
    }

    // ==================== Flush ====================

    /// Clears recorded button state for one device class.
    pub fn flush(&mut self, class: DeviceClass) {
        match class {
            DeviceClass::KeyboardMouse => self.keyboard_mouse.flush(),
            DeviceClass::Gamepad => self.gamepads.flush_all(),
        }
    }

    pub fn flush_all(&mut self) {
        self.flush(DeviceClass::KeyboardMouse);
        self.flush(DeviceClass::Gamepad);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::axis::GamepadAxis;
    use crate::controller::backend::mocks::{BackendCall, RecordingBackend};
    use crate::controller::gamepad::MAX_GAMEPADS;
    use crate::event::QueuedEvents;

    fn context() -> (InputContext<RecordingBackend>, RecordingBackend) {
        let backend = RecordingBackend::new();
        (InputContext::new(backend.clone()), backend)
    }

    fn key(key: KeyCode, pressed: bool) -> InputEvent {
        InputEvent::Key { key, pressed }
    }

    fn pad_button(port: usize, button: PadButton, pressed: bool) -> InputEvent {
        InputEvent::GamepadButton { port, button, pressed }
    }

    fn pad_axis(port: usize, axis: GamepadAxis, value: i16) -> InputEvent {
        InputEvent::GamepadAxis { port, axis, value }
    }

    // ==================== Arbiter Tests ====================

    #[test]
    fn test_starts_with_keyboard_mouse() {
        let (input, _) = context();
        assert_eq!(input.active_device(), DeviceClass::KeyboardMouse);
        assert!(input.keyboard_mouse().is_enabled());
        assert_eq!(input.gamepad_count(), 0);
    }

    #[test]
    fn test_device_class_strings() {
        assert_eq!(DeviceClass::KeyboardMouse.to_string(), "KeyboardMouse");
        assert_eq!(DeviceClass::Gamepad.to_string(), "GamePad");
    }

    #[test]
    fn test_switch_to_keyboard_reenables_it() {
        let (mut input, _) = context();
        input.set_active_device(DeviceClass::Gamepad);
        input.keyboard_mouse_mut().disable();

        input.set_active_device(DeviceClass::KeyboardMouse);
        assert!(input.keyboard_mouse().is_enabled());
    }

    #[test]
    fn test_connect_forces_gamepad() {
        let (mut input, _) = context();
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        assert_eq!(input.active_device(), DeviceClass::Gamepad);
        assert_eq!(input.gamepad_count(), 1);
        assert_eq!(input.gamepad_name(0), Some("Mock Pad 0"));
    }

    #[test]
    fn test_failed_connect_keeps_class() {
        let (mut input, backend) = context();
        backend.set_open_error("busy");
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        assert_eq!(input.active_device(), DeviceClass::KeyboardMouse);

        input.dispatch(InputEvent::GamepadConnected { port: MAX_GAMEPADS });
        assert_eq!(input.active_device(), DeviceClass::KeyboardMouse);
        assert_eq!(input.gamepad_count(), 0);
    }

    #[test]
    fn test_disconnect_forces_keyboard_mouse() {
        let (mut input, _) = context();
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        input.dispatch(InputEvent::GamepadConnected { port: 1 });
        input.dispatch(InputEvent::GamepadDisconnected { port: 1 });

        assert_eq!(input.active_device(), DeviceClass::KeyboardMouse);
        assert_eq!(input.gamepad_count(), 1);
    }

    #[test]
    fn test_out_of_range_disconnect_keeps_class() {
        let (mut input, backend) = context();
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        input.dispatch(InputEvent::GamepadDisconnected { port: MAX_GAMEPADS });

        assert_eq!(input.active_device(), DeviceClass::Gamepad);
        assert_eq!(input.gamepad_count(), 1);
        assert!(!backend.get_calls().iter().any(|call| matches!(call, BackendCall::Close(_))));
    }

    #[test]
    fn test_most_recent_input_wins() {
        let (mut input, _) = context();
        input.dispatch(InputEvent::GamepadConnected { port: 0 });

        input.dispatch(key(KeyCode::W, true));
        assert_eq!(input.active_device(), DeviceClass::KeyboardMouse);

        input.dispatch(pad_button(0, PadButton::A, true));
        assert_eq!(input.active_device(), DeviceClass::Gamepad);

        input.dispatch(InputEvent::MouseButton { button: 1, pressed: true });
        assert_eq!(input.active_device(), DeviceClass::KeyboardMouse);

        input.dispatch(pad_axis(0, GamepadAxis::LeftX, 100));
        assert_eq!(input.active_device(), DeviceClass::Gamepad);
    }

    #[test]
    fn test_unconnected_gamepad_does_not_switch() {
        let (mut input, _) = context();
        input.dispatch(pad_button(2, PadButton::A, true));
        input.dispatch(pad_axis(2, GamepadAxis::LeftX, i16::MIN));
        assert_eq!(input.active_device(), DeviceClass::KeyboardMouse);
    }

    #[test]
    fn test_wheel_and_motion_do_not_switch() {
        let (mut input, _) = context();
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        input.dispatch(InputEvent::MouseWheel { delta: 1 });
        input.dispatch(InputEvent::MouseMotion { x: 10, y: 20 });
        input.dispatch(InputEvent::Unrecognized);

        assert_eq!(input.active_device(), DeviceClass::Gamepad);
        assert_eq!(input.mouse_position(), (10, 20));
    }

    #[test]
    fn test_refresh_only_while_gamepad_active() {
        let (mut input, backend) = context();
        input.dispatch(key(KeyCode::W, true));
        assert_eq!(backend.refresh_count(), 0);

        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        assert_eq!(backend.refresh_count(), 1);

        input.dispatch(InputEvent::Unrecognized);
        assert_eq!(backend.refresh_count(), 2);

        input.dispatch(key(KeyCode::W, false));
        assert_eq!(backend.refresh_count(), 2);
    }

    // ==================== Action Tests ====================

    #[test]
    fn test_unknown_action_is_an_error() {
        let (mut input, _) = context();
        assert!(matches!(
            input.action_input("nope"),
            Err(InputError::UnknownAction(name)) if name == "nope"
        ));
        assert!(input.action("nope").is_none());
    }

    #[test]
    fn test_edge_action_from_keyboard() {
        let (mut input, _) = context();
        input.register_action("jump", KeyCode::SPACE, PadButton::A, false);

        let mut reported = Vec::new();
        for pressed in [true, true, true, false, true] {
            input.dispatch(key(KeyCode::SPACE, pressed));
            reported.push(input.action_input("jump").unwrap());
        }
        assert_eq!(reported, vec![1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_held_action_from_keyboard() {
        let (mut input, _) = context();
        input.register_action("moveforward", KeyCode::W, PadButton::LEFT_STICK_UP, true);

        let mut reported = Vec::new();
        for pressed in [true, true, true, false, true] {
            input.dispatch(key(KeyCode::W, pressed));
            reported.push(input.action_input("moveforward").unwrap());
        }
        assert_eq!(reported, vec![1.0, 1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_edge_action_from_gamepad() {
        let (mut input, _) = context();
        input.register_action("jump", KeyCode::SPACE, PadButton::A, false);
        input.dispatch(InputEvent::GamepadConnected { port: 0 });

        let mut reported = Vec::new();
        for pressed in [true, true, true, false, true] {
            input.dispatch(pad_button(0, PadButton::A, pressed));
            reported.push(input.action_input("jump").unwrap());
        }
        assert_eq!(reported, vec![1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_held_action_from_stick() {
        let (mut input, _) = context();
        input.register_action("moveforward", KeyCode::W, PadButton::LEFT_STICK_UP, true);
        input.dispatch(InputEvent::GamepadConnected { port: 0 });

        input.dispatch(pad_axis(0, GamepadAxis::LeftY, i16::MIN));
        assert_eq!(input.action_input("moveforward").unwrap(), 1.0);
        assert_eq!(input.action_input("moveforward").unwrap(), 1.0);

        input.dispatch(pad_axis(0, GamepadAxis::LeftY, -4000));
        assert_eq!(input.action_input("moveforward").unwrap(), 0.0);

        input.dispatch(pad_axis(0, GamepadAxis::LeftY, -16000));
        let value = input.action_input("moveforward").unwrap();
        assert!((value - 16000.0 / 32767.0).abs() < 1e-6);
    }

    #[test]
    fn test_query_follows_active_device() {
        let (mut input, _) = context();
        input.register_action("fire", KeyCode::MOUSE_LEFT, PadButton::RIGHT_TRIGGER, true);
        input.dispatch(InputEvent::GamepadConnected { port: 0 });

        input.dispatch(InputEvent::MouseButton { button: 1, pressed: true });
        assert_eq!(input.action_input("fire").unwrap(), 1.0);

        // Trigger below threshold; gamepad becomes active and reads 0
        input.dispatch(pad_axis(0, GamepadAxis::TriggerRight, 10));
        assert_eq!(input.action_input("fire").unwrap(), 0.0);

        input.dispatch(pad_axis(0, GamepadAxis::TriggerRight, i16::MAX));
        assert_eq!(input.action_input("fire").unwrap(), 1.0);
    }

    #[test]
    fn test_action_input_on_other_port() {
        let (mut input, _) = context();
        input.register_action("jump", KeyCode::SPACE, PadButton::A, true);
        input.dispatch(InputEvent::GamepadConnected { port: 2 });
        input.dispatch(pad_button(2, PadButton::A, true));

        assert_eq!(input.action_input("jump").unwrap(), 0.0);
        assert_eq!(input.action_input_on("jump", 2).unwrap(), 1.0);
    }

    #[test]
    fn test_disconnect_then_query_is_zero() {
        let (mut input, _) = context();
        input.register_action("jump", KeyCode::SPACE, PadButton::A, true);
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        input.dispatch(pad_button(0, PadButton::A, true));
        input.dispatch(InputEvent::GamepadDisconnected { port: 0 });

        input.set_active_device(DeviceClass::Gamepad);
        assert_eq!(input.action_input("jump").unwrap(), 0.0);
    }

    #[test]
    fn test_wheel_action_fires_once() {
        let (mut input, _) = context();
        input.register_action("nextweapon", KeyCode::MOUSE_WHEEL_UP, PadButton::Y, true);

        input.dispatch(InputEvent::MouseWheel { delta: 1 });
        assert_eq!(input.action_input("nextweapon").unwrap(), 1.0);
        assert_eq!(input.action_input("nextweapon").unwrap(), 0.0);
    }

    #[test]
    fn test_wheel_queries() {
        let (mut input, _) = context();
        input.dispatch(InputEvent::MouseWheel { delta: 2 });
        assert!(!input.on_mouse_wheel_down());
        assert!(input.on_mouse_wheel_up());
        assert!(!input.on_mouse_wheel_up());

        input.dispatch(InputEvent::MouseWheel { delta: -1 });
        assert!(input.on_mouse_wheel_down());
        assert!(!input.on_mouse_wheel_down());
    }

    #[test]
    fn test_unmapped_mouse_button_is_ignored() {
        let (mut input, _) = context();
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        input.dispatch(InputEvent::MouseButton { button: 8, pressed: true });
        assert_eq!(input.active_device(), DeviceClass::Gamepad);
    }

    // ==================== Binding File Tests ====================

    #[test]
    fn test_load_actions_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let (mut input, _) = context();
        input.register_action("jump", KeyCode::SPACE, PadButton::A, false);

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[[action_set]]
[[action_set.action]]
name = "jump"
key = "J"
button = "b"

[[action_set.action]]
name = "moveleft"
key = "A"
button = "leftstickleft"
consistent = true
"#,
            )
            .unwrap();
        temp_file.flush().unwrap();

        assert!(input.load_actions_from_file(temp_file.path()));

        let jump = input.action("jump").unwrap();
        assert_eq!(jump.key, KeyCode::J);
        assert_eq!(jump.button, PadButton::B);
        assert!(jump.is_edge_triggered());

        let left = input.action("moveleft").unwrap();
        assert!(!left.is_edge_triggered());
    }

    #[test]
    fn test_failed_load_keeps_actions() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let (mut input, _) = context();
        input.register_action("jump", KeyCode::SPACE, PadButton::A, false);

        // Second entry is missing its button; the first must not be applied
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[[action_set]]
[[action_set.action]]
name = "jump"
key = "J"
button = "b"

[[action_set.action]]
name = "duck"
key = "S"
"#,
            )
            .unwrap();
        temp_file.flush().unwrap();

        assert!(!input.load_actions_from_file(temp_file.path()));
        assert_eq!(input.action("jump").unwrap().key, KeyCode::SPACE);
        assert!(input.action("duck").is_none());

        assert!(!input.load_actions_from_file("/definitely/not/here.toml"));
        assert!(matches!(
            input.try_load_actions_from_file("/definitely/not/here.toml"),
            Err(InputError::Config(_))
        ));
    }

    #[test]
    fn test_bindings_reconfigure_normalizer() {
        let (mut input, _) = context();
        let bindings = ActionConfig::parse(
            "[input]\nstick_deadzone = 1000\n[[action_set]]\n[[action_set.action]]\nname = \"r\"\nkey = \"D\"\nbutton = \"leftstickright\"\nconsistent = true\n",
        )
        .unwrap();
        input.apply_bindings(&bindings);
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        input.dispatch(pad_axis(0, GamepadAxis::LeftX, 2000));

        assert!(input.action_input("r").unwrap() > 0.0);
    }

    #[test]
    fn test_bindings_without_input_keep_normalizer() {
        use crate::controller::axis::AxisNormalizer;

        let (mut input, _) = context();
        input.gamepads_mut().set_normalizer(AxisNormalizer::new(1000, 30));

        let bindings = ActionConfig::parse(
            "[[action_set]]\n[[action_set.action]]\nname = \"r\"\nkey = \"D\"\nbutton = \"leftstickright\"\n",
        )
        .unwrap();
        input.apply_bindings(&bindings);

        assert_eq!(input.gamepads().normalizer().stick_deadzone(), 1000);
    }

    // ==================== Misc Tests ====================

    #[test]
    fn test_poll_events_drains_source() {
        let (mut input, _) = context();
        let mut source: QueuedEvents = [
            InputEvent::GamepadConnected { port: 0 },
            pad_button(0, PadButton::B, true),
            key(KeyCode::E, true),
        ]
        .into_iter()
        .collect();

        assert_eq!(input.poll_events(&mut source), 3);
        assert!(source.is_empty());
        assert_eq!(input.active_device(), DeviceClass::KeyboardMouse);
        assert_eq!(input.gamepads().button_value(PadButton::B, 0), 1.0);
    }

    #[test]
    fn test_flush_per_class() {
        let (mut input, _) = context();
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        input.dispatch(pad_button(0, PadButton::A, true));
        input.dispatch(key(KeyCode::W, true));

        input.flush(DeviceClass::KeyboardMouse);
        assert!(!input.keyboard_mouse().is_down(KeyCode::W));
        assert_eq!(input.gamepads().button_value(PadButton::A, 0), 1.0);

        input.flush_all();
        assert_eq!(input.gamepads().button_value(PadButton::A, 0), 0.0);
        assert_eq!(input.gamepad_count(), 1);
    }

    #[test]
    fn test_rumble_passes_through() {
        let (mut input, backend) = context();
        input.dispatch(InputEvent::GamepadConnected { port: 1 });
        input.rumble(RumbleTarget::All, 10, 20, 30);
        input.rumble(RumbleTarget::Port(3), 1, 1, 1);

        assert!(backend.get_calls().contains(&BackendCall::Rumble {
            port: 1,
            low: 10,
            high: 20,
            duration_ms: 30,
        }));
    }

    #[test]
    fn test_stick_as_mouse() {
        let (mut input, _) = context();
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        input.set_mouse_position(50, 50);

        input.dispatch(pad_axis(0, GamepadAxis::RightX, i16::MAX));
        input.dispatch(pad_axis(0, GamepadAxis::RightY, i16::MIN));
        input.update_stick_as_mouse(0, Stick::Right);
        assert_eq!(input.mouse_position(), (51, 49));

        // Partial deflection truncates to no movement
        input.dispatch(pad_axis(0, GamepadAxis::RightX, 16000));
        input.dispatch(pad_axis(0, GamepadAxis::RightY, 0));
        input.update_stick_as_mouse(0, Stick::Right);
        assert_eq!(input.mouse_position(), (51, 49));
    }

    #[test]
    fn test_headless_context() {
        let mut input = InputContext::headless();
        input.dispatch(InputEvent::GamepadConnected { port: 0 });
        assert_eq!(input.gamepad_name(0), Some("Gamepad 1"));
    }
}
