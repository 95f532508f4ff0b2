//! # Action Registry
//!
//! Maps logical action names to one keyboard/mouse binding and one gamepad
//! binding.
//!
//! ## Trigger Modes
//!
//! - **Edge-triggered** (default): reports the input value on the first
//!   sample where it is active, then 0.0 until the input returns to rest.
//!   Suits momentary actions such as "jump".
//! - **Level-triggered** ("consistent"/held): reports the raw value on every
//!   sample. Suits continuous actions such as movement.
//!
//! ```
//! use action_input::action::ActionRegistry;
//! use action_input::controller::codes::{KeyCode, PadButton};
//!
//! let mut actions = ActionRegistry::new();
//! actions.register("jump", KeyCode::SPACE, PadButton::A, false);
//!
//! let jump = actions.get_mut("jump").unwrap();
//! assert_eq!(jump.resolve(1.0), 1.0);
//! assert_eq!(jump.resolve(1.0), 0.0); // still held, suppressed
//! assert_eq!(jump.resolve(0.0), 0.0);
//! assert_eq!(jump.resolve(1.0), 1.0); // re-armed
//! ```

use std::collections::HashMap;
use tracing::debug;

use crate::controller::codes::{KeyCode, PadButton};

/// A named input binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    /// Keyboard/mouse binding.
    pub key: KeyCode,
    /// Gamepad binding (physical or pseudo-button).
    pub button: PadButton,
    edge_triggered: bool,
    currently_down: bool,
}

impl Action {
    /// Creates an action. `consistent = true` selects level-triggered mode.
    #[must_use]
    pub fn new(key: KeyCode, button: PadButton, consistent: bool) -> Self {
        Self {
            key,
            button,
            edge_triggered: !consistent,
            currently_down: false,
        }
    }

    #[must_use]
    pub fn is_edge_triggered(&self) -> bool {
        self.edge_triggered
    }

    /// Whether the last resolved sample was active.
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.currently_down
    }

    /// Applies the trigger policy to a raw input sample.
    ///
    /// A positive sample in edge mode is reported only on the first sample of
    /// a press. Level mode tracks the down state without suppressing
    /// anything. Non-positive samples re-arm the edge and are reported as-is.
    pub fn resolve(&mut self, raw: f32) -> f32 {
        if raw > 0.0 {
            if self.edge_triggered && self.currently_down {
                return 0.0;
            }
            self.currently_down = true;
        } else {
            self.currently_down = false;
        }
        raw
    }
}

/// Owns every registered action, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Action>,
}

impl ActionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or overwrites an action. Edge state starts released.
    pub fn register(&mut self, name: &str, key: KeyCode, button: PadButton, consistent: bool) {
        debug!(
            "Registering action '{}' Key: '{}' Button: '{}' ({})",
            name,
            key,
            button,
            if consistent { "held" } else { "edge" }
        );
        self.actions
            .insert(name.to_string(), Action::new(key, button, consistent));
    }

    /// Rebinds an action, keeping its trigger mode.
    ///
    /// A missing action is created edge-triggered.
    pub fn modify(&mut self, name: &str, key: KeyCode, button: PadButton) {
        debug!("Setting action '{}' Key: '{}' Button: '{}'", name, key, button);
        self.actions
            .entry(name.to_string())
            .and_modify(|action| {
                action.key = key;
                action.button = button;
            })
            .or_insert_with(|| Action::new(key, button, false));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Action> {
        self.actions.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterates over `(name, action)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.actions.iter().map(|(name, action)| (name.as_str(), action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(action: &mut Action, samples: &[f32]) -> Vec<f32> {
        samples.iter().map(|&raw| action.resolve(raw)).collect()
    }

    #[test]
    fn test_edge_triggered_fires_once_per_press() {
        let mut action = Action::new(KeyCode::SPACE, PadButton::A, false);
        let reported = run(&mut action, &[1.0, 1.0, 1.0, 0.0, 1.0]);
        assert_eq!(reported, vec![1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_held_reports_every_sample() {
        let mut action = Action::new(KeyCode::W, PadButton::LEFT_STICK_UP, true);
        let reported = run(&mut action, &[1.0, 1.0, 1.0, 0.0, 1.0]);
        assert_eq!(reported, vec![1.0, 1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_edge_triggered_reports_analog_value() {
        let mut action = Action::new(KeyCode::W, PadButton::LEFT_STICK_UP, false);
        assert_eq!(action.resolve(0.5), 0.5);
        assert_eq!(action.resolve(0.7), 0.0);
        assert_eq!(action.resolve(0.0), 0.0);
        assert_eq!(action.resolve(0.3), 0.3);
    }

    #[test]
    fn test_negative_sample_rearms_edge() {
        let mut action = Action::new(KeyCode::W, PadButton::LEFT_STICK_UP, false);
        action.resolve(1.0);
        assert!(action.is_down());
        assert_eq!(action.resolve(-0.5), -0.5);
        assert!(!action.is_down());
    }

    #[test]
    fn test_held_tracks_down_state() {
        let mut action = Action::new(KeyCode::W, PadButton::A, true);
        action.resolve(1.0);
        assert!(action.is_down());
        assert_eq!(action.resolve(1.0), 1.0);
        action.resolve(0.0);
        assert!(!action.is_down());
    }

    #[test]
    fn test_register_defaults() {
        let mut registry = ActionRegistry::new();
        registry.register("jump", KeyCode::SPACE, PadButton::A, false);
        registry.register("moveforward", KeyCode::W, PadButton::LEFT_STICK_UP, true);

        let jump = registry.get("jump").unwrap();
        assert!(jump.is_edge_triggered());
        assert!(!jump.is_down());
        assert!(!registry.get("moveforward").unwrap().is_edge_triggered());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_overwrites_and_resets_edge() {
        let mut registry = ActionRegistry::new();
        registry.register("jump", KeyCode::SPACE, PadButton::A, false);
        registry.get_mut("jump").unwrap().resolve(1.0);
        assert!(registry.get("jump").unwrap().is_down());

        registry.register("jump", KeyCode::J, PadButton::B, true);
        let jump = registry.get("jump").unwrap();
        assert_eq!(jump.key, KeyCode::J);
        assert_eq!(jump.button, PadButton::B);
        assert!(!jump.is_edge_triggered());
        assert!(!jump.is_down());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_modify_keeps_mode() {
        let mut registry = ActionRegistry::new();
        registry.register("moveleft", KeyCode::A, PadButton::LEFT_STICK_LEFT, true);
        registry.modify("moveleft", KeyCode::LEFT, PadButton::DPAD_LEFT);

        let action = registry.get("moveleft").unwrap();
        assert_eq!(action.key, KeyCode::LEFT);
        assert_eq!(action.button, PadButton::DPAD_LEFT);
        assert!(!action.is_edge_triggered());
    }

    #[test]
    fn test_modify_creates_edge_triggered_action() {
        let mut registry = ActionRegistry::new();
        registry.modify("fire", KeyCode::MOUSE_LEFT, PadButton::RIGHT_TRIGGER);

        let action = registry.get("fire").unwrap();
        assert!(action.is_edge_triggered());
        assert_eq!(action.key, KeyCode::MOUSE_LEFT);
    }

    #[test]
    fn test_missing_action_is_none() {
        let registry = ActionRegistry::new();
        assert!(registry.get("nope").is_none());
        assert!(!registry.contains("nope"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_iter_lists_all_actions() {
        let mut registry = ActionRegistry::new();
        registry.register("a", KeyCode::A, PadButton::A, false);
        registry.register("b", KeyCode::B, PadButton::B, false);

        let mut names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b"]);
    }
}
