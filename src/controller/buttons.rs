//! # Button State Store
//!
//! Last-known digital state for every button code seen on one device.
//!
//! Only codes that have been touched are present in the map; absent codes
//! read as released. A disabled store ignores writes without reporting an
//! error.

use std::collections::HashMap;
use std::hash::Hash;

/// Sparse `code -> down` map with an enabled flag.
///
/// # Examples
///
/// ```
/// use action_input::controller::buttons::ButtonStore;
///
/// let mut store = ButtonStore::new();
/// store.enable();
/// store.set(7u8, true);
/// assert_eq!(store.value(7), 1.0);
/// assert_eq!(store.value(8), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ButtonStore<C> {
    buttons: HashMap<C, bool>,
    enabled: bool,
}

impl<C> Default for ButtonStore<C> {
    fn default() -> Self {
        Self {
            buttons: HashMap::new(),
            enabled: false,
        }
    }
}

impl<C: Copy + Eq + Hash> ButtonStore<C> {
    /// Creates an empty, disabled store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the last state of `code`. No-op while disabled.
    pub fn set(&mut self, code: C, down: bool) {
        if !self.enabled {
            return;
        }
        self.buttons.insert(code, down);
    }

    /// Returns true if the last recorded state of `code` is down.
    #[must_use]
    pub fn is_down(&self, code: C) -> bool {
        self.buttons.get(&code).copied().unwrap_or(false)
    }

    /// Returns 1.0 for down, 0.0 for up or unknown.
    #[must_use]
    pub fn value(&self, code: C) -> f32 {
        if self.is_down(code) {
            1.0
        } else {
            0.0
        }
    }

    /// Drops every recorded entry. Leaves the enabled flag alone.
    pub fn flush(&mut self) {
        self.buttons.clear();
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of codes with a recorded state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
