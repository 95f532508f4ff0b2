//! # Configuration Module
//!
//! Loads action bindings and analog limits from TOML files.
//!
//! ## File Layout
//!
//! ```toml
//! [input]                    # optional, omitted keeps current limits
//! stick_deadzone = 8000      # optional, raw units
//! trigger_threshold = 30     # optional, raw units
//!
//! [[action_set]]
//! name = "movement"          # optional
//!
//! [[action_set.action]]
//! name = "moveforward"
//! key = "W"
//! button = "leftstickup"
//! consistent = true          # optional, re-registers as held
//! ```
//!
//! A file is validated completely before anything is returned, so a bad
//! entry anywhere rejects the whole file.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::controller::axis::{AxisNormalizer, STICK_DEADZONE, TRIGGER_THRESHOLD};
use crate::controller::codes::{KeyCode, PadButton};
use crate::error::ConfigError;

/// Result type for binding-file operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Raw binding file as parsed from TOML
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ActionConfig {
    /// Analog limits; `None` leaves the current limits untouched.
    #[serde(default)]
    pub input: Option<InputSettings>,

    #[serde(default, rename = "action_set")]
    pub action_sets: Vec<ActionSetConfig>,
}

/// Analog limits
#[derive(Debug, Deserialize, Clone)]
pub struct InputSettings {
    #[serde(default = "default_stick_deadzone")]
    pub stick_deadzone: i32,

    #[serde(default = "default_trigger_threshold")]
    pub trigger_threshold: i32,
}

/// One `[[action_set]]` table
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ActionSetConfig {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, rename = "action")]
    pub actions: Vec<ActionEntry>,
}

/// One `[[action_set.action]]` entry.
///
/// Attributes are optional at the parse level so a missing one can be
/// reported by name.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ActionEntry {
    pub name: Option<String>,
    pub key: Option<String>,
    pub button: Option<String>,
    pub consistent: Option<bool>,
}

/// A validated binding ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub key: KeyCode,
    pub button: PadButton,
    /// `Some` when the file sets the trigger mode explicitly.
    pub consistent: Option<bool>,
}

/// Everything a validated file provides.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    /// `Some` only when the file has an `[input]` table.
    pub normalizer: Option<AxisNormalizer>,
    pub actions: Vec<Binding>,
}

fn default_stick_deadzone() -> i32 { i32::from(STICK_DEADZONE) }
fn default_trigger_threshold() -> i32 { i32::from(TRIGGER_THRESHOLD) }

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            stick_deadzone: default_stick_deadzone(),
            trigger_threshold: default_trigger_threshold(),
        }
    }
}

impl ActionConfig {
    /// Load and validate a binding file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the binding file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails (see [`ActionConfig::validate`])
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use action_input::config::ActionConfig;
    ///
    /// let bindings = ActionConfig::load("config/actions.toml")?;
    /// println!("{} actions", bindings.actions.len());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Bindings> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parse and validate binding file contents
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing or validation fails
    pub fn parse(contents: &str) -> ConfigResult<Bindings> {
        let config: ActionConfig = toml::from_str(contents)?;
        config.validate()
    }

    /// Validate the file and resolve every name
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - There are no action sets, or an action set has no actions
    /// - An action lacks `name`, `key` or `button`
    /// - A key or button name is unknown
    /// - An analog limit is outside 0..=32767
    pub fn validate(&self) -> ConfigResult<Bindings> {
        if let Some(input) = &self.input {
            for (name, value) in [
                ("stick_deadzone", input.stick_deadzone),
                ("trigger_threshold", input.trigger_threshold),
            ] {
                if !(0..=i32::from(i16::MAX)).contains(&value) {
                    return Err(ConfigError::Invalid(format!(
                        "{} must be between 0 and 32767",
                        name
                    )));
                }
            }
        }

        if self.action_sets.is_empty() {
            return Err(ConfigError::NoActionSets);
        }

        let mut actions = Vec::new();
        for (set, action_set) in self.action_sets.iter().enumerate() {
            if action_set.actions.is_empty() {
                return Err(ConfigError::EmptyActionSet(set));
            }

            for (index, entry) in action_set.actions.iter().enumerate() {
                let missing = |attribute| ConfigError::MissingAttribute {
                    set,
                    index,
                    attribute,
                };

                let name = entry.name.as_deref().ok_or_else(|| missing("name"))?;
                let key = entry.key.as_deref().ok_or_else(|| missing("key"))?;
                let button = entry.button.as_deref().ok_or_else(|| missing("button"))?;

                actions.push(Binding {
                    name: name.to_string(),
                    key: KeyCode::from_name(key)
                        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?,
                    button: PadButton::from_name(button)
                        .ok_or_else(|| ConfigError::UnknownButton(button.to_string()))?,
                    consistent: entry.consistent,
                });
            }
        }

        // Range checked above
        let normalizer = self.input.as_ref().map(|input| {
            AxisNormalizer::new(input.stick_deadzone as i16, input.trigger_threshold as i16)
        });

        Ok(Bindings { normalizer, actions })
    }
}
