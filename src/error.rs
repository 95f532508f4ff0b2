//! # Error Types
//!
//! Custom error types for action-input using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for action-input
#[derive(Debug, Error)]
pub enum InputError {
    /// No action is registered under the requested name
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    /// Gamepad port outside the fixed slot range
    #[error("Gamepad port {port} is out of range (max ports: {max})")]
    PortOutOfRange { port: usize, max: usize },

    /// Connect on a port that already holds an open device
    #[error("Gamepad port {0} is already in use")]
    PortInUse(usize),

    /// Device backend errors (open, rumble, ...)
    #[error("Device backend error: {0}")]
    Backend(String),

    /// Binding file errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a binding file can be rejected.
///
/// Every variant aborts the whole load; nothing from the file is applied.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read binding file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse binding file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("binding file has no action sets")]
    NoActionSets,

    #[error("action set {0} has no actions")]
    EmptyActionSet(usize),

    #[error("action {index} in action set {set} is missing the `{attribute}` attribute")]
    MissingAttribute {
        set: usize,
        index: usize,
        attribute: &'static str,
    },

    #[error("unknown key name `{0}`")]
    UnknownKey(String),

    #[error("unknown gamepad button name `{0}`")]
    UnknownButton(String),

    #[error("{0}")]
    Invalid(String),
}

/// Result type alias for action-input
pub type Result<T> = std::result::Result<T, InputError>;
