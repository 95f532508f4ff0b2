//! # Axis Normalizer
//!
//! Converts raw signed 16-bit analog samples into directional floats and
//! pseudo-button values.
//!
//! ## Pipeline
//!
//! 1. **Trigger threshold**: trigger samples below the threshold (default 30)
//!    read as 0.
//! 2. **Stick deadzone**: each stick axis has two independent readings.
//!    The negative reading only passes samples at or below `-deadzone`
//!    (up/left), the positive reading only passes samples at or above
//!    `+deadzone` (down/right). The default deadzone is 8000.
//! 3. **Scale and snap**: the gated sample is divided by 32767. Results
//!    below -0.9 snap to -1.0 and results above 0.9 snap to 1.0; everything
//!    in between passes through unchanged.
//!
//! ## Usage
//!
//! ```
//! use action_input::controller::axis::{AxisNormalizer, GamepadAxis};
//!
//! let norm = AxisNormalizer::default();
//!
//! // Trigger below threshold
//! assert_eq!(norm.axis_float(GamepadAxis::TriggerLeft, 10, false), 0.0);
//!
//! // Stick pushed fully up reads -1.0 on the negative reading
//! assert_eq!(norm.axis_float(GamepadAxis::LeftY, -32768, false), -1.0);
//! ```

use super::codes::PadButton;

/// Largest positive 16-bit sample.
pub const AXIS_MAX: i16 = i16::MAX;

/// Default stick deadzone in raw units.
pub const STICK_DEADZONE: i16 = 8000;

/// Default trigger activation threshold in raw units.
pub const TRIGGER_THRESHOLD: i16 = 30;

/// Normalized values beyond this magnitude snap to the endpoint.
pub const SNAP_LIMIT: f32 = 0.9;

/// Physical analog axes of a gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

impl GamepadAxis {
    /// Number of axes; used to size per-slot caches.
    pub const COUNT: usize = 6;

    pub const ALL: [Self; Self::COUNT] = [
        Self::LeftX,
        Self::LeftY,
        Self::RightX,
        Self::RightY,
        Self::TriggerLeft,
        Self::TriggerRight,
    ];

    /// Index into a `[_; GamepadAxis::COUNT]` cache.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn is_trigger(self) -> bool {
        matches!(self, Self::TriggerLeft | Self::TriggerRight)
    }
}

/// Analog stick selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stick {
    Left,
    Right,
}

impl Stick {
    /// Returns the (X, Y) axes of this stick.
    #[must_use]
    pub fn axes(self) -> (GamepadAxis, GamepadAxis) {
        match self {
            Self::Left => (GamepadAxis::LeftX, GamepadAxis::LeftY),
            Self::Right => (GamepadAxis::RightX, GamepadAxis::RightY),
        }
    }
}

/// How a pseudo-button reads its axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoSource {
    pub axis: GamepadAxis,
    /// Selects the positive (down/right) reading.
    pub flip: bool,
    /// Negates the reading so the pressed direction reports positive.
    pub negate: bool,
}

impl PseudoSource {
    const fn new(axis: GamepadAxis, flip: bool, negate: bool) -> Self {
        Self { axis, flip, negate }
    }
}

/// Returns the axis source for a pseudo-button, or `None` for physical or
/// unassigned ids.
#[must_use]
pub fn pseudo_source(button: PadButton) -> Option<PseudoSource> {
    use GamepadAxis::*;

    let source = match button {
        PadButton::LEFT_TRIGGER => PseudoSource::new(TriggerLeft, false, false),
        PadButton::RIGHT_TRIGGER => PseudoSource::new(TriggerRight, false, false),
        PadButton::LEFT_STICK_UP => PseudoSource::new(LeftY, false, true),
        PadButton::LEFT_STICK_DOWN => PseudoSource::new(LeftY, true, false),
        PadButton::LEFT_STICK_LEFT => PseudoSource::new(LeftX, false, true),
        PadButton::LEFT_STICK_RIGHT => PseudoSource::new(LeftX, true, false),
        PadButton::RIGHT_STICK_UP => PseudoSource::new(RightY, false, true),
        PadButton::RIGHT_STICK_DOWN => PseudoSource::new(RightY, true, false),
        PadButton::RIGHT_STICK_LEFT => PseudoSource::new(RightX, false, true),
        PadButton::RIGHT_STICK_RIGHT => PseudoSource::new(RightX, true, false),
        _ => return None,
    };
    Some(source)
}

/// Deadzone and threshold policy for raw analog samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisNormalizer {
    stick_deadzone: i16,
    trigger_threshold: i16,
}

impl Default for AxisNormalizer {
    fn default() -> Self {
        Self {
            stick_deadzone: STICK_DEADZONE,
            trigger_threshold: TRIGGER_THRESHOLD,
        }
    }
}

impl AxisNormalizer {
    /// Creates a normalizer with custom limits.
    ///
    /// Negative values are clamped to 0.
    #[must_use]
    pub fn new(stick_deadzone: i16, trigger_threshold: i16) -> Self {
        Self {
            stick_deadzone: stick_deadzone.max(0),
            trigger_threshold: trigger_threshold.max(0),
        }
    }

    #[must_use]
    pub fn stick_deadzone(&self) -> i16 {
        self.stick_deadzone
    }

    #[must_use]
    pub fn trigger_threshold(&self) -> i16 {
        self.trigger_threshold
    }

    /// Applies the trigger threshold or the directional stick deadzone.
    ///
    /// `flip = false` keeps only sufficiently negative stick samples,
    /// `flip = true` keeps only sufficiently positive ones. Triggers ignore
    /// `flip`.
    #[must_use]
    pub fn gate(&self, axis: GamepadAxis, raw: i16, flip: bool) -> i16 {
        if axis.is_trigger() {
            return if raw < self.trigger_threshold { 0 } else { raw };
        }

        let outside = if flip {
            raw >= self.stick_deadzone
        } else {
            raw <= -self.stick_deadzone
        };

        if outside {
            raw
        } else {
            0
        }
    }

    /// Gated sample scaled to a float with endpoint snapping.
    #[must_use]
    pub fn axis_float(&self, axis: GamepadAxis, raw: i16, flip: bool) -> f32 {
        snap(f32::from(self.gate(axis, raw, flip)) / f32::from(AXIS_MAX))
    }

    /// Resolves a pseudo-button against a raw sample of its axis.
    #[must_use]
    pub fn pseudo_value(&self, source: PseudoSource, raw: i16) -> f32 {
        let value = self.axis_float(source.axis, raw, source.flip);
        if source.negate {
            -value
        } else {
            value
        }
    }

    /// Signed value of one stick axis combining both gated readings.
    ///
    /// Inside the deadzone this is 0; outside it follows the sample's sign.
    #[must_use]
    pub fn stick_value(&self, axis: GamepadAxis, raw: i16) -> f32 {
        self.axis_float(axis, raw, false) + self.axis_float(axis, raw, true)
    }
}

/// Snaps values beyond ±[`SNAP_LIMIT`] to ±1.0.
#[inline]
fn snap(perc: f32) -> f32 {
    if perc < -SNAP_LIMIT {
        -1.0
    } else if perc > SNAP_LIMIT {
        1.0
    } else {
        perc
    }
}
