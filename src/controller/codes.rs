//! # Button Codes
//!
//! Two digital code namespaces share one action-binding contract:
//!
//! - [`KeyCode`]: keyboard keys, the three physical mouse buttons and two
//!   synthetic mouse-wheel buttons.
//! - [`PadButton`]: physical gamepad buttons plus ten synthetic buttons that
//!   are derived from analog axes (triggers and stick tilts).
//!
//! Both namespaces have bidirectional name lookups so bindings can be written
//! in human-readable form.
//!
//! ## Keyboard values
//!
//! Printable keys use their lowercase ASCII value. Keys without a character
//! use their scancode with bit 30 set. Mouse codes sit above every keyboard
//! code.
//!
//! ```
//! use action_input::controller::codes::{KeyCode, PadButton};
//!
//! assert_eq!(KeyCode::from_name("space"), Some(KeyCode::SPACE));
//! assert_eq!(KeyCode::MOUSE_LEFT.name(), Some("leftmouse"));
//! assert_eq!(PadButton::from_name("leftstickup"), Some(PadButton::LEFT_STICK_UP));
//! ```

use std::fmt;

/// Bit set on keys that have no character representation.
const SCANCODE_MASK: i32 = 1 << 30;

const fn scancode(code: i32) -> i32 {
    code | SCANCODE_MASK
}

/// Keyboard or mouse digital input code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const A: Self = Self(b'a' as i32);
    pub const B: Self = Self(b'b' as i32);
    pub const C: Self = Self(b'c' as i32);
    pub const D: Self = Self(b'd' as i32);
    pub const E: Self = Self(b'e' as i32);
    pub const F: Self = Self(b'f' as i32);
    pub const G: Self = Self(b'g' as i32);
    pub const H: Self = Self(b'h' as i32);
    pub const I: Self = Self(b'i' as i32);
    pub const J: Self = Self(b'j' as i32);
    pub const K: Self = Self(b'k' as i32);
    pub const L: Self = Self(b'l' as i32);
    pub const M: Self = Self(b'm' as i32);
    pub const N: Self = Self(b'n' as i32);
    pub const O: Self = Self(b'o' as i32);
    pub const P: Self = Self(b'p' as i32);
    pub const Q: Self = Self(b'q' as i32);
    pub const R: Self = Self(b'r' as i32);
    pub const S: Self = Self(b's' as i32);
    pub const T: Self = Self(b't' as i32);
    pub const U: Self = Self(b'u' as i32);
    pub const V: Self = Self(b'v' as i32);
    pub const W: Self = Self(b'w' as i32);
    pub const X: Self = Self(b'x' as i32);
    pub const Y: Self = Self(b'y' as i32);
    pub const Z: Self = Self(b'z' as i32);

    pub const D0: Self = Self(b'0' as i32);
    pub const D1: Self = Self(b'1' as i32);
    pub const D2: Self = Self(b'2' as i32);
    pub const D3: Self = Self(b'3' as i32);
    pub const D4: Self = Self(b'4' as i32);
    pub const D5: Self = Self(b'5' as i32);
    pub const D6: Self = Self(b'6' as i32);
    pub const D7: Self = Self(b'7' as i32);
    pub const D8: Self = Self(b'8' as i32);
    pub const D9: Self = Self(b'9' as i32);

    pub const BACKSPACE: Self = Self(8);
    pub const TAB: Self = Self(9);
    pub const ENTER: Self = Self(13);
    pub const ESCAPE: Self = Self(27);
    pub const SPACE: Self = Self(32);
    pub const QUOTE: Self = Self(b'\'' as i32);
    pub const COMMA: Self = Self(b',' as i32);
    pub const MINUS: Self = Self(b'-' as i32);
    pub const PERIOD: Self = Self(b'.' as i32);
    pub const SLASH: Self = Self(b'/' as i32);
    pub const SEMICOLON: Self = Self(b';' as i32);
    pub const EQUALS: Self = Self(b'=' as i32);
    pub const LEFT_BRACKET: Self = Self(b'[' as i32);
    pub const BACKSLASH: Self = Self(b'\\' as i32);
    pub const RIGHT_BRACKET: Self = Self(b']' as i32);
    pub const GRAVE: Self = Self(b'`' as i32);
    pub const DELETE: Self = Self(127);

    pub const CAPS_LOCK: Self = Self(scancode(57));
    pub const F1: Self = Self(scancode(58));
    pub const F2: Self = Self(scancode(59));
    pub const F3: Self = Self(scancode(60));
    pub const F4: Self = Self(scancode(61));
    pub const F5: Self = Self(scancode(62));
    pub const F6: Self = Self(scancode(63));
    pub const F7: Self = Self(scancode(64));
    pub const F8: Self = Self(scancode(65));
    pub const F9: Self = Self(scancode(66));
    pub const F10: Self = Self(scancode(67));
    pub const F11: Self = Self(scancode(68));
    pub const F12: Self = Self(scancode(69));
    pub const INSERT: Self = Self(scancode(73));
    pub const HOME: Self = Self(scancode(74));
    pub const PAGE_UP: Self = Self(scancode(75));
    pub const END: Self = Self(scancode(77));
    pub const PAGE_DOWN: Self = Self(scancode(78));
    pub const RIGHT: Self = Self(scancode(79));
    pub const LEFT: Self = Self(scancode(80));
    pub const DOWN: Self = Self(scancode(81));
    pub const UP: Self = Self(scancode(82));
    pub const NUM_LOCK: Self = Self(scancode(83));
    pub const KP_DIVIDE: Self = Self(scancode(84));
    pub const KP_MULTIPLY: Self = Self(scancode(85));
    pub const KP_MINUS: Self = Self(scancode(86));
    pub const KP_PLUS: Self = Self(scancode(87));
    pub const KP_ENTER: Self = Self(scancode(88));
    pub const KP_1: Self = Self(scancode(89));
    pub const KP_2: Self = Self(scancode(90));
    pub const KP_3: Self = Self(scancode(91));
    pub const KP_4: Self = Self(scancode(92));
    pub const KP_5: Self = Self(scancode(93));
    pub const KP_6: Self = Self(scancode(94));
    pub const KP_7: Self = Self(scancode(95));
    pub const KP_8: Self = Self(scancode(96));
    pub const KP_9: Self = Self(scancode(97));
    pub const KP_0: Self = Self(scancode(98));
    pub const KP_PERIOD: Self = Self(scancode(99));
    pub const LEFT_CTRL: Self = Self(scancode(224));
    pub const LEFT_SHIFT: Self = Self(scancode(225));
    pub const LEFT_ALT: Self = Self(scancode(226));
    pub const RIGHT_CTRL: Self = Self(scancode(228));
    pub const RIGHT_SHIFT: Self = Self(scancode(229));
    pub const RIGHT_ALT: Self = Self(scancode(230));

    /// Last keyboard code; everything above belongs to the mouse.
    pub const LAST_KEY: Self = Self(scancode(286));

    pub const MOUSE_LEFT: Self = Self(Self::LAST_KEY.0 + 1);
    pub const MOUSE_MIDDLE: Self = Self(Self::MOUSE_LEFT.0 + 1);
    pub const MOUSE_RIGHT: Self = Self(Self::MOUSE_MIDDLE.0 + 1);
    /// Synthetic: reads the pending wheel delta (positive).
    pub const MOUSE_WHEEL_UP: Self = Self(Self::MOUSE_RIGHT.0 + 1);
    /// Synthetic: reads the pending wheel delta (negative).
    pub const MOUSE_WHEEL_DOWN: Self = Self(Self::MOUSE_WHEEL_UP.0 + 1);

    /// Returns true for the three physical mouse buttons and the two wheel
    /// pseudo-buttons.
    #[must_use]
    pub fn is_mouse(self) -> bool {
        (Self::MOUSE_LEFT.0..=Self::MOUSE_WHEEL_DOWN.0).contains(&self.0)
    }

    /// Human-readable name, or `None` for codes with no known name.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        MOUSE_NAMES
            .iter()
            .chain(KEY_NAMES)
            .find(|(code, _)| *code == self)
            .map(|(_, name)| *name)
    }

    /// Looks up a code by name.
    ///
    /// Mouse names match exactly; key names match case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some((code, _)) = MOUSE_NAMES.iter().find(|(_, n)| *n == name) {
            return Some(*code);
        }

        KEY_NAMES
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(code, _)| *code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "key#{}", self.0),
        }
    }
}

const MOUSE_NAMES: &[(KeyCode, &str)] = &[
    (KeyCode::MOUSE_LEFT, "leftmouse"),
    (KeyCode::MOUSE_MIDDLE, "middlemouse"),
    (KeyCode::MOUSE_RIGHT, "rightmouse"),
    (KeyCode::MOUSE_WHEEL_UP, "mousewheelup"),
    (KeyCode::MOUSE_WHEEL_DOWN, "mousewheeldown"),
];

const KEY_NAMES: &[(KeyCode, &str)] = &[
    (KeyCode::A, "A"),
    (KeyCode::B, "B"),
    (KeyCode::C, "C"),
    (KeyCode::D, "D"),
    (KeyCode::E, "E"),
    (KeyCode::F, "F"),
    (KeyCode::G, "G"),
    (KeyCode::H, "H"),
    (KeyCode::I, "I"),
    (KeyCode::J, "J"),
    (KeyCode::K, "K"),
    (KeyCode::L, "L"),
    (KeyCode::M, "M"),
    (KeyCode::N, "N"),
    (KeyCode::O, "O"),
    (KeyCode::P, "P"),
    (KeyCode::Q, "Q"),
    (KeyCode::R, "R"),
    (KeyCode::S, "S"),
    (KeyCode::T, "T"),
    (KeyCode::U, "U"),
    (KeyCode::V, "V"),
    (KeyCode::W, "W"),
    (KeyCode::X, "X"),
    (KeyCode::Y, "Y"),
    (KeyCode::Z, "Z"),
    (KeyCode::D0, "0"),
    (KeyCode::D1, "1"),
    (KeyCode::D2, "2"),
    (KeyCode::D3, "3"),
    (KeyCode::D4, "4"),
    (KeyCode::D5, "5"),
    (KeyCode::D6, "6"),
    (KeyCode::D7, "7"),
    (KeyCode::D8, "8"),
    (KeyCode::D9, "9"),
    (KeyCode::BACKSPACE, "Backspace"),
    (KeyCode::TAB, "Tab"),
    (KeyCode::ENTER, "Return"),
    (KeyCode::ESCAPE, "Escape"),
    (KeyCode::SPACE, "Space"),
    (KeyCode::QUOTE, "'"),
    (KeyCode::COMMA, ","),
    (KeyCode::MINUS, "-"),
    (KeyCode::PERIOD, "."),
    (KeyCode::SLASH, "/"),
    (KeyCode::SEMICOLON, ";"),
    (KeyCode::EQUALS, "="),
    (KeyCode::LEFT_BRACKET, "["),
    (KeyCode::BACKSLASH, "\\"),
    (KeyCode::RIGHT_BRACKET, "]"),
    (KeyCode::GRAVE, "`"),
    (KeyCode::DELETE, "Delete"),
    (KeyCode::CAPS_LOCK, "CapsLock"),
    (KeyCode::F1, "F1"),
    (KeyCode::F2, "F2"),
    (KeyCode::F3, "F3"),
    (KeyCode::F4, "F4"),
    (KeyCode::F5, "F5"),
    (KeyCode::F6, "F6"),
    (KeyCode::F7, "F7"),
    (KeyCode::F8, "F8"),
    (KeyCode::F9, "F9"),
    (KeyCode::F10, "F10"),
    (KeyCode::F11, "F11"),
    (KeyCode::F12, "F12"),
    (KeyCode::INSERT, "Insert"),
    (KeyCode::HOME, "Home"),
    (KeyCode::PAGE_UP, "PageUp"),
    (KeyCode::END, "End"),
    (KeyCode::PAGE_DOWN, "PageDown"),
    (KeyCode::RIGHT, "Right"),
    (KeyCode::LEFT, "Left"),
    (KeyCode::DOWN, "Down"),
    (KeyCode::UP, "Up"),
    (KeyCode::NUM_LOCK, "Numlock"),
    (KeyCode::KP_DIVIDE, "Keypad /"),
    (KeyCode::KP_MULTIPLY, "Keypad *"),
    (KeyCode::KP_MINUS, "Keypad -"),
    (KeyCode::KP_PLUS, "Keypad +"),
    (KeyCode::KP_ENTER, "Keypad Enter"),
    (KeyCode::KP_1, "Keypad 1"),
    (KeyCode::KP_2, "Keypad 2"),
    (KeyCode::KP_3, "Keypad 3"),
    (KeyCode::KP_4, "Keypad 4"),
    (KeyCode::KP_5, "Keypad 5"),
    (KeyCode::KP_6, "Keypad 6"),
    (KeyCode::KP_7, "Keypad 7"),
    (KeyCode::KP_8, "Keypad 8"),
    (KeyCode::KP_9, "Keypad 9"),
    (KeyCode::KP_0, "Keypad 0"),
    (KeyCode::KP_PERIOD, "Keypad ."),
    (KeyCode::LEFT_CTRL, "Left Ctrl"),
    (KeyCode::LEFT_SHIFT, "Left Shift"),
    (KeyCode::LEFT_ALT, "Left Alt"),
    (KeyCode::RIGHT_CTRL, "Right Ctrl"),
    (KeyCode::RIGHT_SHIFT, "Right Shift"),
    (KeyCode::RIGHT_ALT, "Right Alt"),
];

/// Gamepad digital input code.
///
/// Values below [`PadButton::PHYSICAL_COUNT`] are physical buttons; the
/// values from 16 upward are pseudo-buttons resolved through the axis
/// normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PadButton(pub u8);

impl PadButton {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const X: Self = Self(2);
    pub const Y: Self = Self(3);
    pub const BACK: Self = Self(4);
    pub const SELECT: Self = Self::BACK;
    pub const GUIDE: Self = Self(5);
    pub const START: Self = Self(6);
    pub const LEFT_STICK: Self = Self(7);
    pub const RIGHT_STICK: Self = Self(8);
    pub const LEFT_SHOULDER: Self = Self(9);
    pub const RIGHT_SHOULDER: Self = Self(10);
    pub const DPAD_UP: Self = Self(11);
    pub const DPAD_DOWN: Self = Self(12);
    pub const DPAD_LEFT: Self = Self(13);
    pub const DPAD_RIGHT: Self = Self(14);

    /// Number of physical button ids.
    pub const PHYSICAL_COUNT: u8 = 15;

    pub const LEFT_TRIGGER: Self = Self(16);
    pub const RIGHT_TRIGGER: Self = Self(17);
    pub const LEFT_STICK_UP: Self = Self(18);
    pub const LEFT_STICK_DOWN: Self = Self(19);
    pub const LEFT_STICK_LEFT: Self = Self(20);
    pub const LEFT_STICK_RIGHT: Self = Self(21);
    pub const RIGHT_STICK_UP: Self = Self(22);
    pub const RIGHT_STICK_DOWN: Self = Self(23);
    pub const RIGHT_STICK_LEFT: Self = Self(24);
    pub const RIGHT_STICK_RIGHT: Self = Self(25);

    /// All pseudo-buttons, in id order.
    pub const PSEUDO: [Self; 10] = [
        Self::LEFT_TRIGGER,
        Self::RIGHT_TRIGGER,
        Self::LEFT_STICK_UP,
        Self::LEFT_STICK_DOWN,
        Self::LEFT_STICK_LEFT,
        Self::LEFT_STICK_RIGHT,
        Self::RIGHT_STICK_UP,
        Self::RIGHT_STICK_DOWN,
        Self::RIGHT_STICK_LEFT,
        Self::RIGHT_STICK_RIGHT,
    ];

    #[must_use]
    pub fn is_physical(self) -> bool {
        self.0 < Self::PHYSICAL_COUNT
    }

    /// Human-readable name, or `None` for unassigned ids.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        PSEUDO_NAMES
            .iter()
            .chain(PAD_NAMES)
            .find(|(code, _)| *code == self)
            .map(|(_, name)| *name)
    }

    /// Looks up a button by name. Pseudo-button names are checked first.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        PSEUDO_NAMES
            .iter()
            .chain(PAD_NAMES)
            .find(|(_, n)| *n == name)
            .map(|(code, _)| *code)
    }
}

impl fmt::Display for PadButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "button#{}", self.0),
        }
    }
}

const PSEUDO_NAMES: &[(PadButton, &str)] = &[
    (PadButton::LEFT_TRIGGER, "lefttrigger"),
    (PadButton::RIGHT_TRIGGER, "righttrigger"),
    (PadButton::LEFT_STICK_UP, "leftstickup"),
    (PadButton::LEFT_STICK_DOWN, "leftstickdown"),
    (PadButton::LEFT_STICK_LEFT, "leftstickleft"),
    (PadButton::LEFT_STICK_RIGHT, "leftstickright"),
    (PadButton::RIGHT_STICK_UP, "rightstickup"),
    (PadButton::RIGHT_STICK_DOWN, "rightstickdown"),
    (PadButton::RIGHT_STICK_LEFT, "rightstickleft"),
    (PadButton::RIGHT_STICK_RIGHT, "rightstickright"),
];

const PAD_NAMES: &[(PadButton, &str)] = &[
    (PadButton::A, "a"),
    (PadButton::B, "b"),
    (PadButton::X, "x"),
    (PadButton::Y, "y"),
    (PadButton::BACK, "back"),
    (PadButton::GUIDE, "guide"),
    (PadButton::START, "start"),
    (PadButton::LEFT_STICK, "leftstick"),
    (PadButton::RIGHT_STICK, "rightstick"),
    (PadButton::LEFT_SHOULDER, "leftshoulder"),
    (PadButton::RIGHT_SHOULDER, "rightshoulder"),
    (PadButton::DPAD_UP, "dpup"),
    (PadButton::DPAD_DOWN, "dpdown"),
    (PadButton::DPAD_LEFT, "dpleft"),
    (PadButton::DPAD_RIGHT, "dpright"),
];
