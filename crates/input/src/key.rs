use std::fmt;
use std::str::FromStr;

/// Size of the key-down table carried by every snapshot.
pub const KEY_TABLE_LEN: usize = 256;

macro_rules! keys {
    ($($name:ident),* $(,)?) => {
        /// Keyboard keys, mouse buttons and gamepad buttons, each with a
        /// stable code used to index the key-down table.
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Key {
            $($name),*
        }

        impl Key {
            pub const ALL: &'static [Key] = &[$(Key::$name),*];

            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$name => stringify!($name)),*
                }
            }
        }
    };
}

keys! {
    None,
    Tab,
    LeftArrow, RightArrow, UpArrow, DownArrow,
    PageUp, PageDown, Home, End, Insert, Delete, Backspace,
    Space, Enter, Escape,
    LeftCtrl, LeftShift, LeftAlt, LeftSuper,
    RightCtrl, RightShift, RightAlt, RightSuper,
    Shift, Ctrl, Alt, Super, Menu,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,
    Apostrophe, Comma, Minus, Period, Slash, Semicolon, Equal,
    LeftBracket, Backslash, RightBracket, GraveAccent,
    CapsLock, ScrollLock, NumLock, PrintScreen, Pause,
    Keypad0, Keypad1, Keypad2, Keypad3, Keypad4,
    Keypad5, Keypad6, Keypad7, Keypad8, Keypad9,
    KeypadDecimal, KeypadDivide, KeypadMultiply, KeypadSubtract,
    KeypadAdd, KeypadEnter, KeypadEqual,
    AppBack, AppForward, Oem102,
    GamepadStart, GamepadBack,
    GamepadFaceLeft, GamepadFaceRight, GamepadFaceUp, GamepadFaceDown,
    GamepadDpadLeft, GamepadDpadRight, GamepadDpadUp, GamepadDpadDown,
    GamepadL1, GamepadR1, GamepadL2, GamepadR2, GamepadL3, GamepadR3,
    GamepadLStickLeft, GamepadLStickRight, GamepadLStickUp, GamepadLStickDown,
    GamepadRStickLeft, GamepadRStickRight, GamepadRStickUp, GamepadRStickDown,
    MouseLeft, MouseRight, MouseMiddle, MouseX1, MouseX2,
    MouseWheelX, MouseWheelY,
}

impl Key {
    /// Index into the key-down table.
    pub fn code(self) -> usize {
        self as u8 as usize
    }

    pub fn is_mouse_button(self) -> bool {
        matches!(
            self,
            Key::MouseLeft | Key::MouseRight | Key::MouseMiddle | Key::MouseX1 | Key::MouseX2
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A key name that does not match any [`Key`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key/button name: \"{0}\"")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    /// Case-sensitive lookup. `Tilde` is accepted as an alias of `GraveAccent`;
    /// `None` is not a bindable key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Tilde" {
            return Ok(Key::GraveAccent);
        }
        Key::ALL
            .iter()
            .copied()
            .find(|k| *k != Key::None && k.name() == s)
            .ok_or_else(|| UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_fit_the_table() {
        assert!(Key::ALL.len() <= KEY_TABLE_LEN);
        assert_eq!(Key::None.code(), 0);
        assert_eq!(Key::Tab.code(), 1);
        for (i, k) in Key::ALL.iter().enumerate() {
            assert_eq!(k.code(), i);
        }
    }

    #[test]
    fn parse_round_trips_names() {
        for k in Key::ALL.iter().filter(|k| **k != Key::None) {
            assert_eq!(k.name().parse::<Key>(), Ok(*k));
        }
    }

    #[test]
    fn tilde_aliases_grave_accent() {
        assert_eq!("Tilde".parse::<Key>(), Ok(Key::GraveAccent));
    }

    #[test]
    fn unknown_and_none_are_rejected() {
        assert!("None".parse::<Key>().is_err());
        assert!("space".parse::<Key>().is_err());
        assert_eq!(
            "Hyper".parse::<Key>(),
            Err(UnknownKey("Hyper".to_string()))
        );
    }

    #[test]
    fn mouse_buttons_are_flagged() {
        assert!(Key::MouseLeft.is_mouse_button());
        assert!(!Key::Space.is_mouse_button());
    }
}
