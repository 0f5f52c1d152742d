//! Logical key values shared by the input decoder and the dispatcher.

use std::fmt;

/// Byte sent for Ctrl+`k` (the key's low five bits).
pub const fn ctrl(k: u8) -> u8 {
    k & 0x1f
}

pub const ESC: u8 = 0x1b;
pub const ENTER: u8 = b'\r';
pub const DEL: u8 = 0x7f;
/// Ctrl-H, the other byte terminals send for Backspace.
pub const BS: u8 = ctrl(b'h');

/// A decoded keystroke.
///
/// Plain bytes (printable characters and control codes alike) pass through
/// as `Byte`; only multi-byte escape sequences and the two backspace bytes
/// (`BS` and `DEL`) are normalized into named variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Byte(u8),
    Escape,
    Backspace,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

impl Key {
    /// True for `Byte(ctrl(k))`.
    pub fn is_ctrl(self, k: u8) -> bool {
        self == Key::Byte(ctrl(k))
    }

    pub fn is_enter(self) -> bool {
        self == Key::Byte(ENTER)
    }

    /// Keys that erase leftwards in a prompt.
    pub fn is_erase(self) -> bool {
        matches!(self, Key::Backspace | Key::Delete)
    }

    /// Printable ASCII suitable for appending to a prompt buffer.
    pub fn printable(self) -> Option<u8> {
        match self {
            Key::Byte(b) if b.is_ascii() && !b.is_ascii_control() => Some(b),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Byte(b) if b.is_ascii_control() => write!(f, "^{}", (b ^ 0x40) as char),
            Key::Byte(b) if b.is_ascii() => write!(f, "{}", *b as char),
            Key::Byte(b) => write!(f, "\\x{b:02x}"),
            other => write!(f, "<{other:?}>"),
        }
    }
}
