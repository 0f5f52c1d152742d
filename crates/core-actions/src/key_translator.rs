//! Key -> `Action` mapping.

use crate::{Action, MotionKind};
use core_events::{ENTER, Key, ctrl};

const TAB: u8 = b'\t';

pub fn translate_key(key: Key) -> Action {
    match key {
        Key::Byte(ENTER) => Action::Newline,
        Key::Byte(b) if b == ctrl(b'q') => Action::Quit,
        Key::Byte(b) if b == ctrl(b's') => Action::Save,
        Key::Byte(b) if b == ctrl(b'f') => Action::Find,
        Key::Byte(TAB) => Action::Insert(TAB),
        // Ctrl-L and the remaining control bytes do nothing.
        Key::Byte(b) if b.is_ascii_control() => Action::Noop,
        Key::Byte(b) => Action::Insert(b),
        Key::Backspace => Action::Backspace,
        Key::Delete => Action::DeleteForward,
        Key::Escape => Action::Noop,
        Key::Up => Action::Motion(MotionKind::Up),
        Key::Down => Action::Motion(MotionKind::Down),
        Key::Left => Action::Motion(MotionKind::Left),
        Key::Right => Action::Motion(MotionKind::Right),
        Key::Home => Action::Motion(MotionKind::LineStart),
        Key::End => Action::Motion(MotionKind::LineEnd),
        Key::PageUp => Action::Motion(MotionKind::PageUp),
        Key::PageDown => Action::Motion(MotionKind::PageDown),
    }
}
