//! Escape sequences crossterm has no exact command for.
//!
//! crossterm's `SetForegroundColor` emits 256-color sequences; highlight
//! classes use the classic eight-color SGR codes instead, so they get a
//! small custom `Command`.

use core_text::Highlight;
use crossterm::Command;
use std::fmt;

/// SGR foreground code for a highlight class. `Normal` has none; it is
/// drawn in the terminal's default foreground (`39`).
pub fn color_code(class: Highlight) -> Option<u8> {
    match class {
        Highlight::Number => Some(31),
        Highlight::Match => Some(34),
        Highlight::String => Some(35),
        Highlight::Normal => None,
    }
}

/// `ESC [ <code> m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSgrColor(pub u8);

impl Command for SetSgrColor {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        write!(f, "\x1b[{}m", self.0)
    }
}
