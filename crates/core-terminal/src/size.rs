//! Window size discovery.
//!
//! The direct query (`TIOCGWINSZ` via crossterm) is tried first. When it
//! fails or reports zero columns, the cursor is pushed to the bottom-right
//! corner and the terminal is asked where it ended up.

use anyhow::{Context, Result};
use core_input::{ByteSource, StdinSource, read_cursor_report};
use crossterm::{
    cursor::{MoveDown, MoveRight},
    queue,
};
use std::io::{Write, stdout};
use std::time::Duration;

/// Lines reserved below the text area for the status and message bars.
pub const RESERVED_ROWS: u16 = 2;

const CURSOR_REPORT_TIMEOUT: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub rows: u16,
    pub cols: u16,
}

impl WindowSize {
    /// Rows available for document text.
    pub fn text_rows(&self) -> u16 {
        self.rows.saturating_sub(RESERVED_ROWS)
    }
}

/// Current terminal size. Must be called in raw mode for the fallback to work.
pub fn window_size() -> Result<WindowSize> {
    match crossterm::terminal::size() {
        Ok((cols, rows)) if cols > 0 => Ok(WindowSize { rows, cols }),
        other => {
            tracing::debug!(target: "runtime", ?other, "window_size_fallback");
            let mut source = StdinSource::new(CURSOR_REPORT_TIMEOUT);
            query_cursor_position(&mut stdout(), &mut source)
        }
    }
}

/// Move the cursor as far right and down as it goes, request a position
/// report, and read the reply from `input`.
pub fn query_cursor_position<W, S>(out: &mut W, input: &mut S) -> Result<WindowSize>
where
    W: Write,
    S: ByteSource,
{
    queue!(out, MoveRight(999), MoveDown(999))?;
    out.write_all(b"\x1b[6n")?;
    out.flush()?;
    let (rows, cols) = read_cursor_report(input).context("cursor position query failed")?;
    Ok(WindowSize { rows, cols })
}
