//! Raw terminal input: byte sources with a read timeout and the decoder that
//! folds escape sequences into logical keys.
//!
//! Reading is a bounded poll, never an unbounded wait: a source returns
//! `Ok(None)` when nothing arrived within its timeout and the caller simply
//! polls again. The same timeout bounds how long a lone `ESC` can stay
//! ambiguous before it is reported as the Escape key.

mod decoder;
mod report;
mod source;

pub use decoder::KeyDecoder;
pub use report::{parse_cursor_report, read_cursor_report};
pub use source::{ByteSource, ScriptedSource, StdinSource};

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("read from terminal failed: {0}")]
    Read(#[from] io::Error),
    #[error("malformed cursor position report {0:?}")]
    CursorReport(String),
}
