//! Row storage, tab expansion and per-byte syntax classification.
//!
//! Everything in this crate is byte oriented: a row's `content` is the raw
//! line as read from disk (without its terminator), `rendered` is the
//! tab-expanded form shown on screen, and `highlight` classifies each
//! rendered byte. The three are kept consistent by `Row` itself; callers
//! mutate content only through `Row` methods, which re-render synchronously.

pub mod highlight;
pub mod row;
pub mod syntax;

pub use highlight::{Highlight, highlight_row, is_separator};
pub use row::{Row, TAB_STOP, cx_to_rx, render, rx_to_cx};
pub use syntax::{HIGHLIGHT_DB, HighlightFlags, Syntax, select_syntax};
