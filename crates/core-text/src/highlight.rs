//! Per-row syntax classification.
//!
//! The scan is stateless across rows: an unterminated string ends at the row
//! boundary and the next row starts fresh.

use crate::syntax::{HighlightFlags, Syntax};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    String,
    Number,
    Match,
}

const SEPARATORS: &[u8] = b",.()+-/*=~%<>[];";

/// True for whitespace, NUL and the punctuation that may precede a number.
pub fn is_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'\0' || SEPARATORS.contains(&b)
}

/// Classify every byte of `rendered`. Without a profile all bytes are `Normal`.
pub fn highlight_row(rendered: &[u8], syntax: Option<&Syntax>) -> Vec<Highlight> {
    let mut hl = vec![Highlight::Normal; rendered.len()];
    let Some(syntax) = syntax else {
        return hl;
    };
    let strings = syntax.flags.contains(HighlightFlags::STRINGS);
    let numbers = syntax.flags.contains(HighlightFlags::NUMBERS);

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut i = 0;
    while i < rendered.len() {
        let c = rendered[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };

        if strings {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < rendered.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            }
            if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if numbers
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        prev_sep = is_separator(c);
        i += 1;
    }
    hl
}
