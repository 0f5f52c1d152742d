//! A single document line plus its derived render and highlight data.
//!
//! Invariants (hold after every public call):
//! * `rendered == render(content)`.
//! * `highlight.len() == rendered.len()`.
//!
//! Column spaces:
//! * `cx` indexes `content` (what edits address).
//! * `rx` indexes `rendered` (what the terminal shows). The two coincide only
//!   on tab-free rows; `cx_to_rx` / `rx_to_cx` translate between them.

use crate::highlight::{Highlight, highlight_row};
use crate::syntax::Syntax;

/// Tab stops are fixed every eight rendered columns.
pub const TAB_STOP: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    content: Vec<u8>,
    rendered: Vec<u8>,
    highlight: Vec<Highlight>,
}

impl Row {
    /// Build a row from raw line bytes and classify it under `syntax`.
    pub fn new(content: impl Into<Vec<u8>>, syntax: Option<&Syntax>) -> Self {
        let mut row = Self {
            content: content.into(),
            rendered: Vec::new(),
            highlight: Vec::new(),
        };
        row.update(syntax);
        row
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    pub fn highlight(&self) -> &[Highlight] {
        &self.highlight
    }

    /// Length of the raw content in bytes (the valid `cx` range is `0..=len`).
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Insert `ch` before `at`; an out-of-range `at` appends.
    pub fn insert_byte(&mut self, at: usize, ch: u8, syntax: Option<&Syntax>) {
        let at = at.min(self.content.len());
        self.content.insert(at, ch);
        self.update(syntax);
    }

    /// Remove the byte at `at`. Returns false (and leaves the row untouched)
    /// when `at` is out of range.
    pub fn delete_byte(&mut self, at: usize, syntax: Option<&Syntax>) -> bool {
        if at >= self.content.len() {
            return false;
        }
        self.content.remove(at);
        self.update(syntax);
        true
    }

    pub fn append(&mut self, text: &[u8], syntax: Option<&Syntax>) {
        self.content.extend_from_slice(text);
        self.update(syntax);
    }

    /// Cut the row at `at`, returning the tail. `at` past the end yields an
    /// empty tail.
    pub fn split_off(&mut self, at: usize, syntax: Option<&Syntax>) -> Vec<u8> {
        let at = at.min(self.content.len());
        let tail = self.content.split_off(at);
        self.update(syntax);
        tail
    }

    /// Recompute `rendered` and `highlight` from `content`.
    pub fn update(&mut self, syntax: Option<&Syntax>) {
        self.rendered = render(&self.content);
        self.rehighlight(syntax);
    }

    /// Recompute only the highlight classification (language profile change).
    pub fn rehighlight(&mut self, syntax: Option<&Syntax>) {
        self.highlight = highlight_row(&self.rendered, syntax);
    }

    /// Replace the highlight array wholesale. Used to restore a saved copy
    /// after a temporary overlay; a slice of the wrong length is ignored.
    pub fn restore_highlight(&mut self, saved: Vec<Highlight>) -> bool {
        if saved.len() != self.rendered.len() {
            return false;
        }
        self.highlight = saved;
        true
    }

    /// Paint `class` over `[start, start + len)` of the rendered text, clamped
    /// to the row.
    pub fn overlay(&mut self, start: usize, len: usize, class: Highlight) {
        let end = start.saturating_add(len).min(self.highlight.len());
        if start >= end {
            return;
        }
        self.highlight[start..end].fill(class);
    }

    pub fn cx_to_rx(&self, cx: usize) -> usize {
        cx_to_rx(&self.content, cx)
    }

    pub fn rx_to_cx(&self, rx: usize) -> usize {
        rx_to_cx(&self.content, rx)
    }
}

#[inline]
fn advance(rx: usize, byte: u8) -> usize {
    if byte == b'\t' {
        rx + (TAB_STOP - 1) - (rx % TAB_STOP) + 1
    } else {
        rx + 1
    }
}

/// Expand tabs to spaces up to the next multiple of `TAB_STOP` (at least one).
pub fn render(content: &[u8]) -> Vec<u8> {
    let tabs = content.iter().filter(|&&b| b == b'\t').count();
    let mut out = Vec::with_capacity(content.len() + tabs * (TAB_STOP - 1));
    for &b in content {
        if b == b'\t' {
            out.push(b' ');
            while out.len() % TAB_STOP != 0 {
                out.push(b' ');
            }
        } else {
            out.push(b);
        }
    }
    out
}

/// Rendered column of logical column `cx`. `cx` past the end is clamped.
pub fn cx_to_rx(content: &[u8], cx: usize) -> usize {
    let cx = cx.min(content.len());
    content[..cx].iter().fold(0, |rx, &b| advance(rx, b))
}

/// Logical column whose rendered cell contains `rx`. Positions inside a tab's
/// expansion resolve to the tab itself; `rx` past the end yields
/// `content.len()`.
pub fn rx_to_cx(content: &[u8], rx: usize) -> usize {
    let mut cur_rx = 0;
    for (cx, &b) in content.iter().enumerate() {
        cur_rx = advance(cur_rx, b);
        if cur_rx > rx {
            return cx;
        }
    }
    content.len()
}
