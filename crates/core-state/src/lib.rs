//! Editor state: the document, cursor, viewport offsets and status message.
//!
//! A single `EditorState` is passed by `&mut` into every entry point
//! (dispatcher, search, compositor); there are no globals. Cursor
//! coordinates follow the document's addressing rules:
//! * `cy` ranges over `0..=num_rows()`; `cy == num_rows()` is the virtual
//!   line past the end where typing appends a new row.
//! * `cx` indexes the current row's raw content and is clamped to its
//!   length after every motion.
//! * The rendered column `rx` is never stored; the compositor derives it
//!   from `cx` on each frame.

pub mod document;

pub use document::{Document, DocumentError};

use core_text::Row;
use std::time::{Duration, Instant};

/// How long a status message stays visible unless configured otherwise.
pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub cx: usize,
    pub cy: usize,
}

/// Visible window into the document. `screen_rows` / `screen_cols` count
/// text cells only; the status and message bars are extra.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub rowoff: usize,
    pub coloff: usize,
    pub screen_rows: usize,
    pub screen_cols: usize,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
}

pub struct EditorState {
    pub document: Document,
    pub cursor: Cursor,
    pub viewport: Viewport,
    status: Option<StatusMessage>,
    message_timeout: Duration,
}

impl EditorState {
    pub fn new(document: Document, screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            document,
            cursor: Cursor::default(),
            viewport: Viewport {
                screen_rows,
                screen_cols,
                ..Viewport::default()
            },
            status: None,
            message_timeout: DEFAULT_MESSAGE_TIMEOUT,
        }
    }

    pub fn with_message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = timeout;
        self
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.set_status_at(text, Instant::now());
    }

    pub fn set_status_at(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        tracing::trace!(target: "state", len = text.len(), "status_set");
        self.status = Some(StatusMessage { text, set_at: now });
    }

    /// The status message if it was set less than the timeout before `now`.
    pub fn status_message(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|m| now.saturating_duration_since(m.set_at) < self.message_timeout)
            .map(|m| m.text.as_str())
    }

    /// Row under the cursor, or `None` on the virtual line past the end.
    pub fn current_row(&self) -> Option<&Row> {
        self.document.row(self.cursor.cy)
    }

    /// Clamp `cx` to the length of the row now under the cursor.
    pub fn clamp_cx(&mut self) {
        let len = self.current_row().map_or(0, Row::len);
        if self.cursor.cx > len {
            self.cursor.cx = len;
        }
    }

    pub fn insert_char(&mut self, ch: u8) {
        let Cursor { cx, cy } = self.cursor;
        self.document.insert_char(cy, cx, ch);
        self.cursor.cx += 1;
    }

    /// Break the line at the cursor; the cursor moves to the start of the new line.
    pub fn insert_newline(&mut self) {
        let Cursor { cx, cy } = self.cursor;
        if cx == 0 {
            self.document.insert_row(cy, b"");
        } else {
            self.document.split_row(cy, cx);
        }
        self.cursor.cy += 1;
        self.cursor.cx = 0;
    }

    /// Backspace: delete the byte left of the cursor, or join the current
    /// row onto the previous one when at column 0.
    pub fn delete_char(&mut self) {
        let Cursor { cx, cy } = self.cursor;
        if cy == self.document.num_rows() || (cx == 0 && cy == 0) {
            return;
        }
        if cx > 0 {
            self.document.delete_char(cy, cx - 1);
            self.cursor.cx -= 1;
            return;
        }
        let Some(prev_len) = self.document.row(cy - 1).map(Row::len) else {
            return;
        };
        let tail = self
            .document
            .row(cy)
            .map(|r| r.content().to_vec())
            .unwrap_or_default();
        self.document.append_text(cy - 1, &tail);
        self.document.delete_row(cy);
        self.cursor.cy -= 1;
        self.cursor.cx = prev_len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(lines: &[&str]) -> EditorState {
        EditorState::new(Document::from_lines(lines.iter().copied()), 10, 40)
    }

    fn contents(st: &EditorState) -> Vec<String> {
        st.document
            .rows()
            .iter()
            .map(|r| String::from_utf8_lossy(r.content()).into_owned())
            .collect()
    }

    #[test]
    fn typing_past_eof_creates_row() {
        let mut st = state(&[]);
        st.insert_char(b'h');
        st.insert_char(b'i');
        assert_eq!(contents(&st), vec!["hi"]);
        assert_eq!(st.cursor, Cursor { cx: 2, cy: 0 });
        assert!(st.document.is_dirty());
    }

    #[test]
    fn newline_splits_at_cursor() {
        let mut st = state(&["hello world"]);
        st.cursor.cx = 5;
        st.insert_newline();
        assert_eq!(contents(&st), vec!["hello", " world"]);
        assert_eq!(st.cursor, Cursor { cx: 0, cy: 1 });
    }

    #[test]
    fn newline_at_column_zero_inserts_above() {
        let mut st = state(&["abc"]);
        st.insert_newline();
        assert_eq!(contents(&st), vec!["", "abc"]);
        assert_eq!(st.cursor, Cursor { cx: 0, cy: 1 });
    }

    #[test]
    fn backspace_at_column_zero_merges_rows() {
        let mut st = state(&["ab", "cd", "ef"]);
        st.cursor = Cursor { cx: 0, cy: 1 };
        st.delete_char();
        assert_eq!(contents(&st), vec!["abcd", "ef"]);
        assert_eq!(st.cursor, Cursor { cx: 2, cy: 0 });
        assert_eq!(st.document.num_rows(), 2);
    }

    #[test]
    fn backspace_noops_at_origin_and_past_eof() {
        let mut st = state(&["ab"]);
        st.delete_char();
        st.cursor = Cursor { cx: 0, cy: 1 };
        st.delete_char();
        assert_eq!(contents(&st), vec!["ab"]);
        assert_eq!(st.document.dirty(), 0);
    }

    #[test]
    fn insert_then_backspace_restores_row() {
        let mut st = state(&["a\tb"]);
        let before = st.document.row(0).unwrap().clone();
        st.cursor.cx = 2;
        st.insert_char(b'x');
        st.delete_char();
        let after = st.document.row(0).unwrap();
        assert_eq!(after.content(), before.content());
        assert_eq!(after.rendered(), before.rendered());
        assert_eq!(st.cursor.cx, 2);
    }

    #[test]
    fn status_message_expires() {
        let mut st = state(&[]).with_message_timeout(Duration::from_secs(5));
        let t0 = Instant::now();
        st.set_status_at("saved", t0);
        assert_eq!(st.status_message(t0 + Duration::from_secs(4)), Some("saved"));
        assert_eq!(st.status_message(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn clamp_cx_follows_row_length() {
        let mut st = state(&["long line", "ab"]);
        st.cursor = Cursor { cx: 9, cy: 1 };
        st.clamp_cx();
        assert_eq!(st.cursor.cx, 2);
        st.cursor = Cursor { cx: 4, cy: 2 };
        st.clamp_cx();
        assert_eq!(st.cursor.cx, 0);
    }
}
