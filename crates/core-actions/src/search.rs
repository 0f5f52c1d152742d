//! Incremental search.
//!
//! Each keystroke in the search prompt re-runs the search: the previous
//! match overlay is restored first, then arrows step to the next/previous
//! match (wrapping around the document) while any other key restarts the
//! search from the top. The matched span is painted with `Highlight::Match`
//! until the next keystroke. Escape returns the cursor and scroll offsets to
//! where they were when the search started; Enter leaves them on the match.

use crate::Frontend;
use crate::prompt::{PromptCallback, run_prompt};
use core_events::Key;
use core_state::{Cursor, EditorState};
use core_text::Highlight;

pub const SEARCH_PROMPT: &str = "Search: {} (Use ESC/Arrows/Enter)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy)]
struct SavedView {
    cursor: Cursor,
    rowoff: usize,
    coloff: usize,
}

#[derive(Debug)]
pub struct SearchController {
    last_match: Option<usize>,
    direction: Direction,
    saved_highlight: Option<(usize, Vec<Highlight>)>,
    origin: SavedView,
}

impl SearchController {
    /// Start a session, remembering the cursor and scroll position.
    pub fn begin(state: &EditorState) -> Self {
        Self {
            last_match: None,
            direction: Direction::Forward,
            saved_highlight: None,
            origin: SavedView {
                cursor: state.cursor,
                rowoff: state.viewport.rowoff,
                coloff: state.viewport.coloff,
            },
        }
    }

    /// Row of the most recent match, if any.
    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    /// Run the search prompt until Enter or Escape.
    pub fn run<F: Frontend + ?Sized>(
        mut self,
        frontend: &mut F,
        state: &mut EditorState,
    ) -> anyhow::Result<()> {
        tracing::debug!(target: "search", "search_started");
        let query = run_prompt(frontend, state, SEARCH_PROMPT, &mut self)?;
        if query.is_none() {
            self.cancel(state);
        }
        Ok(())
    }

    /// Put the cursor and scroll offsets back where the session began.
    pub fn cancel(&mut self, state: &mut EditorState) {
        self.restore_highlight(state);
        let SavedView {
            cursor,
            rowoff,
            coloff,
        } = self.origin;
        state.cursor = cursor;
        state.viewport.rowoff = rowoff;
        state.viewport.coloff = coloff;
        tracing::debug!(target: "search", "search_cancelled");
    }

    fn restore_highlight(&mut self, state: &mut EditorState) {
        if let Some((row, saved)) = self.saved_highlight.take()
            && !state.document.restore_highlight(row, saved)
        {
            tracing::warn!(target: "search", row, "highlight_restore_skipped");
        }
    }

    fn step(&mut self, state: &mut EditorState, query: &str) {
        let num_rows = state.document.num_rows();
        let needle = query.as_bytes();
        if needle.is_empty() || num_rows == 0 {
            return;
        }
        if self.last_match.is_none() {
            self.direction = Direction::Forward;
        }
        let mut current = self.last_match;
        for _ in 0..num_rows {
            let next = match (current, self.direction) {
                (None, _) => 0,
                (Some(r), Direction::Forward) => (r + 1) % num_rows,
                (Some(0), Direction::Backward) => num_rows - 1,
                (Some(r), Direction::Backward) => r - 1,
            };
            current = Some(next);
            let Some(row) = state.document.row(next) else {
                continue;
            };
            let Some(match_rx) = find_bytes(row.rendered(), needle) else {
                continue;
            };
            self.last_match = Some(next);
            state.cursor.cy = next;
            state.cursor.cx = row.rx_to_cx(match_rx);
            state.viewport.rowoff = num_rows;
            self.saved_highlight = state
                .document
                .overlay_highlight(next, match_rx, needle.len(), Highlight::Match)
                .map(|saved| (next, saved));
            tracing::trace!(target: "search", row = next, rx = match_rx, "search_match");
            return;
        }
    }
}

impl PromptCallback for SearchController {
    fn on_keystroke(&mut self, state: &mut EditorState, query: &str, key: Key) {
        self.restore_highlight(state);
        match key {
            k if k.is_enter() || k == Key::Escape => {
                self.last_match = None;
                self.direction = Direction::Forward;
                return;
            }
            Key::Right | Key::Down => self.direction = Direction::Forward,
            Key::Left | Key::Up => self.direction = Direction::Backward,
            _ => {
                self.last_match = None;
                self.direction = Direction::Forward;
            }
        }
        self.step(state, query);
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
