//! Key dispatch.
//!
//! `Dispatcher` turns each decoded key into an `Action` and applies it to the
//! editor state. Sub-modules:
//! * `motion` - cursor movement
//! * `edit`   - insert / newline / backspace / delete
//!
//! Save and search run interactive prompts through the `Frontend`. The
//! dispatcher also owns the quit gate: with unsaved changes, Ctrl-Q must be
//! pressed `quit_times` times in a row; any other key starts the count over.

use crate::io_ops::save_document;
use crate::key_translator::translate_key;
use crate::search::SearchController;
use crate::{Action, Frontend};
use core_events::Key;
use core_state::EditorState;

mod edit;
mod motion;

/// Consecutive Ctrl-Q presses needed to discard unsaved changes.
pub const DEFAULT_QUIT_TIMES: u32 = 3;

/// Outcome of dispatching one key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// The document content changed.
    pub edited: bool,
    /// The editor should exit.
    pub quit: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn edited() -> Self {
        Self {
            edited: true,
            quit: false,
        }
    }

    pub fn quit() -> Self {
        Self {
            edited: false,
            quit: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    quit_times: u32,
    quit_presses: u32,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_QUIT_TIMES)
    }
}

impl Dispatcher {
    /// `quit_times` below 1 is treated as 1.
    pub fn new(quit_times: u32) -> Self {
        Self {
            quit_times: quit_times.max(1),
            quit_presses: 0,
        }
    }

    pub fn quit_times(&self) -> u32 {
        self.quit_times
    }

    /// Translate and apply one key.
    pub fn dispatch<F: Frontend + ?Sized>(
        &mut self,
        key: Key,
        state: &mut EditorState,
        frontend: &mut F,
    ) -> anyhow::Result<DispatchResult> {
        let action = translate_key(key);
        tracing::trace!(target: "actions.dispatch", %key, ?action, "dispatch");
        self.apply(action, state, frontend)
    }

    pub fn apply<F: Frontend + ?Sized>(
        &mut self,
        action: Action,
        state: &mut EditorState,
        frontend: &mut F,
    ) -> anyhow::Result<DispatchResult> {
        if action == Action::Quit {
            return Ok(self.quit_requested(state));
        }
        self.quit_presses = 0;
        let result = match action {
            Action::Motion(kind) => {
                motion::handle_motion(kind, state);
                DispatchResult::clean()
            }
            Action::Save => {
                save_document(frontend, state)?;
                DispatchResult::clean()
            }
            Action::Find => {
                SearchController::begin(state).run(frontend, state)?;
                DispatchResult::clean()
            }
            Action::Noop => DispatchResult::clean(),
            edit_action => {
                if edit::handle_edit(edit_action, state) {
                    DispatchResult::edited()
                } else {
                    DispatchResult::clean()
                }
            }
        };
        Ok(result)
    }

    fn quit_requested(&mut self, state: &mut EditorState) -> DispatchResult {
        if !state.document.is_dirty() {
            return DispatchResult::quit();
        }
        self.quit_presses += 1;
        if self.quit_presses >= self.quit_times {
            tracing::info!(target: "actions.dispatch", dirty = state.document.dirty(), "quit_discarding_changes");
            return DispatchResult::quit();
        }
        let remaining = self.quit_times - self.quit_presses;
        state.set_status(format!(
            "WARNING! File has unsaved changes. Press Ctrl-Q {remaining} more times to quit."
        ));
        DispatchResult::clean()
    }
}
