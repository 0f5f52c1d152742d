//! Key handling: translation of decoded keys into editor actions, the
//! dispatcher that applies them, and the interactive prompt and search
//! sessions layered on top.
//!
//! Interactive work (prompts, search) needs to redraw and read keys while it
//! runs; it does so through the `Frontend` seam so tests can script a whole
//! session without a terminal.

pub mod dispatcher;
pub mod io_ops;
pub mod key_translator;
pub mod prompt;
pub mod search;

pub use dispatcher::{DEFAULT_QUIT_TIMES, DispatchResult, Dispatcher};
pub use io_ops::{OpenOutcome, open_document, save_document};
pub use key_translator::translate_key;
pub use prompt::{NoopCallback, PromptCallback, PromptInput, PromptStep, run_prompt};
pub use search::SearchController;

use core_events::Key;
use core_state::EditorState;

/// Editor command derived from a single key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert(u8),
    Newline,
    Backspace,
    /// Delete the byte under the cursor (move right, then backspace).
    DeleteForward,
    Motion(MotionKind),
    Save,
    Quit,
    Find,
    Noop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

/// Screen and keyboard as seen by interactive sessions.
pub trait Frontend {
    /// Draw a frame reflecting `state`.
    fn refresh(&mut self, state: &mut EditorState) -> anyhow::Result<()>;
    /// Block until the next key arrives.
    fn read_key(&mut self) -> anyhow::Result<Key>;
}

impl<F: Frontend + ?Sized> Frontend for &mut F {
    fn refresh(&mut self, state: &mut EditorState) -> anyhow::Result<()> {
        (**self).refresh(state)
    }

    fn read_key(&mut self) -> anyhow::Result<Key> {
        (**self).read_key()
    }
}
