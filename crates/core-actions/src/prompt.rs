//! Single-line prompt shown in the message bar.
//!
//! `PromptInput` is the pure editing state machine; `run_prompt` drives it
//! against a `Frontend`, redrawing before each key and notifying a
//! `PromptCallback` after each key (including the one that ends the prompt).

use crate::Frontend;
use core_events::Key;
use core_state::EditorState;

/// Observer invoked after every prompt keystroke with the current query.
pub trait PromptCallback {
    fn on_keystroke(&mut self, state: &mut EditorState, query: &str, key: Key);
}

/// Callback for plain text prompts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCallback;

impl PromptCallback for NoopCallback {
    fn on_keystroke(&mut self, _state: &mut EditorState, _query: &str, _key: Key) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStep {
    Continue,
    Accept,
    Cancel,
}

#[derive(Debug, Default, Clone)]
pub struct PromptInput {
    buf: String,
}

impl PromptInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    /// Apply one key. Enter only accepts a non-empty buffer.
    pub fn feed(&mut self, key: Key) -> PromptStep {
        if key.is_erase() {
            self.buf.pop();
        } else if key == Key::Escape {
            return PromptStep::Cancel;
        } else if key.is_enter() {
            if !self.buf.is_empty() {
                return PromptStep::Accept;
            }
        } else if let Some(b) = key.printable() {
            self.buf.push(char::from(b));
        }
        PromptStep::Continue
    }
}

/// Substitute the query into the first `{}` of `template`.
pub fn format_prompt(template: &str, query: &str) -> String {
    template.replacen("{}", query, 1)
}

/// Run a prompt to completion. Returns the entered text, or `None` when the
/// user pressed Escape. The status message is cleared when the prompt ends.
pub fn run_prompt<F, C>(
    frontend: &mut F,
    state: &mut EditorState,
    template: &str,
    callback: &mut C,
) -> anyhow::Result<Option<String>>
where
    F: Frontend + ?Sized,
    C: PromptCallback + ?Sized,
{
    let mut input = PromptInput::new();
    loop {
        state.set_status(format_prompt(template, input.as_str()));
        frontend.refresh(state)?;
        let key = frontend.read_key()?;
        let step = input.feed(key);
        if step != PromptStep::Continue {
            state.set_status("");
        }
        callback.on_keystroke(state, input.as_str(), key);
        match step {
            PromptStep::Continue => {}
            PromptStep::Accept => return Ok(Some(input.into_string())),
            PromptStep::Cancel => return Ok(None),
        }
    }
}
