//! File IO flows that touch the user: opening at startup and saving with an
//! optional save-as prompt. Failures become status messages; the document
//! is left as it was.

use crate::Frontend;
use crate::prompt::{NoopCallback, run_prompt};
use core_state::{Document, EditorState};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SAVE_AS_PROMPT: &str = "Save as: {}  (ESC to cancel)";

/// How opening a path went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Loaded,
    /// The path does not exist yet; the empty buffer is bound to it.
    NewFile,
    /// Any other failure; the empty buffer is unnamed.
    Failed(String),
}

impl OpenOutcome {
    /// Status message to show for this outcome, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            OpenOutcome::Loaded => None,
            OpenOutcome::NewFile => Some("New file"),
            OpenOutcome::Failed(msg) => Some(msg),
        }
    }
}

pub fn open_document(path: &Path) -> (Document, OpenOutcome) {
    let mut doc = Document::new();
    match doc.load(path) {
        Ok(()) => (doc, OpenOutcome::Loaded),
        Err(e) if e.io_error().kind() == ErrorKind::NotFound => {
            tracing::info!(target: "io", path = %path.display(), "file_new");
            let mut doc = Document::new();
            doc.set_file_name(path);
            (doc, OpenOutcome::NewFile)
        }
        Err(e) => {
            tracing::error!(target: "io", error = %e, "file_open_error");
            let msg = format!("Can't open {}: {}", path.display(), e.io_error());
            (Document::new(), OpenOutcome::Failed(msg))
        }
    }
}

/// Save to the bound file name, prompting for one first when the buffer has
/// none. Returns the number of bytes written, or `None` when the save was
/// aborted or failed (the status message says which).
pub fn save_document<F: Frontend + ?Sized>(
    frontend: &mut F,
    state: &mut EditorState,
) -> anyhow::Result<Option<usize>> {
    let path: PathBuf = match state.document.file_name() {
        Some(p) => p.to_path_buf(),
        None => match run_prompt(frontend, state, SAVE_AS_PROMPT, &mut NoopCallback)? {
            Some(name) => {
                state.document.set_file_name(&name);
                PathBuf::from(name)
            }
            None => {
                tracing::debug!(target: "io", "save_aborted");
                state.set_status("Save aborted");
                return Ok(None);
            }
        },
    };
    match state.document.save(&path) {
        Ok(n) => {
            state.set_status(format!("{n} bytes written to disk"));
            Ok(Some(n))
        }
        Err(e) => {
            state.set_status(format!("Can't save! I/O error: {}", e.io_error()));
            Ok(None)
        }
    }
}
