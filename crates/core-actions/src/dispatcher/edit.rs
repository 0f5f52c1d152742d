//! Text edits at the cursor.

use super::motion::handle_motion;
use crate::{Action, MotionKind};
use core_state::EditorState;

/// Apply an editing action. Returns whether the document changed.
pub(crate) fn handle_edit(action: Action, state: &mut EditorState) -> bool {
    let before = state.document.dirty();
    match action {
        Action::Insert(b) => state.insert_char(b),
        Action::Newline => state.insert_newline(),
        Action::Backspace => state.delete_char(),
        Action::DeleteForward => {
            handle_motion(MotionKind::Right, state);
            state.delete_char();
        }
        _ => return false,
    }
    state.document.dirty() != before
}
