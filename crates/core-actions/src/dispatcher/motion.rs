//! Cursor movement.
//!
//! Horizontal motions cross line boundaries (Left at column 0 lands at the
//! end of the previous row, Right at the end of a row lands at the start of
//! the next). Down may step onto the virtual line past the last row. After
//! every motion `cx` is clamped to the length of the row now under it.

use crate::MotionKind;
use core_state::EditorState;
use core_text::Row;

pub(crate) fn handle_motion(kind: MotionKind, state: &mut EditorState) {
    match kind {
        MotionKind::Left => step_left(state),
        MotionKind::Right => step_right(state),
        MotionKind::Up => step_up(state),
        MotionKind::Down => step_down(state),
        MotionKind::LineStart => state.cursor.cx = 0,
        MotionKind::LineEnd => {
            if let Some(len) = state.current_row().map(Row::len) {
                state.cursor.cx = len;
            }
        }
        MotionKind::PageUp => {
            state.cursor.cy = state.viewport.rowoff;
            for _ in 0..state.viewport.screen_rows {
                step_up(state);
            }
        }
        MotionKind::PageDown => {
            let bottom = (state.viewport.rowoff + state.viewport.screen_rows).saturating_sub(1);
            state.cursor.cy = bottom.min(state.document.num_rows());
            for _ in 0..state.viewport.screen_rows {
                step_down(state);
            }
        }
    }
    state.clamp_cx();
}

fn step_left(state: &mut EditorState) {
    if state.cursor.cx > 0 {
        state.cursor.cx -= 1;
    } else if state.cursor.cy > 0 {
        state.cursor.cy -= 1;
        state.cursor.cx = state.current_row().map_or(0, Row::len);
    }
}

fn step_right(state: &mut EditorState) {
    let Some(len) = state.current_row().map(Row::len) else {
        return;
    };
    if state.cursor.cx < len {
        state.cursor.cx += 1;
    } else {
        state.cursor.cy += 1;
        state.cursor.cx = 0;
    }
}

fn step_up(state: &mut EditorState) {
    state.cursor.cy = state.cursor.cy.saturating_sub(1);
}

fn step_down(state: &mut EditorState) {
    if state.cursor.cy < state.document.num_rows() {
        state.cursor.cy += 1;
    }
}
