//! Scroll offset maintenance.

use core_state::EditorState;

/// Derive the cursor's rendered column and adjust `rowoff` / `coloff` so the
/// cursor cell lies inside the visible window. Returns the rendered column.
pub fn scroll(state: &mut EditorState) -> usize {
    let rx = state
        .current_row()
        .map_or(0, |row| row.cx_to_rx(state.cursor.cx));
    let cy = state.cursor.cy;
    let vp = &mut state.viewport;
    let rows = vp.screen_rows.max(1);
    let cols = vp.screen_cols.max(1);

    if cy < vp.rowoff {
        vp.rowoff = cy;
    }
    if cy >= vp.rowoff + rows {
        vp.rowoff = cy + 1 - rows;
    }
    if rx < vp.coloff {
        vp.coloff = rx;
    }
    if rx >= vp.coloff + cols {
        vp.coloff = rx + 1 - cols;
    }
    rx
}
