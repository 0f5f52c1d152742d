//! Status bar composition.
//!
//! The bar is built in two stages:
//! 1. `compose_status` produces the left (file) and right (file type and
//!    position) segments from a `StatusContext`.
//! 2. `layout_status` fits them into exactly `width` cells: the left segment
//!    is truncated to the width, then spaces pad until the right segment fits
//!    flush against the edge. When the right segment does not fit it is
//!    dropped and the bar is padded with spaces.

use std::path::Path;

/// File names longer than this are cut in the left segment.
pub const NAME_DISPLAY_WIDTH: usize = 20;
const NO_NAME: &str = "[No Name]";
const NO_FILETYPE: &str = "no ft";

/// What the status bar needs to know about the editor.
pub struct StatusContext<'a> {
    pub file_name: Option<&'a Path>,
    pub num_rows: usize,
    pub dirty: bool,
    pub filetype: Option<&'static str>,
    /// 0-based cursor row.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSegments {
    pub left: String,
    pub right: String,
}

pub fn compose_status(ctx: &StatusContext<'_>) -> StatusSegments {
    let name = ctx
        .file_name
        .map(|p| p.to_string_lossy())
        .unwrap_or_else(|| NO_NAME.into());
    let modified = if ctx.dirty { "(modified)" } else { "" };
    let left = format!(
        "{:.width$} - {} lines {}",
        name,
        ctx.num_rows,
        modified,
        width = NAME_DISPLAY_WIDTH
    );
    let right = format!(
        "{} | {}/{}",
        ctx.filetype.unwrap_or(NO_FILETYPE),
        ctx.line + 1,
        ctx.num_rows
    );
    StatusSegments { left, right }
}

pub fn layout_status(segments: &StatusSegments, width: usize) -> String {
    let mut line: String = segments.left.chars().take(width).collect();
    let mut len = line.chars().count();
    let right_len = segments.right.chars().count();
    while len < width {
        if width - len == right_len {
            line.push_str(&segments.right);
            break;
        }
        line.push(' ');
        len += 1;
    }
    line
}

/// Compose and lay out in one step.
pub fn build_status(ctx: &StatusContext<'_>, width: usize) -> String {
    layout_status(&compose_status(ctx), width)
}
