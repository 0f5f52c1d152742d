//! Frame assembly.
//!
//! `Compositor` owns a reusable byte buffer. Every refresh clears it, queues
//! the whole screen into it, and the caller writes it out with one
//! `write_all` followed by a flush.

use crate::escape::{SetSgrColor, color_code};
use crate::status::{StatusContext, build_status};
use crate::viewport::scroll;
use core_state::EditorState;
use core_text::Row;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};
use std::time::Instant;

/// Text shown in the middle of an empty buffer.
pub const WELCOME_TITLE: &str = concat!("Tilde editor -- version ", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Default)]
pub struct Compositor {
    frame: Vec<u8>,
    frames: u64,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames composed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Scroll the viewport to the cursor and compose a full frame. The
    /// returned slice stays valid until the next call.
    pub fn compose(&mut self, state: &mut EditorState, now: Instant) -> io::Result<&[u8]> {
        let rx = scroll(state);
        self.frame.clear();
        let out = &mut self.frame;

        queue!(out, Hide, MoveTo(0, 0))?;
        draw_rows(out, state)?;
        draw_status_bar(out, state)?;
        draw_message_bar(out, state, now)?;

        let vp = &state.viewport;
        let col = to_cell(rx.saturating_sub(vp.coloff));
        let row = to_cell(state.cursor.cy.saturating_sub(vp.rowoff));
        queue!(out, MoveTo(col, row), Show)?;

        self.frames += 1;
        tracing::trace!(
            target: "render",
            frame = self.frames,
            bytes = self.frame.len(),
            rowoff = vp.rowoff,
            coloff = vp.coloff,
            "frame_composed"
        );
        Ok(&self.frame)
    }

    /// Compose a frame and emit it to `out` in a single write.
    pub fn refresh<W: Write>(
        &mut self,
        out: &mut W,
        state: &mut EditorState,
        now: Instant,
    ) -> io::Result<()> {
        let frame = self.compose(state, now)?;
        out.write_all(frame)?;
        out.flush()
    }
}

fn to_cell(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn draw_rows(out: &mut Vec<u8>, state: &EditorState) -> io::Result<()> {
    let vp = &state.viewport;
    let doc = &state.document;
    for y in 0..vp.screen_rows {
        match doc.row(vp.rowoff + y) {
            Some(row) => draw_text_row(out, row, vp.coloff, vp.screen_cols)?,
            None if doc.is_empty() && y == vp.screen_rows / 3 => {
                draw_welcome(out, vp.screen_cols);
            }
            None => out.push(b'~'),
        }
        queue!(out, Clear(ClearType::UntilNewLine))?;
        out.extend_from_slice(b"\r\n");
    }
    Ok(())
}

/// Visible slice of a row, switching colors only where the class changes.
fn draw_text_row(out: &mut Vec<u8>, row: &Row, coloff: usize, cols: usize) -> io::Result<()> {
    let rendered = row.rendered();
    let start = coloff.min(rendered.len());
    let end = (start + cols).min(rendered.len());
    let classes = row.highlight();

    let mut current: Option<u8> = None;
    for (i, &byte) in rendered[start..end].iter().enumerate() {
        let class = classes.get(start + i).copied().unwrap_or_default();
        match color_code(class) {
            None => {
                if current.take().is_some() {
                    queue!(out, SetForegroundColor(Color::Reset))?;
                }
            }
            Some(code) => {
                if current != Some(code) {
                    current = Some(code);
                    queue!(out, SetSgrColor(code))?;
                }
            }
        }
        out.push(byte);
    }
    queue!(out, SetForegroundColor(Color::Reset))?;
    Ok(())
}

fn draw_welcome(out: &mut Vec<u8>, cols: usize) {
    let title = &WELCOME_TITLE.as_bytes()[..WELCOME_TITLE.len().min(cols)];
    let mut padding = (cols - title.len()) / 2;
    if padding > 0 {
        out.push(b'~');
        padding -= 1;
    }
    out.resize(out.len() + padding, b' ');
    out.extend_from_slice(title);
}

fn draw_status_bar(out: &mut Vec<u8>, state: &EditorState) -> io::Result<()> {
    let doc = &state.document;
    let ctx = StatusContext {
        file_name: doc.file_name(),
        num_rows: doc.num_rows(),
        dirty: doc.is_dirty(),
        filetype: doc.syntax().map(|s| s.name),
        line: state.cursor.cy,
    };
    let bar = build_status(&ctx, state.viewport.screen_cols);
    queue!(out, SetAttribute(Attribute::Reverse))?;
    out.extend_from_slice(bar.as_bytes());
    queue!(out, SetAttribute(Attribute::Reset))?;
    out.extend_from_slice(b"\r\n");
    Ok(())
}

fn draw_message_bar(out: &mut Vec<u8>, state: &EditorState, now: Instant) -> io::Result<()> {
    queue!(out, Clear(ClearType::UntilNewLine))?;
    if let Some(msg) = state.status_message(now) {
        let visible: String = msg.chars().take(state.viewport.screen_cols).collect();
        out.extend_from_slice(visible.as_bytes());
    }
    Ok(())
}
