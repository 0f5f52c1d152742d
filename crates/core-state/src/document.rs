//! Document buffer: the ordered rows of the open file plus edit bookkeeping.
//!
//! Row indices are plain coordinates valid until the next structural edit
//! (`insert_row` / `delete_row`); nothing here hands out references that
//! could outlive one. Every mutation bumps the dirty counter and re-renders
//! the touched row before returning.

use core_text::{Highlight, Row, Syntax, select_syntax};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("can't open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("can't save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DocumentError {
    /// The underlying OS error, for user-facing messages.
    pub fn io_error(&self) -> &io::Error {
        match self {
            DocumentError::Open { source, .. } | DocumentError::Save { source, .. } => source,
        }
    }
}

#[derive(Debug, Default)]
pub struct Document {
    rows: Vec<Row>,
    dirty: u64,
    file_name: Option<PathBuf>,
    syntax: Option<&'static Syntax>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an unnamed document from in-memory lines (dirty counter starts at zero).
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let rows = lines
            .into_iter()
            .map(|l| Row::new(l.as_ref().to_vec(), None))
            .collect();
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, at: usize) -> Option<&Row> {
        self.rows.get(at)
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Edit counter since the last load/save. Nonzero means unsaved changes.
    pub fn dirty(&self) -> u64 {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn syntax(&self) -> Option<&'static Syntax> {
        self.syntax
    }

    /// Bind the document to `path` and re-select its language profile.
    pub fn set_file_name(&mut self, path: impl Into<PathBuf>) {
        self.file_name = Some(path.into());
        self.select_syntax();
    }

    /// Pick the language profile for the current file name and re-highlight
    /// every row under it.
    pub fn select_syntax(&mut self) {
        let name = self
            .file_name
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());
        self.syntax = name.as_deref().and_then(select_syntax);
        tracing::debug!(
            target: "io",
            file = name.as_deref(),
            filetype = self.syntax.map(|s| s.name),
            "syntax_selected"
        );
        let syntax = self.syntax;
        for row in &mut self.rows {
            row.rehighlight(syntax);
        }
    }

    /// Insert a new row before `at`; `at == num_rows()` appends. Out of range is a no-op.
    pub fn insert_row(&mut self, at: usize, text: &[u8]) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(text.to_vec(), self.syntax));
        self.dirty += 1;
    }

    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.dirty += 1;
    }

    /// Insert `ch` at `(row, col)`. Addressing the virtual row past the end
    /// first appends an empty row.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: u8) {
        if row == self.rows.len() {
            self.insert_row(row, b"");
        }
        let syntax = self.syntax;
        if let Some(r) = self.rows.get_mut(row) {
            r.insert_byte(col, ch, syntax);
            self.dirty += 1;
        }
    }

    /// Delete the byte at `(row, col)`. Addressing the virtual row past the
    /// end first appends an empty row.
    pub fn delete_char(&mut self, row: usize, col: usize) {
        if row == self.rows.len() {
            self.insert_row(row, b"");
        }
        let syntax = self.syntax;
        if let Some(r) = self.rows.get_mut(row)
            && r.delete_byte(col, syntax)
        {
            self.dirty += 1;
        }
    }

    pub fn append_text(&mut self, row: usize, text: &[u8]) {
        let syntax = self.syntax;
        if let Some(r) = self.rows.get_mut(row) {
            r.append(text, syntax);
            self.dirty += 1;
        }
    }

    /// Split `row` at `col`, moving the tail into a new row directly below.
    pub fn split_row(&mut self, row: usize, col: usize) {
        let syntax = self.syntax;
        let Some(r) = self.rows.get_mut(row) else {
            return;
        };
        let tail = r.split_off(col, syntax);
        self.dirty += 1;
        self.insert_row(row + 1, &tail);
    }

    /// Paint a temporary highlight over `[start, start + len)` of a row's
    /// rendered text, returning the highlight it replaced.
    pub fn overlay_highlight(
        &mut self,
        row: usize,
        start: usize,
        len: usize,
        class: Highlight,
    ) -> Option<Vec<Highlight>> {
        let r = self.rows.get_mut(row)?;
        let saved = r.highlight().to_vec();
        r.overlay(start, len, class);
        Some(saved)
    }

    /// Put back a highlight array previously returned by `overlay_highlight`.
    /// Not a content edit: the dirty counter is untouched.
    pub fn restore_highlight(&mut self, row: usize, saved: Vec<Highlight>) -> bool {
        match self.rows.get_mut(row) {
            Some(r) => r.restore_highlight(saved),
            None => false,
        }
    }

    /// Serialize all rows, each followed by `\n`.
    pub fn to_text(&self) -> Vec<u8> {
        let total = self.rows.iter().map(|r| r.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for row in &self.rows {
            out.extend_from_slice(row.content());
            out.push(b'\n');
        }
        out
    }

    /// Replace the contents with the lines of `path`, binding the document to it.
    pub fn load(&mut self, path: &Path) -> Result<(), DocumentError> {
        let data = fs::read(path).map_err(|source| DocumentError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.file_name = Some(path.to_path_buf());
        self.select_syntax();
        self.rows = split_lines(&data)
            .map(|line| Row::new(line.to_vec(), self.syntax))
            .collect();
        self.dirty = 0;
        tracing::debug!(
            target: "io",
            file = %path.display(),
            size_bytes = data.len(),
            line_count = self.rows.len(),
            "file_read_ok"
        );
        Ok(())
    }

    /// Write the whole document to `path`: open-or-create, truncate to the
    /// new length, write. A failure part way leaves the file unspecified;
    /// the caller decides whether to retry. Returns the byte count written.
    pub fn save(&mut self, path: &Path) -> Result<usize, DocumentError> {
        let text = self.to_text();
        write_truncating(path, &text).map_err(|source| {
            tracing::error!(target: "io", file = %path.display(), ?source, "file_write_error");
            DocumentError::Save {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.dirty = 0;
        tracing::debug!(target: "io", file = %path.display(), size_bytes = text.len(), "file_write_ok");
        Ok(text.len())
    }
}

/// Lines of `data` split on `\n`, each stripped of trailing `\r`/`\n`. A
/// final terminator does not produce an extra empty line.
fn split_lines(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    let body = data.strip_suffix(b"\n").unwrap_or(data);
    let mut lines = body.split(|&b| b == b'\n');
    if data.is_empty() {
        // `split` on an empty slice yields one empty item.
        lines.next();
    }
    lines.map(|mut line| {
        while let [rest @ .., b'\r' | b'\n'] = line {
            line = rest;
        }
        line
    })
}

fn write_truncating(path: &Path, text: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.set_len(text.len() as u64)?;
    file.write_all(text)?;
    file.flush()
}
