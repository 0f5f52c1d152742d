#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use anyhow::bail;
use core_actions::Frontend;
use core_events::Key;
use core_state::{Document, EditorState};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Frontend that replays a fixed key script and records the status line
/// seen at every refresh.
#[derive(Default)]
pub struct ScriptedFrontend {
    keys: VecDeque<Key>,
    pub refreshes: usize,
    pub statuses: Vec<String>,
}

impl ScriptedFrontend {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl Frontend for ScriptedFrontend {
    fn refresh(&mut self, state: &mut EditorState) -> anyhow::Result<()> {
        self.refreshes += 1;
        let msg = state
            .status_message(std::time::Instant::now())
            .unwrap_or_default()
            .to_string();
        self.statuses.push(msg);
        Ok(())
    }

    fn read_key(&mut self) -> anyhow::Result<Key> {
        match self.keys.pop_front() {
            Some(k) => Ok(k),
            None => bail!("key script exhausted"),
        }
    }
}

pub fn typed(text: &str) -> Vec<Key> {
    text.bytes().map(Key::Byte).collect()
}

pub fn state(lines: &[&str]) -> EditorState {
    EditorState::new(Document::from_lines(lines.iter().copied()), 10, 40)
}

pub fn contents(st: &EditorState) -> Vec<String> {
    st.document
        .rows()
        .iter()
        .map(|r| String::from_utf8_lossy(r.content()).into_owned())
        .collect()
}

/// Log sink that collects formatted events in memory.
#[derive(Clone, Default)]
pub struct BufferWriter {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl BufferWriter {
    pub fn contents(&self) -> String {
        String::from_utf8(self.inner.lock().unwrap().clone()).unwrap()
    }
}

pub struct LockedWriter<'a> {
    guard: MutexGuard<'a, Vec<u8>>,
}

impl Write for LockedWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = LockedWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        LockedWriter {
            guard: self.inner.lock().expect("log buffer poisoned"),
        }
    }
}

/// Run `f` with a DEBUG-level subscriber writing into the returned buffer.
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let writer = BufferWriter::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_ansi(false)
        .without_time()
        .with_writer(writer.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, writer.contents())
}
