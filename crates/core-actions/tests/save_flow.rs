mod common;

use common::{ScriptedFrontend, contents, state, typed};
use core_actions::{Dispatcher, save_document};
use core_events::{Key, ctrl};
use core_state::{Document, EditorState};
use std::time::Instant;

const CTRL_S: Key = Key::Byte(ctrl(b's'));

#[test]
fn save_as_names_buffer_and_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.py");
    let mut st = state(&[]);
    let mut fe = ScriptedFrontend::default();
    let mut d = Dispatcher::default();
    for k in typed("x = 1") {
        d.dispatch(k, &mut st, &mut fe).unwrap();
    }
    let mut keys = typed(path.to_str().unwrap());
    keys.push(Key::Byte(b'\r'));
    let mut fe = ScriptedFrontend::new(keys);
    d.dispatch(CTRL_S, &mut st, &mut fe).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"x = 1\n");
    assert_eq!(st.document.file_name(), Some(path.as_path()));
    assert_eq!(st.document.syntax().map(|s| s.name), Some("python"));
    assert!(!st.document.is_dirty());
    assert_eq!(st.status_message(Instant::now()), Some("6 bytes written to disk"));
}

#[test]
fn escape_aborts_save_as() {
    let mut st = state(&["data"]);
    let mut keys = typed("name");
    keys.push(Key::Escape);
    let mut fe = ScriptedFrontend::new(keys);
    let n = save_document(&mut fe, &mut st).unwrap();
    assert_eq!(n, None);
    assert!(st.document.file_name().is_none());
    assert_eq!(st.status_message(Instant::now()), Some("Save aborted"));
}

#[test]
fn write_failure_becomes_status_message() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = Document::from_lines(["keep me"]);
    doc.set_file_name(dir.path().join("missing").join("out.txt"));
    let mut st = EditorState::new(doc, 10, 40);
    st.insert_char(b'!');
    let mut fe = ScriptedFrontend::default();
    assert_eq!(save_document(&mut fe, &mut st).unwrap(), None);
    let msg = st.status_message(Instant::now()).unwrap();
    assert!(msg.starts_with("Can't save! I/O error: "), "{msg}");
    assert!(st.document.is_dirty());
    assert_eq!(contents(&st), vec!["!keep me"]);
}

#[test]
fn saved_file_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("round.txt");
    std::fs::write(&path, "a\tb\r\nsecond\n\nlast").unwrap();
    let (doc, _) = core_actions::open_document(&path);
    let mut st = EditorState::new(doc, 10, 40);
    let mut fe = ScriptedFrontend::default();
    assert_eq!(save_document(&mut fe, &mut st).unwrap(), Some(17));
    assert_eq!(std::fs::read(&path).unwrap(), b"a\tb\nsecond\n\nlast\n");
}
