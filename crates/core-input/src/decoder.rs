//! Escape-sequence decoder.
//!
//! State machine (one key per call):
//!
//! ```text
//! Ground --ESC--> EscSeen --'['--> BracketSeen --digit--> DigitSeen --'~'--> key
//!                    |                  |
//!                    '--'O'--> SsSeen   '--letter--> key
//! ```
//!
//! Outside a sequence, `BS` and `DEL` both decode to `Key::Backspace`;
//! every other byte passes through as `Key::Byte`.
//!
//! An escape is always followed by up to two reads before it resolves, so
//! `ESC x` swallows one more byte (`Discard`) before yielding `Key::Escape`.
//! Any byte that does not continue a known sequence, or a read that times
//! out mid-sequence, resolves to `Key::Escape`. Bytes already consumed by
//! an unrecognized sequence are dropped.

use crate::{ByteSource, InputError};
use core_events::{BS, DEL, ESC, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    EscSeen,
    BracketSeen,
    DigitSeen(u8),
    /// `ESC O`, the application-mode Home/End encoding.
    SsSeen,
    /// `ESC` followed by a byte that starts no sequence.
    Discard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Emit(Key),
    Next(State),
}

fn step(state: State, byte: u8) -> Step {
    match state {
        State::Ground => match byte {
            ESC => Step::Next(State::EscSeen),
            BS | DEL => Step::Emit(Key::Backspace),
            b => Step::Emit(Key::Byte(b)),
        },
        State::EscSeen => match byte {
            b'[' => Step::Next(State::BracketSeen),
            b'O' => Step::Next(State::SsSeen),
            _ => Step::Next(State::Discard),
        },
        State::Discard => Step::Emit(Key::Escape),
        State::BracketSeen => match byte {
            b'0'..=b'9' => Step::Next(State::DigitSeen(byte)),
            b'A' => Step::Emit(Key::Up),
            b'B' => Step::Emit(Key::Down),
            b'C' => Step::Emit(Key::Right),
            b'D' => Step::Emit(Key::Left),
            b'H' => Step::Emit(Key::Home),
            b'F' => Step::Emit(Key::End),
            _ => Step::Emit(Key::Escape),
        },
        State::DigitSeen(digit) => {
            if byte != b'~' {
                return Step::Emit(Key::Escape);
            }
            Step::Emit(match digit {
                b'1' | b'7' => Key::Home,
                b'3' => Key::Delete,
                b'4' | b'8' => Key::End,
                b'5' => Key::PageUp,
                b'6' => Key::PageDown,
                _ => Key::Escape,
            })
        }
        State::SsSeen => match byte {
            b'H' => Step::Emit(Key::Home),
            b'F' => Step::Emit(Key::End),
            _ => Step::Emit(Key::Escape),
        },
    }
}

/// Turns a `ByteSource` into a stream of logical keys.
#[derive(Debug)]
pub struct KeyDecoder<S> {
    source: S,
}

impl<S: ByteSource> KeyDecoder<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Decode one key if a byte is available within the source timeout.
    /// `Ok(None)` means no key yet; poll again.
    pub fn poll_key(&mut self) -> Result<Option<Key>, InputError> {
        let Some(mut byte) = self.source.read_byte()? else {
            return Ok(None);
        };
        let mut state = State::Ground;
        loop {
            match step(state, byte) {
                Step::Emit(key) => {
                    if state != State::Ground {
                        tracing::trace!(target: "input.decode", ?state, last = byte, %key, "sequence");
                    }
                    return Ok(Some(key));
                }
                Step::Next(next) => {
                    state = next;
                    match self.source.read_byte()? {
                        Some(b) => byte = b,
                        None => {
                            tracing::trace!(target: "input.decode", ?state, "sequence_timeout");
                            return Ok(Some(Key::Escape));
                        }
                    }
                }
            }
        }
    }

    /// Poll until a key arrives.
    pub fn read_key(&mut self) -> Result<Key, InputError> {
        loop {
            if let Some(key) = self.poll_key()? {
                return Ok(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSource;

    fn decode_all(bytes: &[u8]) -> Vec<Key> {
        let mut decoder = KeyDecoder::new(ScriptedSource::new(bytes));
        let mut keys = Vec::new();
        while let Some(key) = decoder.poll_key().unwrap() {
            keys.push(key);
        }
        keys
    }

    #[test]
    fn delete_sequence() {
        assert_eq!(decode_all(b"\x1b[3~"), vec![Key::Delete]);
    }

    #[test]
    fn lone_escape_times_out_to_escape() {
        assert_eq!(decode_all(b"\x1b"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1b["), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1b[5"), vec![Key::Escape]);
    }

    #[test]
    fn empty_source_is_not_an_error() {
        let mut decoder = KeyDecoder::new(ScriptedSource::default());
        assert_eq!(decoder.poll_key().unwrap(), None);
    }

    #[test]
    fn arrows_and_csi_letters() {
        assert_eq!(
            decode_all(b"\x1b[A\x1b[B\x1b[C\x1b[D\x1b[H\x1b[F"),
            vec![
                Key::Up,
                Key::Down,
                Key::Right,
                Key::Left,
                Key::Home,
                Key::End
            ]
        );
    }

    #[test]
    fn both_historical_home_and_end_encodings() {
        assert_eq!(
            decode_all(b"\x1b[1~\x1b[7~\x1bOH\x1b[4~\x1b[8~\x1bOF"),
            vec![Key::Home, Key::Home, Key::Home, Key::End, Key::End, Key::End]
        );
    }

    #[test]
    fn paging_keys() {
        assert_eq!(
            decode_all(b"\x1b[5~\x1b[6~"),
            vec![Key::PageUp, Key::PageDown]
        );
    }

    #[test]
    fn unknown_sequences_degrade_to_escape() {
        assert_eq!(decode_all(b"\x1b[2~"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1b[9x"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1b[Z"), vec![Key::Escape]);
        assert_eq!(decode_all(b"\x1bOP"), vec![Key::Escape]);
        // The byte that broke the sequence is consumed; decoding resumes after it.
        assert_eq!(decode_all(b"\x1b[Za"), vec![Key::Escape, Key::Byte(b'a')]);
    }

    #[test]
    fn escape_reads_two_bytes_before_giving_up() {
        assert_eq!(decode_all(b"\x1bxya"), vec![Key::Escape, Key::Byte(b'a')]);
        assert_eq!(decode_all(b"\x1bx"), vec![Key::Escape]);
        // The second byte is swallowed even when it could start a sequence.
        assert_eq!(
            decode_all(b"\x1bx\x1b[A"),
            vec![Key::Escape, Key::Byte(b'['), Key::Byte(b'A')]
        );
    }

    #[test]
    fn plain_bytes_pass_through_and_bs_del_are_backspace() {
        assert_eq!(
            decode_all(b"a\r\x08\x7f\x11"),
            vec![
                Key::Byte(b'a'),
                Key::Byte(b'\r'),
                Key::Backspace,
                Key::Backspace,
                Key::Byte(0x11)
            ]
        );
        assert_eq!(
            decode_all(b"\x08\x7f"),
            vec![Key::Backspace, Key::Backspace]
        );
    }
}
