//! Byte sources for the key decoder.

#![allow(unsafe_code)]

use crate::InputError;
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

/// One byte at a time with a per-read timeout.
pub trait ByteSource {
    /// Wait at most the source's timeout for a byte. `Ok(None)` means the
    /// timeout elapsed with nothing to read; it is not an error.
    fn read_byte(&mut self) -> Result<Option<u8>, InputError>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self) -> Result<Option<u8>, InputError> {
        (**self).read_byte()
    }
}

/// Reads stdin directly through the file descriptor (no userspace buffering,
/// so `poll` readiness always reflects what `read` will return).
#[derive(Debug, Clone, Copy)]
pub struct StdinSource {
    timeout: Duration,
}

impl StdinSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// `poll` timeout in milliseconds, saturating at `i32::MAX`.
    fn poll_timeout_ms(&self) -> i32 {
        i32::try_from(self.timeout.as_millis()).unwrap_or(i32::MAX)
    }
}

impl ByteSource for StdinSource {
    fn read_byte(&mut self) -> Result<Option<u8>, InputError> {
        let fd = libc::STDIN_FILENO;
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let timeout_ms = self.poll_timeout_ms();
        // SAFETY: `pfd` is a valid pollfd and we pass a count of exactly one.
        let ready = unsafe { libc::poll(&mut pfd, 1, timeout_ms) };
        if ready == -1 {
            return retryable(io::Error::last_os_error());
        }
        if ready == 0 {
            return Ok(None);
        }
        let mut byte = 0u8;
        // SAFETY: reading at most one byte into a valid, writable u8.
        let n = unsafe { libc::read(fd, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => retryable(io::Error::last_os_error()),
        }
    }
}

fn retryable(err: io::Error) -> Result<Option<u8>, InputError> {
    match err.kind() {
        io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock => Ok(None),
        _ => Err(InputError::Read(err)),
    }
}

/// In-memory source replaying a fixed byte script; yields `None` once drained
/// (as if the read timed out).
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    bytes: VecDeque<u8>,
}

impl ScriptedSource {
    pub fn new(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: bytes.as_ref().iter().copied().collect(),
        }
    }

    pub fn push(&mut self, bytes: impl AsRef<[u8]>) {
        self.bytes.extend(bytes.as_ref().iter().copied());
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl ByteSource for ScriptedSource {
    fn read_byte(&mut self) -> Result<Option<u8>, InputError> {
        Ok(self.bytes.pop_front())
    }
}
