//! Device-status-report (cursor position) reply parsing, used to size the
//! window when the direct size query is unavailable.

use crate::{ByteSource, InputError};

const MAX_REPORT_LEN: usize = 31;

/// Read a `ESC [ rows ; cols R` reply and return `(rows, cols)`.
pub fn read_cursor_report<S: ByteSource>(source: &mut S) -> Result<(u16, u16), InputError> {
    let mut buf = Vec::with_capacity(MAX_REPORT_LEN);
    while buf.len() < MAX_REPORT_LEN {
        match source.read_byte()? {
            Some(b'R') | None => break,
            Some(b) => buf.push(b),
        }
    }
    parse_cursor_report(&buf)
}

/// Parse the reply body (without the trailing `R`).
pub fn parse_cursor_report(buf: &[u8]) -> Result<(u16, u16), InputError> {
    let malformed = || InputError::CursorReport(String::from_utf8_lossy(buf).into_owned());
    let body = buf.strip_prefix(b"\x1b[").ok_or_else(malformed)?;
    let body = std::str::from_utf8(body).map_err(|_| malformed())?;
    let (rows, cols) = body.split_once(';').ok_or_else(malformed)?;
    let rows = rows.parse::<u16>().map_err(|_| malformed())?;
    let cols = cols.parse::<u16>().map_err(|_| malformed())?;
    Ok((rows, cols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSource;

    #[test]
    fn parses_well_formed_reply() {
        let mut src = ScriptedSource::new(b"\x1b[24;80Rrest");
        assert_eq!(read_cursor_report(&mut src).unwrap(), (24, 80));
        assert_eq!(src.remaining(), 4, "stops right after the terminator");
    }

    #[test]
    fn rejects_malformed_replies() {
        assert!(parse_cursor_report(b"24;80").is_err());
        assert!(parse_cursor_report(b"\x1b[24").is_err());
        assert!(parse_cursor_report(b"\x1b[a;b").is_err());
        let mut empty = ScriptedSource::default();
        assert!(matches!(
            read_cursor_report(&mut empty),
            Err(InputError::CursorReport(_))
        ));
    }
}
