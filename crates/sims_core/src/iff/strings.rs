use std::io;

use crate::reader::{SliceReader, decode_ascii};

/// The only string-table layout this decoder understands. Other format codes
/// belong to localization schemes that are never consulted here.
pub const SUPPORTED_FORMAT: i16 = -3;

/// Decode the first string value of a string-table payload.
///
/// Layout: i16 format code, u16 string count, then per entry a 1-byte
/// language code, a null-terminated value and a null-terminated comment.
/// Only the first entry's value is ever consulted.
///
/// Returns `Ok(None)` for unsupported format codes or empty tables; neither
/// is an error. Truncation inside a supported table surfaces as
/// `UnexpectedEof`.
pub fn parse_string_table(payload: &[u8]) -> io::Result<Option<String>> {
    if payload.len() < 4 {
        return Ok(None);
    }

    let mut r = SliceReader::new(payload);
    let format = r.read_i16_le()?;
    let count = r.read_u16_le()?;
    if format != SUPPORTED_FORMAT || count == 0 {
        return Ok(None);
    }

    r.read_u8()?; // language code
    let value = decode_ascii(r.read_cstring_bytes()?);
    // The comment trails the value; consume it when present so the cursor
    // lands on the entry boundary. Nothing after it is ever read, so a
    // missing comment is tolerated.
    let _ = r.read_cstring_bytes();

    Ok(Some(value))
}
