//! Null-terminated strings stored as one little-endian `i32` per character.

use std::io::{Read, Seek};

use crate::cursor::ByteCursor;
use crate::error::{Result, TecplotError};

/// Character codes scanned per chunk before the accumulator grows again.
pub const STRING_CHUNK_CODES: usize = 100;

/// Read a zero-terminated string of 4-byte character codes.
///
/// On success the cursor sits just past the terminator: a string of `k`
/// characters consumes `4 * (k + 1)` bytes. Reading stops at the
/// terminator, so nothing past the string is touched.
pub fn read_string<R: Read + Seek>(cursor: &mut ByteCursor<R>) -> Result<String> {
    let start = cursor.offset();
    let mut out = String::new();

    loop {
        out.reserve(STRING_CHUNK_CODES);
        for _ in 0..STRING_CHUNK_CODES {
            let at = cursor.offset();
            let code = match cursor.read_i32() {
                Ok(code) => code,
                Err(TecplotError::UnexpectedEof { .. }) => {
                    return Err(TecplotError::UnterminatedString { offset: start });
                }
                Err(e) => return Err(e),
            };
            if code == 0 {
                return Ok(out);
            }
            out.push(decode_char(at, code)?);
        }
    }
}

fn decode_char(offset: u64, code: i32) -> Result<char> {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| TecplotError::MalformedField {
            offset,
            field: "character code",
            reason: format!("{code} is not a valid character"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(text: &str, terminate: bool) -> Vec<u8> {
        let mut bytes: Vec<u8> = text
            .chars()
            .flat_map(|c| (c as i32).to_le_bytes())
            .collect();
        if terminate {
            bytes.extend_from_slice(&0i32.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn terminator_inside_first_chunk() {
        let text = "x".repeat(37);
        let mut bytes = encode(&text, true);
        // trailing data must not be consumed
        bytes.extend_from_slice(&357.0f32.to_le_bytes());

        let mut c = ByteCursor::new(Cursor::new(bytes));
        assert_eq!(read_string(&mut c).unwrap(), text);
        assert_eq!(c.offset(), 38 * 4);
        c.check_position().unwrap();
        assert_eq!(c.read_f32().unwrap(), 357.0);
    }

    #[test]
    fn string_spanning_chunk_boundary() {
        let text: String = (0..150).map(|i| (b'a' + (i % 26) as u8) as char).collect();
        let mut c = ByteCursor::new(Cursor::new(encode(&text, true)));
        assert_eq!(read_string(&mut c).unwrap(), text);
        assert_eq!(c.offset(), 151 * 4);
    }

    #[test]
    fn exactly_one_full_chunk_then_terminator() {
        let text = "z".repeat(STRING_CHUNK_CODES);
        let mut c = ByteCursor::new(Cursor::new(encode(&text, true)));
        assert_eq!(read_string(&mut c).unwrap(), text);
        assert_eq!(c.offset(), (STRING_CHUNK_CODES as u64 + 1) * 4);
    }

    #[test]
    fn empty_string() {
        let mut c = ByteCursor::new(Cursor::new(encode("", true)));
        assert_eq!(read_string(&mut c).unwrap(), "");
        assert_eq!(c.offset(), 4);
    }

    #[test]
    fn missing_terminator_is_unterminated() {
        let mut c = ByteCursor::new(Cursor::new(encode("no end", false)));
        assert!(matches!(
            read_string(&mut c),
            Err(TecplotError::UnterminatedString { offset: 0 })
        ));
    }

    #[test]
    fn negative_code_is_malformed() {
        let mut bytes = (-5i32).to_le_bytes().to_vec();
        bytes.extend_from_slice(&0i32.to_le_bytes());
        let mut c = ByteCursor::new(Cursor::new(bytes));
        assert!(matches!(
            read_string(&mut c),
            Err(TecplotError::MalformedField { offset: 0, .. })
        ));
    }
}
