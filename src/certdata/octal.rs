//! Octal-escaped multiline values
//!
//! Multiline values are written as C-style escapes (`\060\202\003...`).
//! They are decoded to raw bytes and carried as base64 text.

use base64::{engine::general_purpose::STANDARD, Engine};
use thiserror::Error;

/// Escape sequence that cannot be decoded
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EscapeError {
    #[error("trailing backslash")]
    TrailingBackslash,

    #[error("invalid \\x escape at offset {offset}")]
    InvalidHex { offset: usize },
}

/// Decode a string of C-style escapes into the bytes it denotes.
///
/// Octal escapes take up to three digits and wrap at 256. Unknown escapes
/// are kept literally, backslash included.
pub fn decode_escapes(text: &str) -> Result<Vec<u8>, EscapeError> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 4 + 1);
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'\\' {
            out.push(b);
            i += 1;
            continue;
        }

        let Some(&next) = bytes.get(i + 1) else {
            return Err(EscapeError::TrailingBackslash);
        };
        i += 2;

        match next {
            b'0'..=b'7' => {
                let mut value = u32::from(next - b'0');
                let mut digits = 1;
                while digits < 3 {
                    match bytes.get(i) {
                        Some(&d @ b'0'..=b'7') => {
                            value = value * 8 + u32::from(d - b'0');
                            i += 1;
                            digits += 1;
                        }
                        _ => break,
                    }
                }
                out.push((value & 0xff) as u8);
            }
            b'x' => {
                let hex = bytes
                    .get(i..i + 2)
                    .and_then(|h| std::str::from_utf8(h).ok())
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or(EscapeError::InvalidHex { offset: i - 2 })?;
                out.push(hex);
                i += 2;
            }
            b'\\' => out.push(b'\\'),
            b'\'' => out.push(b'\''),
            b'"' => out.push(b'"'),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0c),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'v' => out.push(0x0b),
            b'\n' => {}
            other => {
                out.push(b'\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

/// Encode bytes the way certdata writes them: one `\ooo` escape per byte
pub fn encode_octal(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("\\{:03o}", b)).collect()
}

/// Decode an escaped multiline buffer and re-encode it as base64
pub fn octal_to_base64(text: &str) -> Result<String, EscapeError> {
    decode_escapes(text).map(|bytes| STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_abc() {
        assert_eq!(decode_escapes("\\101\\102\\103").unwrap(), b"ABC");
        assert_eq!(octal_to_base64("\\101\\102\\103").unwrap(), "QUJD");
    }

    #[test]
    fn test_decode_mixed_literals() {
        assert_eq!(decode_escapes("a\\142c").unwrap(), b"abc");
        assert_eq!(decode_escapes("\\\\").unwrap(), b"\\");
        assert_eq!(decode_escapes("\\x41\\n").unwrap(), b"A\n");
    }

    #[test]
    fn test_decode_short_octal() {
        // Fewer than three digits end at the first non-octal character
        assert_eq!(decode_escapes("\\0A").unwrap(), vec![0x00, b'A']);
        assert_eq!(decode_escapes("\\12").unwrap(), vec![0o12]);
    }

    #[test]
    fn test_decode_wraps_large_octal() {
        assert_eq!(decode_escapes("\\777").unwrap(), vec![0xff]);
    }

    #[test]
    fn test_unknown_escape_kept() {
        assert_eq!(decode_escapes("\\q").unwrap(), b"\\q");
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            decode_escapes("\\101\\"),
            Err(EscapeError::TrailingBackslash)
        );
        assert_eq!(
            decode_escapes("\\xZZ"),
            Err(EscapeError::InvalidHex { offset: 0 })
        );
        assert_eq!(
            decode_escapes("\\x4"),
            Err(EscapeError::InvalidHex { offset: 0 })
        );
    }

    #[test]
    fn test_encode_octal_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        let encoded = encode_octal(&bytes);
        assert!(encoded.starts_with("\\000\\001"));
        assert_eq!(decode_escapes(&encoded).unwrap(), bytes);
    }
}
