//! C-style escape sequence processing for quoted strings.
//!
//! Recognized escapes: `\n`, `\t`, `\r`, `\\`, `\'`, `\"`, `\?`, `\a`, `\b`,
//! `\f`, `\v`, octal `\N`..`\NNN`, hex `\xH...`, and unicode `\uXXXX` /
//! `\UXXXXXXXX`. Octal and hex escapes denote single bytes; the decoded
//! result must still be valid UTF-8.

use hloc_util::UnescapeError;

/// Resolve a single-character escape to its byte.
#[inline]
fn resolve_simple_escape(c: u8) -> Option<u8> {
    match c {
        b'n' => Some(b'\n'),
        b't' => Some(b'\t'),
        b'r' => Some(b'\r'),
        b'\\' => Some(b'\\'),
        b'\'' => Some(b'\''),
        b'"' => Some(b'"'),
        b'?' => Some(b'?'),
        b'a' => Some(0x07),
        b'b' => Some(0x08),
        b'f' => Some(0x0c),
        b'v' => Some(0x0b),
        _ => None,
    }
}

/// Unescapes the body of a quoted string (quotes already stripped).
///
/// # Examples
///
/// ```
/// use hloc_lex::escape::c_unescape;
///
/// assert_eq!(c_unescape(r"a\tb\x41\101").unwrap(), "a\tbAA");
/// assert!(c_unescape(r"\q").is_err());
/// ```
pub fn c_unescape(source: &str) -> Result<String, UnescapeError> {
    let bytes = source.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        let esc = *bytes.get(i + 1).ok_or(UnescapeError::TrailingBackslash)?;
        i += 2;

        if let Some(b) = resolve_simple_escape(esc) {
            out.push(b);
            continue;
        }

        match esc {
            b'0'..=b'7' => {
                let begin = i - 1;
                let mut end = i;
                while end < bytes.len() && end - begin < 3 && matches!(bytes[end], b'0'..=b'7') {
                    end += 1;
                }
                let digits = &source[begin..end];
                let value = u32::from_str_radix(digits, 8)
                    .map_err(|_| UnescapeError::OctalOutOfRange(digits.to_string()))?;
                if value > 0xff {
                    return Err(UnescapeError::OctalOutOfRange(digits.to_string()));
                }
                out.push(value as u8);
                i = end;
            },
            b'x' => {
                let mut end = i;
                while end < bytes.len() && bytes[end].is_ascii_hexdigit() {
                    end += 1;
                }
                let digits = &source[i..end];
                let value = u32::from_str_radix(digits, 16)
                    .ok()
                    .filter(|v| *v <= 0xff)
                    .ok_or_else(|| UnescapeError::InvalidHex(digits.to_string()))?;
                out.push(value as u8);
                i = end;
            },
            b'u' | b'U' => {
                let width = if esc == b'u' { 4 } else { 8 };
                let invalid = || {
                    let tail: String = source[i - 2..].chars().take(width + 2).collect();
                    UnescapeError::InvalidUnicode(tail)
                };
                let digits = source
                    .get(i..i + width)
                    .filter(|d| d.bytes().all(|c| c.is_ascii_hexdigit()))
                    .ok_or_else(invalid)?;
                let ch = u32::from_str_radix(digits, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(invalid)?;
                let mut utf8 = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                i += width;
            },
            _ => {
                let ch = source[i - 1..].chars().next().unwrap_or('\u{fffd}');
                return Err(UnescapeError::UnknownEscape(ch));
            },
        }
    }

    String::from_utf8(out).map_err(|_| UnescapeError::InvalidUtf8)
}
