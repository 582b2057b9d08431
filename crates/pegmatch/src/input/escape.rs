//! Escaping of input slices for diagnostics and grammar printing

use std::fmt::Write;

/// Render bytes as a printable string.
///
/// Quote and backslash are escaped with a backslash. Bell, backspace, tab,
/// newline, carriage return and vertical tab use their two-character escapes.
/// Printable ASCII is kept as is. Every other byte becomes `\u` followed by
/// four hex digits.
///
/// # Example
///
/// ```rust
/// use pegmatch::input::escape;
///
/// assert_eq!(escape(b"a\"b\n"), "a\\\"b\\n");
/// assert_eq!(escape(&[0x1b]), "\\u001b");
/// ```
#[must_use]
pub fn escape(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len());
    for &byte in bytes {
        escape_byte_into(&mut result, byte);
    }
    result
}

/// Escape a single byte into `out`
pub fn escape_byte_into(out: &mut String, byte: u8) {
    match byte {
        b'"' => out.push_str("\\\""),
        b'\\' => out.push_str("\\\\"),
        0x07 => out.push_str("\\a"),
        0x08 => out.push_str("\\b"),
        b'\t' => out.push_str("\\t"),
        b'\n' => out.push_str("\\n"),
        b'\r' => out.push_str("\\r"),
        0x0b => out.push_str("\\v"),
        32..=126 => out.push(char::from(byte)),
        _ => {
            let _ = write!(out, "\\u{byte:04x}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_kept() {
        assert_eq!(escape(b"hello, world 42!"), "hello, world 42!");
    }

    #[test]
    fn test_control_codes() {
        assert_eq!(escape(b"\x07\x08\t\n\r\x0b"), "\\a\\b\\t\\n\\r\\v");
    }

    #[test]
    fn test_numeric_escape() {
        assert_eq!(escape(&[0x00, 0x7f, 0xff]), "\\u0000\\u007f\\u00ff");
    }

    #[test]
    fn test_quote_and_backslash() {
        assert_eq!(escape(b"\\\""), "\\\\\\\"");
    }
}
