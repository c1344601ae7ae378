//! Splitting one logical line into a header name and value.

use tracing::warn;

use crate::buffer::CharBuffer;
use crate::protocol::{Header, ParseError};

/// Parses one logical (already unfolded) header line.
///
/// The name is everything before the first `:`, the value everything after it, both
/// trimmed of surrounding whitespace. When `retain_raw` is set the header keeps the
/// untouched line for exact reserialization.
///
/// # Errors
///
/// Returns [`ParseError::Protocol`] if:
/// - the line contains no `:`
/// - the name is empty after trimming
pub fn parse_header_line(line: &CharBuffer, retain_raw: bool) -> Result<Header, ParseError> {
    let Some(colon) = line.index_of(':') else {
        warn!(line = %line, "header line without colon");
        return Err(ParseError::protocol("malformed header line: missing colon"));
    };

    let name = line.substring_trimmed(0, colon)?;
    if name.is_empty() {
        warn!(line = %line, "header line with empty name");
        return Err(ParseError::protocol("malformed header line: empty name"));
    }

    let value = line.substring_trimmed(colon + 1, line.len())?;
    let raw = retain_raw.then(|| line.to_string());

    Ok(Header::with_raw(name, value, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Header, ParseError> {
        parse_header_line(&CharBuffer::from(line), true)
    }

    #[test]
    fn test_name_and_value_are_trimmed() {
        let header = parse("header2  : stuff ").unwrap();
        assert_eq!(header.name(), "header2");
        assert_eq!(header.value(), "stuff");
        assert_eq!(header.raw_line(), Some("header2  : stuff "));
    }

    #[test]
    fn test_value_keeps_later_colons() {
        let header = parse("Host: 127.0.0.1:8080").unwrap();
        assert_eq!(header.name(), "Host");
        assert_eq!(header.value(), "127.0.0.1:8080");
    }

    #[test]
    fn test_empty_value() {
        let header = parse("X-Empty:").unwrap();
        assert_eq!(header.name(), "X-Empty");
        assert_eq!(header.value(), "");
        assert!(header.elements().is_empty());
    }

    #[test]
    fn test_missing_colon() {
        let err = parse("no colon here").unwrap_err();
        assert_eq!(err.to_string(), "protocol error: malformed header line: missing colon");
    }

    #[test]
    fn test_empty_name() {
        let err = parse("  :  stuff").unwrap_err();
        assert_eq!(err.to_string(), "protocol error: malformed header line: empty name");
        assert!(err.is_protocol());
    }

    #[test]
    fn test_without_raw_line() {
        let header = parse_header_line(&CharBuffer::from("a : b"), false).unwrap();
        assert_eq!(header.raw_line(), None);
        assert_eq!(header.to_string(), "a: b");
    }

    #[test]
    fn test_no_break_space_name() {
        let header = parse("\u{a0}: v").unwrap();
        assert_eq!(header.name(), "\u{a0}");
        assert_eq!(header.value(), "v");
    }
}
