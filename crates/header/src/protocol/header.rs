//! A single parsed header field.

use std::fmt;

use once_cell::sync::OnceCell;

use crate::buffer::CharBuffer;
use crate::codec::header::{ValueTokenizer, parse_header_line};
use crate::protocol::{HeaderElement, ParseError};

/// An immutable header field.
///
/// The name and value are trimmed copies taken from one logical header line. When the
/// header came out of the parser, the untouched logical line is kept as well so the
/// header can be written back byte for byte.
///
/// The [`elements`](Header::elements) of the value are tokenized on first access and
/// cached for the lifetime of the header.
#[derive(Debug, Clone)]
pub struct Header {
    name: String,
    value: String,
    raw: Option<String>,
    elements: OnceCell<Vec<HeaderElement>>,
}

impl Header {
    /// Creates a header without a raw line; it serializes as `name: value`.
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self::with_raw(name.into(), value.into(), None)
    }

    pub(crate) fn with_raw(name: String, value: String, raw: Option<String>) -> Self {
        Self { name, value, raw, elements: OnceCell::new() }
    }

    /// Parses one logical header line such as `Content-Type: text/html`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Protocol`] if the line has no colon or an empty name.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        parse_header_line(&CharBuffer::from(line), true)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the logical line this header was parsed from, if it was retained.
    #[inline]
    pub fn raw_line(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Returns true if this header is called `name`, ignoring ASCII case.
    #[inline]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the elements of the value, tokenizing it on the first call.
    pub fn elements(&self) -> &[HeaderElement] {
        self.elements.get_or_init(|| ValueTokenizer.tokenize(&self.value))
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value && self.raw == other.raw
    }
}

impl Eq for Header {}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => f.write_str(raw),
            None => write!(f, "{}: {}", self.name, self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let header = Header::parse("header1  : stuff; param1 = value1 ").unwrap();
        assert_eq!(header.to_string(), "header1  : stuff; param1 = value1 ");

        let header = Header::new("Host", "localhost");
        assert_eq!(header.raw_line(), None);
        assert_eq!(header.to_string(), "Host: localhost");
    }

    #[test]
    fn test_elements_are_memoized() {
        let header = Header::new("Cache-Control", "no-cache; max-age=0");

        let first = header.elements();
        let second = header.elements();
        assert!(std::ptr::eq(first, second));

        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name(), "no-cache");
        assert_eq!(first[0].parameter("max-age").and_then(|p| p.value()), Some("0"));
    }

    #[test]
    fn test_clone_keeps_equality() {
        let header = Header::parse("Accept: */*").unwrap();
        let _ = header.elements();

        let cloned = header.clone();
        assert_eq!(header, cloned);
        assert!(cloned.is_named("accept"));
        assert_ne!(header, Header::new("Accept", "*/*"));
    }
}
