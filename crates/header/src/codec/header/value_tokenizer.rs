//! Tokenizing a header value into elements and parameters.
//!
//! The value is split on `;` into segments. The first segment is the element, every
//! following segment one of its parameters. Each segment splits on its first `=` into
//! a name and an optional value. Both separators are ignored inside a quoted string;
//! every `"` toggles the quoted state and backslashes have no special meaning.
//!
//! The tokenizer never fails: an unterminated quote swallows the rest of the value.

use crate::buffer::is_trimmable;
use crate::protocol::{HeaderElement, NameValuePair};

/// Stateless tokenizer for header values.
///
/// ```
/// use micro_header::codec::header::ValueTokenizer;
///
/// let elements = ValueTokenizer.tokenize(r#"attachment; filename="a;b=c.txt""#);
/// assert_eq!(elements[0].name(), "attachment");
/// assert_eq!(elements[0].parameters()[0].value(), Some("a;b=c.txt"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueTokenizer;

impl ValueTokenizer {
    /// Tokenizes `value`. A blank value has no elements.
    pub fn tokenize(&self, value: &str) -> Vec<HeaderElement> {
        if trim(value).is_empty() {
            return Vec::new();
        }

        let mut segments = TopLevelSplit::new(value, b';');
        let Some(first) = segments.next() else {
            return Vec::new();
        };

        let (name, element_value) = split_pair(first);
        let parameters = segments
            .filter(|segment| !trim(segment).is_empty())
            .map(|segment| {
                let (name, value) = split_pair(segment);
                NameValuePair::new(name, value)
            })
            .collect();

        vec![HeaderElement::new(name, element_value, parameters)]
    }
}

/// Splits a segment on its first unquoted `=`.
fn split_pair(segment: &str) -> (String, Option<String>) {
    match find_unquoted(segment, b'=') {
        Some(eq) => (trim(&segment[..eq]).to_owned(), Some(unquote(trim(&segment[eq + 1..])).to_owned())),
        None => (trim(segment).to_owned(), None),
    }
}

fn trim(str: &str) -> &str {
    str.trim_matches(is_trimmable)
}

fn unquote(value: &str) -> &str {
    value.strip_prefix('"').and_then(|inner| inner.strip_suffix('"')).unwrap_or(value)
}

/// Returns the byte index of the first `delimiter` outside a quoted string.
///
/// Delimiters are ASCII, so a byte index is always a char boundary.
fn find_unquoted(str: &str, delimiter: u8) -> Option<usize> {
    let mut quoted = false;
    for (index, byte) in str.bytes().enumerate() {
        if byte == b'"' {
            quoted = !quoted;
        } else if byte == delimiter && !quoted {
            return Some(index);
        }
    }
    None
}

/// Iterator over the segments between unquoted delimiters.
struct TopLevelSplit<'a> {
    rest: Option<&'a str>,
    delimiter: u8,
}

impl<'a> TopLevelSplit<'a> {
    fn new(str: &'a str, delimiter: u8) -> Self {
        Self { rest: Some(str), delimiter }
    }
}

impl<'a> Iterator for TopLevelSplit<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match find_unquoted(rest, self.delimiter) {
            Some(index) => {
                self.rest = Some(&rest[index + 1..]);
                Some(&rest[..index])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}
