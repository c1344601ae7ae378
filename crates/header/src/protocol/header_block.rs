//! The ordered headers of one header section.

use std::ops::Index;
use std::slice;
use std::vec;

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::protocol::{Header, ParseError};

/// The headers of one header section, in the order they were read.
///
/// Name lookups ignore ASCII case; repeated names are kept as separate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    headers: Vec<Header>,
}

impl HeaderBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { headers: Vec::with_capacity(capacity) }
    }

    pub(crate) fn push(&mut self, header: Header) {
        self.headers.push(header);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Header> {
        self.headers.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Header] {
        &self.headers
    }

    pub fn into_vec(self) -> Vec<Header> {
        self.headers
    }

    /// Returns the first header called `name`.
    pub fn first(&self, name: &str) -> Option<&Header> {
        self.headers.iter().find(|header| header.is_named(name))
    }

    /// Returns the last header called `name`.
    pub fn last(&self, name: &str) -> Option<&Header> {
        self.headers.iter().rev().find(|header| header.is_named(name))
    }

    /// Returns every header called `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Header> + 'a {
        self.headers.iter().filter(move |header| header.is_named(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.first(name).is_some()
    }
}

impl From<Vec<Header>> for HeaderBlock {
    fn from(headers: Vec<Header>) -> Self {
        Self { headers }
    }
}

impl FromIterator<Header> for HeaderBlock {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        Self { headers: iter.into_iter().collect() }
    }
}

impl Index<usize> for HeaderBlock {
    type Output = Header;

    fn index(&self, index: usize) -> &Self::Output {
        &self.headers[index]
    }
}

impl IntoIterator for HeaderBlock {
    type Item = Header;
    type IntoIter = vec::IntoIter<Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.into_iter()
    }
}

impl<'a> IntoIterator for &'a HeaderBlock {
    type Item = &'a Header;
    type IntoIter = slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}

/// Converts into an `http::HeaderMap`, keeping repeated names as appended values.
impl TryFrom<&HeaderBlock> for HeaderMap {
    type Error = ParseError;

    fn try_from(block: &HeaderBlock) -> Result<Self, Self::Error> {
        let mut map = HeaderMap::with_capacity(block.len());
        for header in block {
            let name = HeaderName::from_bytes(header.name().as_bytes())
                .map_err(|e| ParseError::invalid_header(format!("name {:?}: {e}", header.name())))?;
            let value = HeaderValue::from_str(header.value())
                .map_err(|e| ParseError::invalid_header(format!("value of {:?}: {e}", header.name())))?;
            map.append(name, value);
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> HeaderBlock {
        vec![
            Header::new("Host", "127.0.0.1:8080"),
            Header::new("Accept", "text/html"),
            Header::new("accept", "*/*"),
        ]
        .into()
    }

    #[test]
    fn test_lookup() {
        let block = block();

        assert_eq!(block.len(), 3);
        assert_eq!(block.first("ACCEPT").map(Header::value), Some("text/html"));
        assert_eq!(block.last("Accept").map(Header::value), Some("*/*"));
        assert_eq!(block.get_all("accept").count(), 2);
        assert!(block.contains("host"));
        assert!(!block.contains("content-length"));
        assert_eq!(block[0].name(), "Host");
    }

    #[test]
    fn test_into_header_map() {
        let map = HeaderMap::try_from(&block()).unwrap();

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(http::header::HOST), Some(&HeaderValue::from_static("127.0.0.1:8080")));
        let accepts: Vec<_> = map.get_all(http::header::ACCEPT).iter().collect();
        assert_eq!(accepts, vec![&HeaderValue::from_static("text/html"), &HeaderValue::from_static("*/*")]);
    }

    #[test]
    fn test_into_header_map_rejects_bad_name() {
        let block: HeaderBlock = vec![Header::new("bad name", "value")].into();
        assert!(matches!(HeaderMap::try_from(&block), Err(ParseError::InvalidHeader { .. })));
    }
}
