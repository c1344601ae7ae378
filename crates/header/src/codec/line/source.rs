use std::fmt;
use std::io::{BufRead, Read};

use bytes::Bytes;
use tracing::{trace, warn};

use crate::codec::config::DEFAULT_MAX_LINE_LENGTH;
use crate::protocol::{Charset, ParseError};

/// Physical line bytes allowed by default: the longest logical line in 4-byte UTF-8
/// plus a `\r\n` terminator.
const DEFAULT_MAX_LINE_BYTES: usize = DEFAULT_MAX_LINE_LENGTH * 4 + 2;

/// A blocking source of text lines.
///
/// Implementations read one line at a time, strip its `\r\n` or `\n` terminator and
/// decode it with a fixed charset. Returning `Ok(None)` signals end of stream.
pub trait LineSource {
    /// Reads the next line.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reader fails or the line can not be decoded.
    fn read_line(&mut self) -> Result<Option<String>, ParseError>;
}

impl<S: LineSource + ?Sized> LineSource for &mut S {
    fn read_line(&mut self) -> Result<Option<String>, ParseError> {
        (**self).read_line()
    }
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn read_line(&mut self) -> Result<Option<String>, ParseError> {
        (**self).read_line()
    }
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Reads lines from any [`BufRead`].
///
/// At most `max_line_bytes` bytes, terminator included, are buffered for one physical
/// line; a longer line fails with [`ParseError::TooLargeHeader`] without reading the
/// rest of it.
pub struct ReaderSource<R> {
    reader: R,
    charset: Charset,
    max_line_bytes: usize,
    line: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    /// Creates a source decoding lines as UTF-8.
    pub fn new(reader: R) -> Self {
        Self::with_charset(reader, Charset::default())
    }

    pub fn with_charset(reader: R, charset: Charset) -> Self {
        Self { reader, charset, max_line_bytes: DEFAULT_MAX_LINE_BYTES, line: Vec::new() }
    }

    /// Sets the byte limit for one physical line, terminator included.
    #[must_use]
    pub fn with_max_line_bytes(mut self, max_line_bytes: usize) -> Self {
        self.max_line_bytes = max_line_bytes;
        self
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self) -> Result<Option<String>, ParseError> {
        self.line.clear();
        let limit = u64::try_from(self.max_line_bytes).unwrap_or(u64::MAX).saturating_add(1);
        let read = (&mut self.reader).take(limit).read_until(b'\n', &mut self.line)?;
        if read == 0 {
            return Ok(None);
        }

        if read > self.max_line_bytes {
            warn!(max_line_bytes = self.max_line_bytes, "physical line too long");
            return Err(ParseError::too_large_header(read, self.max_line_bytes));
        }

        trace!(len = read, "read line from reader");
        self.charset.decode(strip_line_ending(&self.line)).map(Some)
    }
}

impl<R> fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderSource")
            .field("charset", &self.charset)
            .field("max_line_bytes", &self.max_line_bytes)
            .finish_non_exhaustive()
    }
}

/// Reads lines from bytes already held in memory.
#[derive(Debug, Clone)]
pub struct BytesSource {
    bytes: Bytes,
    charset: Charset,
}

impl BytesSource {
    /// Creates a source decoding lines as UTF-8.
    pub fn new<B: Into<Bytes>>(bytes: B) -> Self {
        Self::with_charset(bytes, Charset::default())
    }

    pub fn with_charset<B: Into<Bytes>>(bytes: B, charset: Charset) -> Self {
        Self { bytes: bytes.into(), charset }
    }

    /// Returns the bytes that have not been read yet.
    pub fn remaining(&self) -> &Bytes {
        &self.bytes
    }
}

impl LineSource for BytesSource {
    fn read_line(&mut self) -> Result<Option<String>, ParseError> {
        if self.bytes.is_empty() {
            return Ok(None);
        }

        let end = match self.bytes.iter().position(|b| *b == b'\n') {
            Some(pos) => pos + 1,
            None => self.bytes.len(),
        };
        let line = self.bytes.split_to(end);

        trace!(len = line.len(), "read line from bytes");
        self.charset.decode(strip_line_ending(&line)).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all<S: LineSource>(mut source: S) -> Vec<String> {
        let mut lines = vec![];
        while let Some(line) = source.read_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn test_bytes_source_strips_terminators() {
        let source = BytesSource::new(&b"a: 1\r\nb: 2\n\r\nlast"[..]);
        assert_eq!(read_all(source), vec!["a: 1", "b: 2", "", "last"]);
    }

    #[test]
    fn test_reader_source_strips_terminators() {
        let source = ReaderSource::new(Cursor::new("a: 1\r\n  folded\r\n\r\n"));
        assert_eq!(read_all(source), vec!["a: 1", "  folded", ""]);
    }

    #[test]
    fn test_empty_input() {
        assert!(read_all(BytesSource::new(Bytes::new())).is_empty());
        assert!(read_all(ReaderSource::new(Cursor::new(""))).is_empty());
    }

    #[test]
    fn test_charset_applies() {
        let mut source = BytesSource::with_charset(&b"X: caf\xe9\r\n"[..], Charset::Iso8859_1);
        assert_eq!(source.read_line().unwrap().as_deref(), Some("X: café"));

        let mut source = ReaderSource::with_charset(Cursor::new(&b"X: caf\xe9\r\n"[..]), Charset::UsAscii);
        assert!(matches!(source.read_line(), Err(ParseError::InvalidEncoding { .. })));
    }

    #[test]
    fn test_reader_source_line_limit() {
        let mut source = ReaderSource::new(Cursor::new("a: 12\r\nb: 123456789\r\n")).with_max_line_bytes(7);
        assert_eq!(source.read_line().unwrap().as_deref(), Some("a: 12"));
        assert!(matches!(source.read_line(), Err(ParseError::TooLargeHeader { current_size: 8, max_size: 7 })));

        let mut source = ReaderSource::new(Cursor::new(vec![b'x'; 64 * 1024])).with_max_line_bytes(16);
        assert!(matches!(source.read_line(), Err(ParseError::TooLargeHeader { max_size: 16, .. })));
        assert_eq!(source.into_inner().position(), 17);
    }
}
