//! Parser limits and options.

use crate::ensure;
use crate::protocol::{Charset, ParseError};

/// Default maximum number of characters in one logical header line
pub const DEFAULT_MAX_LINE_LENGTH: usize = 8 * 1024;

/// Default maximum number of headers in one header block
pub const DEFAULT_MAX_HEADER_NUM: usize = 64;

/// Default maximum number of bytes buffered for one header block by the streaming decoder
pub const DEFAULT_MAX_BLOCK_BYTES: usize = 8 * 1024;

/// Initial capacity of the buffer logical lines are assembled in
pub const DEFAULT_LINE_CAPACITY: usize = 128;

/// Options shared by [`HeaderParser`](crate::codec::HeaderParser) and
/// [`HeaderBlockDecoder`](crate::codec::HeaderBlockDecoder).
///
/// ```
/// use micro_header::codec::ParserConfig;
/// use micro_header::protocol::Charset;
///
/// let config = ParserConfig::new().with_max_header_count(16).with_charset(Charset::UsAscii);
/// assert_eq!(config.max_header_count(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    max_line_length: usize,
    max_header_count: usize,
    max_block_bytes: usize,
    initial_line_capacity: usize,
    charset: Charset,
    retain_raw_line: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_header_count: DEFAULT_MAX_HEADER_NUM,
            max_block_bytes: DEFAULT_MAX_BLOCK_BYTES,
            initial_line_capacity: DEFAULT_LINE_CAPACITY,
            charset: Charset::default(),
            retain_raw_line: true,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_line_length(mut self, max_line_length: usize) -> Self {
        self.max_line_length = max_line_length;
        self
    }

    #[must_use]
    pub fn with_max_header_count(mut self, max_header_count: usize) -> Self {
        self.max_header_count = max_header_count;
        self
    }

    #[must_use]
    pub fn with_max_block_bytes(mut self, max_block_bytes: usize) -> Self {
        self.max_block_bytes = max_block_bytes;
        self
    }

    #[must_use]
    pub fn with_initial_line_capacity(mut self, initial_line_capacity: usize) -> Self {
        self.initial_line_capacity = initial_line_capacity;
        self
    }

    /// Sets the charset the streaming decoder decodes lines with. Line sources passed
    /// to [`HeaderParser::parse`](crate::codec::HeaderParser::parse) bring their own.
    #[must_use]
    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.charset = charset;
        self
    }

    /// Whether parsed headers keep their logical line for exact reserialization.
    #[must_use]
    pub fn with_retain_raw_line(mut self, retain_raw_line: bool) -> Self {
        self.retain_raw_line = retain_raw_line;
        self
    }

    #[inline]
    pub fn max_line_length(&self) -> usize {
        self.max_line_length
    }

    #[inline]
    pub fn max_header_count(&self) -> usize {
        self.max_header_count
    }

    #[inline]
    pub fn max_block_bytes(&self) -> usize {
        self.max_block_bytes
    }

    #[inline]
    pub fn initial_line_capacity(&self) -> usize {
        self.initial_line_capacity
    }

    #[inline]
    pub fn charset(&self) -> Charset {
        self.charset
    }

    #[inline]
    pub fn retain_raw_line(&self) -> bool {
        self.retain_raw_line
    }

    /// Rejects limits that would make every non-empty block fail.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidArgument`] if any limit is zero.
    pub fn validate(&self) -> Result<(), ParseError> {
        ensure!(self.max_line_length > 0, ParseError::invalid_argument("max_line_length must be positive"));
        ensure!(self.max_header_count > 0, ParseError::invalid_argument("max_header_count must be positive"));
        ensure!(self.max_block_bytes > 0, ParseError::invalid_argument("max_block_bytes must be positive"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.max_line_length(), 8 * 1024);
        assert_eq!(config.max_header_count(), 64);
        assert_eq!(config.max_block_bytes(), 8 * 1024);
        assert_eq!(config.charset(), Charset::Utf8);
        assert!(config.retain_raw_line());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_limits_are_invalid() {
        for config in [
            ParserConfig::new().with_max_line_length(0),
            ParserConfig::new().with_max_header_count(0),
            ParserConfig::new().with_max_block_bytes(0),
        ] {
            assert!(matches!(config.validate(), Err(ParseError::InvalidArgument { .. })));
        }

        // a zero initial capacity only means the buffer grows on first use
        assert!(ParserConfig::new().with_initial_line_capacity(0).validate().is_ok());
    }
}
