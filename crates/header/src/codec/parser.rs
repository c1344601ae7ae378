//! Parsing a complete header block from a line source.

use tracing::{debug, warn};

use crate::codec::config::ParserConfig;
use crate::codec::header::parse_header_line;
use crate::codec::line::{LineAssembler, LineSource};
use crate::protocol::{HeaderBlock, ParseError};

/// Parses header blocks with a fixed configuration.
///
/// Parsing is all-or-nothing: if any line of the block is malformed, none of the
/// headers read before it are returned.
#[derive(Debug, Clone, Default)]
pub struct HeaderParser {
    config: ParserConfig,
}

impl HeaderParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom limits.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidArgument`] if the configuration is invalid.
    pub fn with_config(config: ParserConfig) -> Result<Self, ParseError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Reads one header block from `source`, stopping at the first blank line or at
    /// the end of the stream.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Protocol`] for a folded first line, a missing colon or an empty name
    /// - [`ParseError::TooLargeHeader`] / [`ParseError::TooManyHeaders`] when a limit is hit
    /// - any error raised by `source`
    pub fn parse<S: LineSource>(&self, source: S) -> Result<HeaderBlock, ParseError> {
        let max_header_count = self.config.max_header_count();
        let mut assembler = LineAssembler::with_config(source, &self.config);
        let mut block = HeaderBlock::with_capacity(8);

        while let Some(line) = assembler.next_line()? {
            if block.len() >= max_header_count {
                warn!(max_header_count, "too many headers");
                return Err(ParseError::too_many_headers(max_header_count));
            }
            block.push(parse_header_line(line, self.config.retain_raw_line())?);
        }

        debug!(header_count = block.len(), "parsed header block");
        Ok(block)
    }
}

/// Reads one header block from `source` with the default configuration.
///
/// ```
/// use micro_header::codec::line::BytesSource;
/// use micro_header::codec::parse_headers;
///
/// let headers = parse_headers(BytesSource::new("header1: stuff\r\n   and more\r\n\r\n")).unwrap();
/// assert_eq!(headers.len(), 1);
/// assert_eq!(headers[0].value(), "stuff and more");
/// ```
///
/// # Errors
///
/// See [`HeaderParser::parse`].
pub fn parse_headers<S: LineSource>(source: S) -> Result<HeaderBlock, ParseError> {
    HeaderParser::new().parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::line::{BytesSource, ReaderSource};
    use indoc::indoc;
    use std::io::Cursor;

    #[test]
    fn test_basic_header_parsing() {
        let str = "header1: stuff\r\n\
                   header2  : stuff \r\n\
                   header3: stuff\r\n     and more stuff\r\n\t and even more stuff\r\n     \r\n\
                   \r\n";
        let block = parse_headers(BytesSource::new(str)).unwrap();

        let pairs: Vec<_> = block.iter().map(|h| (h.name(), h.value())).collect();
        assert_eq!(
            pairs,
            vec![("header1", "stuff"), ("header2", "stuff"), ("header3", "stuff and more stuff and even more stuff")]
        );
    }

    #[test]
    fn test_from_curl() {
        let str = indoc! {r##"
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##};

        let block = parse_headers(ReaderSource::new(Cursor::new(str))).unwrap();

        assert_eq!(block.len(), 3);
        assert_eq!(block.first("host").map(|h| h.value()), Some("127.0.0.1:8080"));
        assert_eq!(block.first("user-agent").map(|h| h.value()), Some("curl/7.79.1"));
        assert_eq!(block.first("accept").map(|h| h.value()), Some("*/*"));
    }

    #[test]
    fn test_all_or_nothing() {
        let result = parse_headers(BytesSource::new("header1: stuff\r\nbroken\r\nheader2: stuff\r\n\r\n"));
        assert!(matches!(result, Err(ParseError::Protocol { .. })));
    }

    #[test]
    fn test_source_is_left_after_block() {
        let mut source = BytesSource::new("a: 1\r\n\r\nbody");
        let block = parse_headers(&mut source).unwrap();

        assert_eq!(block.len(), 1);
        assert_eq!(&source.remaining()[..], b"body");
    }

    #[test]
    fn test_header_count_limit() {
        let parser = HeaderParser::with_config(ParserConfig::new().with_max_header_count(2)).unwrap();

        assert_eq!(parser.parse(BytesSource::new("a: 1\r\nb: 2\r\n\r\n")).unwrap().len(), 2);

        let result = parser.parse(BytesSource::new("a: 1\r\nb: 2\r\nc: 3\r\n\r\n"));
        assert!(matches!(result, Err(ParseError::TooManyHeaders { max_num: 2 })));
    }

    #[test]
    fn test_invalid_config() {
        let result = HeaderParser::with_config(ParserConfig::new().with_max_header_count(0));
        assert!(matches!(result, Err(ParseError::InvalidArgument { .. })));
    }

    #[test]
    fn test_without_raw_lines() {
        let parser = HeaderParser::with_config(ParserConfig::new().with_retain_raw_line(false)).unwrap();
        let block = parser.parse(BytesSource::new("a  :  1 \r\n\r\n")).unwrap();

        assert_eq!(block[0].raw_line(), None);
        assert_eq!(block[0].to_string(), "a: 1");
    }
}
