//! Streaming decoder for header blocks.
//!
//! [`HeaderBlockDecoder`] plugs the header parser into `tokio_util::codec`, so a
//! header section can be read straight off a socket with `FramedRead`. Bytes are
//! buffered until a blank line ends the block; the block is then split off the
//! source buffer and parsed in one go.
//!
//! # Limits
//!
//! - Maximum bytes buffered for one block: [`ParserConfig::max_block_bytes`]
//! - Maximum number of headers and line length: see [`ParserConfig`]

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;
use tracing::{debug, trace};

use crate::codec::HeaderParser;
use crate::codec::config::ParserConfig;
use crate::codec::line::BytesSource;
use crate::ensure;
use crate::protocol::{HeaderBlock, ParseError};

/// Decoder for header blocks implementing the [`Decoder`] trait.
///
/// Each call to `decode` yields at most one [`HeaderBlock`]; the blank line ending it
/// is consumed, anything after it stays in the buffer.
#[derive(Debug, Default)]
pub struct HeaderBlockDecoder {
    parser: HeaderParser,
    /// Offset of the first line not yet checked for emptiness
    searched: usize,
}

impl HeaderBlockDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder with custom limits.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidArgument`] if the configuration is invalid.
    pub fn with_config(config: ParserConfig) -> Result<Self, ParseError> {
        Ok(Self { parser: HeaderParser::with_config(config)?, searched: 0 })
    }

    /// Finds the end of the block, just past its terminating blank line.
    fn find_block_end(&mut self, src: &[u8]) -> Option<usize> {
        let mut line_start = self.searched.min(src.len());
        while let Some(pos) = src[line_start..].iter().position(|b| *b == b'\n') {
            let line_end = line_start + pos;
            let line = &src[line_start..line_end];
            if line.is_empty() || line == b"\r" {
                self.searched = 0;
                return Some(line_end + 1);
            }
            line_start = line_end + 1;
        }
        self.searched = line_start;
        None
    }

    fn parse(&self, bytes: Bytes) -> Result<HeaderBlock, ParseError> {
        let size = bytes.len();
        let block = self.parser.parse(BytesSource::with_charset(bytes, self.parser.config().charset()))?;
        debug!(block_size = size, header_count = block.len(), "decoded header block");
        Ok(block)
    }
}

impl Decoder for HeaderBlockDecoder {
    type Item = HeaderBlock;
    type Error = ParseError;

    /// Attempts to decode one header block from the provided bytes buffer.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(block))` if a blank line was found and the block parsed
    /// - `Ok(None)` if more data is needed
    /// - `Err(ParseError)` if parsing failed
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The buffered bytes exceed [`ParserConfig::max_block_bytes`]
    /// - The block is malformed or violates a limit
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let max_block_bytes = self.parser.config().max_block_bytes();

        match self.find_block_end(src) {
            Some(block_end) => {
                trace!(block_size = block_end, "found end of header block");
                ensure!(block_end <= max_block_bytes, ParseError::too_large_header(block_end, max_block_bytes));

                let bytes = src.split_to(block_end).freeze();
                self.parse(bytes).map(Some)
            }
            None => {
                ensure!(src.len() <= max_block_bytes, ParseError::too_large_header(src.len(), max_block_bytes));
                Ok(None)
            }
        }
    }

    /// At end of stream, bytes left without a terminating blank line form a final block.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(block) = self.decode(src)? {
            return Ok(Some(block));
        }
        if src.is_empty() {
            return Ok(None);
        }

        trace!(remaining = src.len(), "header block ended by end of stream");
        self.searched = 0;
        let bytes = src.split().freeze();
        self.parse(bytes).map(Some)
    }
}
