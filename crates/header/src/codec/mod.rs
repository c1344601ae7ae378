//! Header block parsing and framing.
//!
//! This module turns raw header lines into [`HeaderBlock`](crate::protocol::HeaderBlock)s.
//! It works as a pipeline:
//!
//! 1. A [`LineSource`](line::LineSource) yields physical lines
//! 2. The [`LineAssembler`](line::LineAssembler) merges folded lines into logical lines
//! 3. [`parse_header_line`](header::parse_header_line) splits each logical line into a header
//! 4. [`ValueTokenizer`](header::ValueTokenizer) runs lazily when a header's elements are requested
//!
//! [`parse_headers`] and [`HeaderParser`] drive the pipeline over a blocking source.
//! [`HeaderBlockDecoder`] and [`HeaderEncoder`] adapt it to `tokio_util::codec` so it
//! can sit behind `FramedRead`/`FramedWrite`.
//!
//! # Example
//!
//! ```
//! use micro_header::codec::HeaderBlockDecoder;
//! use tokio_util::codec::Decoder;
//! use bytes::BytesMut;
//!
//! let mut decoder = HeaderBlockDecoder::new();
//! let mut buffer = BytesMut::from("Content-Type: text/html; charset=\"utf-8\"\r\n\r\n");
//! let block = decoder.decode(&mut buffer).unwrap().unwrap();
//!
//! let element = &block[0].elements()[0];
//! assert_eq!(element.name(), "text/html");
//! assert_eq!(element.parameter("charset").and_then(|p| p.value()), Some("utf-8"));
//! ```

mod config;
pub mod header;
pub mod line;
mod parser;

pub use config::{DEFAULT_LINE_CAPACITY, DEFAULT_MAX_BLOCK_BYTES, DEFAULT_MAX_HEADER_NUM, DEFAULT_MAX_LINE_LENGTH, ParserConfig};
pub use header::{HeaderBlockDecoder, HeaderEncoder};
pub use parser::{HeaderParser, parse_headers};
