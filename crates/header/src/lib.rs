//! A header block parser for HTTP/1.x style messages
//!
//! This crate turns a raw stream of header lines into structured headers: names,
//! values, and the semicolon separated elements and parameters inside a value. It
//! handles RFC-style line folding, rejects malformed blocks deterministically and
//! tokenizes quoted strings without a grammar library.
//!
//! # Features
//!
//! - Folded (continuation) header lines merged into one logical line
//! - Lazy, memoized tokenizing of header values into elements and parameters
//! - Exact reserialization of parsed headers
//! - Blocking parsing over any `BufRead`, or streaming through `tokio_util::codec`
//! - Configurable limits on line length, header count and block size
//!
//! # Example
//!
//! ```
//! use micro_header::codec::line::BytesSource;
//! use micro_header::codec::parse_headers;
//!
//! let raw = "Content-Type: text/html;\r\n charset=\"utf-8\"\r\nHost: localhost\r\n\r\n";
//! let headers = parse_headers(BytesSource::new(raw)).unwrap();
//!
//! assert_eq!(headers.len(), 2);
//! assert_eq!(headers[0].value(), "text/html; charset=\"utf-8\"");
//!
//! let content_type = &headers[0].elements()[0];
//! assert_eq!(content_type.name(), "text/html");
//! assert_eq!(content_type.parameter("charset").and_then(|p| p.value()), Some("utf-8"));
//! ```
//!
//! # Architecture
//!
//! - [`buffer`]: the growable character buffer logical lines are assembled in
//! - [`codec`]: line sources, line assembly, header line parsing, value tokenizing
//!   and the `tokio_util` decoder/encoder
//! - [`protocol`]: the data model and error types
//!
//! # Error Handling
//!
//! - [`protocol::ParseError`]: malformed input, limit violations, invalid configuration
//! - [`protocol::SendError`]: headers that can not be serialized
//! - [`protocol::BufferError`]: out of bounds buffer access
//!
//! # Limitations
//!
//! - Commas do not separate header elements; a value has at most one element
//! - Backslash escapes inside quoted strings are not interpreted
//! - Default limits: 64 headers, 8KB per logical line, 8KB per streamed block

pub mod buffer;
pub mod codec;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
