//! Header block encoder for serializing parsed headers back to bytes.
//!
//! Headers that still carry their raw logical line are written exactly as they were
//! read; headers built in code are written as `name: value`. Every header ends with
//! CRLF and the block ends with an empty line.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::error;

use crate::buffer::is_trimmable;
use crate::protocol::{Charset, HeaderBlock, SendError};

/// Encoder for header blocks implementing the [`Encoder`] trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderEncoder {
    charset: Charset,
}

impl HeaderEncoder {
    /// Creates an encoder writing UTF-8.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_charset(charset: Charset) -> Self {
        Self { charset }
    }

    fn encode_block(&self, block: &HeaderBlock, dst: &mut BytesMut) -> Result<(), SendError> {
        for header in block {
            let name = header.name();
            if name.chars().all(is_trimmable) || name.contains(':') {
                error!(header_name = name, "header name can not be read back");
                return Err(SendError::invalid_header(format!("header name {name:?} is blank or contains a colon")));
            }

            let line = header.to_string();
            if line.contains(['\r', '\n']) {
                error!(header_name = header.name(), "line break inside header");
                return Err(SendError::invalid_header(format!("header {:?} contains a line break", header.name())));
            }
            self.charset.encode(&line, dst)?;
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

impl Encoder<&HeaderBlock> for HeaderEncoder {
    type Error = SendError;

    /// Encodes a header block into the provided bytes buffer.
    ///
    /// # Errors
    ///
    /// Returns error if a header name is blank or contains `:`, a header contains CR
    /// or LF, or it has characters the charset can not represent. `dst` is left as it was before the call in that case.
    fn encode(&mut self, block: &HeaderBlock, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let start = dst.len();
        dst.reserve(block.iter().map(|header| header.name().len() + header.value().len() + 4).sum::<usize>() + 2);

        self.encode_block(block, dst).inspect_err(|_| dst.truncate(start))
    }
}

impl Encoder<HeaderBlock> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, block: HeaderBlock, dst: &mut BytesMut) -> Result<(), Self::Error> {
        Encoder::<&HeaderBlock>::encode(self, &block, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{HeaderBlockDecoder, parse_headers};
    use crate::codec::line::BytesSource;
    use crate::protocol::Header;
    use tokio_util::codec::Decoder;

    #[test]
    fn test_raw_lines_are_written_back() {
        let input = "header1  : stuff; param1 = value1\r\nHost:localhost\r\n\r\n";
        let block = parse_headers(BytesSource::new(input)).unwrap();

        let mut dst = BytesMut::new();
        HeaderEncoder::new().encode(&block, &mut dst).unwrap();

        assert_eq!(&dst[..], input.as_bytes());
    }

    #[test]
    fn test_built_headers() {
        let block: HeaderBlock = vec![Header::new("Content-Length", "10"), Header::new("Connection", "close")].into();

        let mut dst = BytesMut::new();
        HeaderEncoder::new().encode(block, &mut dst).unwrap();

        assert_eq!(&dst[..], b"Content-Length: 10\r\nConnection: close\r\n\r\n");
    }

    #[test]
    fn test_empty_block() {
        let mut dst = BytesMut::new();
        HeaderEncoder::new().encode(&HeaderBlock::new(), &mut dst).unwrap();
        assert_eq!(&dst[..], b"\r\n");
    }

    #[test]
    fn test_rejects_line_breaks() {
        let block: HeaderBlock = vec![Header::new("Ok", "1"), Header::new("X-Injected", "a\r\nEvil: 1")].into();

        let mut dst = BytesMut::from("prefix");
        let result = HeaderEncoder::new().encode(&block, &mut dst);

        assert!(matches!(result, Err(SendError::InvalidHeader { .. })));
        assert_eq!(&dst[..], b"prefix");
    }

    #[test]
    fn test_rejects_unparsable_names() {
        for name in ["a:b", "", " \t"] {
            let block: HeaderBlock = vec![Header::new("Ok", "1"), Header::new(name, "c")].into();

            let mut dst = BytesMut::from("prefix");
            let result = HeaderEncoder::new().encode(&block, &mut dst);

            assert!(matches!(result, Err(SendError::InvalidHeader { .. })));
            assert_eq!(&dst[..], b"prefix");
        }
    }

    #[test]
    fn test_charset() {
        let block: HeaderBlock = vec![Header::new("X-Name", "José")].into();

        let mut dst = BytesMut::new();
        HeaderEncoder::with_charset(Charset::Iso8859_1).encode(&block, &mut dst).unwrap();
        assert_eq!(&dst[..], b"X-Name: Jos\xe9\r\n\r\n");

        let mut dst = BytesMut::new();
        assert!(HeaderEncoder::with_charset(Charset::UsAscii).encode(&block, &mut dst).is_err());
        assert!(dst.is_empty());
    }

    #[test]
    fn test_decode_what_was_encoded() {
        let block: HeaderBlock = vec![Header::new("Accept", "text/html; q=0.9"), Header::new("Host", "example.com")].into();

        let mut dst = BytesMut::new();
        HeaderEncoder::new().encode(&block, &mut dst).unwrap();
        let decoded = HeaderBlockDecoder::new().decode(&mut dst).unwrap().unwrap();

        let pairs: Vec<_> = decoded.iter().map(|h| (h.name(), h.value())).collect();
        assert_eq!(pairs, vec![("Accept", "text/html; q=0.9"), ("Host", "example.com")]);
    }
}
