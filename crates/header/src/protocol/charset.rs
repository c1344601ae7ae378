use std::fmt;

use bytes::{BufMut, BytesMut};
use tracing::trace;

use crate::ensure;
use crate::protocol::{ParseError, SendError};

/// The fixed character encoding of a header stream.
///
/// Decoding beyond these three encodings belongs to whoever supplies the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    /// 7-bit ASCII, bytes `>= 0x80` are rejected
    UsAscii,
    /// Latin-1, every byte maps to the code point of the same value
    Iso8859_1,
    /// Strict UTF-8
    #[default]
    Utf8,
}

impl Charset {
    /// Decodes one raw line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidEncoding`] if `bytes` is not valid in this charset.
    pub fn decode(self, bytes: &[u8]) -> Result<String, ParseError> {
        match self {
            Charset::UsAscii => {
                ensure!(bytes.is_ascii(), ParseError::invalid_encoding(self));
                Ok(bytes.iter().copied().map(char::from).collect())
            }
            Charset::Iso8859_1 => Ok(bytes.iter().copied().map(char::from).collect()),
            Charset::Utf8 => match std::str::from_utf8(bytes) {
                Ok(str) => Ok(str.to_owned()),
                Err(e) => {
                    trace!(cause = %e, "invalid utf-8 line");
                    Err(ParseError::invalid_encoding(self))
                }
            },
        }
    }

    /// Encodes `str` into `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`SendError::InvalidHeader`] if `str` holds characters this charset
    /// can not represent. Nothing is written in that case.
    pub fn encode(self, str: &str, dst: &mut BytesMut) -> Result<(), SendError> {
        match self {
            Charset::UsAscii => {
                ensure!(str.is_ascii(), SendError::invalid_header(format!("{str:?} is not {self}")));
                dst.put_slice(str.as_bytes());
            }
            Charset::Iso8859_1 => {
                let mut bytes = Vec::with_capacity(str.len());
                for ch in str.chars() {
                    let byte = u8::try_from(u32::from(ch)).map_err(|e| SendError::invalid_header(format!("{str:?} is not {self}: {e}")))?;
                    bytes.push(byte);
                }
                dst.put_slice(&bytes);
            }
            Charset::Utf8 => dst.put_slice(str.as_bytes()),
        }
        Ok(())
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Charset::UsAscii => "US-ASCII",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::Utf8 => "UTF-8",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(Charset::UsAscii.decode(b"Host: localhost").unwrap(), "Host: localhost");
        assert!(matches!(Charset::UsAscii.decode(b"X: \xe9"), Err(ParseError::InvalidEncoding { charset: Charset::UsAscii })));

        assert_eq!(Charset::Iso8859_1.decode(b"X: caf\xe9").unwrap(), "X: café");

        assert_eq!(Charset::Utf8.decode("X: café".as_bytes()).unwrap(), "X: café");
        assert!(matches!(Charset::Utf8.decode(b"X: caf\xe9"), Err(ParseError::InvalidEncoding { charset: Charset::Utf8 })));
    }

    #[test]
    fn test_encode() {
        let mut dst = BytesMut::new();
        Charset::Iso8859_1.encode("café", &mut dst).unwrap();
        assert_eq!(&dst[..], b"caf\xe9");

        dst.clear();
        assert!(Charset::Iso8859_1.encode("日本", &mut dst).is_err());
        assert!(Charset::UsAscii.encode("café", &mut dst).is_err());
        assert!(dst.is_empty());

        Charset::Utf8.encode("café", &mut dst).unwrap();
        assert_eq!(&dst[..], "café".as_bytes());
    }
}
