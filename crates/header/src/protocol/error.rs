use std::io;
use thiserror::Error;

use crate::protocol::Charset;

/// Errors raised while turning raw lines into a [`HeaderBlock`](crate::protocol::HeaderBlock).
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("protocol error: {reason}")]
    Protocol { reason: String },

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("line is not valid {charset}")]
    InvalidEncoding { charset: Charset },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("buffer error: {source}")]
    Buffer {
        #[from]
        source: BufferError,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn invalid_argument<S: ToString>(str: S) -> Self {
        Self::InvalidArgument { reason: str.to_string() }
    }

    pub fn protocol<S: ToString>(str: S) -> Self {
        Self::Protocol { reason: str.to_string() }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_encoding(charset: Charset) -> Self {
        Self::InvalidEncoding { charset }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    /// Returns true if the error was caused by malformed input rather than caller misuse.
    #[inline]
    pub fn is_protocol(&self) -> bool {
        matches!(self, ParseError::Protocol { .. })
    }
}

/// Errors raised while serializing headers.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }
}

/// Bounds violations reported by [`CharBuffer`](crate::buffer::CharBuffer).
///
/// These always point at a bug in the caller, never at bad input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("range {begin}..{end} out of bounds for length {len}")]
    RangeOutOfBounds { begin: usize, end: usize, len: usize },

    #[error("length {len} exceed the capacity {capacity}")]
    LengthOutOfBounds { len: usize, capacity: usize },

    #[error("offset {offset} plus count {count} overflows")]
    Overflow { offset: usize, count: usize },
}

impl BufferError {
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    pub fn range_out_of_bounds(begin: usize, end: usize, len: usize) -> Self {
        Self::RangeOutOfBounds { begin, end, len }
    }

    pub fn length_out_of_bounds(len: usize, capacity: usize) -> Self {
        Self::LengthOutOfBounds { len, capacity }
    }

    pub fn overflow(offset: usize, count: usize) -> Self {
        Self::Overflow { offset, count }
    }
}
