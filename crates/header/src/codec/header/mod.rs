//! Header line parsing, value tokenizing and block framing.
//!
//! # Components
//!
//! - [`parse_header_line`]: splits one logical line into a [`Header`](crate::protocol::Header)
//! - [`ValueTokenizer`]: turns a header value into elements and parameters
//! - [`HeaderBlockDecoder`]: decodes whole header blocks from raw bytes
//!   - Buffers until the terminating blank line
//!   - Enforces the block size limit
//! - [`HeaderEncoder`]: writes header blocks back to bytes
//!   - Reuses the raw line when one was retained
//!   - Rejects values that would break the framing

mod header_decoder;
mod header_encoder;
mod header_line;
mod value_tokenizer;

pub use header_decoder::HeaderBlockDecoder;
pub use header_encoder::HeaderEncoder;
pub use header_line::parse_header_line;
pub use value_tokenizer::ValueTokenizer;
