//! Header data model and error types.
//!
//! - [`Header`]: one header field with its lazily tokenized elements
//! - [`HeaderElement`] and [`NameValuePair`]: the structured view of a value
//! - [`HeaderBlock`]: the ordered headers of one header section
//! - [`Charset`]: the encoding raw lines are decoded with
//! - [`ParseError`], [`SendError`], [`BufferError`]: the error taxonomy
//!
//! Nothing in this module is mutated after construction; every structure is a pure
//! function of the raw lines it was built from.

mod charset;
pub use charset::Charset;

mod element;
pub use element::HeaderElement;
pub use element::NameValuePair;

mod header;
pub use header::Header;

mod header_block;
pub use header_block::HeaderBlock;

mod error;
pub use error::BufferError;
pub use error::ParseError;
pub use error::SendError;
