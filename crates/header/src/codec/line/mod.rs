//! Physical and logical header lines.
//!
//! A [`LineSource`] yields physical lines with their terminators removed. The
//! [`LineAssembler`] merges folded continuation lines into logical header lines.

mod line_assembler;
mod source;

pub use line_assembler::LineAssembler;
pub use source::{BytesSource, LineSource, ReaderSource};
