//! Growable character storage.
//!
//! [`CharBuffer`] is the scratchpad the line assembler accumulates folded header
//! lines into. It grows by doubling, so the total copy work over its lifetime is
//! linear in the number of characters appended, and it hands out borrowed views
//! of its valid region so callers can slice without intermediate allocation.

mod char_buffer;

pub use char_buffer::{CharBuffer, is_trimmable};
