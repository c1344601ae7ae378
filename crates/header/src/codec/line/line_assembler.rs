//! Logical header line assembly.
//!
//! Header fields may be folded over several physical lines: a line starting with a
//! space or a tab continues the previous one. The assembler reads physical lines from
//! a [`LineSource`] and emits one logical line per header field, stopping at the first
//! empty line or at the end of the stream.
//!
//! # Folding
//!
//! Each fold point becomes a single space: the leading space/tab run of the
//! continuation line is dropped, the rest of the line is appended after one `' '`.
//! Trailing whitespace of a continuation line is kept as is.

use tracing::{trace, warn};

use crate::buffer::CharBuffer;
use crate::codec::config::{DEFAULT_LINE_CAPACITY, DEFAULT_MAX_LINE_LENGTH, ParserConfig};
use crate::codec::line::LineSource;
use crate::ensure;
use crate::protocol::ParseError;

const FOLD_WHITESPACE: [char; 2] = [' ', '\t'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblerState {
    /// Nothing read yet
    Start,
    /// A logical line is pending in `pending` or being built in `buffer`
    Accumulating,
    /// Blank line, end of stream or error seen
    Done,
}

/// Merges folded physical lines into logical header lines.
///
/// ```
/// use micro_header::codec::line::{BytesSource, LineAssembler};
///
/// let source = BytesSource::new("header1: stuff\r\n   and more\r\nheader2: x\r\n\r\n");
/// let mut assembler = LineAssembler::new(source);
///
/// assert_eq!(assembler.next_line().unwrap().map(ToString::to_string).as_deref(), Some("header1: stuff and more"));
/// assert_eq!(assembler.next_line().unwrap().map(ToString::to_string).as_deref(), Some("header2: x"));
/// assert!(assembler.next_line().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct LineAssembler<S> {
    source: S,
    buffer: CharBuffer,
    /// First physical line of the next logical line, read while looking for folds
    pending: Option<String>,
    state: AssemblerState,
    max_line_length: usize,
}

impl<S: LineSource> LineAssembler<S> {
    pub fn new(source: S) -> Self {
        Self::with_limits(source, DEFAULT_LINE_CAPACITY, DEFAULT_MAX_LINE_LENGTH)
    }

    pub fn with_config(source: S, config: &ParserConfig) -> Self {
        Self::with_limits(source, config.initial_line_capacity(), config.max_line_length())
    }

    fn with_limits(source: S, capacity: usize, max_line_length: usize) -> Self {
        Self { source, buffer: CharBuffer::with_capacity(capacity), pending: None, state: AssemblerState::Start, max_line_length }
    }

    /// Returns the next logical line, or `None` once the header section is over.
    ///
    /// The returned buffer is reused by the following call.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Protocol`] if the first line is a continuation line
    /// - [`ParseError::TooLargeHeader`] if a logical line exceeds the length limit
    /// - any error of the underlying [`LineSource`]
    ///
    /// After an error the assembler is exhausted.
    pub fn next_line(&mut self) -> Result<Option<&CharBuffer>, ParseError> {
        match self.assemble() {
            Ok(true) => Ok(Some(&self.buffer)),
            Ok(false) => Ok(None),
            Err(e) => {
                self.state = AssemblerState::Done;
                self.pending = None;
                Err(e)
            }
        }
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn assemble(&mut self) -> Result<bool, ParseError> {
        if self.state == AssemblerState::Start {
            let first = match self.source.read_line()? {
                Some(line) if !line.is_empty() => line,
                _ => {
                    trace!("empty header block");
                    self.state = AssemblerState::Done;
                    return Ok(false);
                }
            };

            if is_folded(&first) {
                warn!(line = %first, "first header line starts with whitespace");
                return Err(ParseError::protocol("malformed header block: unexpected line folding on first line"));
            }

            self.pending = Some(first);
            self.state = AssemblerState::Accumulating;
        }

        if self.state == AssemblerState::Done {
            return Ok(false);
        }

        let Some(line) = self.pending.take() else {
            self.state = AssemblerState::Done;
            return Ok(false);
        };

        self.buffer.clear();
        self.append(&line)?;

        loop {
            match self.source.read_line()? {
                None => {
                    trace!("end of stream without blank line");
                    self.state = AssemblerState::Done;
                    break;
                }
                Some(line) if line.is_empty() => {
                    self.state = AssemblerState::Done;
                    break;
                }
                Some(line) if is_folded(&line) => {
                    self.fold(line.trim_start_matches(FOLD_WHITESPACE))?;
                }
                Some(line) => {
                    self.pending = Some(line);
                    break;
                }
            }
        }

        trace!(len = self.buffer.len(), "assembled logical header line");
        Ok(true)
    }

    fn append(&mut self, text: &str) -> Result<(), ParseError> {
        let required = self.buffer.len() + text.chars().count();
        ensure!(required <= self.max_line_length, ParseError::too_large_header(required, self.max_line_length));
        self.buffer.append_str(text);
        Ok(())
    }

    fn fold(&mut self, continuation: &str) -> Result<(), ParseError> {
        let required = self.buffer.len() + 1 + continuation.chars().count();
        ensure!(required <= self.max_line_length, ParseError::too_large_header(required, self.max_line_length));
        self.buffer.ensure_capacity(1 + continuation.len());
        self.buffer.push(' ');
        self.buffer.append_str(continuation);
        Ok(())
    }
}

fn is_folded(line: &str) -> bool {
    line.starts_with(FOLD_WHITESPACE)
}
