use std::cmp;
use std::fmt::{self, Write};

use tracing::trace;

use crate::ensure;
use crate::protocol::BufferError;

/// Returns true for characters trimmed from header names and values.
///
/// Unicode whitespace and the `U+001C..=U+001F` separators count, the no-break spaces
/// `U+00A0`, `U+2007`, `U+202F` and the `U+0085` next-line control do not.
#[inline]
pub fn is_trimmable(ch: char) -> bool {
    match ch {
        '\u{a0}' | '\u{2007}' | '\u{202f}' | '\u{85}' => false,
        '\u{1c}'..='\u{1f}' => true,
        _ => ch.is_whitespace(),
    }
}

/// An append-only `char` buffer with explicit capacity control.
///
/// Only the first [`len`](CharBuffer::len) characters are meaningful. The storage
/// behind them is a single owned slice; when an append does not fit, a new slice of
/// `max(capacity * 2, required)` characters is allocated, the valid region is copied
/// over and the old slice is dropped.
#[derive(Clone)]
pub struct CharBuffer {
    buffer: Box<[char]>,
    len: usize,
}

impl CharBuffer {
    /// Creates an empty buffer without any preallocated storage.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty buffer able to hold `capacity` characters before growing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buffer: vec!['\0'; capacity].into_boxed_slice(), len: 0 }
    }

    fn expand(&mut self, required: usize) {
        let new_capacity = cmp::max(self.buffer.len().saturating_mul(2), required);
        trace!(from = self.buffer.len(), to = new_capacity, len = self.len, "expand char buffer");

        let mut storage = vec!['\0'; new_capacity].into_boxed_slice();
        storage[..self.len].copy_from_slice(&self.buffer[..self.len]);
        self.buffer = storage;
    }

    /// Makes room for `additional` characters and returns the length after they are written.
    fn grow_for(&mut self, additional: usize) -> usize {
        let new_len = self.len.saturating_add(additional);
        if new_len > self.buffer.len() {
            self.expand(new_len);
        }
        new_len
    }

    /// Appends `count` characters of `chars` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Overflow`] if `offset + count` overflows and
    /// [`BufferError::RangeOutOfBounds`] if the region is not inside `chars`. Bounds are
    /// checked even when `count` is zero.
    pub fn append_chars(&mut self, chars: &[char], offset: usize, count: usize) -> Result<(), BufferError> {
        let end = offset.checked_add(count).ok_or(BufferError::overflow(offset, count))?;
        ensure!(end <= chars.len(), BufferError::range_out_of_bounds(offset, end, chars.len()));

        if count == 0 {
            return Ok(());
        }

        let new_len = self.grow_for(count);
        self.buffer[self.len..new_len].copy_from_slice(&chars[offset..end]);
        self.len = new_len;
        Ok(())
    }

    /// Appends every character of `str`.
    pub fn append_str(&mut self, str: &str) {
        let new_len = self.grow_for(str.chars().count());
        for (slot, ch) in self.buffer[self.len..new_len].iter_mut().zip(str.chars()) {
            *slot = ch;
        }
        self.len = new_len;
    }

    /// Appends `str`, or the literal `null` when it is absent.
    pub fn append_optional(&mut self, str: Option<&str>) {
        self.append_str(str.unwrap_or("null"));
    }

    /// Appends a single character.
    pub fn push(&mut self, ch: char) {
        let new_len = self.grow_for(1);
        self.buffer[self.len] = ch;
        self.len = new_len;
    }

    /// Appends the `Display` form of `value`.
    pub fn append_display<T: fmt::Display + ?Sized>(&mut self, value: &T) {
        self.append_str(&value.to_string());
    }

    /// Grows the buffer, if needed, so that `extra` more characters fit without reallocating.
    ///
    /// # Panics
    ///
    /// Panics with `capacity overflow` if the required size does not fit in memory,
    /// as [`Vec::reserve`] does.
    pub fn ensure_capacity(&mut self, extra: usize) {
        let available = self.buffer.len() - self.len;
        if extra > available {
            self.expand(self.len.saturating_add(extra));
        }
    }

    /// Resets the length to zero. The storage is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the logical length.
    ///
    /// Growing the length inside the existing capacity exposes whatever the storage
    /// held before; callers must not rely on that content.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::LengthOutOfBounds`] if `len` exceeds the capacity.
    pub fn set_len(&mut self, len: usize) -> Result<(), BufferError> {
        ensure!(len <= self.buffer.len(), BufferError::length_out_of_bounds(len, self.buffer.len()));
        self.len = len;
        Ok(())
    }

    /// Returns the character at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::IndexOutOfBounds`] if `index` is not below [`len`](CharBuffer::len),
    /// even when it is still inside the allocated capacity.
    pub fn char_at(&self, index: usize) -> Result<char, BufferError> {
        ensure!(index < self.len, BufferError::index_out_of_bounds(index, self.len));
        Ok(self.buffer[index])
    }

    /// Returns the index of the first `ch` at or after `from`.
    pub fn index_of_from(&self, ch: char, from: usize) -> Option<usize> {
        if from >= self.len {
            return None;
        }
        self.buffer[from..self.len].iter().position(|c| *c == ch).map(|pos| pos + from)
    }

    #[inline]
    pub fn index_of(&self, ch: char) -> Option<usize> {
        self.index_of_from(ch, 0)
    }

    fn check_range(&self, begin: usize, end: usize) -> Result<(), BufferError> {
        ensure!(begin <= end && end <= self.len, BufferError::range_out_of_bounds(begin, end, self.len));
        Ok(())
    }

    /// Copies `[begin, end)` into a new string.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::RangeOutOfBounds`] if `end > len` or `begin > end`.
    pub fn substring(&self, begin: usize, end: usize) -> Result<String, BufferError> {
        self.check_range(begin, end)?;
        Ok(self.buffer[begin..end].iter().collect())
    }

    /// Like [`substring`](CharBuffer::substring), with leading and trailing
    /// [trimmable](is_trimmable) characters removed before copying.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::RangeOutOfBounds`] under the same conditions as `substring`.
    pub fn substring_trimmed(&self, begin: usize, end: usize) -> Result<String, BufferError> {
        self.check_range(begin, end)?;

        let mut begin = begin;
        let mut end = end;
        while begin < end && is_trimmable(self.buffer[begin]) {
            begin += 1;
        }
        while end > begin && is_trimmable(self.buffer[end - 1]) {
            end -= 1;
        }
        Ok(self.buffer[begin..end].iter().collect())
    }

    /// Returns an independent copy of the valid region.
    pub fn to_char_array(&self) -> Vec<char> {
        self.as_chars().to_vec()
    }

    /// Borrows the valid region of the underlying storage without copying.
    #[inline]
    pub fn as_chars(&self) -> &[char] {
        &self.buffer[..self.len]
    }
}

impl Default for CharBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for CharBuffer {
    fn from(str: &str) -> Self {
        let mut buffer = CharBuffer::with_capacity(str.len());
        buffer.append_str(str);
        buffer
    }
}

impl PartialEq for CharBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_chars() == other.as_chars()
    }
}

impl Eq for CharBuffer {}

impl fmt::Display for CharBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.as_chars() {
            f.write_char(*ch)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CharBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharBuffer")
            .field("len", &self.len)
            .field("capacity", &self.buffer.len())
            .field("content", &self.to_string())
            .finish()
    }
}
