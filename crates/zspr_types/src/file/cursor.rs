//! Forward-only byte cursor.
//!
//! [`ByteCursor`] walks an immutable byte slice from front to back. It never
//! rewinds: [`ByteCursor::seek_to`] refuses targets behind the current
//! position, which is the discipline the ZSPR layout relies on (header, then
//! names, then the tile block, then the palette block).
//!
//! Every failing operation leaves the cursor where it was.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};

use crate::file::ZsprError;

/// Sequential reader over an immutable byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteCursor<'a> {
	data: &'a [u8],
	offset: usize,
}

impl<'a> ByteCursor<'a> {
	/// Creates a cursor positioned at the start of `data`.
	pub fn new(data: &'a [u8]) -> Self {
		Self {
			data,
			offset: 0,
		}
	}

	/// Returns the current absolute offset.
	#[inline]
	pub fn position(&self) -> usize {
		self.offset
	}

	/// Returns the total length of the underlying buffer.
	#[inline]
	pub fn len(&self) -> usize {
		self.data.len()
	}

	/// Returns `true` if the underlying buffer is empty.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Returns the number of unread bytes.
	#[inline]
	pub fn remaining(&self) -> usize {
		self.data.len() - self.offset
	}

	/// Returns `true` when no bytes remain.
	#[inline]
	pub fn is_exhausted(&self) -> bool {
		self.offset == self.data.len()
	}

	/// Returns the next `n` bytes without advancing.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::IncompleteData`] if fewer than `n` bytes remain.
	pub fn peek_bytes(&self, n: usize) -> Result<&'a [u8], ZsprError> {
		if n > self.remaining() {
			return Err(ZsprError::incomplete(n, self.remaining(), self.offset));
		}
		Ok(&self.data[self.offset..self.offset + n])
	}

	/// Returns the next `n` bytes and advances past them.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::IncompleteData`] if fewer than `n` bytes remain.
	pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ZsprError> {
		let bytes = self.peek_bytes(n)?;
		self.offset += n;
		Ok(bytes)
	}

	/// Reads a fixed-size array and advances past it.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ZsprError> {
		let mut array = [0u8; N];
		array.copy_from_slice(self.read_bytes(N)?);
		Ok(array)
	}

	/// Interprets the next `n` bytes (1 to 4) as a little-endian unsigned
	/// integer without advancing.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::InvalidWidth`] if `n` is not in `1..=4`, or
	/// [`ZsprError::IncompleteData`] if fewer than `n` bytes remain.
	pub fn peek_uint(&self, n: usize) -> Result<u32, ZsprError> {
		if !(1..=4).contains(&n) {
			return Err(ZsprError::InvalidWidth(n));
		}
		let bytes = self.peek_bytes(n)?;
		Ok(bytes.iter().rev().fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
	}

	/// Interprets the next `n` bytes (1 to 4) as a little-endian unsigned
	/// integer and advances past them.
	///
	/// # Errors
	///
	/// See [`ByteCursor::peek_uint`].
	pub fn read_uint(&mut self, n: usize) -> Result<u32, ZsprError> {
		let value = self.peek_uint(n)?;
		self.offset += n;
		Ok(value)
	}

	/// Reads a single byte.
	pub fn read_u8(&mut self) -> Result<u8, ZsprError> {
		Ok(self.read_bytes(1)?[0])
	}

	/// Reads a little-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16, ZsprError> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Reads a little-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32, ZsprError> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Reads a NUL-terminated single-byte string and advances past the
	/// terminator.
	///
	/// Bytes are mapped one to one onto code points (Latin-1), so plain ASCII
	/// comes through unchanged.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::IncompleteData`] if no terminator is found.
	pub fn read_ascii_string(&mut self) -> Result<String, ZsprError> {
		let rest = &self.data[self.offset..];
		let Some(len) = rest.iter().position(|&b| b == 0) else {
			return Err(ZsprError::incomplete(rest.len() + 1, rest.len(), self.offset));
		};

		let text = encoding_rs::mem::decode_latin1(&rest[..len]).into_owned();
		self.offset += len + 1;
		Ok(text)
	}

	/// Reads a NUL-terminated UTF-16 string and advances past the terminator.
	///
	/// A leading byte order mark selects big or little endian and is dropped.
	/// Without one the string is little endian.
	///
	/// The terminator is the first `00 00` pair on a 2-byte boundary relative
	/// to the current position; a zero high byte followed by a zero low byte
	/// of the next code unit does not count.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::IncompleteData`] if no terminator is found, or
	/// [`ZsprError::BadEncoding`] if the code units are not valid UTF-16.
	pub fn read_utf16_string(&mut self) -> Result<String, ZsprError> {
		let rest = &self.data[self.offset..];
		let Some(units) = rest.chunks_exact(2).position(|unit| unit == [0, 0]) else {
			return Err(ZsprError::incomplete(rest.len() + 2, rest.len(), self.offset));
		};

		let len = units * 2;
		let bytes = &rest[..len];
		let encoding = match Encoding::for_bom(bytes) {
			Some((encoding, _)) if encoding == UTF_16BE => UTF_16BE,
			_ => UTF_16LE,
		};
		let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
		if had_errors {
			return Err(ZsprError::bad_encoding(format!(
				"malformed UTF-16 string at offset 0x{:X}",
				self.offset
			)));
		}

		let text = text.into_owned();
		self.offset += len + 2;
		Ok(text)
	}

	/// Advances the cursor by `n` bytes.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::IncompleteData`] if fewer than `n` bytes remain.
	pub fn skip(&mut self, n: usize) -> Result<(), ZsprError> {
		self.read_bytes(n).map(|_| ())
	}

	/// Advances the cursor to an absolute offset.
	///
	/// Seeking to the current position is a no-op.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::BackwardSeek`] if `target` is behind the cursor,
	/// or [`ZsprError::IncompleteData`] if it lies past the end of the buffer.
	pub fn seek_to(&mut self, target: usize) -> Result<(), ZsprError> {
		if target < self.offset {
			return Err(ZsprError::BackwardSeek {
				target,
				current: self.offset,
			});
		}
		self.skip(target - self.offset)
	}
}
