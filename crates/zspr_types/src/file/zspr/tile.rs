//! 4bpp planar tile decoding.
//!
//! Each tile is 32 bytes describing an 8x8 block of 4-bit colour indices.
//! The bytes hold four bit-planes, interleaved in pairs per row:
//!
//! | Bytes   | Content                            |
//! |---------|------------------------------------|
//! | `y*2`   | plane 0 (bit 0 of the index), row y |
//! | `y*2+1` | plane 1 (bit 1), row y             |
//! | `y*2+16`| plane 2 (bit 2), row y             |
//! | `y*2+17`| plane 3 (bit 3), row y             |
//!
//! Within a plane byte the leftmost pixel is the most significant bit.

use std::fmt;

use crate::file::{ByteCursor, ZsprError};

/// Tile width and height in pixels
pub const TILE_SIZE: usize = 8;

/// Size of one encoded tile in bytes
pub const TILE_BYTES: usize = 32;

/// Decodes the colour index of pixel (`x`, `y`) from an encoded tile.
///
/// `x` and `y` must be below [`TILE_SIZE`].
#[inline]
pub fn decode_pixel(chunk: &[u8; TILE_BYTES], y: usize, x: usize) -> u8 {
	let shift = 7 - x;
	let bit = |byte: u8| (byte >> shift) & 1;

	bit(chunk[y * 2])
		| bit(chunk[y * 2 + 1]) << 1
		| bit(chunk[y * 2 + 0x10]) << 2
		| bit(chunk[y * 2 + 0x11]) << 3
}

/// A decoded 8x8 tile of 4-bit palette indices.
///
/// Index 0 means "no pixel" and is never drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile {
	pixels: [[u8; TILE_SIZE]; TILE_SIZE],
}

impl Tile {
	/// Creates a tile from already decoded rows.
	///
	/// Values are masked to 4 bits.
	pub fn new(mut pixels: [[u8; TILE_SIZE]; TILE_SIZE]) -> Self {
		pixels.iter_mut().flatten().for_each(|p| *p &= 0x0F);
		Self {
			pixels,
		}
	}

	/// Decodes one 32-byte planar chunk.
	pub fn from_planar(chunk: &[u8; TILE_BYTES]) -> Self {
		let mut pixels = [[0u8; TILE_SIZE]; TILE_SIZE];
		for (y, row) in pixels.iter_mut().enumerate() {
			for (x, pixel) in row.iter_mut().enumerate() {
				*pixel = decode_pixel(chunk, y, x);
			}
		}
		Self {
			pixels,
		}
	}

	/// Returns the colour index at (`x`, `y`), or `None` outside the tile.
	#[inline]
	pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
		self.pixels.get(y)?.get(x).copied()
	}

	/// Returns the rows of the tile, top to bottom.
	#[inline]
	pub fn rows(&self) -> &[[u8; TILE_SIZE]; TILE_SIZE] {
		&self.pixels
	}

	/// Returns `true` if every pixel is index 0.
	pub fn is_blank(&self) -> bool {
		self.pixels.iter().flatten().all(|&p| p == 0)
	}
}

impl fmt::Display for Tile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for row in &self.pixels {
			for &p in row {
				write!(f, "{p:X}")?;
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

/// Decodes a raw tile block into tiles, in order of appearance.
///
/// # Errors
///
/// Returns [`ZsprError::IncompleteData`] if the block length is not a
/// multiple of [`TILE_BYTES`].
pub fn decode_tiles(bytes: &[u8]) -> Result<Vec<Tile>, ZsprError> {
	let mut cursor = ByteCursor::new(bytes);
	let mut tiles = Vec::with_capacity(bytes.len() / TILE_BYTES);

	while !cursor.is_exhausted() {
		let chunk = cursor.read_array::<TILE_BYTES>()?;
		tiles.push(Tile::from_planar(&chunk));
	}

	log::trace!("decoded {} tiles from {} bytes", tiles.len(), bytes.len());
	Ok(tiles)
}
