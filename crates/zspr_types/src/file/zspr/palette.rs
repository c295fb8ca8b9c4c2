//! ZSPR palette support.
//!
//! The palette block stores colours as little-endian 15-bit values, 5 bits
//! per channel: red in bits 0-4, green in bits 5-9 and blue in bits 10-14.
//! It holds four 15-colour palettes (green mail, blue mail, red mail and
//! bunny) followed by the two glove colours. Slot 0 of each palette is not
//! stored; it is the transparent entry.

use std::fmt;

use serde::Serialize;

use crate::file::{ByteCursor, ZsprError};

/// Number of palettes in a ZSPR palette block
pub const PALETTE_COUNT: usize = 4;

/// Number of entries in a decoded palette, including the transparent slot
pub const PALETTE_SIZE: usize = 16;

/// Number of colours stored per palette
pub const STORED_COLORS_PER_PALETTE: usize = PALETTE_SIZE - 1;

/// Number of trailing glove colours after the palettes
pub const GLOVE_COLOR_COUNT: usize = 2;

/// Minimum palette block length: 4 * 15 colours + 2 glove colours, 2 bytes each
pub const PALETTE_BLOCK_SIZE: usize =
	(PALETTE_COUNT * STORED_COLORS_PER_PALETTE + GLOVE_COLOR_COUNT) * 2;

/// Rescales a 5-bit channel value to 8 bits (`c * 255 / 31`, rounded down).
///
/// Only the low 5 bits of `channel` are used.
#[inline]
pub const fn rescale_channel(channel: u16) -> u8 {
	((channel & 0x1F) as u32 * 0xFF / 0x1F) as u8
}

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
}

impl Color {
	/// Black
	pub const BLACK: Self = Self::rgb(0, 0, 0);

	/// Creates a new RGB color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self {
			r,
			g,
			b,
		}
	}

	/// Decodes a packed 15-bit colour.
	pub const fn from_bgr15(value: u16) -> Self {
		Self::rgb(
			rescale_channel(value),
			rescale_channel(value >> 5),
			rescale_channel(value >> 10),
		)
	}

	/// Returns the color as a `[r, g, b]` array.
	pub const fn to_array(self) -> [u8; 3] {
		[self.r, self.g, self.b]
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
	}
}

/// One palette slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteEntry {
	/// Slot 0: nothing is drawn
	#[default]
	Transparent,
	/// A real colour
	Opaque(Color),
}

impl PaletteEntry {
	/// Returns the colour, or `None` for the transparent entry.
	#[inline]
	pub const fn color(self) -> Option<Color> {
		match self {
			Self::Transparent => None,
			Self::Opaque(color) => Some(color),
		}
	}

	/// Returns `true` for the transparent entry.
	#[inline]
	pub const fn is_transparent(self) -> bool {
		matches!(self, Self::Transparent)
	}
}

/// A 16-entry palette; entry 0 is always [`PaletteEntry::Transparent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
	entries: [PaletteEntry; PALETTE_SIZE],
}

impl Palette {
	/// Creates a palette from the 15 stored colours.
	pub fn new(colors: [Color; STORED_COLORS_PER_PALETTE]) -> Self {
		let mut entries = [PaletteEntry::Transparent; PALETTE_SIZE];
		for (entry, color) in entries[1..].iter_mut().zip(colors) {
			*entry = PaletteEntry::Opaque(color);
		}
		Self {
			entries,
		}
	}

	/// Reads 15 packed colours from a cursor.
	pub fn from_cursor(cursor: &mut ByteCursor<'_>) -> Result<Self, ZsprError> {
		let mut colors = [Color::BLACK; STORED_COLORS_PER_PALETTE];
		for color in &mut colors {
			*color = Color::from_bgr15(cursor.read_u16()?);
		}
		Ok(Self::new(colors))
	}

	/// Returns the entry at `index`; indices past 15 wrap to their low 4 bits.
	#[inline]
	pub fn get(&self, index: u8) -> PaletteEntry {
		self.entries[(index & 0x0F) as usize]
	}

	/// Returns the colour at `index`, or `None` if it is transparent.
	#[inline]
	pub fn color(&self, index: u8) -> Option<Color> {
		self.get(index).color()
	}

	/// Returns all 16 entries.
	#[inline]
	pub fn entries(&self) -> &[PaletteEntry; PALETTE_SIZE] {
		&self.entries
	}

	/// Returns an iterator over the opaque colours (slots 1-15).
	pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
		self.entries.iter().filter_map(|entry| entry.color())
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new([Color::BLACK; STORED_COLORS_PER_PALETTE])
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = PaletteEntry;

	fn index(&self, index: u8) -> &Self::Output {
		&self.entries[(index & 0x0F) as usize]
	}
}

/// Decoded palette block: the four palettes and the two glove colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteBlock {
	/// Green mail, blue mail, red mail and bunny palettes, in file order
	pub palettes: [Palette; PALETTE_COUNT],

	/// Trailing glove colours; parsed but not used for rendering
	pub glove_colors: [Color; GLOVE_COLOR_COUNT],
}

/// Decodes a raw palette block.
///
/// Bytes beyond [`PALETTE_BLOCK_SIZE`] are ignored.
///
/// # Errors
///
/// Returns [`ZsprError::IncompleteData`] if the block is shorter than
/// [`PALETTE_BLOCK_SIZE`].
pub fn decode_palettes(bytes: &[u8]) -> Result<PaletteBlock, ZsprError> {
	let mut cursor = ByteCursor::new(bytes);

	let mut palettes = [Palette::default(); PALETTE_COUNT];
	for palette in &mut palettes {
		*palette = Palette::from_cursor(&mut cursor)?;
	}

	let mut glove_colors = [Color::BLACK; GLOVE_COLOR_COUNT];
	for color in &mut glove_colors {
		*color = Color::from_bgr15(cursor.read_u16()?);
	}

	if !cursor.is_exhausted() {
		log::debug!("ignoring {} trailing palette bytes", cursor.remaining());
	}

	Ok(PaletteBlock {
		palettes,
		glove_colors,
	})
}
