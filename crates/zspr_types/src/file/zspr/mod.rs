//! `.ZSPR` file format support for `zspr-rs` project.
//!
//! ZSPR is the sprite container used by randomizer tooling to ship custom
//! player sprites. A file holds a small header, three name strings, a block
//! of 4bpp planar tiles and a block of 15-bit palettes.
//!
//! # File Structure
//!
//! All integers are little-endian.
//!
//! | Offset | Size | Field                                      |
//! |--------|------|--------------------------------------------|
//! | 0x00   | 4    | Magic `"ZSPR"`                             |
//! | 0x04   | 1    | Version                                    |
//! | 0x05   | 4    | Checksum                                   |
//! | 0x09   | 4    | Tile block offset                          |
//! | 0x0D   | 2    | Tile block length (bytes)                  |
//! | 0x0F   | 4    | Palette block offset                       |
//! | 0x13   | 2    | Palette block length (bytes)               |
//! | 0x15   | 2    | Sprite type                                |
//! | 0x17   | 6    | Reserved                                   |
//! | 0x1D   | var  | Sprite name (UTF-16LE, NUL-terminated)     |
//! | ...    | var  | Author name (UTF-16LE, NUL-terminated)     |
//! | ...    | var  | Short author name (8-bit, NUL-terminated)  |
//!
//! The tile and palette blocks live at their absolute offsets and must
//! appear in that order, after the names.
//!
//! # Usage Examples
//!
//! ```no_run
//! use zspr_types::file::zspr::{File, PreviewVariant};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let zspr = File::open("link.zspr")?;
//!
//! println!("{} by {}", zspr.sprite_name(), zspr.author_name());
//! println!("Tiles: {}", zspr.tiles().len());
//!
//! let preview = zspr.render_preview(PreviewVariant::GreenMail)?;
//! let scaled = preview.scale_nearest(4).ok_or("scale too large")?;
//! assert_eq!(scaled.to_rgb_bytes().len(), 64 * 96 * 3);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::file::{ByteCursor, ZsprError};

pub mod canvas;
pub mod metatile;
pub mod palette;
pub mod tile;

pub use canvas::{Canvas, PixelCanvas};
pub use metatile::{
	BUNNY_LAYOUT, MAIL_LAYOUT, MetatilePlacement, PREVIEW_HEIGHT, PREVIEW_WIDTH, PreviewLayout,
	PreviewVariant, SHEET_WIDTH_TILES, draw_metatile, draw_preview, draw_tile, draw_tile_sheet,
	metatile_tile_index, render_tile_sheet,
};
pub use palette::{
	Color, PALETTE_COUNT, Palette, PaletteBlock, PaletteEntry, STORED_COLORS_PER_PALETTE,
	decode_palettes, rescale_channel,
};
pub use tile::{TILE_BYTES, TILE_SIZE, Tile, decode_pixel, decode_tiles};

/// ZSPR file constants.
pub mod constants {
	/// Magic bytes at the start of every ZSPR file
	pub const MAGIC: [u8; 4] = *b"ZSPR";

	/// Number of reserved bytes after the sprite type
	pub const RESERVED_SIZE: usize = 6;

	/// Offset of the first name string
	pub const NAMES_OFFSET: usize = 0x1D;
}

/// Fixed-size part of a ZSPR file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Header {
	version: u8,
	checksum: u32,
	tile_offset: u32,
	tile_length: u16,
	palette_offset: u32,
	palette_length: u16,
	sprite_type: u16,
	reserved: [u8; constants::RESERVED_SIZE],
}

impl Header {
	/// Reads the header, including the magic, from the start of a cursor.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::InvalidSignature`] if the magic does not match,
	/// or [`ZsprError::IncompleteData`] if the header is truncated.
	pub fn from_cursor(cursor: &mut ByteCursor<'_>) -> Result<Self, ZsprError> {
		let magic = cursor.read_array::<4>()?;
		if magic != constants::MAGIC {
			return Err(ZsprError::InvalidSignature {
				actual: magic,
			});
		}

		Ok(Self {
			version: cursor.read_u8()?,
			checksum: cursor.read_u32()?,
			tile_offset: cursor.read_u32()?,
			tile_length: cursor.read_u16()?,
			palette_offset: cursor.read_u32()?,
			palette_length: cursor.read_u16()?,
			sprite_type: cursor.read_u16()?,
			reserved: cursor.read_array()?,
		})
	}

	/// Returns the format version.
	pub fn version(&self) -> u8 {
		self.version
	}

	/// Returns the stored checksum. It is not verified.
	pub fn checksum(&self) -> u32 {
		self.checksum
	}

	/// Returns the absolute offset of the tile block.
	pub fn tile_offset(&self) -> u32 {
		self.tile_offset
	}

	/// Returns the length of the tile block in bytes.
	pub fn tile_length(&self) -> u16 {
		self.tile_length
	}

	/// Returns the absolute offset of the palette block.
	pub fn palette_offset(&self) -> u32 {
		self.palette_offset
	}

	/// Returns the length of the palette block in bytes.
	pub fn palette_length(&self) -> u16 {
		self.palette_length
	}

	/// Returns the sprite type.
	pub fn sprite_type(&self) -> u16 {
		self.sprite_type
	}

	/// Returns the reserved bytes.
	pub fn reserved(&self) -> &[u8; constants::RESERVED_SIZE] {
		&self.reserved
	}
}

/// A fully decoded ZSPR file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	header: Header,
	sprite_name: String,
	author_name: String,
	author_name_short: String,
	tiles: Vec<Tile>,
	palettes: PaletteBlock,
}

impl File {
	/// Opens and decodes a ZSPR file.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::Io`] if the file cannot be read, or any parse
	/// error from [`File::from_bytes`].
	pub fn open(path: impl AsRef<Path>) -> Result<Self, ZsprError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Reads the whole of `reader` and decodes it.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, ZsprError> {
		let mut raw = Vec::new();
		reader.read_to_end(&mut raw)?;
		Self::from_bytes(&raw)
	}

	/// Decodes a ZSPR file from a byte slice.
	///
	/// # Errors
	///
	/// - [`ZsprError::InvalidSignature`] if the magic is not `"ZSPR"`
	/// - [`ZsprError::IncompleteData`] if any field or block is truncated, or
	///   the tile block is not a whole number of tiles
	/// - [`ZsprError::BackwardSeek`] if a block offset points behind data
	///   already read
	/// - [`ZsprError::BadEncoding`] if a name is not valid UTF-16
	pub fn from_bytes(data: &[u8]) -> Result<Self, ZsprError> {
		let mut cursor = ByteCursor::new(data);

		let header = Header::from_cursor(&mut cursor)?;
		let sprite_name = cursor.read_utf16_string()?;
		let author_name = cursor.read_utf16_string()?;
		let author_name_short = cursor.read_ascii_string()?;

		log::debug!(
			"ZSPR v{} \"{}\": tiles at 0x{:X} ({} bytes), palettes at 0x{:X} ({} bytes)",
			header.version,
			sprite_name,
			header.tile_offset,
			header.tile_length,
			header.palette_offset,
			header.palette_length
		);

		cursor.seek_to(header.tile_offset as usize)?;
		let tile_bytes = cursor.read_bytes(header.tile_length as usize)?;
		cursor.seek_to(header.palette_offset as usize)?;
		let palette_bytes = cursor.read_bytes(header.palette_length as usize)?;

		let tiles = decode_tiles(tile_bytes)?;
		let palettes = decode_palettes(palette_bytes)?;

		Ok(Self {
			header,
			sprite_name,
			author_name,
			author_name_short,
			tiles,
			palettes,
		})
	}

	/// Returns the header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the sprite's display name.
	pub fn sprite_name(&self) -> &str {
		&self.sprite_name
	}

	/// Returns the author's display name.
	pub fn author_name(&self) -> &str {
		&self.author_name
	}

	/// Returns the short 8-bit author name used in-game.
	pub fn author_name_short(&self) -> &str {
		&self.author_name_short
	}

	/// Returns the decoded tiles in sheet order.
	pub fn tiles(&self) -> &[Tile] {
		&self.tiles
	}

	/// Returns the four palettes (green mail, blue mail, red mail, bunny).
	pub fn palettes(&self) -> &[Palette; PALETTE_COUNT] {
		&self.palettes.palettes
	}

	/// Returns a palette by index.
	pub fn palette(&self, index: usize) -> Option<&Palette> {
		self.palettes.palettes.get(index)
	}

	/// Returns the two glove colours stored after the palettes.
	pub fn glove_colors(&self) -> &[Color; 2] {
		&self.palettes.glove_colors
	}

	/// Renders the 16x24 facing-down preview of a variant on a black canvas.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::TileOutOfRange`] if the sprite has too few tiles.
	pub fn render_preview(&self, variant: PreviewVariant) -> Result<PixelCanvas, ZsprError> {
		let mut canvas = PixelCanvas::new(PREVIEW_WIDTH, PREVIEW_HEIGHT, metatile::BACKGROUND);
		let palette = &self.palettes.palettes[variant.palette_index()];
		draw_preview(palette, &self.tiles, variant.layout(), &mut canvas)?;
		Ok(canvas)
	}

	/// Renders all tiles as a sheet using one of the four palettes.
	///
	/// # Errors
	///
	/// Returns [`ZsprError::PaletteOutOfRange`] if `palette_index` is not below 4.
	pub fn render_tile_sheet(&self, palette_index: usize) -> Result<PixelCanvas, ZsprError> {
		let palette = self
			.palette(palette_index)
			.ok_or(ZsprError::PaletteOutOfRange(palette_index))?;
		Ok(render_tile_sheet(palette, &self.tiles))
	}
}

impl TryFrom<&[u8]> for File {
	type Error = ZsprError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl fmt::Display for File {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"ZSPR v{}: \"{}\" by {} ({} tiles)",
			self.header.version,
			self.sprite_name,
			self.author_name,
			self.tiles.len()
		)
	}
}
