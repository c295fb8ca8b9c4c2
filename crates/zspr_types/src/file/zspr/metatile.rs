//! Tile and metatile compositing.
//!
//! Tiles are addressed as a sheet [`SHEET_WIDTH_TILES`] tiles wide. A
//! metatile is a 2x2 block of that sheet; metatile (`column`, `row`) starts
//! at tile `(row * 2) * 16 + column * 2`.

use std::fmt;

use crate::file::ZsprError;
use crate::file::zspr::{Canvas, Color, Palette, PixelCanvas, TILE_SIZE, Tile};

/// Number of tiles in one row of the sprite sheet
pub const SHEET_WIDTH_TILES: usize = 0x10;

/// Metatile width and height in tiles
pub const METATILE_TILES: usize = 2;

/// Metatile width and height in pixels
pub const METATILE_SIZE: u32 = (METATILE_TILES * TILE_SIZE) as u32;

/// Preview image width in pixels
pub const PREVIEW_WIDTH: u32 = METATILE_SIZE;

/// Preview image height in pixels (head metatile overlapping the body by half)
pub const PREVIEW_HEIGHT: u32 = 24;

/// Background colour of rendered previews and tile sheets
pub const BACKGROUND: Color = Color::BLACK;

/// Returns the linear index of the top-left tile of a metatile, or `None` if
/// it does not fit in `usize`.
#[inline]
pub const fn metatile_tile_index(column: usize, row: usize) -> Option<usize> {
	let Some(row_start) = row.checked_mul(METATILE_TILES * SHEET_WIDTH_TILES) else {
		return None;
	};
	let Some(column_offset) = column.checked_mul(METATILE_TILES) else {
		return None;
	};
	row_start.checked_add(column_offset)
}

/// Draws one tile with its top-left corner at (`dest_x`, `dest_y`).
///
/// Pixels with index 0 are skipped and leave the canvas untouched, as are
/// pixels whose coordinates do not fit in `u32`.
pub fn draw_tile(
	palette: &Palette,
	tile: &Tile,
	dest_x: u32,
	dest_y: u32,
	canvas: &mut impl Canvas,
) {
	for (y, row) in (0u32..).zip(tile.rows()) {
		let Some(pixel_y) = dest_y.checked_add(y) else {
			break;
		};
		for (x, &index) in (0u32..).zip(row) {
			let Some(pixel_x) = dest_x.checked_add(x) else {
				break;
			};
			if let Some(color) = palette.color(index) {
				canvas.put_pixel(pixel_x, pixel_y, color);
			}
		}
	}
}

/// Draws the 2x2 metatile at sheet position (`column`, `row`) with its
/// top-left corner at (`dest_x`, `dest_y`).
///
/// # Errors
///
/// Returns [`ZsprError::TileOutOfRange`] if the metatile reaches past the
/// decoded tiles. Nothing is drawn in that case.
pub fn draw_metatile(
	palette: &Palette,
	tiles: &[Tile],
	column: usize,
	row: usize,
	dest_x: u32,
	dest_y: u32,
	canvas: &mut impl Canvas,
) -> Result<(), ZsprError> {
	let out_of_range = |index| ZsprError::TileOutOfRange {
		index,
		count: tiles.len(),
	};
	let origin = metatile_tile_index(column, row).ok_or_else(|| out_of_range(usize::MAX))?;
	let last = origin.checked_add(SHEET_WIDTH_TILES + 1).ok_or_else(|| out_of_range(usize::MAX))?;
	if last >= tiles.len() {
		return Err(out_of_range(last));
	}

	for tile_y in 0..METATILE_TILES {
		for tile_x in 0..METATILE_TILES {
			let tile = &tiles[origin + tile_y * SHEET_WIDTH_TILES + tile_x];
			// tiles starting beyond u32 space are entirely off the canvas
			let (Some(x), Some(y)) = (
				dest_x.checked_add((tile_x * TILE_SIZE) as u32),
				dest_y.checked_add((tile_y * TILE_SIZE) as u32),
			) else {
				continue;
			};
			draw_tile(palette, tile, x, y, canvas);
		}
	}
	Ok(())
}

/// Draws every tile as a sheet [`SHEET_WIDTH_TILES`] tiles wide.
///
/// Only complete rows are drawn.
pub fn draw_tile_sheet(palette: &Palette, tiles: &[Tile], canvas: &mut impl Canvas) {
	for (i, tile) in tiles.iter().enumerate() {
		let x = (i % SHEET_WIDTH_TILES * TILE_SIZE) as u32;
		let y = (i / SHEET_WIDTH_TILES * TILE_SIZE) as u32;
		if y + TILE_SIZE as u32 > canvas.height() {
			break;
		}
		draw_tile(palette, tile, x, y, canvas);
	}
}

/// Renders the full tile sheet onto a new canvas.
pub fn render_tile_sheet(palette: &Palette, tiles: &[Tile]) -> PixelCanvas {
	let rows = tiles.len() / SHEET_WIDTH_TILES;
	let mut canvas = PixelCanvas::new(
		(SHEET_WIDTH_TILES * TILE_SIZE) as u32,
		(rows * TILE_SIZE) as u32,
		BACKGROUND,
	);
	draw_tile_sheet(palette, tiles, &mut canvas);
	canvas
}

/// Placement of one metatile in a preview image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetatilePlacement {
	/// Metatile column in the sheet
	pub column: usize,
	/// Metatile row in the sheet
	pub row: usize,
	/// Destination x in pixels
	pub dest_x: u32,
	/// Destination y in pixels
	pub dest_y: u32,
}

impl MetatilePlacement {
	const fn new(column: usize, row: usize, dest_x: u32, dest_y: u32) -> Self {
		Self {
			column,
			row,
			dest_x,
			dest_y,
		}
	}
}

/// Body and head metatiles of the facing-down pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewLayout {
	/// Lower body, drawn first
	pub body: MetatilePlacement,
	/// Head, drawn over the body
	pub head: MetatilePlacement,
}

/// Facing-down pose in the mail palettes
pub const MAIL_LAYOUT: PreviewLayout = PreviewLayout {
	body: MetatilePlacement::new(3, 1, 0, 8),
	head: MetatilePlacement::new(1, 0, 0, 0),
};

/// Facing-down pose in bunny form
pub const BUNNY_LAYOUT: PreviewLayout = PreviewLayout {
	body: MetatilePlacement::new(0, 0x1A, 0, 8),
	head: MetatilePlacement::new(5, 0x19, 0, 0),
};

/// The four palette variants of a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewVariant {
	/// Palette 0
	GreenMail,
	/// Palette 1
	BlueMail,
	/// Palette 2
	RedMail,
	/// Palette 3
	Bunny,
}

impl PreviewVariant {
	/// All variants in palette order
	pub const ALL: [Self; 4] = [Self::GreenMail, Self::BlueMail, Self::RedMail, Self::Bunny];

	/// Index of the palette used by this variant.
	pub const fn palette_index(self) -> usize {
		self as usize
	}

	/// Metatile layout of the preview.
	pub const fn layout(self) -> PreviewLayout {
		match self {
			Self::GreenMail | Self::BlueMail | Self::RedMail => MAIL_LAYOUT,
			Self::Bunny => BUNNY_LAYOUT,
		}
	}

	/// Human readable name, also used for output file names.
	pub const fn name(self) -> &'static str {
		match self {
			Self::GreenMail => "green mail",
			Self::BlueMail => "blue mail",
			Self::RedMail => "red mail",
			Self::Bunny => "bunny",
		}
	}

	/// Parses a variant name, accepting `green-mail`, `green_mail`,
	/// `green mail` or just `green`.
	pub fn from_name(name: &str) -> Option<Self> {
		let name = name.trim().to_ascii_lowercase().replace(['-', '_'], " ");
		match name.as_str() {
			"green mail" | "green" => Some(Self::GreenMail),
			"blue mail" | "blue" => Some(Self::BlueMail),
			"red mail" | "red" => Some(Self::RedMail),
			"bunny" => Some(Self::Bunny),
			_ => None,
		}
	}
}

impl fmt::Display for PreviewVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Draws the preview pose of `layout`, body first.
pub fn draw_preview(
	palette: &Palette,
	tiles: &[Tile],
	layout: PreviewLayout,
	canvas: &mut impl Canvas,
) -> Result<(), ZsprError> {
	for part in [layout.body, layout.head] {
		draw_metatile(palette, tiles, part.column, part.row, part.dest_x, part.dest_y, canvas)?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::zspr::STORED_COLORS_PER_PALETTE;

	const RED: Color = Color::rgb(255, 0, 0);

	fn solid_tile(index: u8) -> Tile {
		Tile::new([[index; TILE_SIZE]; TILE_SIZE])
	}

	fn red_palette() -> Palette {
		Palette::new([RED; STORED_COLORS_PER_PALETTE])
	}

	#[test]
	fn test_metatile_tile_index() {
		assert_eq!(metatile_tile_index(0, 0), Some(0));
		assert_eq!(metatile_tile_index(3, 1), Some(38));
		assert_eq!(metatile_tile_index(1, 0), Some(2));
		assert_eq!(metatile_tile_index(0, 0x1A), Some(832));
		assert_eq!(metatile_tile_index(5, 0x19), Some(810));
		assert_eq!(metatile_tile_index(0, usize::MAX / 16), None);
		assert_eq!(metatile_tile_index(usize::MAX, 0), None);
	}

	#[test]
	fn test_blank_tile_leaves_canvas_unchanged() {
		let mut canvas = PixelCanvas::new(8, 8, Color::rgb(10, 20, 30));
		let before = canvas.clone();
		draw_tile(&red_palette(), &solid_tile(0), 0, 0, &mut canvas);
		assert_eq!(canvas, before);
	}

	#[test]
	fn test_draw_tile_skips_index_zero() {
		let mut rows = [[0u8; TILE_SIZE]; TILE_SIZE];
		rows[2][5] = 1;
		let mut canvas = PixelCanvas::new(16, 16, BACKGROUND);
		draw_tile(&red_palette(), &Tile::new(rows), 4, 4, &mut canvas);

		assert_eq!(canvas.get_pixel(9, 6), Some(RED));
		assert_eq!(canvas.pixels().iter().filter(|&&c| c == RED).count(), 1);
	}

	#[test]
	fn test_draw_metatile_uses_sheet_offsets() {
		let mut tiles = vec![Tile::default(); SHEET_WIDTH_TILES * 4];
		let origin = metatile_tile_index(3, 1).unwrap();
		tiles[origin] = solid_tile(1);
		tiles[origin + 1] = solid_tile(2);
		tiles[origin + SHEET_WIDTH_TILES] = solid_tile(3);
		tiles[origin + SHEET_WIDTH_TILES + 1] = solid_tile(4);

		let colors: [Color; STORED_COLORS_PER_PALETTE] =
			std::array::from_fn(|i| Color::rgb(i as u8 + 1, 0, 0));
		let palette = Palette::new(colors);

		let mut canvas = PixelCanvas::new(16, 16, BACKGROUND);
		draw_metatile(&palette, &tiles, 3, 1, 0, 0, &mut canvas).unwrap();

		assert_eq!(canvas.get_pixel(0, 0), Some(Color::rgb(1, 0, 0)));
		assert_eq!(canvas.get_pixel(8, 0), Some(Color::rgb(2, 0, 0)));
		assert_eq!(canvas.get_pixel(0, 8), Some(Color::rgb(3, 0, 0)));
		assert_eq!(canvas.get_pixel(15, 15), Some(Color::rgb(4, 0, 0)));
	}

	#[test]
	fn test_draw_metatile_out_of_range() {
		let tiles = vec![solid_tile(1); SHEET_WIDTH_TILES + 1];
		let mut canvas = PixelCanvas::new(16, 16, BACKGROUND);
		let before = canvas.clone();

		let err = draw_metatile(&red_palette(), &tiles, 0, 0, 0, 0, &mut canvas).unwrap_err();
		assert!(matches!(
			err,
			ZsprError::TileOutOfRange {
				index: 17,
				count: 17
			}
		));
		assert_eq!(canvas, before);
	}

	#[test]
	fn test_draw_metatile_huge_position_is_out_of_range() {
		let tiles = vec![solid_tile(1); SHEET_WIDTH_TILES * 4];
		let mut canvas = PixelCanvas::new(16, 16, BACKGROUND);

		for (column, row) in [(usize::MAX, 0), (0, usize::MAX), (usize::MAX / 2, usize::MAX / 32)] {
			let result = draw_metatile(&red_palette(), &tiles, column, row, 0, 0, &mut canvas);
			assert!(matches!(result, Err(ZsprError::TileOutOfRange { count: 64, .. })));
		}
		assert!(canvas.pixels().iter().all(|&c| c == BACKGROUND));
	}

	#[test]
	fn test_far_destination_is_clipped() {
		let mut canvas = PixelCanvas::new(16, 16, BACKGROUND);
		draw_tile(&red_palette(), &solid_tile(1), u32::MAX - 2, 0, &mut canvas);
		draw_tile(&red_palette(), &solid_tile(1), 0, u32::MAX, &mut canvas);

		let tiles = vec![solid_tile(1); SHEET_WIDTH_TILES * 2];
		let far = u32::MAX - 4;
		draw_metatile(&red_palette(), &tiles, 0, 0, far, far, &mut canvas).unwrap();
		assert!(canvas.pixels().iter().all(|&c| c == BACKGROUND));
	}

	#[test]
	fn test_head_overdraws_body() {
		let mut tiles = vec![Tile::default(); SHEET_WIDTH_TILES * 4];
		// body metatile (3, 1): tiles 38, 39, 54, 55
		for i in [38, 39, 54, 55] {
			tiles[i] = solid_tile(1);
		}
		// head metatile (1, 0): tiles 2, 3, 18, 19
		for i in [2, 3, 18, 19] {
			tiles[i] = solid_tile(2);
		}

		let mut colors = [RED; STORED_COLORS_PER_PALETTE];
		colors[1] = Color::rgb(0, 255, 0);
		let palette = Palette::new(colors);

		let mut canvas = PixelCanvas::new(PREVIEW_WIDTH, PREVIEW_HEIGHT, BACKGROUND);
		draw_preview(&palette, &tiles, MAIL_LAYOUT, &mut canvas).unwrap();

		// overlap rows 8..16 come from the head
		assert_eq!(canvas.get_pixel(0, 12), Some(Color::rgb(0, 255, 0)));
		assert_eq!(canvas.get_pixel(0, 20), Some(RED));
		assert_eq!(canvas.get_pixel(15, 0), Some(Color::rgb(0, 255, 0)));
	}

	#[test]
	fn test_tile_sheet_dimensions() {
		let tiles = vec![solid_tile(1); SHEET_WIDTH_TILES * 2 + 3];
		let sheet = render_tile_sheet(&red_palette(), &tiles);
		assert_eq!(sheet.width(), 128);
		assert_eq!(sheet.height(), 16);
		assert!(sheet.pixels().iter().all(|&c| c == RED));
	}

	#[test]
	fn test_variant_names() {
		assert_eq!(PreviewVariant::from_name("Green-Mail"), Some(PreviewVariant::GreenMail));
		assert_eq!(PreviewVariant::from_name("red"), Some(PreviewVariant::RedMail));
		assert_eq!(PreviewVariant::from_name("bunny"), Some(PreviewVariant::Bunny));
		assert_eq!(PreviewVariant::from_name("gold"), None);
		assert_eq!(PreviewVariant::Bunny.palette_index(), 3);
		assert_eq!(PreviewVariant::BlueMail.layout(), MAIL_LAYOUT);
		assert_eq!(PreviewVariant::Bunny.layout(), BUNNY_LAYOUT);
	}
}
