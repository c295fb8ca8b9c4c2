//! Benchmark helper utilities for zspr-rs
//!
//! This module provides utilities for generating synthetic ZSPR files for the
//! benchmark suite. No real sprite files are needed.

/// Size of a full player tile sheet in bytes (896 tiles)
pub const FULL_TILE_BLOCK: usize = 0x7000;

/// Size of a palette block: 4 palettes of 15 colours plus 2 glove colours
pub const PALETTE_BLOCK: usize = 124;

/// Generates a ZSPR file with `tile_bytes` bytes of patterned tile data.
///
/// `tile_bytes` should be a multiple of 32.
pub fn generate_test_zspr_data(tile_bytes: usize) -> Vec<u8> {
	let mut names = Vec::new();
	for name in ["Bench Sprite", "Criterion"] {
		for unit in name.encode_utf16().chain([0]) {
			names.extend_from_slice(&unit.to_le_bytes());
		}
	}
	names.extend_from_slice(b"BENCH\0");

	let tile_offset = 29 + names.len() as u32;
	let palette_offset = tile_offset + tile_bytes as u32;

	let mut data = Vec::with_capacity(palette_offset as usize + PALETTE_BLOCK);

	// Magic bytes "ZSPR"
	data.extend_from_slice(b"ZSPR");

	// Version
	data.push(0x01);

	// Checksum (not verified by the decoder)
	data.extend_from_slice(&0u32.to_le_bytes());

	// Tile block offset and length
	data.extend_from_slice(&tile_offset.to_le_bytes());
	data.extend_from_slice(&(tile_bytes as u16).to_le_bytes());

	// Palette block offset and length
	data.extend_from_slice(&palette_offset.to_le_bytes());
	data.extend_from_slice(&(PALETTE_BLOCK as u16).to_le_bytes());

	// Sprite type
	data.extend_from_slice(&1u16.to_le_bytes());

	// Reserved (6 bytes)
	data.extend_from_slice(&[0u8; 6]);

	data.extend_from_slice(&names);
	data.extend_from_slice(&generate_tile_data(tile_bytes));
	data.extend_from_slice(&generate_palette_data());

	data
}

/// Generates planar tile data with every colour index in use
pub fn generate_tile_data(len: usize) -> Vec<u8> {
	(0..len).map(|i| (i as u8).wrapping_mul(0x9D) ^ (i >> 5) as u8).collect()
}

/// Generates a palette block covering the full 15-bit range
pub fn generate_palette_data() -> Vec<u8> {
	(0..PALETTE_BLOCK / 2)
		.flat_map(|i| ((i as u16).wrapping_mul(0x0421) & 0x7FFF).to_le_bytes())
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_test_zspr_data() {
		let data = generate_test_zspr_data(FULL_TILE_BLOCK);

		// Check magic bytes
		assert_eq!(&data[0..4], b"ZSPR");

		// Check version
		assert_eq!(data[4], 0x01);

		// Header + names + blocks
		assert!(data.len() > 29 + FULL_TILE_BLOCK + PALETTE_BLOCK);
	}

	#[test]
	fn test_generated_file_parses() {
		let data = generate_test_zspr_data(FULL_TILE_BLOCK);
		let zspr = zspr_types::file::ZsprFile::from_bytes(&data).unwrap();
		assert_eq!(zspr.tiles().len(), FULL_TILE_BLOCK / 32);
		assert_eq!(zspr.sprite_name(), "Bench Sprite");
	}
}
