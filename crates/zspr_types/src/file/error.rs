//! Error types for ZSPR parsing and rendering.

use thiserror::Error;

/// Errors that can occur when reading, decoding or rendering ZSPR files
#[derive(Debug, Error)]
pub enum ZsprError {
	/// The file does not start with the `ZSPR` magic
	#[error("Invalid signature: expected \"ZSPR\", got {actual:02X?}")]
	InvalidSignature {
		/// The 4 bytes found at offset 0
		actual: [u8; 4],
	},

	/// Fewer bytes remain than the read requires
	#[error(
		"Incomplete data: requested {requested} bytes at offset 0x{offset:X}, only {available} available"
	)]
	IncompleteData {
		/// Number of bytes requested
		requested: usize,
		/// Number of bytes left in the buffer
		available: usize,
		/// Cursor position when the read was attempted
		offset: usize,
	},

	/// An absolute seek targeted a position behind the cursor
	#[error("Unable to seek backwards to 0x{target:X} from 0x{current:X}")]
	BackwardSeek {
		/// Requested absolute offset
		target: usize,
		/// Cursor position at the time of the seek
		current: usize,
	},

	/// A string field could not be decoded
	#[error("Bad encoding: {message}")]
	BadEncoding {
		/// Description of the problem
		message: String,
	},

	/// Integer reads support 1 to 4 bytes
	#[error("Unsupported integer width: {0} bytes (expected 1..=4)")]
	InvalidWidth(usize),

	/// A metatile referenced a tile past the end of the tile sheet
	#[error("Tile index {index} out of range (total tiles: {count})")]
	TileOutOfRange {
		/// Linear tile index that was requested
		index: usize,
		/// Number of decoded tiles
		count: usize,
	},

	/// Palette index past the 4 palettes stored in a ZSPR file
	#[error("Palette index {0} out of range (expected 0..4)")]
	PaletteOutOfRange(usize),

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl ZsprError {
	/// Creates an [`ZsprError::IncompleteData`] error.
	pub fn incomplete(requested: usize, available: usize, offset: usize) -> Self {
		Self::IncompleteData {
			requested,
			available,
			offset,
		}
	}

	/// Creates a [`ZsprError::BadEncoding`] error.
	pub fn bad_encoding(message: impl Into<String>) -> Self {
		Self::BadEncoding {
			message: message.into(),
		}
	}
}
