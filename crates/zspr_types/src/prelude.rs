//! Prelude module for `zspr_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use zspr_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let canvas = PixelCanvas::new(16, 24, ZsprColor::BLACK);
//! assert_eq!(canvas.width(), 16);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// Cursor
	ByteCursor,

	// Rendering
	Canvas,
	PaletteEntry,
	PixelCanvas,
	PreviewVariant,
	Tile,

	// ZSPR types
	ZsprColor,
	ZsprError,
	ZsprFile,
	ZsprHeader,
	ZsprPalette,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
