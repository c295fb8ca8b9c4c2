//! File type support for `zspr-rs` project.

mod cursor;
mod error;

pub mod zspr;

// Re-export the cursor and unified error type
pub use cursor::ByteCursor;
pub use error::ZsprError;

// Re-export main file types
pub use zspr::{
	Canvas, Color as ZsprColor, File as ZsprFile, Header as ZsprHeader, Palette as ZsprPalette,
	PaletteEntry, PixelCanvas, PreviewVariant, Tile,
};
