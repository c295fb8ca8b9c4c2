//! Prelude module for `zspr_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use zspr_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let tiles = file::zspr::decode_tiles(&[0u8; 64]).unwrap();
//! let palette = ZsprPalette::default();
//! let mut canvas = PixelCanvas::new(8, 8, ZsprColor::BLACK);
//! file::zspr::draw_tile(&palette, &tiles[1], 0, 0, &mut canvas);
//! assert!(canvas.pixels().iter().all(|&c| c == ZsprColor::BLACK));
//! ```

// Re-export everything from zspr_types::prelude
#[doc(inline)]
pub use zspr_types::prelude::*;

// Re-export the entire zspr_types module for advanced usage
#[doc(inline)]
pub use zspr_types;
