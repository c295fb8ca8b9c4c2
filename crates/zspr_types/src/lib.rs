//! This crate provides core data types and file format support for the `zspr-rs` project.
//!
//! # File Formats
//!
//! - **ZSPR**: Sprite containers holding 4bpp planar tiles and 15-bit palettes
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use zspr_types::prelude::*;
//!
//! # fn main() -> Result<(), ZsprError> {
//! let zspr = ZsprFile::open("link.zspr")?;
//! for variant in PreviewVariant::ALL {
//!     let preview = zspr.render_preview(variant)?;
//!     println!("{variant}: {}x{}", preview.width(), preview.height());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use zspr_types::file::zspr::decode_tiles;
//!
//! let tiles = decode_tiles(&[0u8; 32]).unwrap();
//! assert!(tiles[0].is_blank());
//! ```

pub mod file;

/// `use zspr_types::prelude::*;` to import commonly used items.
pub mod prelude;
