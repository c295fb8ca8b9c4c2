//! This module is separated into its own crate to keep the public facade of `zspr-rs` thin, and should not be used directly.

/// `use zspr::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export zspr_types for convenience
pub use zspr_types;

// Re-export commonly used types at crate root
pub use zspr_types::file::{
	ByteCursor, PreviewVariant, ZsprColor, ZsprError, ZsprFile, ZsprHeader, ZsprPalette,
};
