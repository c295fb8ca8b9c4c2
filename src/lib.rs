//! `zspr-rs` decodes ZSPR sprite containers into tiles and palettes and composes
//! them into preview images.
//!
pub use zspr_internal::*;
