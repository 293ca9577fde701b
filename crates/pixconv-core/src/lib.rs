//! # pixconv-core
//!
//! Core types for pixel data conversion.
//!
//! This crate provides the leaf components of the conversion engine:
//!
//! - [`PixelFormat`], [`DataType`] - Channel layout and per-channel encoding tags
//! - [`Extent3D`], [`Offset3D`], [`Region3D`] - 3D image addressing and clipping
//! - [`Color4d`] - Interchange color for fills
//! - [`float16`] - Bit-level half-float codec
//! - [`variant`] - Typed element codec with full-range normalization
//! - [`channel`] - Channel mapper between RGBA slots and packed pixels
//! - [`Error`] - Error taxonomy shared by every entry point
//!
//! ## Crate Structure
//!
//! ```text
//! pixconv-core (this crate)
//!    ^
//!    |
//!    +-- pixconv-image (scheduler, blit engine, conversions, ImageBuffer)
//!    +-- pixconv-bench (benchmarks)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for the plain data types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod channel;
pub mod color;
pub mod error;
pub mod float16;
pub mod format;
pub mod rect;
pub mod variant;

// Re-exports for convenience
pub use channel::ElementColor;
pub use color::Color4d;
pub use error::{Error, Result};
pub use format::{bytes_per_pixel, memory_footprint, Channel, DataType, PixelFormat};
pub use rect::{Extent3D, Offset3D, Region3D};
pub use variant::Element;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use pixconv_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::channel::ElementColor;
    pub use crate::color::Color4d;
    pub use crate::error::{Error, Result};
    pub use crate::format::{Channel, DataType, PixelFormat};
    pub use crate::rect::{Extent3D, Offset3D, Region3D};
    pub use crate::variant::Element;
}
