//! Error types for pixconv operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the three failure classes of the conversion
//! engine:
//! - **Invalid arguments**: buffer sizes that do not match the declared
//!   format/data type, unsupported (compressed, depth/stencil) formats,
//!   mismatched source and destination layouts
//! - **Out of range**: region copies that would touch bytes past the end of a
//!   supplied buffer
//! - **Null arguments**: a null data pointer handed across the raw-parts boundary
//!
//! All checks run before any byte is written, so an `Err` never leaves a
//! destination partially modified.
//!
//! # Usage
//!
//! ```rust
//! use pixconv_core::{Error, Result};
//!
//! fn check_size(actual: usize, required: usize) -> Result<()> {
//!     if actual < required {
//!         return Err(Error::invalid_argument(format!(
//!             "buffer holds {actual} bytes, {required} required"
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_size(3, 4).unwrap_err().is_invalid_argument());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the strict, low-level conversion and copy entry points.
///
/// The high-level container helpers (`read_pixels`, `write_pixels`, offset
/// resize, blit) skip out-of-bounds regions silently instead of returning
/// these.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument does not satisfy the operation's contract.
    ///
    /// Raised for undersized or mismatched buffers, sizes that are not a
    /// multiple of one pixel, compressed or depth/stencil formats, and
    /// format/data type mismatches between source and destination.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A computed region would read or write past the end of a buffer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixconv_core::Error;
    ///
    /// let err = Error::out_of_range("destination region ends at byte 80 of 64");
    /// assert!(err.to_string().contains("80"));
    /// assert!(err.is_out_of_range());
    /// ```
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// A required data pointer was null.
    ///
    /// Only reachable through the raw-parts view constructors; safe slices
    /// can never be null.
    #[error("null pointer passed for {0}")]
    NullArgument(&'static str),
}

impl Error {
    /// Creates an [`Error::InvalidArgument`] error.
    #[inline]
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Creates an [`Error::OutOfRange`] error.
    #[inline]
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }

    /// Creates an [`Error::NullArgument`] error naming the offending parameter.
    #[inline]
    pub fn null_argument(what: &'static str) -> Self {
        Self::NullArgument(what)
    }

    /// Returns `true` if this is an [`Error::InvalidArgument`].
    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` if this is an [`Error::OutOfRange`].
    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange(_))
    }

    /// Returns `true` if this is an [`Error::NullArgument`].
    #[inline]
    pub fn is_null_argument(&self) -> bool {
        matches!(self, Self::NullArgument(_))
    }
}
