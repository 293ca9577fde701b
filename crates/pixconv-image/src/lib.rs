//! # pixconv-image
//!
//! Pixel buffer conversion, region copies and an owning image container,
//! built on the types of [`pixconv_core`].
//!
//! - [`convert`] - Format/data type conversion, fills and strided region copies
//! - [`ImageBuffer`] - Owned image with resize, blit and pixel read/write
//! - [`ImageView`], [`ImageViewMut`] - Borrowed pixel data with its layout
//! - [`ThreadCount`] - Parallelism for the per-pixel loops
//! - [`blit`] - Low-level strided byte copies
//!
//! ## Threading
//!
//! Conversions split their work over scoped OS threads spawned per call (see
//! [`threading`]). Every operation is synchronous and returns only after all
//! workers joined.
//!
//! ## Logging
//!
//! Entry points emit `tracing` events at `debug` level, scheduling and copy
//! path selection at `trace` level. No subscriber is installed.
//!
//! ## Example
//!
//! ```rust
//! use pixconv_image::{convert, ImageView, ThreadCount};
//! use pixconv_core::{DataType, PixelFormat};
//!
//! let rgb = [255u8, 128, 0];
//! let view = ImageView::new(PixelFormat::RGB, DataType::UInt8, &rgb);
//! let bgra = convert::convert_to_new(&view, PixelFormat::BGRA, DataType::UInt8, ThreadCount::Max)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(bgra, [0, 128, 255, 255]);
//! ```

#![warn(missing_docs)]

pub mod blit;
pub mod convert;
pub mod image;
pub mod threading;
pub mod view;

pub use convert::{convert_into, convert_to_new, copy_region, generate_empty, generate_filled};
pub use image::ImageBuffer;
pub use threading::{ThreadCount, MIN_WORK_PER_THREAD};
pub use view::{ImageView, ImageViewMut};
