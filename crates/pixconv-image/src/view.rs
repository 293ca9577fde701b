//! Borrowed, typed views over raw pixel bytes.
//!
//! A view pairs a byte slice with the [`PixelFormat`] and [`DataType`] that
//! describe it. Views are how pixel data crosses the conversion and copy
//! entry points in [`crate::convert`] and how [`crate::ImageBuffer`] exchanges
//! regions with callers.
//!
//! ```rust
//! use pixconv_image::{ImageView, ImageViewMut};
//! use pixconv_core::{DataType, PixelFormat};
//!
//! let pixels = [255u8, 0, 0, 255];
//! let view = ImageView::new(PixelFormat::RGBA, DataType::UInt8, &pixels);
//! assert_eq!(view.pixel_count(), 1);
//!
//! let mut out = [0u8; 4];
//! let target = ImageViewMut::new(PixelFormat::R, DataType::Float32, &mut out);
//! assert_eq!(target.as_view().bytes_per_pixel(), 4);
//! ```

use pixconv_core::{bytes_per_pixel, DataType, Error, PixelFormat, Result};

/// Read-only pixel data with its layout.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    /// Channel layout of each pixel
    pub format: PixelFormat,
    /// Encoding of each channel
    pub data_type: DataType,
    /// Packed pixel bytes
    pub data: &'a [u8],
}

impl<'a> ImageView<'a> {
    /// Creates a view over `data`.
    #[inline]
    pub const fn new(format: PixelFormat, data_type: DataType, data: &'a [u8]) -> Self {
        Self {
            format,
            data_type,
            data,
        }
    }

    /// Creates a view from a raw pointer and byte length.
    ///
    /// Returns [`Error::NullArgument`] if `ptr` is null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be valid for reads of `len` bytes for `'a`, and
    /// the memory must not be mutated while the view is alive.
    pub unsafe fn from_raw_parts(
        format: PixelFormat,
        data_type: DataType,
        ptr: *const u8,
        len: usize,
    ) -> Result<Self> {
        if ptr.is_null() {
            return Err(Error::null_argument("source image data"));
        }
        // SAFETY: non-null, validity for `len` bytes is the caller's contract.
        let data = unsafe { std::slice::from_raw_parts(ptr, len) };
        Ok(Self::new(format, data_type, data))
    }

    /// Bytes per pixel of this view's layout (zero for reserved formats).
    #[inline]
    pub const fn bytes_per_pixel(&self) -> usize {
        bytes_per_pixel(self.format, self.data_type)
    }

    /// Number of whole pixels in the view.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        match self.bytes_per_pixel() {
            0 => 0,
            bpp => self.data.len() / bpp,
        }
    }
}

/// Writable pixel data with its layout.
#[derive(Debug)]
pub struct ImageViewMut<'a> {
    /// Channel layout of each pixel
    pub format: PixelFormat,
    /// Encoding of each channel
    pub data_type: DataType,
    /// Packed pixel bytes
    pub data: &'a mut [u8],
}

impl<'a> ImageViewMut<'a> {
    /// Creates a writable view over `data`.
    #[inline]
    pub fn new(format: PixelFormat, data_type: DataType, data: &'a mut [u8]) -> Self {
        Self {
            format,
            data_type,
            data,
        }
    }

    /// Creates a writable view from a raw pointer and byte length.
    ///
    /// Returns [`Error::NullArgument`] if `ptr` is null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must be valid for reads and writes of `len` bytes for
    /// `'a`, and no other reference may access the memory while the view is
    /// alive.
    pub unsafe fn from_raw_parts(
        format: PixelFormat,
        data_type: DataType,
        ptr: *mut u8,
        len: usize,
    ) -> Result<Self> {
        if ptr.is_null() {
            return Err(Error::null_argument("destination image data"));
        }
        // SAFETY: non-null, validity and exclusivity are the caller's contract.
        let data = unsafe { std::slice::from_raw_parts_mut(ptr, len) };
        Ok(Self::new(format, data_type, data))
    }

    /// Reborrows as a read-only view.
    #[inline]
    pub fn as_view(&self) -> ImageView<'_> {
        ImageView::new(self.format, self.data_type, &*self.data)
    }

    /// Reborrows as a shorter-lived writable view.
    #[inline]
    pub fn reborrow(&mut self) -> ImageViewMut<'_> {
        ImageViewMut::new(self.format, self.data_type, &mut *self.data)
    }
}

/// Checks that a layout is convertible and that `len` holds whole pixels.
///
/// Returns the bytes per pixel.
pub(crate) fn validate_layout(format: PixelFormat, data_type: DataType, len: usize, what: &str) -> Result<usize> {
    if format.is_compressed() || format.is_depth_or_stencil() {
        return Err(Error::invalid_argument(format!(
            "{what} format {format} cannot be converted"
        )));
    }
    let bpp = bytes_per_pixel(format, data_type);
    if bpp == 0 {
        return Err(Error::invalid_argument(format!(
            "{what} layout {format}/{data_type} has zero bytes per pixel"
        )));
    }
    if len % bpp != 0 {
        return Err(Error::invalid_argument(format!(
            "{what} size {len} is not a multiple of {bpp} bytes per pixel"
        )));
    }
    Ok(bpp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count() {
        let data = [0u8; 12];
        assert_eq!(ImageView::new(PixelFormat::RGB, DataType::UInt8, &data).pixel_count(), 4);
        assert_eq!(ImageView::new(PixelFormat::RG, DataType::Float16, &data).pixel_count(), 3);
        assert_eq!(ImageView::new(PixelFormat::BC1, DataType::UInt8, &data).pixel_count(), 0);
    }

    #[test]
    fn test_null_raw_parts() {
        let err = unsafe { ImageView::from_raw_parts(PixelFormat::RGBA, DataType::UInt8, std::ptr::null(), 4) }
            .unwrap_err();
        assert!(err.is_null_argument());

        let err =
            unsafe { ImageViewMut::from_raw_parts(PixelFormat::RGBA, DataType::UInt8, std::ptr::null_mut(), 4) }
                .unwrap_err();
        assert!(err.is_null_argument());
    }

    #[test]
    fn test_raw_parts() {
        let mut data = vec![1u8, 2, 3, 4];
        let mut view = unsafe { ImageViewMut::from_raw_parts(PixelFormat::RGBA, DataType::UInt8, data.as_mut_ptr(), 4) }
            .unwrap();
        view.data[0] = 9;
        assert_eq!(view.as_view().data, &[9, 2, 3, 4]);
    }

    #[test]
    fn test_validate_layout() {
        assert_eq!(validate_layout(PixelFormat::RGBA, DataType::UInt16, 16, "source").unwrap(), 8);
        assert!(validate_layout(PixelFormat::RGBA, DataType::UInt16, 15, "source").unwrap_err().is_invalid_argument());
        assert!(validate_layout(PixelFormat::RGBA, DataType::Undefined, 0, "source").unwrap_err().is_invalid_argument());
        assert!(validate_layout(PixelFormat::BC3, DataType::UInt8, 16, "source").unwrap_err().is_invalid_argument());
        assert!(validate_layout(PixelFormat::Depth, DataType::Float32, 16, "source").unwrap_err().is_invalid_argument());
    }
}
