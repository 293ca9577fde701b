//! Owning image container.
//!
//! [`ImageBuffer`] owns one tightly packed byte buffer together with the
//! extent, [`PixelFormat`] and [`DataType`] describing it. Every mutating
//! operation re-establishes
//!
//! ```text
//! data.len() == extent.pixel_count() * bytes_per_pixel(format, data_type)
//! ```
//!
//! An image with no buffer is *empty*; it still carries its attributes.
//!
//! # Memory Layout
//!
//! Pixels are stored slice by slice, each slice row-major and top-to-bottom:
//!
//! ```text
//! slice 0: [px(0,0) px(1,0) ... px(w-1,0)]  <- row 0
//!          [px(0,1) ...                  ]  <- row 1
//! slice 1: ...
//! ```
//!
//! # Strict and lenient operations
//!
//! The region helpers here ([`read_pixels`](ImageBuffer::read_pixels),
//! [`write_pixels`](ImageBuffer::write_pixels), [`blit`](ImageBuffer::blit)
//! and [`resize_with_offset`](ImageBuffer::resize_with_offset)) skip regions
//! that fall outside the image instead of failing. Undersized caller buffers
//! are still reported as errors.
//!
//! # Usage
//!
//! ```rust
//! use pixconv_image::{ImageBuffer, ThreadCount};
//! use pixconv_core::{Color4d, DataType, Extent3D, Offset3D, PixelFormat};
//!
//! let mut img = ImageBuffer::new_filled(
//!     Extent3D::new_2d(4, 4),
//!     PixelFormat::RGBA,
//!     DataType::UInt8,
//!     Color4d::new(1.0, 0.0, 0.0, 1.0),
//! )
//! .unwrap();
//!
//! // Grow the canvas, keeping the old pixels at (2, 2).
//! img.resize_with_offset(Extent3D::new_2d(8, 8), Color4d::BLACK, Offset3D::new(2, 2, 0)).unwrap();
//! assert_eq!(img.extent(), Extent3D::new_2d(8, 8));
//!
//! img.convert(PixelFormat::R, DataType::Float32, ThreadCount::Max).unwrap();
//! assert_eq!(img.data_size(), 8 * 8 * 4);
//! ```

use std::fmt;

use pixconv_core::{
    bytes_per_pixel, memory_footprint, Color4d, DataType, Error, Extent3D, Offset3D, PixelFormat, Region3D, Result,
};
use tracing::{debug, trace};

use crate::blit::{bit_blit, bit_blit_within, Strides};
use crate::convert::{convert_into, convert_to_new, fill_pattern, fill_with_pattern, generate_filled};
use crate::threading::ThreadCount;
use crate::view::{ImageView, ImageViewMut};

/// Owned pixel buffer with its layout.
///
/// `Clone` performs a deep copy of the pixel data.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    extent: Extent3D,
    format: PixelFormat,
    data_type: DataType,
    data: Vec<u8>,
}

impl Default for ImageBuffer {
    /// An empty RGBA/UInt8 image with zero extent.
    fn default() -> Self {
        Self {
            extent: Extent3D::default(),
            format: PixelFormat::RGBA,
            data_type: DataType::UInt8,
            data: Vec::new(),
        }
    }
}

impl fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("extent", &self.extent)
            .field("format", &self.format)
            .field("data_type", &self.data_type)
            .field("data_size", &self.data.len())
            .finish()
    }
}

impl ImageBuffer {
    /// Creates a zero-initialized image.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixconv_image::ImageBuffer;
    /// use pixconv_core::{DataType, Extent3D, PixelFormat};
    ///
    /// let img = ImageBuffer::new(Extent3D::new(4, 2, 3), PixelFormat::RGB, DataType::UInt16);
    /// assert_eq!(img.row_stride(), 24);
    /// assert_eq!(img.depth_stride(), 48);
    /// assert_eq!(img.data_size(), 144);
    /// ```
    pub fn new(extent: Extent3D, format: PixelFormat, data_type: DataType) -> Self {
        Self {
            extent,
            format,
            data_type,
            data: vec![0u8; memory_footprint(format, data_type, extent.pixel_count())],
        }
    }

    /// Creates an image with every pixel set to `fill`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] for compressed or depth/stencil formats.
    pub fn new_filled(extent: Extent3D, format: PixelFormat, data_type: DataType, fill: Color4d) -> Result<Self> {
        Ok(Self {
            extent,
            format,
            data_type,
            data: generate_filled(format, data_type, extent.pixel_count(), fill)?,
        })
    }

    /// Wraps an existing buffer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `data` is not exactly the size of
    /// `extent` pixels in the given layout.
    pub fn from_data(extent: Extent3D, format: PixelFormat, data_type: DataType, data: Vec<u8>) -> Result<Self> {
        let expected = memory_footprint(format, data_type, extent.pixel_count());
        if data.len() != expected {
            return Err(Error::invalid_argument(format!(
                "image data holds {} bytes, {extent} {format}/{data_type} needs {expected}",
                data.len()
            )));
        }
        Ok(Self {
            extent,
            format,
            data_type,
            data,
        })
    }

    // === Layout ===

    /// Image dimensions.
    #[inline]
    pub fn extent(&self) -> Extent3D {
        self.extent
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Channel data type.
    #[inline]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Bytes per pixel.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        bytes_per_pixel(self.format, self.data_type)
    }

    /// Bytes per row.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.bytes_per_pixel() * self.extent.width as usize
    }

    /// Bytes per slice.
    #[inline]
    pub fn depth_stride(&self) -> usize {
        self.row_stride() * self.extent.height as usize
    }

    /// Size of the pixel data in bytes.
    #[inline]
    pub fn data_size(&self) -> usize {
        self.depth_stride() * self.extent.depth as usize
    }

    /// Number of pixels.
    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.extent.pixel_count()
    }

    /// Returns `true` if the image holds no buffer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether a region of `extent` at `offset` lies fully inside the image.
    pub fn is_region_inside(&self, offset: Offset3D, extent: Extent3D) -> bool {
        Region3D::new(offset, extent).is_inside(self.extent)
    }

    fn strides(&self) -> Strides {
        Strides::packed(self.extent, self.bytes_per_pixel())
    }

    // === Data access ===

    /// Raw pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixel bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Read-only view over the whole image.
    #[inline]
    pub fn view(&self) -> ImageView<'_> {
        ImageView::new(self.format, self.data_type, &self.data)
    }

    /// Writable view over the whole image.
    #[inline]
    pub fn view_mut(&mut self) -> ImageViewMut<'_> {
        ImageViewMut::new(self.format, self.data_type, &mut self.data)
    }

    // === Whole-image operations ===

    /// Re-encodes the image into `format`/`data_type`.
    ///
    /// The buffer is only replaced when a conversion actually happens; the
    /// attributes are updated either way. An empty image just takes the new
    /// attributes.
    ///
    /// # Errors
    ///
    /// Any error of [`convert_to_new`]; the image is unchanged in that case.
    pub fn convert(&mut self, format: PixelFormat, data_type: DataType, threads: ThreadCount) -> Result<()> {
        if !self.data.is_empty() {
            if let Some(converted) = convert_to_new(&self.view(), format, data_type, threads)? {
                self.data = converted;
            }
        }
        self.format = format;
        self.data_type = data_type;
        Ok(())
    }

    /// Resizes to `extent` with fresh zeroed content.
    ///
    /// If any dimension is zero the buffer is released and the image becomes
    /// empty.
    pub fn resize(&mut self, extent: Extent3D) {
        self.extent = extent;
        if extent.is_empty() {
            self.data = Vec::new();
        } else {
            self.data = vec![0u8; self.data_size()];
        }
    }

    /// Resizes to `extent` and sets every pixel to `fill`.
    ///
    /// With an unchanged extent the existing buffer is filled in place.
    pub fn resize_filled(&mut self, extent: Extent3D, fill: Color4d) -> Result<()> {
        if extent == self.extent {
            self.fill(fill);
            return Ok(());
        }
        self.data = generate_filled(self.format, self.data_type, extent.pixel_count(), fill)?;
        self.extent = extent;
        Ok(())
    }

    /// Resizes to `extent`, keeping the old content at `offset`.
    ///
    /// The new buffer is filled with `fill`, then the previous image is
    /// blitted into it at `offset` with the usual clipping rules, so `offset`
    /// may be negative to crop the near edges. Does nothing if `extent` is
    /// unchanged.
    pub fn resize_with_offset(&mut self, extent: Extent3D, fill: Color4d, offset: Offset3D) -> Result<()> {
        if extent == self.extent {
            return Ok(());
        }
        debug!(from = %self.extent, to = %extent, %offset, "resize with offset");
        let resized = Self::new_filled(extent, self.format, self.data_type, fill)?;
        let previous = std::mem::replace(self, resized);
        self.blit(offset, &previous, Offset3D::ORIGIN, previous.extent)
    }

    /// Sets every pixel to `fill`.
    pub fn fill(&mut self, fill: Color4d) {
        let pattern = fill_pattern(self.format, self.data_type, fill);
        fill_with_pattern(&mut self.data, &pattern, ThreadCount::Max);
    }

    /// Exchanges contents and attributes with `other`.
    pub fn swap(&mut self, other: &mut ImageBuffer) {
        std::mem::swap(self, other);
    }

    /// Takes the buffer out and resets to an empty RGBA/UInt8 image.
    pub fn release(&mut self) -> Vec<u8> {
        std::mem::take(self).data
    }

    /// Drops the buffer and resets to an empty RGBA/UInt8 image.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // === Region operations ===

    /// Copies the region at `offset` of `extent` into `dst`, converting to
    /// the view's layout if it differs from the image.
    ///
    /// Does nothing if the region is not inside the image.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `dst` is smaller than the region in its
    /// layout, or if the conversion rejects the view's layout.
    pub fn read_pixels(
        &self,
        offset: Offset3D,
        extent: Extent3D,
        dst: &mut ImageViewMut<'_>,
        threads: ThreadCount,
    ) -> Result<()> {
        if !self.is_region_inside(offset, extent) {
            trace!(%offset, %extent, image = %self.extent, "read_pixels: region outside image");
            return Ok(());
        }
        let required = memory_footprint(dst.format, dst.data_type, extent.pixel_count());
        check_view_size(dst.data.len(), required, "read_pixels")?;

        let strides = self.strides();
        let src = &self.data[strides.offset_of(offset)..];
        let packed = Strides::packed(extent, strides.bpp);

        if dst.format == self.format && dst.data_type == self.data_type {
            bit_blit(extent, dst.data, packed, src, strides);
        } else {
            let mut region = vec![0u8; extent.pixel_count() * strides.bpp];
            bit_blit(extent, &mut region, packed, src, strides);
            convert_into(
                &ImageView::new(self.format, self.data_type, &region),
                &mut ImageViewMut::new(dst.format, dst.data_type, &mut dst.data[..required]),
                threads,
            )?;
        }
        Ok(())
    }

    /// Copies `src` into the region at `offset` of `extent`, converting from
    /// the view's layout if it differs from the image.
    ///
    /// Does nothing if the region is not inside the image.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `src` is smaller than the region in its
    /// layout, or if the conversion rejects the view's layout.
    pub fn write_pixels(
        &mut self,
        offset: Offset3D,
        extent: Extent3D,
        src: &ImageView<'_>,
        threads: ThreadCount,
    ) -> Result<()> {
        if !self.is_region_inside(offset, extent) {
            trace!(%offset, %extent, image = %self.extent, "write_pixels: region outside image");
            return Ok(());
        }
        let required = memory_footprint(src.format, src.data_type, extent.pixel_count());
        check_view_size(src.data.len(), required, "write_pixels")?;

        let strides = self.strides();
        let start = strides.offset_of(offset);
        let packed = Strides::packed(extent, strides.bpp);

        if src.format == self.format && src.data_type == self.data_type {
            bit_blit(extent, &mut self.data[start..], strides, src.data, packed);
        } else {
            let view = ImageView::new(src.format, src.data_type, &src.data[..required]);
            if let Some(region) = convert_to_new(&view, self.format, self.data_type, threads)? {
                bit_blit(extent, &mut self.data[start..], strides, &region, packed);
            }
        }
        Ok(())
    }

    /// Copies a region of `src` into this image at `dst_offset`.
    ///
    /// Both images must share format and data type; otherwise nothing is
    /// copied. The source region is clamped to `src`, negative destination
    /// offsets shift the source origin instead, and the region is shrunk to
    /// fit this image. Regions that collapse to nothing are skipped.
    pub fn blit(
        &mut self,
        dst_offset: Offset3D,
        src: &ImageBuffer,
        src_offset: Offset3D,
        src_extent: Extent3D,
    ) -> Result<()> {
        let Some((dst_offset, region)) = self.fit_blit(dst_offset, src, src_offset, src_extent) else {
            return Ok(());
        };
        self.copy_from(dst_offset, src, region);
        Ok(())
    }

    /// Copies a region of this image onto itself at `dst_offset`.
    ///
    /// Same clipping as [`blit`](Self::blit). When source and destination
    /// regions may overlap, the source is read from a copy of the image.
    pub fn blit_within(&mut self, dst_offset: Offset3D, src_offset: Offset3D, src_extent: Extent3D) -> Result<()> {
        let Some((dst_offset, region)) = self.fit_blit(dst_offset, self, src_offset, src_extent) else {
            return Ok(());
        };
        if Region3D::new(dst_offset, region.extent).overlaps(&region) {
            trace!(%dst_offset, src = %region, "blit_within: overlapping, copying source");
            let snapshot = self.clone();
            self.copy_from(dst_offset, &snapshot, region);
            return Ok(());
        }
        let strides = self.strides();
        let dst_start = strides.offset_of(dst_offset);
        let src_start = strides.offset_of(region.offset);
        bit_blit_within(&mut self.data, region.extent, dst_start, src_start, strides);
        Ok(())
    }

    /// Applies the blit clipping rules; `None` means nothing to copy.
    fn fit_blit(
        &self,
        dst_offset: Offset3D,
        src: &ImageBuffer,
        src_offset: Offset3D,
        src_extent: Extent3D,
    ) -> Option<(Offset3D, Region3D)> {
        if self.format != src.format || self.data_type != src.data_type {
            debug!(
                dst_format = %self.format,
                dst_type = %self.data_type,
                src_format = %src.format,
                src_type = %src.data_type,
                "blit skipped: layout mismatch"
            );
            return None;
        }
        let clamped = Region3D::new(src_offset, src_extent).clamp_to(src.extent);
        let fitted = clamped.clip_to_destination(dst_offset, self.extent);
        if fitted.is_none() {
            trace!(%dst_offset, src = %clamped, "blit skipped: empty region");
        }
        fitted
    }

    /// Copies an already fitted region; both sides are inside their images.
    fn copy_from(&mut self, dst_offset: Offset3D, src: &ImageBuffer, region: Region3D) {
        let dst_strides = self.strides();
        let src_strides = src.strides();
        let dst_start = dst_strides.offset_of(dst_offset);
        let src_start = src_strides.offset_of(region.offset);
        bit_blit(
            region.extent,
            &mut self.data[dst_start..],
            dst_strides,
            &src.data[src_start..],
            src_strides,
        );
    }
}

fn check_view_size(len: usize, required: usize, what: &str) -> Result<()> {
    if len < required {
        return Err(Error::invalid_argument(format!(
            "{what}: view holds {len} bytes but the region needs {required}"
        )));
    }
    Ok(())
}
