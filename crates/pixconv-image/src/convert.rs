//! Conversion, fill and region-copy entry points.
//!
//! These are the strict, low-level operations: every argument is validated
//! up front and any violation is reported as an [`Error`] before a single
//! destination byte is written.
//!
//! # Conversion pipeline
//!
//! A conversion changes the data type, the pixel format, or both:
//!
//! ```text
//! data type only:  src --(rescale per scalar)--> dst
//! format only:     src --(relocate per pixel)--> dst
//! both:            src --(rescale)--> intermediate --(relocate)--> dst
//! ```
//!
//! Data type conversion maps integers through the normalized domain
//! (`[min, max] -> [0, 1]`) and keeps float values as they are. Format
//! conversion never rescales; channels missing from the source are taken
//! from opaque black in the destination data type.
//!
//! # Example
//!
//! ```rust
//! use pixconv_image::convert::convert_into;
//! use pixconv_image::{ImageView, ImageViewMut, ThreadCount};
//! use pixconv_core::{DataType, PixelFormat};
//!
//! let src = [255u8, 0, 0, 255];
//! let mut dst = [0u8; 4];
//! let converted = convert_into(
//!     &ImageView::new(PixelFormat::RGBA, DataType::UInt8, &src),
//!     &mut ImageViewMut::new(PixelFormat::R, DataType::Float32, &mut dst),
//!     ThreadCount::default(),
//! )
//! .unwrap();
//! assert!(converted);
//! assert_eq!(f32::from_ne_bytes(dst), 1.0);
//! ```

use pixconv_core::variant::{read_normalized, write_normalized};
use pixconv_core::{
    bytes_per_pixel, memory_footprint, Color4d, DataType, ElementColor, Error, Extent3D, Offset3D, PixelFormat,
    Result,
};
use tracing::{debug, trace};

use crate::blit::{bit_blit, Strides};
use crate::threading::{for_each_range, ThreadCount};
use crate::view::{validate_layout, ImageView, ImageViewMut};

/// Converts `src` into `dst`, changing format and/or data type.
///
/// Returns `Ok(false)` without touching `dst` when both views already share
/// format and data type; no other validation happens in that case.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if either layout is compressed, depth/stencil
/// or has zero bytes per pixel, if `src` does not hold whole pixels, or if
/// `dst` is not exactly the size the conversion produces.
pub fn convert_into(src: &ImageView<'_>, dst: &mut ImageViewMut<'_>, threads: ThreadCount) -> Result<bool> {
    if src.format == dst.format && src.data_type == dst.data_type {
        return Ok(false);
    }

    let src_bpp = validate_layout(src.format, src.data_type, src.data.len(), "source")?;
    let dst_bpp = validate_layout(dst.format, dst.data_type, dst.data.len(), "destination")?;

    let pixel_count = src.data.len() / src_bpp;
    let required = pixel_count * dst_bpp;
    if dst.data.len() != required {
        return Err(Error::invalid_argument(format!(
            "destination holds {} bytes but {pixel_count} pixels of {}/{} need {required}",
            dst.data.len(),
            dst.format,
            dst.data_type
        )));
    }

    debug!(
        src_format = %src.format,
        src_type = %src.data_type,
        dst_format = %dst.format,
        dst_type = %dst.data_type,
        pixel_count,
        "convert"
    );

    if src.data_type != dst.data_type {
        let scalar_count = pixel_count * src.format.channel_count();
        if src.format != dst.format {
            let mut intermediate = vec![0u8; memory_footprint(src.format, dst.data_type, pixel_count)];
            convert_data_type(src.data_type, src.data, dst.data_type, &mut intermediate, scalar_count, threads);
            convert_format(src.format, dst.data_type, &intermediate, dst.format, dst.data, pixel_count, threads)?;
        } else {
            convert_data_type(src.data_type, src.data, dst.data_type, dst.data, scalar_count, threads);
        }
    } else {
        convert_format(src.format, src.data_type, src.data, dst.format, dst.data, pixel_count, threads)?;
    }
    Ok(true)
}

/// Converts `src` into a newly allocated buffer of `format`/`data_type`.
///
/// Returns `Ok(None)` when no conversion is required.
///
/// # Errors
///
/// Same as [`convert_into`].
pub fn convert_to_new(
    src: &ImageView<'_>,
    format: PixelFormat,
    data_type: DataType,
    threads: ThreadCount,
) -> Result<Option<Vec<u8>>> {
    if src.format == format && src.data_type == data_type {
        return Ok(None);
    }
    let src_bpp = validate_layout(src.format, src.data_type, src.data.len(), "source")?;
    let mut data = vec![0u8; memory_footprint(format, data_type, src.data.len() / src_bpp)];
    convert_into(src, &mut ImageViewMut::new(format, data_type, &mut data), threads)?;
    Ok(Some(data))
}

/// Allocates `pixel_count` pixels of `format`/`data_type`, each set to `fill`.
///
/// The fill components are written through the normalized domain, so for
/// integer types `1.0` is the type maximum. [`DataType::Undefined`] yields an
/// empty buffer.
///
/// # Errors
///
/// [`Error::InvalidArgument`] for compressed or depth/stencil formats.
pub fn generate_filled(format: PixelFormat, data_type: DataType, pixel_count: usize, fill: Color4d) -> Result<Vec<u8>> {
    if format.is_compressed() || format.is_depth_or_stencil() {
        return Err(Error::invalid_argument(format!("cannot fill {format} image buffers")));
    }
    let bpp = bytes_per_pixel(format, data_type);
    if bpp == 0 {
        return Ok(Vec::new());
    }

    debug!(%format, %data_type, pixel_count, ?fill, "generate filled buffer");
    let pattern = fill_pattern(format, data_type, fill);
    let mut data = vec![0u8; pixel_count * bpp];
    fill_with_pattern(&mut data, &pattern, ThreadCount::Max);
    Ok(data)
}

/// Allocates a buffer of `size` bytes.
///
/// Safe Rust never exposes uninitialized memory, so the buffer is zeroed
/// whatever `zero_init` says.
pub fn generate_empty(size: usize, zero_init: bool) -> Vec<u8> {
    trace!(size, zero_init, "generate empty buffer");
    vec![0u8; size]
}

/// Copies an `extent` region between two buffers of the same layout.
///
/// Strides are given in pixels: the pixel at `(x, y, z)` lives at byte
/// `(z * layer_stride + y * row_stride + x) * bpp`. Bounds are checked for
/// both sides before anything is copied.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if format or data type differ, or the layout
///   has zero bytes per pixel.
/// - [`Error::OutOfRange`] if an offset is negative or either region ends
///   past its buffer.
#[allow(clippy::too_many_arguments)]
pub fn copy_region(
    dst: &mut ImageViewMut<'_>,
    dst_offset: Offset3D,
    dst_row_stride: u32,
    dst_layer_stride: u32,
    src: &ImageView<'_>,
    src_offset: Offset3D,
    src_row_stride: u32,
    src_layer_stride: u32,
    extent: Extent3D,
) -> Result<()> {
    if src.format != dst.format || src.data_type != dst.data_type {
        return Err(Error::invalid_argument(format!(
            "region copy from {}/{} to {}/{} needs matching layouts",
            src.format, src.data_type, dst.format, dst.data_type
        )));
    }
    let bpp = bytes_per_pixel(src.format, src.data_type);
    if bpp == 0 {
        return Err(Error::invalid_argument(format!(
            "region copy of {}/{} has zero bytes per pixel",
            src.format, src.data_type
        )));
    }

    let dst_strides = Strides::from_pixels(bpp, dst_row_stride as usize, dst_layer_stride as usize);
    let src_strides = Strides::from_pixels(bpp, src_row_stride as usize, src_layer_stride as usize);
    let dst_start = region_start(dst_strides, dst_offset, extent, dst.data.len(), "destination")?;
    let src_start = region_start(src_strides, src_offset, extent, src.data.len(), "source")?;

    trace!(%extent, %dst_offset, %src_offset, bpp, "copy region");
    bit_blit(extent, &mut dst.data[dst_start..], dst_strides, &src.data[src_start..], src_strides);
    Ok(())
}

/// Validates one side of a region copy and returns its first byte.
fn region_start(strides: Strides, offset: Offset3D, extent: Extent3D, len: usize, what: &str) -> Result<usize> {
    if !offset.is_non_negative() {
        return Err(Error::out_of_range(format!("{what} offset {offset} is negative")));
    }
    let end = strides.region_end(offset, extent);
    if end > len {
        return Err(Error::out_of_range(format!(
            "{what} region {extent} at {offset} ends at byte {end} of {len}"
        )));
    }
    Ok(strides.offset_of(offset))
}

/// Rescales `count` scalars from `src_type` to `dst_type`.
pub(crate) fn convert_data_type(
    src_type: DataType,
    src: &[u8],
    dst_type: DataType,
    dst: &mut [u8],
    count: usize,
    threads: ThreadCount,
) {
    for_each_range(dst, dst_type.size(), count, threads, |range, out| {
        for (local, i) in range.enumerate() {
            write_normalized(dst_type, out, local, read_normalized(src_type, src, i));
        }
    });
}

/// Relocates the channels of `count` pixels from `src_format` to `dst_format`.
pub(crate) fn convert_format(
    src_format: PixelFormat,
    data_type: DataType,
    src: &[u8],
    dst_format: PixelFormat,
    dst: &mut [u8],
    count: usize,
    threads: ThreadCount,
) -> Result<()> {
    let seed = ElementColor::opaque_black(data_type)
        .ok_or_else(|| Error::invalid_argument(format!("cannot relocate channels of {data_type}")))?;
    for_each_range(dst, bytes_per_pixel(dst_format, data_type), count, threads, |range, out| {
        for (local, i) in range.enumerate() {
            let mut color = seed;
            color.read_pixel(src_format, data_type, src, i);
            color.write_pixel(dst_format, out, local);
        }
    });
    Ok(())
}

/// Encodes `fill` as one pixel of `format`/`data_type`.
///
/// Components are written as RGBA in `data_type` first, then relocated into
/// `format`'s channel order.
pub(crate) fn fill_pattern(format: PixelFormat, data_type: DataType, fill: Color4d) -> Vec<u8> {
    let mut rgba = [0u8; 32];
    for (i, value) in fill.to_array().into_iter().enumerate() {
        write_normalized(data_type, &mut rgba, i, value);
    }
    let mut pattern = vec![0u8; bytes_per_pixel(format, data_type)];
    if let Some(mut color) = ElementColor::opaque_black(data_type) {
        color.read_pixel(PixelFormat::RGBA, data_type, &rgba, 0);
        color.write_pixel(format, &mut pattern, 0);
    }
    pattern
}

/// Replicates `pattern` over every pixel of `data`.
pub(crate) fn fill_with_pattern(data: &mut [u8], pattern: &[u8], threads: ThreadCount) {
    let bpp = pattern.len();
    if bpp == 0 {
        return;
    }
    let count = data.len() / bpp;
    for_each_range(data, bpp, count, threads, |_, out| {
        for pixel in out.chunks_exact_mut(bpp) {
            pixel.copy_from_slice(pattern);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn f32s(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    fn u16s(bytes: &[u8]) -> Vec<u16> {
        bytes.chunks_exact(2).map(|c| u16::from_ne_bytes([c[0], c[1]])).collect()
    }

    #[test]
    fn test_same_layout_returns_false() {
        // Invalid size is not even looked at.
        let src = [1u8, 2, 3];
        let mut dst = [7u8; 5];
        let done = convert_into(
            &ImageView::new(PixelFormat::RGBA, DataType::UInt8, &src),
            &mut ImageViewMut::new(PixelFormat::RGBA, DataType::UInt8, &mut dst),
            ThreadCount::default(),
        )
        .unwrap();
        assert!(!done);
        assert_eq!(dst, [7u8; 5]);
    }

    #[test]
    fn test_red_to_float_r() {
        let src = [255u8, 0, 0, 255].repeat(4);
        let mut dst = vec![0u8; 16];
        convert_into(
            &ImageView::new(PixelFormat::RGBA, DataType::UInt8, &src),
            &mut ImageViewMut::new(PixelFormat::R, DataType::Float32, &mut dst),
            ThreadCount::default(),
        )
        .unwrap();
        assert_eq!(f32s(&dst), vec![1.0; 4]);
    }

    #[test]
    fn test_type_only() {
        let src = [0u8, 51, 255];
        let mut dst = vec![0u8; 12];
        convert_into(
            &ImageView::new(PixelFormat::R, DataType::UInt8, &src),
            &mut ImageViewMut::new(PixelFormat::R, DataType::Float32, &mut dst),
            ThreadCount::default(),
        )
        .unwrap();
        let out = f32s(&dst);
        assert_relative_eq!(out[0], 0.0);
        assert_relative_eq!(out[1], 0.2, epsilon = 1e-6);
        assert_relative_eq!(out[2], 1.0);
    }

    #[test]
    fn test_format_only_fills_opaque_alpha() {
        let src = [10u16, 20, 30].iter().flat_map(|v| v.to_ne_bytes()).collect::<Vec<_>>();
        let mut dst = vec![0u8; 8];
        convert_into(
            &ImageView::new(PixelFormat::BGR, DataType::UInt16, &src),
            &mut ImageViewMut::new(PixelFormat::ARGB, DataType::UInt16, &mut dst),
            ThreadCount::default(),
        )
        .unwrap();
        assert_eq!(u16s(&dst), vec![u16::MAX, 30, 20, 10]);
    }

    #[test]
    fn test_signed_widening_seeds_type_minimum() {
        let src = [0i8, 0].iter().flat_map(|v| v.to_ne_bytes()).collect::<Vec<_>>();
        let mut dst = vec![0u8; 4];
        convert_into(
            &ImageView::new(PixelFormat::RG, DataType::Int8, &src),
            &mut ImageViewMut::new(PixelFormat::RGBA, DataType::Int8, &mut dst),
            ThreadCount::default(),
        )
        .unwrap();
        assert_eq!(dst, [0, 0, i8::MIN as u8, i8::MAX as u8]);
    }

    #[test]
    fn test_type_and_format() {
        let src = [0.5f32, 1.0].iter().flat_map(|v| v.to_ne_bytes()).collect::<Vec<_>>();
        let mut dst = vec![0u8; 4];
        convert_into(
            &ImageView::new(PixelFormat::RG, DataType::Float32, &src),
            &mut ImageViewMut::new(PixelFormat::BGRA, DataType::UInt8, &mut dst),
            ThreadCount::default(),
        )
        .unwrap();
        assert_eq!(dst, [0, 255, 127, 255]);
    }

    #[test]
    fn test_size_mismatch_rejected_untouched() {
        let src = [1u8; 8];
        let mut dst = vec![0xAAu8; 7];
        let err = convert_into(
            &ImageView::new(PixelFormat::RGBA, DataType::UInt8, &src),
            &mut ImageViewMut::new(PixelFormat::BGRA, DataType::UInt8, &mut dst),
            ThreadCount::default(),
        )
        .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(dst.iter().all(|&b| b == 0xAA));

        let mut big = vec![0u8; 12];
        let err = convert_into(
            &ImageView::new(PixelFormat::RGBA, DataType::UInt8, &src),
            &mut ImageViewMut::new(PixelFormat::BGRA, DataType::UInt8, &mut big),
            ThreadCount::default(),
        )
        .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_reserved_formats_rejected() {
        let src = [0u8; 8];
        let mut dst = [0u8; 8];
        for format in [PixelFormat::BC1, PixelFormat::DepthStencil] {
            let err = convert_into(
                &ImageView::new(format, DataType::UInt8, &src),
                &mut ImageViewMut::new(PixelFormat::RGBA, DataType::UInt8, &mut dst),
                ThreadCount::default(),
            )
            .unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_convert_to_new() {
        let src = [1u8, 2, 3, 4];
        let view = ImageView::new(PixelFormat::RGBA, DataType::UInt8, &src);
        assert!(convert_to_new(&view, PixelFormat::RGBA, DataType::UInt8, ThreadCount::Max).unwrap().is_none());
        let out = convert_to_new(&view, PixelFormat::ABGR, DataType::UInt8, ThreadCount::Max).unwrap().unwrap();
        assert_eq!(out, [4, 3, 2, 1]);
        assert!(convert_to_new(&view, PixelFormat::BC2, DataType::UInt8, ThreadCount::Max).is_err());
    }

    #[test]
    fn test_generate_filled() {
        let data = generate_filled(PixelFormat::BGRA, DataType::UInt8, 3, Color4d::new(1.0, 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(data, [0, 0, 255, 255].repeat(3));

        let data = generate_filled(PixelFormat::RG, DataType::Float32, 2, Color4d::new(0.25, 0.75, 0.0, 1.0)).unwrap();
        assert_eq!(f32s(&data), vec![0.25, 0.75, 0.25, 0.75]);

        assert!(generate_filled(PixelFormat::RGBA, DataType::Undefined, 10, Color4d::BLACK).unwrap().is_empty());
        assert!(generate_filled(PixelFormat::BC4, DataType::UInt8, 10, Color4d::BLACK).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_generate_filled_large() {
        let data = generate_filled(PixelFormat::Alpha, DataType::UInt16, 10_000, Color4d::WHITE).unwrap();
        assert_eq!(data.len(), 20_000);
        assert!(u16s(&data).iter().all(|&v| v == u16::MAX));
    }

    #[test]
    fn test_generate_empty() {
        assert_eq!(generate_empty(16, true), vec![0u8; 16]);
        assert_eq!(generate_empty(3, false).len(), 3);
    }

    #[test]
    fn test_copy_region_pixel_strides() {
        // 4x3 source, 2x2 region at (1,1) into a 3x3 destination at (1,0).
        let src: Vec<u8> = (0..12).collect();
        let mut dst = vec![0u8; 9];
        copy_region(
            &mut ImageViewMut::new(PixelFormat::R, DataType::UInt8, &mut dst),
            Offset3D::new(1, 0, 0),
            3,
            9,
            &ImageView::new(PixelFormat::R, DataType::UInt8, &src),
            Offset3D::new(1, 1, 0),
            4,
            12,
            Extent3D::new(2, 2, 1),
        )
        .unwrap();
        assert_eq!(dst, [0, 5, 6, 0, 9, 10, 0, 0, 0]);
    }

    #[test]
    fn test_copy_region_errors() {
        let src = [0u8; 16];
        let mut dst = [0u8; 16];
        let run = |dst: &mut [u8], dst_format, dst_offset, extent| {
            copy_region(
                &mut ImageViewMut::new(dst_format, DataType::UInt8, dst),
                dst_offset,
                2,
                4,
                &ImageView::new(PixelFormat::RG, DataType::UInt8, &src),
                Offset3D::ORIGIN,
                2,
                4,
                extent,
            )
        };
        assert!(run(&mut dst, PixelFormat::R, Offset3D::ORIGIN, Extent3D::new(1, 1, 1)).unwrap_err().is_invalid_argument());
        assert!(run(&mut dst, PixelFormat::RG, Offset3D::new(0, 0, 1), Extent3D::new(2, 2, 2)).unwrap_err().is_out_of_range());
        assert!(run(&mut dst, PixelFormat::RG, Offset3D::new(-1, 0, 0), Extent3D::new(1, 1, 1)).unwrap_err().is_out_of_range());
        assert!(run(&mut dst, PixelFormat::RG, Offset3D::ORIGIN, Extent3D::new(2, 2, 2)).is_ok());
    }

    #[test]
    fn test_thread_invariance() {
        let src: Vec<u8> = (0..4096 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let view = ImageView::new(PixelFormat::RGB, DataType::UInt8, &src);
        let single = convert_to_new(&view, PixelFormat::BGRA, DataType::UInt16, ThreadCount::Fixed(1)).unwrap();
        let many = convert_to_new(&view, PixelFormat::BGRA, DataType::UInt16, ThreadCount::Fixed(5)).unwrap();
        let max = convert_to_new(&view, PixelFormat::BGRA, DataType::UInt16, ThreadCount::Max).unwrap();
        assert_eq!(single, many);
        assert_eq!(single, max);
    }
}
