//! Strided byte copies of 3D pixel regions.
//!
//! All addressing goes through [`Strides`], which holds the byte distance
//! between neighbouring pixels, rows and slices of one buffer. A region copy
//! picks the widest contiguous run both sides allow:
//!
//! ```text
//! row == width * bpp, depth == row * height  -> one copy for the region
//! row == width * bpp                         -> one copy per slice
//! otherwise                                  -> one copy per row
//! ```
//!
//! Callers validate bounds; these functions index slices directly and panic
//! on a region that does not fit.

use pixconv_core::{Extent3D, Offset3D};
use tracing::trace;

/// Byte strides of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strides {
    /// Bytes per pixel
    pub bpp: usize,
    /// Bytes from one row to the next
    pub row: usize,
    /// Bytes from one slice to the next
    pub depth: usize,
}

impl Strides {
    /// Creates strides from byte distances.
    #[inline]
    pub const fn new(bpp: usize, row: usize, depth: usize) -> Self {
        Self { bpp, row, depth }
    }

    /// Strides of a tightly packed buffer of the given extent.
    #[inline]
    pub const fn packed(extent: Extent3D, bpp: usize) -> Self {
        let row = extent.width as usize * bpp;
        Self::new(bpp, row, row * extent.height as usize)
    }

    /// Strides from a row and layer length given in pixels.
    #[inline]
    pub const fn from_pixels(bpp: usize, row_pixels: usize, layer_pixels: usize) -> Self {
        Self::new(bpp, row_pixels * bpp, layer_pixels * bpp)
    }

    /// Byte offset of the pixel at `offset`.
    ///
    /// The offset must be non-negative on every axis.
    #[inline]
    pub fn offset_of(&self, offset: Offset3D) -> usize {
        debug_assert!(offset.is_non_negative());
        offset.z as usize * self.depth + offset.y as usize * self.row + offset.x as usize * self.bpp
    }

    /// One past the last byte touched by a region at `offset` of `extent`.
    ///
    /// An empty region ends where it starts.
    pub fn region_end(&self, offset: Offset3D, extent: Extent3D) -> usize {
        let start = self.offset_of(offset);
        if extent.is_empty() {
            return start;
        }
        start
            + (extent.depth as usize - 1) * self.depth
            + (extent.height as usize - 1) * self.row
            + (extent.width as usize - 1) * self.bpp
            + self.bpp
    }

    /// Bytes covered by one row of `extent`.
    #[inline]
    pub const fn row_len(&self, extent: Extent3D) -> usize {
        extent.width as usize * self.bpp
    }
}

/// Copies a region of `extent` pixels from `src` to `dst`.
///
/// Both slices start at the first byte of their region. `dst_strides.bpp`
/// and `src_strides.bpp` must be equal.
pub fn bit_blit(extent: Extent3D, dst: &mut [u8], dst_strides: Strides, src: &[u8], src_strides: Strides) {
    debug_assert_eq!(dst_strides.bpp, src_strides.bpp);
    if extent.is_empty() {
        return;
    }
    let row_len = src_strides.row_len(extent);
    let rows = extent.height as usize;
    let slices = extent.depth as usize;

    if src_strides.row == row_len && dst_strides.row == row_len {
        let slice_len = row_len * rows;
        if src_strides.depth == slice_len && dst_strides.depth == slice_len {
            trace!(bytes = slice_len * slices, "blit: contiguous");
            let len = slice_len * slices;
            dst[..len].copy_from_slice(&src[..len]);
        } else {
            trace!(slices, slice_len, "blit: per slice");
            for z in 0..slices {
                let s = z * src_strides.depth;
                let d = z * dst_strides.depth;
                dst[d..d + slice_len].copy_from_slice(&src[s..s + slice_len]);
            }
        }
    } else {
        trace!(rows = rows * slices, row_len, "blit: per row");
        for z in 0..slices {
            for y in 0..rows {
                let s = z * src_strides.depth + y * src_strides.row;
                let d = z * dst_strides.depth + y * dst_strides.row;
                dst[d..d + row_len].copy_from_slice(&src[s..s + row_len]);
            }
        }
    }
}

/// Copies a region inside one buffer from byte `src_start` to `dst_start`.
///
/// Both regions share `strides`. Each individual copy has memmove semantics,
/// but regions whose rows interleave must not be passed here; take a copy of
/// the source first.
pub fn bit_blit_within(buf: &mut [u8], extent: Extent3D, dst_start: usize, src_start: usize, strides: Strides) {
    if extent.is_empty() {
        return;
    }
    let row_len = strides.row_len(extent);
    let rows = extent.height as usize;
    let slices = extent.depth as usize;

    if strides.row == row_len {
        let slice_len = row_len * rows;
        if strides.depth == slice_len {
            buf.copy_within(src_start..src_start + slice_len * slices, dst_start);
        } else {
            for z in 0..slices {
                let s = src_start + z * strides.depth;
                let d = dst_start + z * strides.depth;
                buf.copy_within(s..s + slice_len, d);
            }
        }
    } else {
        for z in 0..slices {
            for y in 0..rows {
                let s = src_start + z * strides.depth + y * strides.row;
                let d = dst_start + z * strides.depth + y * strides.row;
                buf.copy_within(s..s + row_len, d);
            }
        }
    }
}
