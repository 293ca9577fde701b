//! Extent, offset and region types for 3D image addressing.
//!
//! # Overview
//!
//! - [`Extent3D`] - Image or region dimensions (width, height, depth)
//! - [`Offset3D`] - Signed coordinate into an image; negative components
//!   express a destination clipped at the near edge
//! - [`Region3D`] - An offset plus an extent, carrying the clipping and
//!   overlap rules shared by every region copy
//!
//! # Coordinate System
//!
//! ```text
//! (0,0,0) ────────► X
//!   │ ╲
//!   │  ╲ Z (slices)
//!   │   ┌──────────┐
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Usage
//!
//! ```rust
//! use pixconv_core::{Extent3D, Offset3D, Region3D};
//!
//! let image = Extent3D::new(4, 4, 1);
//! let region = Region3D::new(Offset3D::new(1, 1, 0), Extent3D::new(2, 2, 1));
//! assert!(region.is_inside(image));
//!
//! let clamped = Region3D::new(Offset3D::new(3, -1, 0), Extent3D::new(5, 5, 1)).clamp_to(image);
//! assert_eq!(clamped.extent, Extent3D::new(1, 4, 1));
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dimensions of an image or region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Extent3D {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Depth in slices
    pub depth: u32,
}

impl Extent3D {
    /// Creates a new extent.
    #[inline]
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Creates a single-slice extent.
    #[inline]
    pub const fn new_2d(width: u32, height: u32) -> Self {
        Self::new(width, height, 1)
    }

    /// Total number of pixels (`width * height * depth`).
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Returns `true` if any dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.depth == 0
    }

    /// Dimensions as an array `[width, height, depth]`.
    #[inline]
    pub const fn to_array(&self) -> [u32; 3] {
        [self.width, self.height, self.depth]
    }

    #[inline]
    const fn from_array(a: [u32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl std::fmt::Display for Extent3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Signed pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Offset3D {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
    /// Z coordinate (slice)
    pub z: i32,
}

impl Offset3D {
    /// The origin `(0, 0, 0)`.
    pub const ORIGIN: Offset3D = Offset3D::new(0, 0, 0);

    /// Creates a new offset.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns `true` if no component is negative.
    #[inline]
    pub const fn is_non_negative(&self) -> bool {
        self.x >= 0 && self.y >= 0 && self.z >= 0
    }

    /// Coordinates as an array `[x, y, z]`.
    #[inline]
    pub const fn to_array(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    const fn from_array(a: [i32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl std::fmt::Display for Offset3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A box inside an image: origin plus extent.
///
/// The geometry rules used by region copies live here so that bounds checks
/// and overlap detection are written once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Region3D {
    /// Region origin
    pub offset: Offset3D,
    /// Region size
    pub extent: Extent3D,
}

impl Region3D {
    /// Creates a new region.
    #[inline]
    pub const fn new(offset: Offset3D, extent: Extent3D) -> Self {
        Self { offset, extent }
    }

    /// A region covering a whole image of the given extent.
    #[inline]
    pub const fn whole(extent: Extent3D) -> Self {
        Self::new(Offset3D::ORIGIN, extent)
    }

    /// Returns `true` if the region lies entirely inside `bounds` with a
    /// non-negative offset.
    pub fn is_inside(&self, bounds: Extent3D) -> bool {
        let offset = self.offset.to_array();
        let extent = self.extent.to_array();
        let limit = bounds.to_array();
        (0..3).all(|i| offset[i] >= 0 && offset[i] as u64 + extent[i] as u64 <= limit[i] as u64)
    }

    /// Clamps the region to `bounds`.
    ///
    /// Negative offsets are raised to zero and each extent is shrunk so that
    /// `offset + extent` does not pass the bound. A region starting beyond
    /// the bound collapses to a zero extent on that axis.
    pub fn clamp_to(&self, bounds: Extent3D) -> Region3D {
        let mut offset = self.offset.to_array();
        let mut extent = self.extent.to_array();
        let limit = bounds.to_array();
        for i in 0..3 {
            offset[i] = offset[i].max(0);
            let room = limit[i].saturating_sub(offset[i] as u32);
            extent[i] = extent[i].min(room);
        }
        Region3D::new(Offset3D::from_array(offset), Extent3D::from_array(extent))
    }

    /// Fits this source region against a destination placed at `dst_offset`
    /// inside an image of extent `dst_bounds`.
    ///
    /// On every axis with a negative destination offset the source origin is
    /// advanced and the extent reduced by the same amount, and the
    /// destination offset becomes zero. The extent is then shrunk so the
    /// destination does not pass `dst_bounds`.
    ///
    /// Returns `(destination offset, adjusted source region)`, or `None` if
    /// any axis collapses to zero pixels.
    pub fn clip_to_destination(
        &self,
        dst_offset: Offset3D,
        dst_bounds: Extent3D,
    ) -> Option<(Offset3D, Region3D)> {
        let mut dst = dst_offset.to_array();
        let mut src = self.offset.to_array();
        let mut extent = self.extent.to_array();
        let limit = dst_bounds.to_array();

        for i in 0..3 {
            if extent[i] == 0 {
                return None;
            }
            if dst[i] < 0 {
                let inv = dst[i].unsigned_abs();
                if inv >= extent[i] {
                    return None;
                }
                extent[i] -= inv;
                src[i] = src[i].saturating_add_unsigned(inv);
                dst[i] = 0;
            }

            let end = dst[i] as u64 + extent[i] as u64;
            if end > limit[i] as u64 {
                let shift = end - limit[i] as u64;
                if shift >= extent[i] as u64 {
                    return None;
                }
                extent[i] -= shift as u32;
            }
        }

        Some((
            Offset3D::from_array(dst),
            Region3D::new(Offset3D::from_array(src), Extent3D::from_array(extent)),
        ))
    }

    /// Conservative overlap test between two regions.
    ///
    /// Intervals are treated as closed on both ends, `[offset, offset + extent]`,
    /// so regions that merely touch count as overlapping. Both regions must
    /// intersect on all three axes.
    pub fn overlaps(&self, other: &Region3D) -> bool {
        let a_min = self.offset.to_array();
        let a_ext = self.extent.to_array();
        let b_min = other.offset.to_array();
        let b_ext = other.extent.to_array();
        (0..3).all(|i| {
            let a_lo = a_min[i] as i64;
            let a_hi = a_lo + a_ext[i] as i64;
            let b_lo = b_min[i] as i64;
            let b_hi = b_lo + b_ext[i] as i64;
            a_lo <= b_hi && a_hi >= b_lo
        })
    }
}

impl std::fmt::Display for Region3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {}", self.offset, self.extent)
    }
}
