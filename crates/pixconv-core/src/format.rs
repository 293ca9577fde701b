//! Pixel formats and per-channel data types.
//!
//! This module provides the canonical tags describing how a raw image buffer
//! is laid out.
//!
//! # Types
//!
//! - [`PixelFormat`] - Channel layout and count (R, RGB, BGRA, ...)
//! - [`DataType`] - Numeric encoding of one channel (UInt8, Float16, ...)
//! - [`Channel`] - One logical color slot, used to describe buffer order
//!
//! # Usage
//!
//! ```rust
//! use pixconv_core::format::{memory_footprint, Channel, DataType, PixelFormat};
//!
//! assert_eq!(PixelFormat::BGRA.channels(), &[Channel::B, Channel::G, Channel::R, Channel::A]);
//! assert_eq!(DataType::Float16.size(), 2);
//!
//! // 16 pixels of RGB half floats
//! assert_eq!(memory_footprint(PixelFormat::RGB, DataType::Float16, 16), 96);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One logical channel slot of a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red.
    R,
    /// Green.
    G,
    /// Blue.
    B,
    /// Alpha.
    A,
}

/// Channel layout of a pixel.
///
/// The color formats list their channels in buffer order: `BGRA` stores blue
/// first and alpha last. The depth/stencil and block-compressed tags are
/// valid values but have no addressable channels; every conversion entry
/// point rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PixelFormat {
    /// Single alpha channel.
    Alpha,
    /// Single red channel.
    R,
    /// Red, green.
    RG,
    /// Red, green, blue.
    RGB,
    /// Blue, green, red.
    BGR,
    /// Red, green, blue, alpha.
    #[default]
    RGBA,
    /// Blue, green, red, alpha.
    BGRA,
    /// Alpha, red, green, blue.
    ARGB,
    /// Alpha, blue, green, red.
    ABGR,
    /// Depth component (reserved).
    Depth,
    /// Combined depth and stencil (reserved).
    DepthStencil,
    /// Stencil index (reserved).
    Stencil,
    /// Generic compressed data (reserved).
    Compressed,
    /// BC1 block compression (reserved).
    BC1,
    /// BC2 block compression (reserved).
    BC2,
    /// BC3 block compression (reserved).
    BC3,
    /// BC4 block compression (reserved).
    BC4,
    /// BC5 block compression (reserved).
    BC5,
}

impl PixelFormat {
    /// All color formats, in declaration order.
    pub const COLOR_FORMATS: [PixelFormat; 9] = [
        Self::Alpha,
        Self::R,
        Self::RG,
        Self::RGB,
        Self::BGR,
        Self::RGBA,
        Self::BGRA,
        Self::ARGB,
        Self::ABGR,
    ];

    /// Channels in buffer order. Empty for reserved formats.
    #[inline]
    pub const fn channels(&self) -> &'static [Channel] {
        use Channel::*;
        match self {
            Self::Alpha => &[A],
            Self::R => &[R],
            Self::RG => &[R, G],
            Self::RGB => &[R, G, B],
            Self::BGR => &[B, G, R],
            Self::RGBA => &[R, G, B, A],
            Self::BGRA => &[B, G, R, A],
            Self::ARGB => &[A, R, G, B],
            Self::ABGR => &[A, B, G, R],
            _ => &[],
        }
    }

    /// Number of channels per pixel. Returns 0 for reserved formats.
    #[inline]
    pub const fn channel_count(&self) -> usize {
        self.channels().len()
    }

    /// Whether this is one of the nine color layouts.
    #[inline]
    pub const fn is_color(&self) -> bool {
        self.channel_count() > 0
    }

    /// Whether this is a block-compressed tag.
    #[inline]
    pub const fn is_compressed(&self) -> bool {
        matches!(
            self,
            Self::Compressed | Self::BC1 | Self::BC2 | Self::BC3 | Self::BC4 | Self::BC5
        )
    }

    /// Whether this is a depth and/or stencil tag.
    #[inline]
    pub const fn is_depth_or_stencil(&self) -> bool {
        matches!(self, Self::Depth | Self::DepthStencil | Self::Stencil)
    }

    /// Whether the layout carries an alpha channel.
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        matches!(
            self,
            Self::Alpha | Self::RGBA | Self::BGRA | Self::ARGB | Self::ABGR
        )
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Alpha => "Alpha",
            Self::R => "R",
            Self::RG => "RG",
            Self::RGB => "RGB",
            Self::BGR => "BGR",
            Self::RGBA => "RGBA",
            Self::BGRA => "BGRA",
            Self::ARGB => "ARGB",
            Self::ABGR => "ABGR",
            Self::Depth => "Depth",
            Self::DepthStencil => "DepthStencil",
            Self::Stencil => "Stencil",
            Self::Compressed => "Compressed",
            Self::BC1 => "BC1",
            Self::BC2 => "BC2",
            Self::BC3 => "BC3",
            Self::BC4 => "BC4",
            Self::BC5 => "BC5",
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Numeric encoding of a single channel.
///
/// Integer types are normalized over their full range when converted (see
/// [`crate::variant`]); float types are carried unscaled. `Undefined` is a
/// valid no-op tag with a size of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataType {
    /// No data type.
    Undefined,
    /// 8-bit signed integer.
    Int8,
    /// 8-bit unsigned integer.
    #[default]
    UInt8,
    /// 16-bit signed integer.
    Int16,
    /// 16-bit unsigned integer.
    UInt16,
    /// 32-bit signed integer.
    Int32,
    /// 32-bit unsigned integer.
    UInt32,
    /// 16-bit half-precision float.
    Float16,
    /// 32-bit single-precision float.
    Float32,
    /// 64-bit double-precision float.
    Float64,
}

impl DataType {
    /// Every defined data type, in declaration order.
    pub const ALL: [DataType; 9] = [
        Self::Int8,
        Self::UInt8,
        Self::Int16,
        Self::UInt16,
        Self::Int32,
        Self::UInt32,
        Self::Float16,
        Self::Float32,
        Self::Float64,
    ];

    /// Number of bytes per channel.
    #[inline]
    pub const fn size(&self) -> usize {
        match self {
            Self::Undefined => 0,
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 | Self::Float16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }

    /// Whether this is a floating-point type.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float16 | Self::Float32 | Self::Float64)
    }

    /// Whether this is an integer type.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8 | Self::UInt8 | Self::Int16 | Self::UInt16 | Self::Int32 | Self::UInt32
        )
    }

    /// Whether values of this type carry a sign.
    #[inline]
    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32) || self.is_float()
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Int8 => "i8",
            Self::UInt8 => "u8",
            Self::Int16 => "i16",
            Self::UInt16 => "u16",
            Self::Int32 => "i32",
            Self::UInt32 => "u32",
            Self::Float16 => "f16",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Bytes per pixel for a format/data type pair.
#[inline]
pub const fn bytes_per_pixel(format: PixelFormat, data_type: DataType) -> usize {
    format.channel_count() * data_type.size()
}

/// Bytes required to store `pixels` pixels of the given layout.
#[inline]
pub const fn memory_footprint(format: PixelFormat, data_type: DataType, pixels: usize) -> usize {
    pixels * bytes_per_pixel(format, data_type)
}
