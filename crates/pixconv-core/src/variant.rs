//! Typed element codec.
//!
//! Reads and writes single scalars of any [`DataType`] from raw byte buffers.
//! The data type is always passed explicitly; a buffer never records which
//! type it holds.
//!
//! # Normalization
//!
//! Data type conversion goes through a common `f64` domain:
//!
//! | type                | read                               | write                              |
//! |---------------------|------------------------------------|------------------------------------|
//! | integer `T`         | `(raw - T::MIN) / (T::MAX - T::MIN)` | `v * (T::MAX - T::MIN) + T::MIN`, truncated |
//! | `Float16`           | decompressed, unscaled             | compressed, unscaled               |
//! | `Float32`/`Float64` | unscaled                           | unscaled                           |
//! | `Undefined`         | `0.0`                              | nothing                            |
//!
//! Signed integers use their full range too: `i8::MIN` reads as `0.0` and
//! `i8::MAX` as `1.0`.
//!
//! ```rust
//! use pixconv_core::variant::{read_normalized, write_normalized};
//! use pixconv_core::DataType;
//!
//! let buf = [0u8, 255];
//! assert_eq!(read_normalized(DataType::UInt8, &buf, 1), 1.0);
//!
//! let mut out = [0u8; 4];
//! write_normalized(DataType::Float32, &mut out, 0, 0.25);
//! assert_eq!(f32::from_ne_bytes(out), 0.25);
//! ```
//!
//! Indices are element indices, not byte offsets. Buffers are read and
//! written in native byte order; out-of-range indices panic like slice
//! indexing, so callers validate sizes first.

use crate::float16::{compress, decompress};
use crate::format::DataType;
use half::f16;

/// A single scalar of one of the nine defined data types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element {
    /// 8-bit signed integer
    Int8(i8),
    /// 8-bit unsigned integer
    UInt8(u8),
    /// 16-bit signed integer
    Int16(i16),
    /// 16-bit unsigned integer
    UInt16(u16),
    /// 32-bit signed integer
    Int32(i32),
    /// 32-bit unsigned integer
    UInt32(u32),
    /// 16-bit float, stored as raw bits
    Float16(f16),
    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),
}

impl Element {
    /// Reads the element at `index`. Returns `None` for [`DataType::Undefined`].
    #[inline]
    pub fn read(data_type: DataType, buf: &[u8], index: usize) -> Option<Element> {
        Some(match data_type {
            DataType::Undefined => return None,
            DataType::Int8 => Element::Int8(i8::load(buf, index)),
            DataType::UInt8 => Element::UInt8(u8::load(buf, index)),
            DataType::Int16 => Element::Int16(i16::load(buf, index)),
            DataType::UInt16 => Element::UInt16(u16::load(buf, index)),
            DataType::Int32 => Element::Int32(i32::load(buf, index)),
            DataType::UInt32 => Element::UInt32(u32::load(buf, index)),
            DataType::Float16 => Element::Float16(f16::from_bits(u16::load(buf, index))),
            DataType::Float32 => Element::Float32(f32::load(buf, index)),
            DataType::Float64 => Element::Float64(f64::load(buf, index)),
        })
    }

    /// Writes the element at `index`, using the element's own width.
    #[inline]
    pub fn write(self, buf: &mut [u8], index: usize) {
        match self {
            Element::Int8(v) => v.store(buf, index),
            Element::UInt8(v) => v.store(buf, index),
            Element::Int16(v) => v.store(buf, index),
            Element::UInt16(v) => v.store(buf, index),
            Element::Int32(v) => v.store(buf, index),
            Element::UInt32(v) => v.store(buf, index),
            Element::Float16(v) => v.to_bits().store(buf, index),
            Element::Float32(v) => v.store(buf, index),
            Element::Float64(v) => v.store(buf, index),
        }
    }

    /// The data type tag of this element.
    pub const fn data_type(&self) -> DataType {
        match self {
            Element::Int8(_) => DataType::Int8,
            Element::UInt8(_) => DataType::UInt8,
            Element::Int16(_) => DataType::Int16,
            Element::UInt16(_) => DataType::UInt16,
            Element::Int32(_) => DataType::Int32,
            Element::UInt32(_) => DataType::UInt32,
            Element::Float16(_) => DataType::Float16,
            Element::Float32(_) => DataType::Float32,
            Element::Float64(_) => DataType::Float64,
        }
    }

    /// Smallest value of the type's normalized domain: the integer minimum,
    /// or `0.0` for floats.
    pub fn min_value(data_type: DataType) -> Option<Element> {
        Some(match data_type {
            DataType::Undefined => return None,
            DataType::Int8 => Element::Int8(i8::MIN),
            DataType::UInt8 => Element::UInt8(u8::MIN),
            DataType::Int16 => Element::Int16(i16::MIN),
            DataType::UInt16 => Element::UInt16(u16::MIN),
            DataType::Int32 => Element::Int32(i32::MIN),
            DataType::UInt32 => Element::UInt32(u32::MIN),
            DataType::Float16 => Element::Float16(f16::from_bits(compress(0.0))),
            DataType::Float32 => Element::Float32(0.0),
            DataType::Float64 => Element::Float64(0.0),
        })
    }

    /// Largest value of the type's normalized domain: the integer maximum,
    /// or `1.0` for floats.
    pub fn max_value(data_type: DataType) -> Option<Element> {
        Some(match data_type {
            DataType::Undefined => return None,
            DataType::Int8 => Element::Int8(i8::MAX),
            DataType::UInt8 => Element::UInt8(u8::MAX),
            DataType::Int16 => Element::Int16(i16::MAX),
            DataType::UInt16 => Element::UInt16(u16::MAX),
            DataType::Int32 => Element::Int32(i32::MAX),
            DataType::UInt32 => Element::UInt32(u32::MAX),
            DataType::Float16 => Element::Float16(f16::from_bits(compress(1.0))),
            DataType::Float32 => Element::Float32(1.0),
            DataType::Float64 => Element::Float64(1.0),
        })
    }
}

/// Reads the element at `index` and maps it into the normalized domain.
#[inline]
pub fn read_normalized(data_type: DataType, buf: &[u8], index: usize) -> f64 {
    match data_type {
        DataType::Undefined => 0.0,
        DataType::Int8 => read_unorm::<i8>(buf, index),
        DataType::UInt8 => read_unorm::<u8>(buf, index),
        DataType::Int16 => read_unorm::<i16>(buf, index),
        DataType::UInt16 => read_unorm::<u16>(buf, index),
        DataType::Int32 => read_unorm::<i32>(buf, index),
        DataType::UInt32 => read_unorm::<u32>(buf, index),
        DataType::Float16 => decompress(u16::load(buf, index)) as f64,
        DataType::Float32 => f32::load(buf, index) as f64,
        DataType::Float64 => f64::load(buf, index),
    }
}

/// Maps `value` out of the normalized domain and writes it at `index`.
#[inline]
pub fn write_normalized(data_type: DataType, buf: &mut [u8], index: usize, value: f64) {
    match data_type {
        DataType::Undefined => {}
        DataType::Int8 => write_unorm::<i8>(buf, index, value),
        DataType::UInt8 => write_unorm::<u8>(buf, index, value),
        DataType::Int16 => write_unorm::<i16>(buf, index, value),
        DataType::UInt16 => write_unorm::<u16>(buf, index, value),
        DataType::Int32 => write_unorm::<i32>(buf, index, value),
        DataType::UInt32 => write_unorm::<u32>(buf, index, value),
        DataType::Float16 => compress(value as f32).store(buf, index),
        DataType::Float32 => (value as f32).store(buf, index),
        DataType::Float64 => value.store(buf, index),
    }
}

/// Copies one element's bit pattern from `src[src_index]` to `dst[dst_index]`
/// without rescaling.
#[inline]
pub fn copy_raw(data_type: DataType, src: &[u8], src_index: usize, dst: &mut [u8], dst_index: usize) {
    let size = data_type.size();
    let s = src_index * size;
    let d = dst_index * size;
    dst[d..d + size].copy_from_slice(&src[s..s + size]);
}

#[inline]
fn read_unorm<T: Integer>(buf: &[u8], index: usize) -> f64 {
    (T::load(buf, index).to_f64() - T::MIN) / (T::MAX - T::MIN)
}

#[inline]
fn write_unorm<T: Integer>(buf: &mut [u8], index: usize, value: f64) {
    T::from_f64(value * (T::MAX - T::MIN) + T::MIN).store(buf, index);
}

/// Plain-old-data scalar addressable by element index.
trait Scalar: Copy {
    const SIZE: usize;
    fn load(buf: &[u8], index: usize) -> Self;
    fn store(self, buf: &mut [u8], index: usize);
}

/// Integer scalar with a full-range affine normalization.
trait Integer: Scalar {
    const MIN: f64;
    const MAX: f64;
    fn to_f64(self) -> f64;
    /// Truncates toward zero, saturating at the type bounds.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            #[inline(always)]
            fn load(buf: &[u8], index: usize) -> Self {
                let start = index * Self::SIZE;
                let mut bytes = [0u8; std::mem::size_of::<$t>()];
                bytes.copy_from_slice(&buf[start..start + Self::SIZE]);
                <$t>::from_ne_bytes(bytes)
            }

            #[inline(always)]
            fn store(self, buf: &mut [u8], index: usize) {
                let start = index * Self::SIZE;
                buf[start..start + Self::SIZE].copy_from_slice(&self.to_ne_bytes());
            }
        }
    )*};
}

macro_rules! impl_integer {
    ($($t:ty),* $(,)?) => {$(
        impl Integer for $t {
            const MIN: f64 = <$t>::MIN as f64;
            const MAX: f64 = <$t>::MAX as f64;

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    )*};
}

impl_scalar!(i8, u8, i16, u16, i32, u32, f32, f64);
impl_integer!(i8, u8, i16, u16, i32, u32);
