//! Channel mapper: moves RGBA element slots in and out of packed pixels.
//!
//! An [`ElementColor`] holds four [`Element`] slots (r, g, b, a). Reading a
//! pixel fills only the slots present in the source format; writing emits
//! only the slots present in the destination format, in that format's buffer
//! order. Slots a format does not carry keep whatever the caller seeded, so a
//! widening conversion such as `R -> RGBA` picks up the seed for g, b and a.
//!
//! Format conversion is a pure relocation. No value is rescaled here; only
//! data type conversion rescales (see [`crate::variant`]).
//!
//! ```rust
//! use pixconv_core::channel::ElementColor;
//! use pixconv_core::{DataType, PixelFormat};
//!
//! let bgra = [10u8, 20, 30, 40];
//! let mut color = ElementColor::opaque_black(DataType::UInt8).unwrap();
//! color.read_pixel(PixelFormat::BGRA, DataType::UInt8, &bgra, 0);
//!
//! let mut rgb = [0u8; 3];
//! color.write_pixel(PixelFormat::RGB, &mut rgb, 0);
//! assert_eq!(rgb, [30, 20, 10]);
//! ```

use crate::format::{Channel, DataType, PixelFormat};
use crate::variant::Element;

/// Four element slots in logical RGBA order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementColor {
    /// Red slot
    pub r: Element,
    /// Green slot
    pub g: Element,
    /// Blue slot
    pub b: Element,
    /// Alpha slot
    pub a: Element,
}

impl ElementColor {
    /// Creates a color from four slots.
    #[inline]
    pub const fn new(r: Element, g: Element, b: Element, a: Element) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black in the normalized domain of `data_type`: RGB at the type
    /// minimum and alpha at the type maximum.
    ///
    /// Returns `None` for [`DataType::Undefined`].
    pub fn opaque_black(data_type: DataType) -> Option<Self> {
        let min = Element::min_value(data_type)?;
        let max = Element::max_value(data_type)?;
        Some(Self::new(min, min, min, max))
    }

    /// Returns the slot for `channel`.
    #[inline]
    pub fn get(&self, channel: Channel) -> Element {
        match channel {
            Channel::R => self.r,
            Channel::G => self.g,
            Channel::B => self.b,
            Channel::A => self.a,
        }
    }

    /// Returns a mutable reference to the slot for `channel`.
    #[inline]
    pub fn get_mut(&mut self, channel: Channel) -> &mut Element {
        match channel {
            Channel::R => &mut self.r,
            Channel::G => &mut self.g,
            Channel::B => &mut self.b,
            Channel::A => &mut self.a,
        }
    }

    /// Loads the channels of `format` from pixel `pixel_index` of `buf`.
    ///
    /// Slots the format does not carry are left untouched. Reserved formats
    /// and [`DataType::Undefined`] are no-ops.
    #[inline]
    pub fn read_pixel(&mut self, format: PixelFormat, data_type: DataType, buf: &[u8], pixel_index: usize) {
        let channels = format.channels();
        let base = pixel_index * channels.len();
        for (i, &channel) in channels.iter().enumerate() {
            if let Some(value) = Element::read(data_type, buf, base + i) {
                *self.get_mut(channel) = value;
            }
        }
    }

    /// Stores the channels of `format` into pixel `pixel_index` of `buf`.
    ///
    /// Each slot is written with its own element width. Reserved formats
    /// write nothing.
    #[inline]
    pub fn write_pixel(&self, format: PixelFormat, buf: &mut [u8], pixel_index: usize) {
        let channels = format.channels();
        let base = pixel_index * channels.len();
        for (i, &channel) in channels.iter().enumerate() {
            self.get(channel).write(buf, base + i);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u8_color(r: u8, g: u8, b: u8, a: u8) -> ElementColor {
        ElementColor::new(
            Element::UInt8(r),
            Element::UInt8(g),
            Element::UInt8(b),
            Element::UInt8(a),
        )
    }

    #[test]
    fn test_write_orders() {
        let c = u8_color(1, 2, 3, 4);
        let cases: [(PixelFormat, &[u8]); 9] = [
            (PixelFormat::Alpha, &[4]),
            (PixelFormat::R, &[1]),
            (PixelFormat::RG, &[1, 2]),
            (PixelFormat::RGB, &[1, 2, 3]),
            (PixelFormat::BGR, &[3, 2, 1]),
            (PixelFormat::RGBA, &[1, 2, 3, 4]),
            (PixelFormat::BGRA, &[3, 2, 1, 4]),
            (PixelFormat::ARGB, &[4, 1, 2, 3]),
            (PixelFormat::ABGR, &[4, 3, 2, 1]),
        ];
        for (format, expected) in cases {
            let mut buf = [0u8; 8];
            c.write_pixel(format, &mut buf, 1);
            let n = expected.len();
            assert_eq!(&buf[n..2 * n], expected, "{format}");
        }
    }

    #[test]
    fn test_read_leaves_missing_slots() {
        let mut c = ElementColor::opaque_black(DataType::UInt8).unwrap();
        c.read_pixel(PixelFormat::R, DataType::UInt8, &[200], 0);
        assert_eq!(c, u8_color(200, 0, 0, 255));

        let mut c = ElementColor::opaque_black(DataType::UInt8).unwrap();
        c.read_pixel(PixelFormat::Alpha, DataType::UInt8, &[9, 77], 1);
        assert_eq!(c, u8_color(0, 0, 0, 77));
    }

    #[test]
    fn test_signed_seed() {
        let c = ElementColor::opaque_black(DataType::Int16).unwrap();
        assert_eq!(c.r, Element::Int16(i16::MIN));
        assert_eq!(c.a, Element::Int16(i16::MAX));
        assert!(ElementColor::opaque_black(DataType::Undefined).is_none());
    }

    #[test]
    fn test_reserved_formats_are_noops() {
        let mut c = u8_color(1, 2, 3, 4);
        c.read_pixel(PixelFormat::BC1, DataType::UInt8, &[9, 9, 9, 9], 0);
        assert_eq!(c, u8_color(1, 2, 3, 4));

        let mut buf = [0u8; 4];
        c.write_pixel(PixelFormat::DepthStencil, &mut buf, 0);
        assert_eq!(buf, [0u8; 4]);
    }

    #[test]
    fn test_round_trip_through_abgr() {
        let src: Vec<u8> = (0..16u8).collect();
        let mut mid = vec![0u8; 16];
        let mut back = vec![0u8; 16];
        for i in 0..4 {
            let mut c = ElementColor::opaque_black(DataType::UInt8).unwrap();
            c.read_pixel(PixelFormat::RGBA, DataType::UInt8, &src, i);
            c.write_pixel(PixelFormat::ABGR, &mut mid, i);
        }
        for i in 0..4 {
            let mut c = ElementColor::opaque_black(DataType::UInt8).unwrap();
            c.read_pixel(PixelFormat::ABGR, DataType::UInt8, &mid, i);
            c.write_pixel(PixelFormat::RGBA, &mut back, i);
        }
        assert_eq!(&mid[..4], &[3, 2, 1, 0]);
        assert_eq!(src, back);
    }
}
