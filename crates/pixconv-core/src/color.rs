//! Double-precision RGBA interchange color.
//!
//! [`Color4d`] is the color handed to fill operations. Its components are
//! interpreted in the normalized domain of the target data type: `1.0` is the
//! integer maximum for integer types and the literal value `1.0` for floats.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA color with `f64` components.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color4d {
    /// Red component
    pub r: f64,
    /// Green component
    pub g: f64,
    /// Blue component
    pub b: f64,
    /// Alpha component
    pub a: f64,
}

impl Color4d {
    /// Opaque black `(0, 0, 0, 1)`.
    pub const BLACK: Color4d = Color4d::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white `(1, 1, 1, 1)`.
    pub const WHITE: Color4d = Color4d::new(1.0, 1.0, 1.0, 1.0);
    /// Fully transparent black `(0, 0, 0, 0)`.
    pub const TRANSPARENT: Color4d = Color4d::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a new color.
    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Components as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color4d {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[f64; 4]> for Color4d {
    fn from(c: [f64; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<[f32; 4]> for Color4d {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0] as f64, c[1] as f64, c[2] as f64, c[3] as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_opaque_black() {
        assert_eq!(Color4d::default(), Color4d::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_from_arrays() {
        let c: Color4d = [1.0f32, 0.5, 0.25, 1.0].into();
        assert_eq!(c.to_array(), [1.0, 0.5, 0.25, 1.0]);
        let d: Color4d = [0.1, 0.2, 0.3, 0.4].into();
        assert_eq!(d.b, 0.3);
    }
}
