//! Bit-level half-float codec.
//!
//! [`compress`] and [`decompress`] convert between `f32` and the IEEE 754
//! binary16 bit pattern using masked integer arithmetic only: every class
//! (zero, subnormal, normal, infinity, NaN) is selected with a mask instead of
//! a branch.
//!
//! - The mantissa is truncated, not rounded.
//! - Finite values above the largest half (65504) saturate to infinity.
//! - Sign, zero, infinity and NaN are preserved.
//!
//! Every input bit pattern maps to a value; there are no error conditions.
//!
//! ```rust
//! use pixconv_core::float16::{compress, decompress};
//!
//! assert_eq!(compress(1.0), 0x3C00);
//! assert_eq!(decompress(0xC000), -2.0);
//! assert_eq!(compress(1.0e6), 0x7C00); // saturates to +inf
//! ```

const SHIFT: u32 = 13;
const SHIFT_SIGN: u32 = 16;

// binary32 thresholds
const INF_N: i32 = 0x7F80_0000; // +inf
const MAX_N: i32 = 0x477F_E000; // largest half normal as binary32
const MIN_N: i32 = 0x3880_0000; // smallest half normal as binary32
const SIGN_N: u32 = 0x8000_0000;
const NAN_N: i32 = (INF_C + 1) << SHIFT; // smallest half NaN as binary32

// The same thresholds shifted down into half precision
const INF_C: i32 = INF_N >> SHIFT;
const MAX_C: i32 = MAX_N >> SHIFT;
const MIN_C: i32 = MIN_N >> SHIFT;
const SIGN_C: i32 = 0x8000;

const MUL_N: u32 = 0x5200_0000; // 2^37 = 2^23 / MIN_N
const MUL_C: u32 = 0x3380_0000; // 2^-24 = MIN_N / 2^(23 - SHIFT)
const SUB_C: i32 = 0x003FF; // largest subnormal mantissa
const NOR_C: i32 = 0x00400; // smallest normal mantissa

const MAX_D: i32 = INF_C - MAX_C - 1;
const MIN_D: i32 = MIN_C - SUB_C - 1;

/// All ones if `cond` holds, zero otherwise.
#[inline(always)]
const fn mask(cond: bool) -> i32 {
    -(cond as i32)
}

/// Compresses an `f32` into a binary16 bit pattern.
#[inline]
pub fn compress(value: f32) -> u16 {
    let mut v = value.to_bits() as i32;
    let sign = (v as u32) & SIGN_N;
    v ^= sign as i32;
    let sign = sign >> SHIFT_SIGN;

    // Subnormals: scale so the half mantissa lands above bit 13
    let s = (f32::from_bits(MUL_N) * f32::from_bits(v as u32)) as i32;
    v ^= (s ^ v) & mask(MIN_N > v);
    v ^= (INF_N ^ v) & mask(INF_N > v && v > MAX_N);
    v ^= (NAN_N ^ v) & mask(NAN_N > v && v > INF_N);

    let mut v = ((v as u32) >> SHIFT) as i32;
    v ^= ((v - MAX_D) ^ v) & mask(v > MAX_C);
    v ^= ((v - MIN_D) ^ v) & mask(v > SUB_C);

    ((v as u32) | sign) as u16
}

/// Decompresses a binary16 bit pattern into an `f32`.
#[inline]
pub fn decompress(value: u16) -> f32 {
    let mut v = value as i32;
    let sign = v & SIGN_C;
    v ^= sign;
    let sign = sign << SHIFT_SIGN;

    v ^= ((v + MIN_D) ^ v) & mask(v > SUB_C);
    v ^= ((v + MAX_D) ^ v) & mask(v > MAX_C);

    let s = f32::from_bits(MUL_C) * v as f32;
    let subnormal = mask(NOR_C > v);
    v <<= SHIFT;
    v ^= (s.to_bits() as i32 ^ v) & subnormal;
    v |= sign;

    f32::from_bits(v as u32)
}

/// Compresses into a [`half::f16`] storage value.
#[inline]
pub fn to_f16(value: f32) -> half::f16 {
    half::f16::from_bits(compress(value))
}

/// Decompresses a [`half::f16`] storage value.
#[inline]
pub fn from_f16(value: half::f16) -> f32 {
    decompress(value.to_bits())
}
