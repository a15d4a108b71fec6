//! # Integers
//!
//! The wire grammar's integers are 64-bit signed values, but the codec
//! never assumes the host hands it a native `i64`. [`Int64`] carries the
//! two 32-bit halves that appear in the widest wire tier and compares by
//! mathematical value.

use crate::{from_as, from_fn};
use std::cmp::Ordering;

/// A 64-bit signed integer, stored as the `(high, low)` halves of the
/// widest wire tier.
///
/// The represented value is `high * 2^32 + (low & 0xFFFF_FFFF)`, and
/// comparisons agree with that value across the full signed range.
///
/// # Example
///
/// ```
/// use packstream::prelude::*;
///
/// let small = Int64::from(1i32);
/// let large = Int64::from_halves(1, 0);
///
/// assert!(small < large);
/// assert_eq!(large.as_i64(), 1 << 32);
/// ```
#[derive(Eq, PartialEq, Copy, Clone, Hash, Debug)]
pub struct Int64 {
    high: i32,
    low: i32,
}

impl Int64 {
    /// Builds an `Int64` from its 32-bit halves, high word first, as
    /// they are laid out on the wire.
    pub fn from_halves(high: i32, low: i32) -> Int64 { Int64 { high, low } }

    /// The upper 32 bits, carrying the sign.
    pub fn high(self) -> i32 { self.high }

    /// The lower 32 bits. The bits are what matters; the word is
    /// unsigned in the represented value.
    pub fn low(self) -> i32 { self.low }

    /// The represented value as a native `i64`.
    pub fn as_i64(self) -> i64 { ((self.high as i64) << 32) | (self.low as u32 as i64) }
}

impl std::fmt::Display for Int64 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

impl Ord for Int64 {
    fn cmp(&self, other: &Self) -> Ordering { self.as_i64().cmp(&other.as_i64()) }
}

impl PartialOrd for Int64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

// i64 -> Int64
from_fn!(Int64, i64, |i: i64| {
    Int64 {
        high: (i >> 32) as i32,
        low: i as i32,
    }
});

// Int64 -> i64
from_fn!(i64, Int64, |i: Int64| i.as_i64());

#[macro_export]
/// Helper macro.
macro_rules! from_prims {
    ($to:tt) => {
        from_as!($to, i32, i64);
        from_as!($to, i16, i64);
        from_as!($to, i8, i64);

        from_as!($to, u32, i64);
        from_as!($to, u16, i64);
        from_as!($to, u8, i64);
    };
}

from_prims!(Int64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_round_trip() {
        let values = [
            0i64,
            1,
            -1,
            42,
            1 << 32,
            -(1 << 32),
            0xFFFF_FFFF,
            i64::MAX,
            i64::MIN,
        ];
        for &i in &values {
            let n = Int64::from(i);
            assert_eq!(n.as_i64(), i);
            assert_eq!(Int64::from_halves(n.high(), n.low()), n);
        }
    }

    #[test]
    fn negative_values_sign_extend() {
        let n = Int64::from(-1);
        assert_eq!(n.high(), -1);
        assert_eq!(n.low(), -1);

        let n = Int64::from(-2i8);
        assert_eq!(n.as_i64(), -2);
    }

    #[test]
    fn low_half_is_unsigned_in_the_value() {
        assert_eq!(Int64::from_halves(0, -1).as_i64(), 0xFFFF_FFFF);
        assert_eq!(Int64::from_halves(-1, 0).as_i64(), -(1 << 32));
    }

    #[test]
    fn ordering_matches_values() {
        let sorted = [
            i64::MIN,
            -(1i64 << 32),
            -2_147_483_648,
            -32_768,
            -17,
            -16,
            -1,
            0,
            1,
            127,
            128,
            32_768,
            1i64 << 31,
            i64::MAX,
        ];
        for pair in sorted.windows(2) {
            assert!(Int64::from(pair[0]) < Int64::from(pair[1]));
            assert!(Int64::from(pair[1]) >= Int64::from(pair[0]));
        }
        // representation order would get this one wrong
        assert!(Int64::from(-1) < Int64::from(0));
    }
}
