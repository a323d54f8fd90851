//! Single-bit arithmetic over integers and floating-point bit patterns.
//!
//! Everything here is stateless. Bit index 0 is the least significant bit.
//! Indices must be below the operand's width (`T::BITS`); this is checked
//! with `debug_assert!` only, so release builds leave it to the caller.
//!
//! Floating-point operands are handled through their raw IEEE-754 pattern:
//! the bit is manipulated on `to_bits()` and the result reinterpreted with
//! `from_bits()`. Flipping bit 31 of an `f32` therefore negates it.

/// Types that expose a raw bit pattern of a fixed width.
pub trait RawBits: Copy {
    /// Width of the bit pattern.
    const BITS: u32;

    /// Return the raw pattern, zero-extended to 64 bits.
    fn to_raw(self) -> u64;

    /// Rebuild a value from the low `Self::BITS` bits of `raw`.
    fn from_raw(raw: u64) -> Self;
}

macro_rules! impl_raw_bits_int {
    ($($t:ty => $u:ty),* $(,)?) => {
        $(
            impl RawBits for $t {
                const BITS: u32 = <$u>::BITS;

                #[inline]
                fn to_raw(self) -> u64 {
                    self as $u as u64
                }

                #[inline]
                fn from_raw(raw: u64) -> Self {
                    raw as $u as $t
                }
            }
        )*
    };
}

impl_raw_bits_int!(u8 => u8, u16 => u16, u32 => u32, u64 => u64, i32 => u32, i64 => u64);

impl RawBits for f32 {
    const BITS: u32 = 32;

    #[inline]
    fn to_raw(self) -> u64 {
        self.to_bits() as u64
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        f32::from_bits(raw as u32)
    }
}

impl RawBits for f64 {
    const BITS: u32 = 64;

    #[inline]
    fn to_raw(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        f64::from_bits(raw)
    }
}

/// Position of the highest set bit of `n`, or 0 when `n == 0`.
///
/// The 0 result is shared by `n == 0` and `n == 1`; callers that care must
/// test for zero themselves. Signed values should be cast (`x as u32`) to get
/// the unsigned interpretation.
#[inline]
pub fn highest_set_bit(n: u32) -> u32 {
    if n == 0 {
        0
    } else {
        u32::BITS - 1 - n.leading_zeros()
    }
}

/// 64-bit variant of [`highest_set_bit`].
#[inline]
pub fn highest_set_bit_u64(n: u64) -> u32 {
    if n == 0 {
        0
    } else {
        u64::BITS - 1 - n.leading_zeros()
    }
}

/// Return bit `index` of `value` as 0 or 1.
#[inline]
pub fn bit<T: RawBits>(value: T, index: u32) -> u8 {
    debug_assert!(index < T::BITS);
    ((value.to_raw() >> index) & 1) as u8
}

/// Return true if bit `index` of `value` is set.
#[inline]
pub fn test_bit<T: RawBits>(value: T, index: u32) -> bool {
    bit(value, index) == 1
}

/// Return `value` with bit `index` forced to 1.
#[inline]
pub fn set_bit<T: RawBits>(value: T, index: u32) -> T {
    debug_assert!(index < T::BITS);
    T::from_raw(value.to_raw() | (1u64 << index))
}

/// Return `value` with bit `index` forced to 0.
#[inline]
pub fn clear_bit<T: RawBits>(value: T, index: u32) -> T {
    debug_assert!(index < T::BITS);
    T::from_raw(value.to_raw() & !(1u64 << index))
}

/// Return `value` with bit `index` toggled.
#[inline]
pub fn flip_bit<T: RawBits>(value: T, index: u32) -> T {
    debug_assert!(index < T::BITS);
    T::from_raw(value.to_raw() ^ (1u64 << index))
}
