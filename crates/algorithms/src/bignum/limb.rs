//! The machine digit abstraction
//!
//! A [`Limb`] is one digit of a multi-precision integer. Two widths are
//! supported: `u32` (double-width accumulator `u64`) and `u64` (accumulator
//! `u128`). Every multiplication primitive exists in two forms that must be
//! bit-identical: [`Limb::mac`] goes through the double-width accumulator,
//! [`Limb::mac_portable`] builds the same product from half-width partial
//! products using only single-width arithmetic, for targets where the wide
//! type is emulated or unavailable.

use byteorder::{BigEndian, ByteOrder};
use core::fmt::Debug;
use core::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};
use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// One digit of a multi-precision integer.
///
/// Implemented for `u32` and `u64` only. All operations are branch-free on
/// data; carries and borrows travel as limb values, never as `bool`s that
/// the compiler might turn into jumps.
pub trait Limb:
    sealed::Sealed
    + Copy
    + Clone
    + Debug
    + Default
    + Eq
    + Ord
    + ConditionallySelectable
    + ConstantTimeEq
    + Zeroize
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Bit width of the digit
    const BITS: usize;
    /// Byte width of the digit
    const BYTES: usize;
    /// The digit 0
    const ZERO: Self;
    /// The digit 1
    const ONE: Self;
    /// The all-ones digit
    const MAX: Self;

    /// Add with carry: returns `(a + b + carry) mod 2^BITS` and the carry out.
    ///
    /// `carry` must be 0 or 1; the carry out is 0 or 1.
    fn adc(a: Self, b: Self, carry: Self) -> (Self, Self);

    /// Subtract with borrow: returns `(a - b - borrow) mod 2^BITS` and the
    /// borrow out. `borrow` must be 0 or 1; the borrow out is 0 or 1.
    fn sbb(a: Self, b: Self, borrow: Self) -> (Self, Self);

    /// Multiply-accumulate through the double-width accumulator:
    /// `acc + a * b + carry` as `(low, high)`.
    fn mac(acc: Self, a: Self, b: Self, carry: Self) -> (Self, Self);

    /// Multiply-accumulate from half-width partial products.
    ///
    /// Produces exactly the same `(low, high)` as [`Limb::mac`] while
    /// touching only single-width arithmetic. The equivalence of the two
    /// paths is checked by differential tests.
    fn mac_portable(acc: Self, a: Self, b: Self, carry: Self) -> (Self, Self);

    /// Wrapping multiplication modulo 2^BITS
    fn wrapping_mul(self, rhs: Self) -> Self;

    /// Wrapping subtraction modulo 2^BITS
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Wrapping negation modulo 2^BITS
    fn wrapping_neg(self) -> Self;

    /// Truncating conversion from `u64`
    fn from_u64(value: u64) -> Self;

    /// Widening conversion to `u64`
    fn as_u64(self) -> u64;

    /// Read one big-endian digit from the front of `bytes`
    fn read_be(bytes: &[u8]) -> Self;

    /// Write this digit big-endian into the front of `out`
    fn write_be(self, out: &mut [u8]);

    /// Number of leading zero bits
    fn leading_zeros(self) -> u32;
}

impl Limb for u32 {
    const BITS: usize = 32;
    const BYTES: usize = 4;
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const MAX: Self = u32::MAX;

    #[inline(always)]
    fn adc(a: Self, b: Self, carry: Self) -> (Self, Self) {
        let t = (a as u64) + (b as u64) + (carry as u64);
        (t as u32, (t >> 32) as u32)
    }

    #[inline(always)]
    fn sbb(a: Self, b: Self, borrow: Self) -> (Self, Self) {
        let (d1, b1) = a.overflowing_sub(b);
        let (d2, b2) = d1.overflowing_sub(borrow);
        (d2, (b1 | b2) as u32)
    }

    #[inline(always)]
    fn mac(acc: Self, a: Self, b: Self, carry: Self) -> (Self, Self) {
        let t = (acc as u64) + (a as u64) * (b as u64) + (carry as u64);
        (t as u32, (t >> 32) as u32)
    }

    #[inline(always)]
    fn mac_portable(acc: Self, a: Self, b: Self, carry: Self) -> (Self, Self) {
        // 16x16 -> 32 partial products; no u64 involved.
        const MASK: u32 = 0xFFFF;
        let (a0, a1) = (a & MASK, a >> 16);
        let (b0, b1) = (b & MASK, b >> 16);

        let ll = a0 * b0;
        let lh = a0 * b1;
        let hl = a1 * b0;
        let hh = a1 * b1;

        // Middle column: fits because each term is < 2^16 * 3.
        let mid = (ll >> 16) + (lh & MASK) + (hl & MASK);
        let mut lo = (mid << 16) | (ll & MASK);
        let mut hi = hh + (lh >> 16) + (hl >> 16) + (mid >> 16);

        let (l, c) = lo.overflowing_add(acc);
        lo = l;
        hi += c as u32;
        let (l, c) = lo.overflowing_add(carry);
        lo = l;
        hi += c as u32;
        (lo, hi)
    }

    #[inline(always)]
    fn wrapping_mul(self, rhs: Self) -> Self {
        u32::wrapping_mul(self, rhs)
    }

    #[inline(always)]
    fn wrapping_sub(self, rhs: Self) -> Self {
        u32::wrapping_sub(self, rhs)
    }

    #[inline(always)]
    fn wrapping_neg(self) -> Self {
        u32::wrapping_neg(self)
    }

    #[inline(always)]
    fn from_u64(value: u64) -> Self {
        value as u32
    }

    #[inline(always)]
    fn as_u64(self) -> u64 {
        self as u64
    }

    #[inline(always)]
    fn read_be(bytes: &[u8]) -> Self {
        BigEndian::read_u32(bytes)
    }

    #[inline(always)]
    fn write_be(self, out: &mut [u8]) {
        BigEndian::write_u32(out, self)
    }

    #[inline(always)]
    fn leading_zeros(self) -> u32 {
        u32::leading_zeros(self)
    }
}

impl Limb for u64 {
    const BITS: usize = 64;
    const BYTES: usize = 8;
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const MAX: Self = u64::MAX;

    #[inline(always)]
    fn adc(a: Self, b: Self, carry: Self) -> (Self, Self) {
        let t = (a as u128) + (b as u128) + (carry as u128);
        (t as u64, (t >> 64) as u64)
    }

    #[inline(always)]
    fn sbb(a: Self, b: Self, borrow: Self) -> (Self, Self) {
        let (d1, b1) = a.overflowing_sub(b);
        let (d2, b2) = d1.overflowing_sub(borrow);
        (d2, (b1 | b2) as u64)
    }

    #[inline(always)]
    fn mac(acc: Self, a: Self, b: Self, carry: Self) -> (Self, Self) {
        let t = (acc as u128) + (a as u128) * (b as u128) + (carry as u128);
        (t as u64, (t >> 64) as u64)
    }

    #[inline(always)]
    fn mac_portable(acc: Self, a: Self, b: Self, carry: Self) -> (Self, Self) {
        // 32x32 -> 64 partial products; no u128 involved.
        const MASK: u64 = 0xFFFF_FFFF;
        let (a0, a1) = (a & MASK, a >> 32);
        let (b0, b1) = (b & MASK, b >> 32);

        let ll = a0 * b0;
        let lh = a0 * b1;
        let hl = a1 * b0;
        let hh = a1 * b1;

        let mid = (ll >> 32) + (lh & MASK) + (hl & MASK);
        let mut lo = (mid << 32) | (ll & MASK);
        let mut hi = hh + (lh >> 32) + (hl >> 32) + (mid >> 32);

        let (l, c) = lo.overflowing_add(acc);
        lo = l;
        hi += c as u64;
        let (l, c) = lo.overflowing_add(carry);
        lo = l;
        hi += c as u64;
        (lo, hi)
    }

    #[inline(always)]
    fn wrapping_mul(self, rhs: Self) -> Self {
        u64::wrapping_mul(self, rhs)
    }

    #[inline(always)]
    fn wrapping_sub(self, rhs: Self) -> Self {
        u64::wrapping_sub(self, rhs)
    }

    #[inline(always)]
    fn wrapping_neg(self) -> Self {
        u64::wrapping_neg(self)
    }

    #[inline(always)]
    fn from_u64(value: u64) -> Self {
        value
    }

    #[inline(always)]
    fn as_u64(self) -> u64 {
        self
    }

    #[inline(always)]
    fn read_be(bytes: &[u8]) -> Self {
        BigEndian::read_u64(bytes)
    }

    #[inline(always)]
    fn write_be(self, out: &mut [u8]) {
        BigEndian::write_u64(out, self)
    }

    #[inline(always)]
    fn leading_zeros(self) -> u32 {
        u64::leading_zeros(self)
    }
}
