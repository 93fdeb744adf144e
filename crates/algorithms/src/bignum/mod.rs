//! Fixed-width multi-precision unsigned integers
//!
//! An [`MpInt`] is a little-endian vector of digits with a length fixed at
//! construction from the curve's declared bit width. Arithmetic never grows
//! or shrinks a value implicitly: public operations return results with the
//! declared limb count, and the double-length intermediates of
//! multiplication are explicit [`MpInt`]s of twice the length that only the
//! field engine consumes.
//!
//! Operations on secret values (add, subtract, compare, select) run over the
//! full fixed limb count with no data-dependent branches. Division and
//! ordinary comparison are variable-time and reserved for public quantities
//! such as curve parameters.

pub mod limb;
pub use limb::Limb;


use crate::error::{Error, Result};
use core::cmp::Ordering;
use eckit_internal::{ct_assign, ct_swap};
use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};

/// A fixed-width unsigned integer stored as little-endian limbs
#[derive(Clone, Debug, Zeroize)]
pub struct MpInt<L: Limb> {
    limbs: Vec<L>,
}

impl<L: Limb> MpInt<L> {
    /// The value 0 over `nlimbs` digits
    pub fn zero(nlimbs: usize) -> Self {
        MpInt {
            limbs: vec![L::ZERO; nlimbs],
        }
    }

    /// The value 1 over `nlimbs` digits
    pub fn one(nlimbs: usize) -> Self {
        let mut v = Self::zero(nlimbs);
        v.limbs[0] = L::ONE;
        v
    }

    /// A small value over `nlimbs` digits
    pub fn from_u64(value: u64, nlimbs: usize) -> Self {
        let mut v = Self::zero(nlimbs);
        if L::BITS >= 64 {
            v.limbs[0] = L::from_u64(value);
        } else {
            v.limbs[0] = L::from_u64(value & 0xFFFF_FFFF);
            if nlimbs > 1 {
                v.limbs[1] = L::from_u64(value >> 32);
            }
        }
        v
    }

    /// Construct from existing limbs (little-endian)
    pub(crate) fn from_limbs(limbs: Vec<L>) -> Self {
        MpInt { limbs }
    }

    /// Number of digits
    pub fn nlimbs(&self) -> usize {
        self.limbs.len()
    }

    /// Read-only limb access (little-endian)
    pub(crate) fn limbs(&self) -> &[L] {
        &self.limbs
    }

    /// Import a big-endian byte string into `nlimbs` digits.
    ///
    /// Accepts any byte length; leading bytes that do not fit the declared
    /// width must be zero or the import is rejected.
    pub fn from_be_bytes(bytes: &[u8], nlimbs: usize) -> Result<Self> {
        let capacity = nlimbs * L::BYTES;
        if bytes.len() > capacity {
            let excess = bytes.len() - capacity;
            if bytes[..excess].iter().any(|&b| b != 0) {
                return Err(Error::InvalidLength {
                    context: "MpInt::from_be_bytes",
                    expected: capacity,
                    actual: bytes.len(),
                });
            }
        }
        let mut buf = vec![0u8; capacity];
        let take = bytes.len().min(capacity);
        buf[capacity - take..].copy_from_slice(&bytes[bytes.len() - take..]);

        let mut limbs = vec![L::ZERO; nlimbs];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let offset = (nlimbs - 1 - i) * L::BYTES;
            *limb = L::read_be(&buf[offset..offset + L::BYTES]);
        }
        Ok(MpInt { limbs })
    }

    /// Export as a fixed-width big-endian byte string.
    ///
    /// Fails if the value does not fit in `len` bytes.
    pub fn to_be_bytes(&self, len: usize) -> Result<Vec<u8>> {
        let n = self.nlimbs();
        let mut full = vec![0u8; n * L::BYTES];
        for (i, &limb) in self.limbs.iter().enumerate() {
            let offset = (n - 1 - i) * L::BYTES;
            limb.write_be(&mut full[offset..offset + L::BYTES]);
        }
        if len >= full.len() {
            let mut out = vec![0u8; len];
            out[len - full.len()..].copy_from_slice(&full);
            return Ok(out);
        }
        let excess = full.len() - len;
        if full[..excess].iter().any(|&b| b != 0) {
            return Err(Error::InvalidLength {
                context: "MpInt::to_be_bytes",
                expected: len,
                actual: full.len(),
            });
        }
        Ok(full[excess..].to_vec())
    }

    /// Change the digit count, preserving the value.
    ///
    /// Truncation requires the dropped high limbs to be zero; this is an
    /// internal invariant, not an input-validation path.
    pub(crate) fn resized(&self, nlimbs: usize) -> Self {
        let mut limbs = self.limbs.clone();
        if nlimbs >= limbs.len() {
            limbs.resize(nlimbs, L::ZERO);
        } else {
            debug_assert!(limbs[nlimbs..].iter().all(|&l| l == L::ZERO));
            limbs.truncate(nlimbs);
        }
        MpInt { limbs }
    }

    /// Constant-time zero test
    pub fn is_zero(&self) -> Choice {
        let mut acc = L::ZERO;
        for &limb in &self.limbs {
            acc = acc | limb;
        }
        acc.ct_eq(&L::ZERO)
    }

    /// Constant-time parity test (1 = odd)
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.limbs[0].as_u64() & 1) as u8)
    }

    /// Constant-time bit read; `index` is public, the value is not
    pub fn bit(&self, index: usize) -> Choice {
        let limb = index / L::BITS;
        let shift = (index % L::BITS) as u32;
        if limb >= self.nlimbs() {
            return Choice::from(0);
        }
        Choice::from(((self.limbs[limb] >> shift).as_u64() & 1) as u8)
    }

    /// Position of the highest set bit plus one; zero for the value 0.
    ///
    /// Variable-time; only for public values.
    pub fn bit_len(&self) -> usize {
        for (i, &limb) in self.limbs.iter().enumerate().rev() {
            if limb != L::ZERO {
                return (i + 1) * L::BITS - limb.leading_zeros() as usize;
            }
        }
        0
    }

    /// Constant-time equality over equal widths
    pub fn ct_eq(&self, other: &Self) -> Choice {
        debug_assert_eq!(self.nlimbs(), other.nlimbs());
        let mut acc = Choice::from(1);
        for (a, b) in self.limbs.iter().zip(other.limbs.iter()) {
            acc &= a.ct_eq(b);
        }
        acc
    }

    /// Constant-time less-than over equal widths
    pub fn ct_lt(&self, other: &Self) -> Choice {
        let (_, borrow) = self.sub_with_borrow(other);
        borrow.ct_eq(&L::ONE)
    }

    /// Variable-time comparison; only for public values
    pub fn cmp_vartime(&self, other: &Self) -> Ordering {
        debug_assert_eq!(self.nlimbs(), other.nlimbs());
        for (a, b) in self.limbs.iter().zip(other.limbs.iter()).rev() {
            match a.cmp(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Constant-time addition modulo 2^(nlimbs * BITS); returns the carry out
    pub fn add_with_carry(&self, other: &Self) -> (Self, L) {
        debug_assert_eq!(self.nlimbs(), other.nlimbs());
        let mut out = vec![L::ZERO; self.nlimbs()];
        let mut carry = L::ZERO;
        for (i, (&a, &b)) in self.limbs.iter().zip(other.limbs.iter()).enumerate() {
            let (sum, c) = L::adc(a, b, carry);
            out[i] = sum;
            carry = c;
        }
        (MpInt { limbs: out }, carry)
    }

    /// Constant-time subtraction modulo 2^(nlimbs * BITS); returns the borrow out
    pub fn sub_with_borrow(&self, other: &Self) -> (Self, L) {
        debug_assert_eq!(self.nlimbs(), other.nlimbs());
        let mut out = vec![L::ZERO; self.nlimbs()];
        let mut borrow = L::ZERO;
        for (i, (&a, &b)) in self.limbs.iter().zip(other.limbs.iter()).enumerate() {
            let (diff, b_out) = L::sbb(a, b, borrow);
            out[i] = diff;
            borrow = b_out;
        }
        (MpInt { limbs: out }, borrow)
    }

    /// Shift left by `n` bits within the fixed width; `n` is public
    pub fn shl_bits(&self, n: usize) -> Self {
        let nl = self.nlimbs();
        let mut out = vec![L::ZERO; nl];
        let limb_shift = n / L::BITS;
        let bit_shift = (n % L::BITS) as u32;
        for i in (0..nl).rev() {
            if i < limb_shift {
                break;
            }
            let src = i - limb_shift;
            let mut v = self.limbs[src] << bit_shift;
            if bit_shift > 0 && src > 0 {
                v = v | (self.limbs[src - 1] >> (L::BITS as u32 - bit_shift));
            }
            out[i] = v;
        }
        MpInt { limbs: out }
    }

    /// Shift right by `n` bits; `n` is public
    pub fn shr_bits(&self, n: usize) -> Self {
        let nl = self.nlimbs();
        let mut out = vec![L::ZERO; nl];
        let limb_shift = n / L::BITS;
        let bit_shift = (n % L::BITS) as u32;
        for i in 0..nl {
            let src = i + limb_shift;
            if src >= nl {
                break;
            }
            let mut v = self.limbs[src] >> bit_shift;
            if bit_shift > 0 && src + 1 < nl {
                v = v | (self.limbs[src + 1] << (L::BITS as u32 - bit_shift));
            }
            out[i] = v;
        }
        MpInt { limbs: out }
    }

    /// Clear every bit at position `n` and above; `n` is public
    pub fn truncated_to_bits(&self, n: usize) -> Self {
        let mut out = self.clone();
        for i in 0..out.nlimbs() {
            let base = i * L::BITS;
            if base >= n {
                out.limbs[i] = L::ZERO;
            } else if base + L::BITS > n {
                let keep = (n - base) as u32;
                out.limbs[i] = out.limbs[i] & (L::MAX >> (L::BITS as u32 - keep));
            }
        }
        out
    }

    /// Constant-time selection: `a` if `choice` is 0, `b` if 1
    pub fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        debug_assert_eq!(a.nlimbs(), b.nlimbs());
        let mut out = a.clone();
        ct_assign(&mut out.limbs, &b.limbs, choice);
        out
    }

    /// Constant-time conditional assignment of `other` into `self`
    pub fn conditional_assign(&mut self, other: &Self, choice: Choice) {
        debug_assert_eq!(self.nlimbs(), other.nlimbs());
        ct_assign(&mut self.limbs, &other.limbs, choice);
    }

    /// Constant-time conditional swap
    pub fn conditional_swap(a: &mut Self, b: &mut Self, choice: Choice) {
        debug_assert_eq!(a.nlimbs(), b.nlimbs());
        ct_swap(&mut a.limbs, &mut b.limbs, choice);
    }

    /// Widening multiplication through the double-width accumulator.
    ///
    /// The result has `self.nlimbs() + other.nlimbs()` digits.
    pub fn widening_mul(&self, other: &Self) -> Self {
        self.mul_impl(other, L::mac)
    }

    /// Widening multiplication through half-width partial products.
    ///
    /// Bit-identical to [`MpInt::widening_mul`]; the equivalence is a
    /// required differential-test property.
    pub fn widening_mul_portable(&self, other: &Self) -> Self {
        self.mul_impl(other, L::mac_portable)
    }

    fn mul_impl(&self, other: &Self, mac: fn(L, L, L, L) -> (L, L)) -> Self {
        let n = self.nlimbs();
        let m = other.nlimbs();
        let mut out = vec![L::ZERO; n + m];
        for i in 0..n {
            let mut carry = L::ZERO;
            for j in 0..m {
                let (lo, hi) = mac(out[i + j], self.limbs[i], other.limbs[j], carry);
                out[i + j] = lo;
                carry = hi;
            }
            out[i + m] = carry;
        }
        MpInt { limbs: out }
    }

    /// Variable-time quotient and remainder by shift-and-subtract long
    /// division. Only for public values (cofactor derivation, parameter
    /// validation); never call this with secret operands.
    pub fn div_rem_vartime(&self, divisor: &Self) -> Result<(Self, Self)> {
        if bool::from(divisor.is_zero()) {
            return Err(Error::InvalidParameter {
                context: "MpInt::div_rem_vartime",
                #[cfg(feature = "std")]
                message: "division by zero".into(),
            });
        }
        let nl = self.nlimbs();
        let divisor = divisor.resized(nl);
        let mut quotient = Self::zero(nl);
        let mut remainder = Self::zero(nl);
        for i in (0..self.bit_len()).rev() {
            remainder = remainder.shl_bits(1);
            if bool::from(self.bit(i)) {
                remainder.limbs[0] = remainder.limbs[0] | L::ONE;
            }
            if remainder.cmp_vartime(&divisor) != Ordering::Less {
                let (r, _) = remainder.sub_with_borrow(&divisor);
                remainder = r;
                let limb = i / L::BITS;
                let shift = (i % L::BITS) as u32;
                quotient.limbs[limb] = quotient.limbs[limb] | (L::ONE << shift);
            }
        }
        Ok((quotient, remainder))
    }

    /// Fill `nlimbs` digits from the caller's entropy source.
    ///
    /// Fails, rather than proceeding with short randomness, if the source
    /// cannot supply enough bytes.
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R, nlimbs: usize) -> Result<Self> {
        let mut buf = vec![0u8; nlimbs * L::BYTES];
        rng.try_fill_bytes(&mut buf)
            .map_err(|_| Error::RandomGeneration {
                context: "MpInt::random",
                #[cfg(feature = "std")]
                message: "entropy source exhausted".into(),
            })?;
        let out = Self::from_be_bytes(&buf, nlimbs);
        buf.zeroize();
        out
    }
}

impl<L: Limb> PartialEq for MpInt<L> {
    /// Constant-time; widths must match
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl<L: Limb> Eq for MpInt<L> {}
