//! Modular arithmetic through Montgomery-domain reduction
//!
//! A [`MontgomeryDomain`] binds one odd modulus together with the constants
//! REDC needs: `n0 = -m^-1 mod 2^BITS`, `R mod m` and `R^2 mod m`, where
//! `R = 2^(nlimbs * BITS)`. Every public operation takes fully reduced
//! values (`0 <= v < m`) and returns fully reduced values; the scaled
//! Montgomery representation exists only between the crate-internal
//! `to_mont`/`from_mont` boundary and never escapes to callers.
//!
//! Multiplication exists in two bit-identical flavours, mirroring the two
//! limb-level paths: [`MontgomeryDomain::mul`] rides the double-width
//! accumulator and [`MontgomeryDomain::mul_portable`] the half-width
//! schoolbook products.

#[cfg(test)]
mod tests;

use crate::bignum::{Limb, MpInt};
use crate::error::{Error, Result};
use rand::{CryptoRng, RngCore};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};

/// Precomputed reduction context for one odd modulus
#[derive(Clone, Debug)]
pub struct MontgomeryDomain<L: Limb> {
    modulus: MpInt<L>,
    nlimbs: usize,
    bits: usize,
    bytes: usize,
    n0: L,
    r: MpInt<L>,
    r2: MpInt<L>,
}

impl<L: Limb> MontgomeryDomain<L> {
    /// Build the reduction context for `modulus`.
    ///
    /// The modulus must be odd and at least 3; the digit count is fixed to
    /// the minimum that holds the modulus and every value in this domain
    /// carries exactly that count from then on.
    pub fn new(modulus: &MpInt<L>) -> Result<Self> {
        let bits = modulus.bit_len();
        if bits < 2 {
            return Err(Error::InvalidParameter {
                context: "MontgomeryDomain::new",
                #[cfg(feature = "std")]
                message: "modulus too small".into(),
            });
        }
        if !bool::from(modulus.is_odd()) {
            return Err(Error::InvalidParameter {
                context: "MontgomeryDomain::new",
                #[cfg(feature = "std")]
                message: "modulus must be odd".into(),
            });
        }
        let nlimbs = bits.div_ceil(L::BITS);
        let modulus = modulus.resized(nlimbs);

        // n0 = -m[0]^-1 mod 2^BITS by Newton iteration; each step doubles
        // the number of correct low bits.
        let m0 = modulus.limbs()[0];
        let mut inv = L::ONE;
        for _ in 0..L::BITS {
            inv = inv.wrapping_mul(L::from_u64(2).wrapping_sub(m0.wrapping_mul(inv)));
        }
        let n0 = inv.wrapping_neg();

        // R mod m and R^2 mod m by repeated modular doubling of 1.
        let mut domain = MontgomeryDomain {
            modulus,
            nlimbs,
            bits,
            bytes: bits.div_ceil(8),
            n0,
            r: MpInt::zero(nlimbs),
            r2: MpInt::zero(nlimbs),
        };
        let mut acc = MpInt::one(nlimbs);
        for _ in 0..nlimbs * L::BITS {
            acc = domain.add(&acc, &acc);
        }
        domain.r = acc.clone();
        for _ in 0..nlimbs * L::BITS {
            acc = domain.add(&acc, &acc);
        }
        domain.r2 = acc;
        Ok(domain)
    }

    /// The bound modulus
    pub fn modulus(&self) -> &MpInt<L> {
        &self.modulus
    }

    /// Digit count of every value in this domain
    pub fn nlimbs(&self) -> usize {
        self.nlimbs
    }

    /// Bit length of the modulus
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Fixed export width: ceil(bits / 8)
    pub fn byte_len(&self) -> usize {
        self.bytes
    }

    /// The value 0 in this domain
    pub fn zero(&self) -> MpInt<L> {
        MpInt::zero(self.nlimbs)
    }

    /// The value 1 in this domain
    pub fn one(&self) -> MpInt<L> {
        MpInt::one(self.nlimbs)
    }

    /// A small constant in this domain
    pub fn from_u64(&self, value: u64) -> MpInt<L> {
        MpInt::from_u64(value, self.nlimbs)
    }

    /// Import a big-endian byte string, requiring the value to be fully
    /// reduced. This is the decode path for wire-format coordinates and
    /// imported secret scalars; the in-range comparison is constant-time
    /// in the value (only the length is public).
    pub fn from_bytes_strict(&self, bytes: &[u8]) -> Result<MpInt<L>> {
        if bytes.len() != self.bytes {
            return Err(Error::InvalidLength {
                context: "MontgomeryDomain::from_bytes_strict",
                expected: self.bytes,
                actual: bytes.len(),
            });
        }
        let v = MpInt::from_be_bytes(bytes, self.nlimbs)?;
        if !bool::from(v.ct_lt(&self.modulus)) {
            return Err(Error::InvalidEncoding {
                context: "MontgomeryDomain::from_bytes_strict",
                #[cfg(feature = "std")]
                message: "value not below modulus".into(),
            });
        }
        Ok(v)
    }

    /// Import an arbitrary-length big-endian byte string and reduce it.
    ///
    /// Accepts up to twice the domain width, which covers hash outputs and
    /// externally supplied scalars. Constant-time in the value.
    pub fn from_bytes_reduced(&self, bytes: &[u8]) -> Result<MpInt<L>> {
        let wide = MpInt::from_be_bytes(bytes, 2 * self.nlimbs)?;
        Ok(self.reduce_wide(&wide))
    }

    /// Export as fixed-width big-endian bytes
    pub fn to_bytes(&self, value: &MpInt<L>) -> Result<Vec<u8>> {
        value.to_be_bytes(self.bytes)
    }

    /// Modular addition of reduced values
    pub fn add(&self, a: &MpInt<L>, b: &MpInt<L>) -> MpInt<L> {
        let (sum, carry) = a.add_with_carry(b);
        let (diff, borrow) = sum.sub_with_borrow(&self.modulus);
        let need = carry.ct_eq(&L::ONE) | borrow.ct_eq(&L::ZERO);
        MpInt::conditional_select(&sum, &diff, need)
    }

    /// Modular subtraction of reduced values
    pub fn sub(&self, a: &MpInt<L>, b: &MpInt<L>) -> MpInt<L> {
        let (diff, borrow) = a.sub_with_borrow(b);
        let (wrapped, _) = diff.add_with_carry(&self.modulus);
        MpInt::conditional_select(&diff, &wrapped, borrow.ct_eq(&L::ONE))
    }

    /// Modular negation of a reduced value
    pub fn neg(&self, a: &MpInt<L>) -> MpInt<L> {
        self.sub(&self.zero(), a)
    }

    /// Modular multiplication of reduced values (wide accumulator path)
    pub fn mul(&self, a: &MpInt<L>, b: &MpInt<L>) -> MpInt<L> {
        let am = self.to_mont(a);
        self.redc(&am.widening_mul(b), L::mac)
    }

    /// Modular multiplication through the half-width schoolbook path.
    ///
    /// Bit-identical to [`MontgomeryDomain::mul`]; a required test property.
    pub fn mul_portable(&self, a: &MpInt<L>, b: &MpInt<L>) -> MpInt<L> {
        let am = self.redc(&a.widening_mul_portable(&self.r2), L::mac_portable);
        self.redc(&am.widening_mul_portable(b), L::mac_portable)
    }

    /// Modular squaring
    pub fn square(&self, a: &MpInt<L>) -> MpInt<L> {
        self.mul(a, a)
    }

    /// Fully reduce a single-width value that may exceed the modulus
    pub fn reduce(&self, a: &MpInt<L>) -> MpInt<L> {
        debug_assert_eq!(a.nlimbs(), self.nlimbs);
        self.from_mont(&self.to_mont(a))
    }

    /// Fully reduce a value of up to twice the domain width, division-free
    /// and constant-time: split as `hi * R + lo` and fold both halves
    /// through the Montgomery constants.
    pub fn reduce_wide(&self, a: &MpInt<L>) -> MpInt<L> {
        let n = self.nlimbs;
        debug_assert!(a.nlimbs() <= 2 * n);
        let wide = a.resized(2 * n);
        let lo = MpInt::from_limbs(wide.limbs()[..n].to_vec());
        let hi = MpInt::from_limbs(wide.limbs()[n..].to_vec());
        // hi * R mod m, plus lo mod m
        let hi_part = self.redc(&hi.widening_mul(&self.r2), L::mac);
        let lo_part = self.reduce(&lo);
        self.add(&hi_part, &lo_part)
    }

    /// Enter the Montgomery domain: a * R mod m. Crate-internal.
    pub(crate) fn to_mont(&self, a: &MpInt<L>) -> MpInt<L> {
        self.redc(&a.widening_mul(&self.r2), L::mac)
    }

    /// Leave the Montgomery domain: a * R^-1 mod m. Crate-internal.
    pub(crate) fn from_mont(&self, a: &MpInt<L>) -> MpInt<L> {
        self.redc(&a.resized(2 * self.nlimbs), L::mac)
    }

    /// Montgomery product of two in-domain values. Crate-internal.
    pub(crate) fn mont_mul(&self, a: &MpInt<L>, b: &MpInt<L>) -> MpInt<L> {
        self.redc(&a.widening_mul(b), L::mac)
    }

    /// Montgomery square of an in-domain value. Crate-internal.
    pub(crate) fn mont_square(&self, a: &MpInt<L>) -> MpInt<L> {
        self.mont_mul(a, a)
    }

    /// The Montgomery form of 1 (that is, R mod m). Crate-internal.
    pub(crate) fn mont_one(&self) -> MpInt<L> {
        self.r.clone()
    }

    /// Word-by-word Montgomery reduction (HAC 14.32) over a fixed limb
    /// count. Requires the input below m * R; the output is fully reduced.
    fn redc(&self, t: &MpInt<L>, mac: fn(L, L, L, L) -> (L, L)) -> MpInt<L> {
        let n = self.nlimbs;
        debug_assert_eq!(t.nlimbs(), 2 * n);
        let m = self.modulus.limbs();

        let mut work = vec![L::ZERO; 2 * n + 1];
        work[..2 * n].copy_from_slice(t.limbs());

        for i in 0..n {
            let q = work[i].wrapping_mul(self.n0);
            let mut carry = L::ZERO;
            for j in 0..n {
                let (lo, hi) = mac(work[i + j], q, m[j], carry);
                work[i + j] = lo;
                carry = hi;
            }
            // Fixed-length carry propagation
            for cell in work.iter_mut().take(2 * n + 1).skip(i + n) {
                let (sum, c) = L::adc(*cell, carry, L::ZERO);
                *cell = sum;
                carry = c;
            }
        }

        let result = MpInt::from_limbs(work[n..2 * n].to_vec());
        let top = work[2 * n];
        let (diff, borrow) = result.sub_with_borrow(&self.modulus);
        let need = top.ct_eq(&L::ONE) | borrow.ct_eq(&L::ZERO);
        let out = MpInt::conditional_select(&result, &diff, need);
        work.zeroize();
        out
    }

    /// Exponentiation with a public exponent (square-and-multiply).
    ///
    /// The base may be secret; the exponent's value and bit length are
    /// treated as public. Fermat inversion, square roots and residue tests
    /// all route through here with fixed, modulus-derived exponents.
    pub fn pow_vartime(&self, base: &MpInt<L>, exp: &MpInt<L>) -> MpInt<L> {
        let base_m = self.to_mont(base);
        let mut acc = self.mont_one();
        for i in (0..exp.bit_len()).rev() {
            acc = self.mont_square(&acc);
            if bool::from(exp.bit(i)) {
                acc = self.mont_mul(&acc, &base_m);
            }
        }
        self.from_mont(&acc)
    }

    /// Multiplicative inverse by Fermat exponentiation: a^(m-2) mod m.
    ///
    /// The modulus is validated prime-ish at curve load; zero has no
    /// inverse and is rejected.
    pub fn invert(&self, a: &MpInt<L>) -> Result<MpInt<L>> {
        if bool::from(a.is_zero()) {
            return Err(Error::InvalidParameter {
                context: "MontgomeryDomain::invert",
                #[cfg(feature = "std")]
                message: "zero has no inverse".into(),
            });
        }
        let two = self.from_u64(2);
        let (exp, _) = self.modulus.sub_with_borrow(&two);
        Ok(self.pow_vartime(a, &exp))
    }

    /// Blinded inversion: computes a^-1 as (a * mask)^-1 * mask, so the
    /// exponentiation never runs on the raw secret. The mask must be a
    /// uniformly random nonzero element supplied by the caller; the result
    /// equals [`MontgomeryDomain::invert`] for every valid mask, which is a
    /// required test property.
    pub fn invert_blinded(&self, a: &MpInt<L>, mask: &MpInt<L>) -> Result<MpInt<L>> {
        let masked = self.mul(a, mask);
        let mut inv_masked = self.invert(&masked)?;
        let out = self.mul(&inv_masked, mask);
        inv_masked.zeroize();
        Ok(out)
    }

    /// Square root for the two supported prime classes.
    ///
    /// For p = 3 (mod 4): a^((p+1)/4). For p = 5 (mod 8): the candidate
    /// a^((p+3)/8), corrected by the fourth root of unity 2^((p-1)/4) when
    /// needed. Both candidates are verified by squaring; `None` means the
    /// input is a non-residue. Other prime classes are not supported.
    pub fn sqrt(&self, a: &MpInt<L>) -> Result<Option<MpInt<L>>> {
        let a = self.reduce(a);
        let low = self.modulus.limbs()[0].as_u64();
        if low & 3 == 3 {
            // e = (p + 1) / 4 = (p >> 2) + 1
            let e = {
                let shifted = self.modulus.shr_bits(2);
                let (e, _) = shifted.add_with_carry(&self.one());
                e
            };
            let root = self.pow_vartime(&a, &e);
            return Ok(if self.square(&root) == a {
                Some(root)
            } else {
                None
            });
        }
        if low & 7 == 5 {
            // d = a^((p + 3) / 8), with (p + 3) / 8 = (p >> 3) + 1
            let e = {
                let shifted = self.modulus.shr_bits(3);
                let (e, _) = shifted.add_with_carry(&self.one());
                e
            };
            let d = self.pow_vartime(&a, &e);
            if self.square(&d) == a {
                return Ok(Some(d));
            }
            // Correct by i = 2^((p - 1) / 4), a fourth root of unity
            let quarter = self.modulus.shr_bits(2);
            let i = self.pow_vartime(&self.from_u64(2), &quarter);
            let root = self.mul(&d, &i);
            return Ok(if self.square(&root) == a {
                Some(root)
            } else {
                None
            });
        }
        Err(Error::Unsupported {
            feature: "square root for this prime class",
        })
    }

    /// Euler criterion: is `a` a quadratic residue mod m?
    ///
    /// Zero counts as a residue. Variable-time; for public values only.
    pub fn is_quadratic_residue(&self, a: &MpInt<L>) -> bool {
        if bool::from(a.is_zero()) {
            return true;
        }
        let half = self.modulus.shr_bits(1);
        self.pow_vartime(a, &half) == self.one()
    }

    /// Draw a uniformly distributed reduced value from the caller's entropy
    /// source: sample twice the domain width, reduce, then truncate to
    /// `truncate_bits` when that is narrower than the modulus. The wide
    /// draw keeps the modular bias below 2^-bits.
    pub fn random_reduced<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        truncate_bits: usize,
    ) -> Result<MpInt<L>> {
        let mut wide = MpInt::random(rng, 2 * self.nlimbs)?;
        let mut reduced = self.reduce_wide(&wide);
        wide.zeroize();
        if truncate_bits < self.bits {
            let truncated = reduced.truncated_to_bits(truncate_bits);
            reduced.zeroize();
            return Ok(truncated);
        }
        Ok(reduced)
    }

    /// Constant-time equality of two reduced values
    pub fn ct_eq(&self, a: &MpInt<L>, b: &MpInt<L>) -> Choice {
        a.ct_eq(b)
    }
}
