//! The curve-group engine
//!
//! A [`Curve`] is built once from a declarative [`CurveParamsRecord`],
//! validated in full (modulus and order primality screens, coefficient
//! nonsingularity, generator on-curve and order checks, cofactor
//! derivation), and shared read-only from then on. The record's shape tag
//! selects one group-law implementation (short Weierstrass, twisted
//! Edwards or x-only Montgomery) at load time, so per-call code never branches
//! on shape again.
//!
//! Points cross this engine's boundary in affine form with plain reduced
//! coordinates; the projective and Montgomery-domain representations the
//! laws use internally never escape.

pub mod edwards;
pub mod montgomery;
pub mod weierstrass;


use crate::bignum::{Limb, MpInt};
use crate::error::{Error, Result};
use crate::field::MontgomeryDomain;
use crate::hash::HashAlg;
use core::cmp::Ordering;
pub use eckit_params::{CurveParamsRecord, CurveShape};

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{boxed::Box, vec::Vec};

/// Encoding tag for an uncompressed point: `0x04 || x || y`
pub const TAG_UNCOMPRESSED: u8 = 0x04;
/// Encoding tag for a compressed point with even y: `0x02 || x`
pub const TAG_COMPRESSED_EVEN: u8 = 0x02;
/// Encoding tag for a compressed point with odd y: `0x03 || x`
pub const TAG_COMPRESSED_ODD: u8 = 0x03;
/// Encoding tag for an x-only Montgomery-shape point: `0x06 || x`
pub const TAG_X_ONLY: u8 = 0x06;

/// A point on a curve, in the form the curve's shape supports.
///
/// Coordinates are plain (non-Montgomery) fully reduced residues. The
/// x-only variant appears only on Montgomery-shape curves, which carry no
/// y-coordinate.
#[derive(Clone, Debug)]
pub enum CurvePoint<L: Limb> {
    /// The group identity
    Infinity,
    /// An affine point (Weierstrass and Edwards shapes)
    Affine {
        /// x-coordinate, fully reduced
        x: MpInt<L>,
        /// y-coordinate, fully reduced
        y: MpInt<L>,
    },
    /// An x-only point (Montgomery shape)
    XOnly {
        /// x-coordinate, fully reduced
        x: MpInt<L>,
    },
}

impl<L: Limb> CurvePoint<L> {
    /// Is this the group identity?
    pub fn is_infinity(&self) -> bool {
        matches!(self, CurvePoint::Infinity)
    }

    /// The x-coordinate, if the point has one
    pub fn x(&self) -> Option<&MpInt<L>> {
        match self {
            CurvePoint::Infinity => None,
            CurvePoint::Affine { x, .. } | CurvePoint::XOnly { x } => Some(x),
        }
    }
}

impl<L: Limb> PartialEq for CurvePoint<L> {
    /// Structural equality; points are public values
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CurvePoint::Infinity, CurvePoint::Infinity) => true,
            (CurvePoint::Affine { x: ax, y: ay }, CurvePoint::Affine { x: bx, y: by }) => {
                ax == bx && ay == by
            }
            (CurvePoint::XOnly { x: ax }, CurvePoint::XOnly { x: bx }) => ax == bx,
            _ => false,
        }
    }
}

impl<L: Limb> Eq for CurvePoint<L> {}

/// One curve shape's group law behind a uniform interface.
///
/// Implementations own their field context and Montgomery-form curve
/// coefficients; they take and return plain affine points.
pub(crate) trait GroupLaw<L: Limb>: Send + Sync {
    /// Point doubling
    fn double(&self, p: &CurvePoint<L>) -> Result<CurvePoint<L>>;

    /// Point addition
    fn add(&self, p: &CurvePoint<L>, q: &CurvePoint<L>) -> Result<CurvePoint<L>>;

    /// Constant-time scalar multiplication over exactly `bits` iterations,
    /// independent of the scalar's value
    fn scalar_mul(&self, p: &CurvePoint<L>, k: &MpInt<L>, bits: usize) -> Result<CurvePoint<L>>;

    /// Variable-time scalar multiplication for public multipliers
    fn scalar_mul_vartime(&self, p: &CurvePoint<L>, k: &MpInt<L>) -> Result<CurvePoint<L>>;

    /// Variable-time a*P + b*Q for public inputs (signature verification)
    fn mul2_vartime(
        &self,
        p: &CurvePoint<L>,
        q: &CurvePoint<L>,
        a: &MpInt<L>,
        b: &MpInt<L>,
    ) -> Result<CurvePoint<L>>;

    /// Does the point satisfy the curve equation?
    fn is_on_curve(&self, p: &CurvePoint<L>) -> bool;

    /// Recover the y-coordinate with the requested parity from x, for
    /// compressed decoding
    fn recover_y(&self, x: &MpInt<L>, y_odd: bool) -> Result<MpInt<L>>;
}

/// One fully validated, immutable curve instantiation.
///
/// Construction happens once per curve; afterwards the value is read-only
/// and safely shared across concurrent callers (`Send + Sync`).
pub struct Curve<L: Limb> {
    name: &'static str,
    shape: CurveShape,
    field: MontgomeryDomain<L>,
    order: MontgomeryDomain<L>,
    generator: CurvePoint<L>,
    cofactor: u32,
    cofactor_multiplier: MpInt<L>,
    security_bits: u32,
    hash: HashAlg,
    key_len: usize,
    law: Box<dyn GroupLaw<L>>,
}

impl<L: Limb> Curve<L> {
    /// Load and validate a curve record.
    ///
    /// Every rejection is a parameter error: even/composite-looking modulus
    /// or order, singular coefficients, a generator that is off-curve or of
    /// the wrong order, or a cofactor that does not match the derivation
    /// `floor((p + 2^((pbits+4)/2)) / n)`.
    pub fn from_record(record: &CurveParamsRecord) -> Result<Self> {
        let field = domain_from_hex::<L>(record.p, "curve modulus")?;
        let order = domain_from_hex::<L>(record.n, "curve order")?;
        if !miller_rabin(&field) {
            return Err(param_err("curve modulus fails the primality screen"));
        }
        if !miller_rabin(&order) {
            return Err(param_err("curve order fails the primality screen"));
        }

        let a = signed_coefficient(&field, record.a);
        let law: Box<dyn GroupLaw<L>> = match record.shape {
            CurveShape::Weierstrass => {
                let b = coefficient_from_hex(&field, record.b_or_d)?;
                // Nonsingularity: 4a^3 + 27b^2 != 0
                let a3 = field.mul(&field.square(&a), &a);
                let disc = field.add(
                    &field.mul(&field.from_u64(4), &a3),
                    &field.mul(&field.from_u64(27), &field.square(&b)),
                );
                if bool::from(disc.is_zero()) {
                    return Err(param_err("singular Weierstrass coefficients"));
                }
                Box::new(weierstrass::WeierstrassLaw::new(field.clone(), &a, &b))
            }
            CurveShape::Edwards => {
                let d = coefficient_from_hex(&field, record.b_or_d)?;
                if bool::from(a.is_zero()) || bool::from(d.is_zero()) || a == d {
                    return Err(param_err("singular Edwards coefficients"));
                }
                Box::new(edwards::EdwardsLaw::new(field.clone(), &a, &d))
            }
            CurveShape::Montgomery => {
                // A^2 != 4
                if field.square(&a) == field.from_u64(4) {
                    return Err(param_err("singular Montgomery coefficient"));
                }
                Box::new(montgomery::MontgomeryLaw::new(field.clone(), &a)?)
            }
        };

        let generator = match record.shape {
            CurveShape::Montgomery => CurvePoint::XOnly {
                x: field.from_bytes_strict(&decode_hex(record.gx, field.byte_len())?)?,
            },
            _ => CurvePoint::Affine {
                x: field.from_bytes_strict(&decode_hex(record.gx, field.byte_len())?)?,
                y: field.from_bytes_strict(&decode_hex(record.gy, field.byte_len())?)?,
            },
        };
        if !law.is_on_curve(&generator) {
            return Err(param_err("generator is not on the curve"));
        }
        if !law
            .scalar_mul_vartime(&generator, &order.modulus().resized(order.nlimbs()))?
            .is_infinity()
        {
            return Err(param_err("generator order does not divide the group order"));
        }

        // Cofactor derivation: floor((p + 2^((pbits+4)/2)) / n)
        let wide = field.nlimbs() + 1;
        let shift = (field.bits() + 4) / 2;
        let mut numerator = field.modulus().resized(wide);
        let two_pow = MpInt::<L>::one(wide).shl_bits(shift);
        let (sum, carry) = numerator.add_with_carry(&two_pow);
        if carry != L::ZERO {
            return Err(param_err("cofactor derivation overflow"));
        }
        numerator = sum;
        let (quotient, _) = numerator.div_rem_vartime(&order.modulus().resized(wide))?;
        if quotient.cmp_vartime(&MpInt::from_u64(u64::from(record.h), wide)) != Ordering::Equal {
            return Err(param_err("cofactor does not match the derivation"));
        }
        let cofactor_multiplier = quotient.resized(order.nlimbs());

        let (hash, key_len) = match record.security_bits {
            128 => (HashAlg::Sha256, 16),
            192 => (HashAlg::Sha384, 24),
            256 => (HashAlg::Sha512, 32),
            _ => return Err(param_err("unsupported security level")),
        };

        Ok(Curve {
            name: record.name,
            shape: record.shape,
            field,
            order,
            generator,
            cofactor: record.h,
            cofactor_multiplier,
            security_bits: record.security_bits,
            hash,
            key_len,
            law,
        })
    }

    /// Curve name from the record, e.g. `"NIST-P256"`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Equation shape
    pub fn shape(&self) -> CurveShape {
        self.shape
    }

    /// Field arithmetic context (plain-value operations only)
    pub fn field(&self) -> &MontgomeryDomain<L> {
        &self.field
    }

    /// Scalar arithmetic context modulo the group order
    pub fn order(&self) -> &MontgomeryDomain<L> {
        &self.order
    }

    /// The base point G
    pub fn generator(&self) -> &CurvePoint<L> {
        &self.generator
    }

    /// Cofactor h from the record
    pub fn cofactor(&self) -> u32 {
        self.cofactor
    }

    /// Security level in bits
    pub fn security_bits(&self) -> u32 {
        self.security_bits
    }

    /// Hash algorithm bound to this curve's security level
    pub fn hash(&self) -> HashAlg {
        self.hash
    }

    /// Symmetric key width in bytes bound to this curve's security level
    pub fn key_len(&self) -> usize {
        self.key_len
    }

    /// Fixed width of an encoded coordinate
    pub fn field_byte_len(&self) -> usize {
        self.field.byte_len()
    }

    /// Fixed width of an encoded scalar or signature component
    pub fn scalar_byte_len(&self) -> usize {
        self.order.byte_len()
    }

    /// Byte length of an encoded public point as produced by
    /// [`Curve::to_bytes`] with `compressed = false`
    pub fn point_byte_len(&self) -> usize {
        match self.shape {
            CurveShape::Montgomery => 1 + self.field.byte_len(),
            _ => 1 + 2 * self.field.byte_len(),
        }
    }

    /// Point doubling
    pub fn double(&self, p: &CurvePoint<L>) -> Result<CurvePoint<L>> {
        self.law.double(p)
    }

    /// Point addition
    pub fn add(&self, p: &CurvePoint<L>, q: &CurvePoint<L>) -> Result<CurvePoint<L>> {
        self.law.add(p, q)
    }

    /// Constant-time scalar multiplication.
    ///
    /// Runs a fixed double-and-add pattern over the order's full bit length
    /// regardless of the scalar's value; this is a correctness requirement
    /// for secret scalars, not an optimization.
    pub fn scalar_mul(&self, p: &CurvePoint<L>, k: &MpInt<L>) -> Result<CurvePoint<L>> {
        self.law.scalar_mul(p, k, self.order.bits())
    }

    /// Variable-time scalar multiplication for public multipliers
    pub fn scalar_mul_vartime(&self, p: &CurvePoint<L>, k: &MpInt<L>) -> Result<CurvePoint<L>> {
        self.law.scalar_mul_vartime(p, k)
    }

    /// Variable-time a*P + b*Q for public inputs
    pub fn mul2_vartime(
        &self,
        p: &CurvePoint<L>,
        q: &CurvePoint<L>,
        a: &MpInt<L>,
        b: &MpInt<L>,
    ) -> Result<CurvePoint<L>> {
        self.law.mul2_vartime(p, q, a, b)
    }

    /// Force a point into the prime-order subgroup.
    ///
    /// With k the load-time cofactor derivation: double while k is even
    /// (halving it), multiply by the remaining odd part, and reject the
    /// identity. Together with the on-curve check at decode time this
    /// defeats small-subgroup and invalid-curve attacks.
    pub fn clear_cofactor(&self, p: &CurvePoint<L>) -> Result<CurvePoint<L>> {
        let mut k = self.cofactor_multiplier.clone();
        let mut q = p.clone();
        while !bool::from(k.is_odd()) {
            q = self.law.double(&q)?;
            k = k.shr_bits(1);
        }
        if k.cmp_vartime(&MpInt::one(k.nlimbs())) != Ordering::Equal {
            q = self.law.scalar_mul_vartime(&q, &k)?;
        }
        if q.is_infinity() {
            return Err(Error::InvalidKey {
                context: "Curve::clear_cofactor",
                #[cfg(feature = "std")]
                message: "point lies in a small subgroup".into(),
            });
        }
        Ok(q)
    }

    /// Encode a point.
    ///
    /// Weierstrass and Edwards shapes: `0x04 || x || y` uncompressed, or
    /// `0x02/0x03 || x` compressed with the prefix carrying y's parity.
    /// Montgomery shape: always `0x06 || x`. The identity has no encoding.
    pub fn to_bytes(&self, p: &CurvePoint<L>, compressed: bool) -> Result<Vec<u8>> {
        let fb = self.field.byte_len();
        match p {
            CurvePoint::Infinity => Err(Error::InvalidParameter {
                context: "Curve::to_bytes",
                #[cfg(feature = "std")]
                message: "the identity has no encoding".into(),
            }),
            CurvePoint::XOnly { x } => {
                let mut out = Vec::with_capacity(1 + fb);
                out.push(TAG_X_ONLY);
                out.extend_from_slice(&x.to_be_bytes(fb)?);
                Ok(out)
            }
            CurvePoint::Affine { x, y } => {
                if compressed {
                    let tag = if bool::from(y.is_odd()) {
                        TAG_COMPRESSED_ODD
                    } else {
                        TAG_COMPRESSED_EVEN
                    };
                    let mut out = Vec::with_capacity(1 + fb);
                    out.push(tag);
                    out.extend_from_slice(&x.to_be_bytes(fb)?);
                    Ok(out)
                } else {
                    let mut out = Vec::with_capacity(1 + 2 * fb);
                    out.push(TAG_UNCOMPRESSED);
                    out.extend_from_slice(&x.to_be_bytes(fb)?);
                    out.extend_from_slice(&y.to_be_bytes(fb)?);
                    Ok(out)
                }
            }
        }
    }

    /// Decode and validate a point.
    ///
    /// Rejects unknown tags, wrong lengths, out-of-range coordinates and
    /// points that fail the curve equation: an explicit decoding failure,
    /// never a silently wrong point.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<CurvePoint<L>> {
        let fb = self.field.byte_len();
        if bytes.is_empty() {
            return Err(decode_err("empty point encoding"));
        }
        match (bytes[0], self.shape) {
            (TAG_X_ONLY, CurveShape::Montgomery) => {
                if bytes.len() != 1 + fb {
                    return Err(Error::InvalidLength {
                        context: "Curve::from_bytes",
                        expected: 1 + fb,
                        actual: bytes.len(),
                    });
                }
                let x = self.field.from_bytes_strict(&bytes[1..])?;
                let p = CurvePoint::XOnly { x };
                if !self.law.is_on_curve(&p) {
                    return Err(decode_err("x-coordinate is not on the curve"));
                }
                Ok(p)
            }
            (TAG_UNCOMPRESSED, CurveShape::Weierstrass | CurveShape::Edwards) => {
                if bytes.len() != 1 + 2 * fb {
                    return Err(Error::InvalidLength {
                        context: "Curve::from_bytes",
                        expected: 1 + 2 * fb,
                        actual: bytes.len(),
                    });
                }
                let x = self.field.from_bytes_strict(&bytes[1..1 + fb])?;
                let y = self.field.from_bytes_strict(&bytes[1 + fb..])?;
                let p = CurvePoint::Affine { x, y };
                if !self.law.is_on_curve(&p) {
                    return Err(decode_err("point is not on the curve"));
                }
                Ok(p)
            }
            (TAG_COMPRESSED_EVEN | TAG_COMPRESSED_ODD, CurveShape::Weierstrass | CurveShape::Edwards) => {
                if bytes.len() != 1 + fb {
                    return Err(Error::InvalidLength {
                        context: "Curve::from_bytes",
                        expected: 1 + fb,
                        actual: bytes.len(),
                    });
                }
                let x = self.field.from_bytes_strict(&bytes[1..])?;
                let y = self
                    .law
                    .recover_y(&x, bytes[0] == TAG_COMPRESSED_ODD)
                    .map_err(|_| decode_err("x-coordinate is not on the curve"))?;
                Ok(CurvePoint::Affine { x, y })
            }
            _ => Err(decode_err("unknown point encoding tag")),
        }
    }
}

fn param_err(reason: &'static str) -> Error {
    #[cfg(not(feature = "std"))]
    let _ = reason;
    Error::InvalidParameter {
        context: "Curve::from_record",
        #[cfg(feature = "std")]
        message: reason.into(),
    }
}

fn decode_err(reason: &'static str) -> Error {
    #[cfg(not(feature = "std"))]
    let _ = reason;
    Error::InvalidEncoding {
        context: "Curve::from_bytes",
        #[cfg(feature = "std")]
        message: reason.into(),
    }
}

fn decode_hex(s: &str, expected_len: usize) -> Result<Vec<u8>> {
    let bytes = hex::decode(s).map_err(|_| param_err("malformed hex constant"))?;
    if bytes.len() != expected_len {
        return Err(Error::InvalidLength {
            context: "Curve::from_record",
            expected: expected_len,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

fn domain_from_hex<L: Limb>(s: &str, what: &'static str) -> Result<MontgomeryDomain<L>> {
    let bytes = hex::decode(s).map_err(|_| param_err(what))?;
    let nlimbs = (bytes.len() * 8).div_ceil(L::BITS);
    let value = MpInt::from_be_bytes(&bytes, nlimbs.max(1))?;
    MontgomeryDomain::new(&value)
}

fn coefficient_from_hex<L: Limb>(field: &MontgomeryDomain<L>, s: &str) -> Result<MpInt<L>> {
    field.from_bytes_strict(&decode_hex(s, field.byte_len())?)
}

fn signed_coefficient<L: Limb>(field: &MontgomeryDomain<L>, a: i64) -> MpInt<L> {
    if a >= 0 {
        field.reduce(&field.from_u64(a as u64))
    } else {
        field.neg(&field.reduce(&field.from_u64(a.unsigned_abs())))
    }
}

/// Deterministic Miller-Rabin screen with fixed small-prime bases.
///
/// A sanity check on trusted configuration data, not a proof of primality
/// for adversarial input.
fn miller_rabin<L: Limb>(domain: &MontgomeryDomain<L>) -> bool {
    const BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
    let one = domain.one();
    let (m_minus_1, _) = domain.modulus().sub_with_borrow(&one);
    let mut s = 0usize;
    while !bool::from(m_minus_1.bit(s)) {
        s += 1;
    }
    let q = m_minus_1.shr_bits(s);
    for &base in &BASES {
        let a = domain.from_u64(base);
        if a.cmp_vartime(&m_minus_1) != Ordering::Less || bool::from(a.is_zero()) {
            continue;
        }
        let mut x = domain.pow_vartime(&a, &q);
        if x == one || x == m_minus_1 {
            continue;
        }
        let mut witness = true;
        for _ in 1..s {
            x = domain.square(&x);
            if x == m_minus_1 {
                witness = false;
                break;
            }
        }
        if witness {
            return false;
        }
    }
    true
}
