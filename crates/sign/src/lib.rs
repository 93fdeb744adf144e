//! ECDSA signatures over runtime-loaded curves
//!
//! An [`EcdsaSuite`] binds the [`eckit_api::SignatureScheme`] trait to one
//! curve carrying full affine points (Weierstrass or Edwards shape);
//! Montgomery-shape curves are x-only and cannot host this scheme.
//!
//! Signatures are the fixed-width concatenation `C || D`, each component
//! exactly the curve's scalar width in big-endian bytes. The randomized
//! signing path blinds the nonce inversion and retries on the (negligible)
//! zero-component outcomes; the fixed-nonce path is for deterministic
//! constructions and known-answer tests, where a degenerate outcome is an
//! error because retrying with the same nonce cannot make progress.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

#[cfg(test)]
mod tests;

use eckit_algorithms::bignum::{Limb, MpInt};
use eckit_algorithms::ec::{Curve, CurvePoint, CurveShape};
use eckit_api::error::{validate, Error, Result, ResultExt};
use eckit_api::SignatureScheme;
use eckit_params::CurveParamsRecord;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A verification key: the decoded point and its canonical encoding
#[derive(Clone, Debug, PartialEq)]
pub struct EcdsaPublicKey<L: Limb = u64> {
    point: CurvePoint<L>,
    encoded: Vec<u8>,
}

impl<L: Limb> EcdsaPublicKey<L> {
    /// The canonical uncompressed byte encoding
    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }
}

/// A signing key: a private scalar reduced modulo the curve order
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EcdsaSecretKey<L: Limb = u64> {
    scalar: MpInt<L>,
}

impl<L: Limb> core::fmt::Debug for EcdsaSecretKey<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "EcdsaSecretKey([REDACTED])")
    }
}

/// A signature: `C || D`, two equal fixed-width big-endian components
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcdsaSignature {
    bytes: Vec<u8>,
}

impl EcdsaSignature {
    /// The wire encoding
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// ECDSA over one runtime-selected curve
pub struct EcdsaSuite<L: Limb = u64> {
    curve: Curve<L>,
    name: &'static str,
}

fn suite_name(curve_name: &str) -> &'static str {
    match curve_name {
        "NIST-P256" => "ECDSA-NIST-P256",
        "edwards25519" => "ECDSA-edwards25519",
        _ => "ECDSA",
    }
}

impl<L: Limb> EcdsaSuite<L> {
    /// Load and validate a curve record, binding it to this suite.
    ///
    /// Montgomery-shape records are rejected: signing needs full points.
    pub fn new(record: &CurveParamsRecord) -> Result<Self> {
        if record.shape == CurveShape::Montgomery {
            return Err(Error::Unsupported {
                feature: "ECDSA on x-only Montgomery curves",
            });
        }
        let curve = Curve::from_record(record)?;
        Ok(EcdsaSuite {
            curve,
            name: suite_name(record.name),
        })
    }

    /// The underlying curve
    pub fn curve(&self) -> &Curve<L> {
        &self.curve
    }

    /// Wire width of a signature: two scalar-width components
    pub fn signature_len(&self) -> usize {
        2 * self.curve.scalar_byte_len()
    }

    /// Reconstruct a signature value from its wire encoding.
    ///
    /// Only the length is checked here; range checks on the components
    /// happen during verification.
    pub fn signature_from_bytes(&self, bytes: &[u8]) -> Result<EcdsaSignature> {
        validate::length("EcdsaSuite::signature_from_bytes", bytes.len(), self.signature_len())?;
        Ok(EcdsaSignature {
            bytes: bytes.to_vec(),
        })
    }

    /// Decode a signing key from fixed-width scalar bytes
    pub fn secret_key_from_bytes(&self, bytes: &[u8]) -> Result<EcdsaSecretKey<L>> {
        let scalar = self
            .curve
            .order()
            .from_bytes_strict(bytes)
            .with_context("EcdsaSuite::secret_key_from_bytes")?;
        if bool::from(scalar.is_zero()) {
            return Err(Error::InvalidKey {
                context: "EcdsaSuite::secret_key_from_bytes",
                #[cfg(feature = "std")]
                message: "zero scalar".into(),
            });
        }
        Ok(EcdsaSecretKey { scalar })
    }

    /// Derive the keypair for caller-supplied scalar bytes (reduced mod the
    /// curve order, zero rejected)
    pub fn keypair_from_scalar(
        &self,
        scalar: &[u8],
    ) -> Result<(EcdsaPublicKey<L>, EcdsaSecretKey<L>)> {
        let reduced = self.curve.order().from_bytes_reduced(scalar)?;
        if bool::from(reduced.is_zero()) {
            return Err(Error::InvalidKey {
                context: "EcdsaSuite::keypair_from_scalar",
                #[cfg(feature = "std")]
                message: "scalar reduces to zero".into(),
            });
        }
        let public = self.public_from_scalar(&reduced)?;
        Ok((public, EcdsaSecretKey { scalar: reduced }))
    }

    /// Decode and validate a verification key
    pub fn public_key_from_bytes(&self, bytes: &[u8]) -> Result<EcdsaPublicKey<L>> {
        let point = self
            .curve
            .from_bytes(bytes)
            .with_context("EcdsaSuite::public_key_from_bytes")?;
        self.curve.clear_cofactor(&point)?;
        Ok(EcdsaPublicKey {
            point,
            encoded: bytes.to_vec(),
        })
    }

    fn public_from_scalar(&self, scalar: &MpInt<L>) -> Result<EcdsaPublicKey<L>> {
        let point = self.curve.scalar_mul(self.curve.generator(), scalar)?;
        let encoded = self.curve.to_bytes(&point, false)?;
        Ok(EcdsaPublicKey { point, encoded })
    }

    /// Hash the message and fold the leftmost scalar-width bytes into an
    /// integer mod the order (FIPS 186 style, at byte granularity)
    fn message_scalar(&self, message: &[u8]) -> Result<MpInt<L>> {
        let digest = self.curve.hash().digest(&[message]);
        let take = digest.len().min(self.curve.scalar_byte_len());
        self.curve.order().from_bytes_reduced(&digest[..take])
    }

    /// Draw a uniformly distributed nonzero scalar below the order
    fn random_scalar<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<MpInt<L>> {
        let order = self.curve.order();
        let truncate = 2 * self.curve.security_bits() as usize;
        loop {
            let scalar = order.random_reduced(rng, truncate)?;
            if !bool::from(scalar.is_zero()) {
                return Ok(scalar);
            }
        }
    }

    /// One signing attempt with the given nonce. Returns `None` when a
    /// component degenerates to zero.
    ///
    /// `mask` enables blinded inversion of the nonce; the randomized path
    /// supplies a fresh mask, the fixed-nonce path inverts plainly.
    fn sign_attempt(
        &self,
        f: &MpInt<L>,
        secret: &MpInt<L>,
        nonce: &MpInt<L>,
        mask: Option<&MpInt<L>>,
    ) -> Result<Option<EcdsaSignature>> {
        let order = self.curve.order();
        let point = self.curve.scalar_mul(self.curve.generator(), nonce)?;
        let x = match point.x() {
            Some(x) => x,
            None => return Ok(None),
        };
        let c = order.from_bytes_reduced(&x.to_be_bytes(self.curve.field_byte_len())?)?;
        if bool::from(c.is_zero()) {
            return Ok(None);
        }

        let mut nonce_inv = match mask {
            Some(mask) => order.invert_blinded(nonce, mask)?,
            None => order.invert(nonce)?,
        };
        let mut sc = order.mul(secret, &c);
        let d = order.mul(&nonce_inv, &order.add(f, &sc));
        nonce_inv.zeroize();
        sc.zeroize();
        if bool::from(d.is_zero()) {
            return Ok(None);
        }

        let width = self.curve.scalar_byte_len();
        let mut bytes = c.to_be_bytes(width)?;
        bytes.extend_from_slice(&d.to_be_bytes(width)?);
        Ok(Some(EcdsaSignature { bytes }))
    }
}

impl<L: Limb> SignatureScheme for EcdsaSuite<L> {
    type PublicKey = EcdsaPublicKey<L>;
    type SecretKey = EcdsaSecretKey<L>;
    type SignatureData = EcdsaSignature;

    fn name(&self) -> &'static str {
        self.name
    }

    fn keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey)> {
        let scalar = self.random_scalar(rng)?;
        let public = self.public_from_scalar(&scalar)?;
        Ok((public, EcdsaSecretKey { scalar }))
    }

    fn sign<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        message: &[u8],
        secret_key: &Self::SecretKey,
    ) -> Result<Self::SignatureData> {
        let f = self.message_scalar(message)?;
        loop {
            let mut nonce = self.random_scalar(rng)?;
            let mut mask = self.random_scalar(rng)?;
            let attempt = self.sign_attempt(&f, &secret_key.scalar, &nonce, Some(&mask));
            nonce.zeroize();
            mask.zeroize();
            if let Some(signature) = attempt? {
                return Ok(signature);
            }
            // Zero component, probability about 2^-256: redraw the nonce.
        }
    }

    fn sign_with_nonce(
        &self,
        message: &[u8],
        secret_key: &Self::SecretKey,
        nonce: &[u8],
    ) -> Result<Self::SignatureData> {
        let f = self.message_scalar(message)?;
        let mut nonce = self.curve.order().from_bytes_reduced(nonce)?;
        if bool::from(nonce.is_zero()) {
            return Err(Error::InvalidParameter {
                context: "EcdsaSuite::sign_with_nonce",
                #[cfg(feature = "std")]
                message: "nonce reduces to zero".into(),
            });
        }
        let attempt = self.sign_attempt(&f, &secret_key.scalar, &nonce, None);
        nonce.zeroize();
        attempt?.ok_or(Error::InvalidParameter {
            context: "EcdsaSuite::sign_with_nonce",
            #[cfg(feature = "std")]
            message: "nonce produces a degenerate signature".into(),
        })
    }

    fn verify(
        &self,
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()> {
        let invalid = || Error::InvalidSignature {
            context: "EcdsaSuite::verify",
            #[cfg(feature = "std")]
            message: "signature rejected".into(),
        };

        let width = self.curve.scalar_byte_len();
        validate::length("EcdsaSuite::verify", signature.bytes.len(), 2 * width)?;
        let order = self.curve.order();

        // Strict range: zero or >= order is rejected, not reduced
        let c = order
            .from_bytes_strict(&signature.bytes[..width])
            .map_err(|_| invalid())?;
        let d = order
            .from_bytes_strict(&signature.bytes[width..])
            .map_err(|_| invalid())?;
        if bool::from(c.is_zero()) || bool::from(d.is_zero()) {
            return Err(invalid());
        }

        let f = self.message_scalar(message)?;
        let d_inv = order.invert(&d)?;
        let u1 = order.mul(&f, &d_inv);
        let u2 = order.mul(&c, &d_inv);

        let r = self
            .curve
            .mul2_vartime(self.curve.generator(), &public_key.point, &u1, &u2)?;
        let x = r.x().ok_or_else(invalid)?;
        let expected = order.from_bytes_reduced(&x.to_be_bytes(self.curve.field_byte_len())?)?;
        if bool::from(order.ct_eq(&expected, &c)) {
            Ok(())
        } else {
            Err(invalid())
        }
    }
}
