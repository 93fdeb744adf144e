//! Elliptic-curve Diffie-Hellman key agreement
//!
//! An [`EcdhSuite`] binds the [`eckit_api::KeyAgreement`] trait to one
//! runtime-loaded curve. All three curve shapes are supported: Weierstrass
//! and Edwards suites exchange full affine points, the Montgomery suite
//! exchanges x-only points with the `0x06` encoding tag.
//!
//! ```
//! use eckit_ecdh::EcdhSuite;
//! use eckit_api::KeyAgreement;
//!
//! let suite: EcdhSuite = EcdhSuite::new(&eckit_params::NIST_P256).unwrap();
//! let mut rng = rand::rngs::OsRng;
//! let (alice_pub, alice_sec) = suite.keypair(&mut rng).unwrap();
//! let (bob_pub, bob_sec) = suite.keypair(&mut rng).unwrap();
//! let z1 = suite.shared_secret(&alice_sec, &bob_pub).unwrap();
//! let z2 = suite.shared_secret(&bob_sec, &alice_pub).unwrap();
//! assert_eq!(z1.as_ref(), z2.as_ref());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;


use eckit_algorithms::bignum::{Limb, MpInt};
use eckit_algorithms::ec::{Curve, CurvePoint};
use eckit_api::error::{Error, Result, ResultExt};
use eckit_api::KeyAgreement;
use eckit_common::SecretVec;
use eckit_params::CurveParamsRecord;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A validated public key: the decoded point and its canonical encoding
#[derive(Clone, Debug, PartialEq)]
pub struct EcdhPublicKey<L: Limb = u64> {
    point: CurvePoint<L>,
    encoded: Vec<u8>,
}

impl<L: Limb> EcdhPublicKey<L> {
    /// The canonical byte encoding (uncompressed, or x-only for
    /// Montgomery-shape curves)
    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }

    /// The decoded curve point
    pub fn point(&self) -> &CurvePoint<L> {
        &self.point
    }
}

/// A private scalar, reduced modulo the curve order
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EcdhSecretKey<L: Limb = u64> {
    scalar: MpInt<L>,
}

impl<L: Limb> core::fmt::Debug for EcdhSecretKey<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "EcdhSecretKey([REDACTED])")
    }
}

/// Key agreement over one runtime-selected curve
pub struct EcdhSuite<L: Limb = u64> {
    curve: Curve<L>,
    name: &'static str,
}

fn suite_name(curve_name: &str) -> &'static str {
    match curve_name {
        "NIST-P256" => "ECDH-NIST-P256",
        "edwards25519" => "ECDH-edwards25519",
        "curve25519" => "ECDH-curve25519",
        _ => "ECDH",
    }
}

impl<L: Limb> EcdhSuite<L> {
    /// Load and validate a curve record, binding it to this suite
    pub fn new(record: &CurveParamsRecord) -> Result<Self> {
        let curve = Curve::from_record(record)?;
        let name = suite_name(record.name);
        Ok(EcdhSuite { curve, name })
    }

    /// The underlying curve
    pub fn curve(&self) -> &Curve<L> {
        &self.curve
    }

    /// Export a secret key as normalized fixed-width big-endian bytes
    pub fn secret_key_bytes(&self, secret_key: &EcdhSecretKey<L>) -> Result<SecretVec> {
        Ok(SecretVec::new(
            secret_key
                .scalar
                .to_be_bytes(self.curve.scalar_byte_len())?,
        ))
    }

    /// Draw a uniformly distributed nonzero scalar below the order
    fn random_scalar<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<MpInt<L>> {
        let order = self.curve.order();
        let truncate = 2 * self.curve.security_bits() as usize;
        // Zero occurs with probability about 2^-bits; redrawing keeps the
        // distribution uniform over the nonzero scalars.
        loop {
            let scalar = order.random_reduced(rng, truncate)?;
            if !bool::from(scalar.is_zero()) {
                return Ok(scalar);
            }
        }
    }

    fn public_from_scalar(&self, scalar: &MpInt<L>) -> Result<EcdhPublicKey<L>> {
        let point = self.curve.scalar_mul(self.curve.generator(), scalar)?;
        let encoded = self.curve.to_bytes(&point, false)?;
        Ok(EcdhPublicKey { point, encoded })
    }
}

impl<L: Limb> KeyAgreement for EcdhSuite<L> {
    type PublicKey = EcdhPublicKey<L>;
    type SecretKey = EcdhSecretKey<L>;
    type SharedSecret = SecretVec;

    fn name(&self) -> &'static str {
        self.name
    }

    fn keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey)> {
        let scalar = self.random_scalar(rng)?;
        let public = self.public_from_scalar(&scalar)?;
        Ok((public, EcdhSecretKey { scalar }))
    }

    fn keypair_from_scalar(&self, scalar: &[u8]) -> Result<(Self::PublicKey, Self::SecretKey)> {
        let reduced = self.curve.order().from_bytes_reduced(scalar)?;
        if bool::from(reduced.is_zero()) {
            return Err(Error::InvalidKey {
                context: "EcdhSuite::keypair_from_scalar",
                #[cfg(feature = "std")]
                message: "scalar reduces to zero".into(),
            });
        }
        let public = self.public_from_scalar(&reduced)?;
        Ok((public, EcdhSecretKey { scalar: reduced }))
    }

    fn public_key_from_bytes(&self, bytes: &[u8]) -> Result<Self::PublicKey> {
        let point = self
            .curve
            .from_bytes(bytes)
            .with_context("EcdhSuite::public_key_from_bytes")?;
        Ok(EcdhPublicKey {
            point,
            encoded: bytes.to_vec(),
        })
    }

    fn secret_key_from_bytes(&self, bytes: &[u8]) -> Result<Self::SecretKey> {
        let scalar = self
            .curve
            .order()
            .from_bytes_strict(bytes)
            .with_context("EcdhSuite::secret_key_from_bytes")?;
        if bool::from(scalar.is_zero()) {
            return Err(Error::InvalidKey {
                context: "EcdhSuite::secret_key_from_bytes",
                #[cfg(feature = "std")]
                message: "zero scalar".into(),
            });
        }
        Ok(EcdhSecretKey { scalar })
    }

    fn validate_public_key(&self, public_key: &Self::PublicKey) -> Result<()> {
        self.curve.clear_cofactor(&public_key.point)?;
        Ok(())
    }

    fn shared_secret(
        &self,
        secret_key: &Self::SecretKey,
        public_key: &Self::PublicKey,
    ) -> Result<Self::SharedSecret> {
        let product = self
            .curve
            .scalar_mul(&public_key.point, &secret_key.scalar)?;
        match product.x() {
            Some(x) => {
                let mut bytes = x.to_be_bytes(self.curve.field_byte_len())?;
                let secret = SecretVec::from_slice(&bytes);
                bytes.zeroize();
                Ok(secret)
            }
            None => Err(Error::InvalidKey {
                context: "EcdhSuite::shared_secret",
                #[cfg(feature = "std")]
                message: "agreement produced the identity".into(),
            }),
        }
    }
}
