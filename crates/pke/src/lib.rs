//! ECIES hybrid encryption over runtime-loaded curves
//!
//! The construction follows IEEE 1363a: an ephemeral Diffie-Hellman
//! exchange feeds KDF2, which keys AES-CBC (zero IV, PKCS#7) and a
//! truncated HMAC. Two caller-supplied context strings are bound in: `p1`
//! mixed into key derivation and `p2` authenticated alongside the
//! ciphertext (with its 8-byte big-endian byte length, so an empty and an
//! absent context never collide).
//!
//! The zero IV is sound because every encryption mints a fresh ephemeral
//! keypair, so the CBC key is unique per message.
//!
//! Decryption failures are deliberately undifferentiated: a bad ephemeral
//! point, a padding error and a tag mismatch all surface as the same
//! [`Error::DecryptionFailed`].

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

#[cfg(test)]
mod tests;

use byteorder::{BigEndian, ByteOrder};
use eckit_algorithms::bignum::{Limb, MpInt};
use eckit_algorithms::ec::{Curve, CurvePoint, CurveShape};
use eckit_algorithms::{cipher, kdf};
use eckit_api::error::{validate, Error, Result, ResultExt};
use eckit_api::HybridEncryption;
use eckit_params::CurveParamsRecord;
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Smallest accepted truncated-MAC width in bytes
pub const MIN_TAG_LEN: usize = 4;

/// A recipient public key: the decoded point and its canonical encoding
#[derive(Clone, Debug, PartialEq)]
pub struct EciesPublicKey<L: Limb = u64> {
    point: CurvePoint<L>,
    encoded: Vec<u8>,
}

impl<L: Limb> EciesPublicKey<L> {
    /// The canonical uncompressed byte encoding
    pub fn as_bytes(&self) -> &[u8] {
        &self.encoded
    }
}

/// A recipient secret key: a private scalar reduced modulo the curve order
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EciesSecretKey<L: Limb = u64> {
    scalar: MpInt<L>,
}

impl<L: Limb> core::fmt::Debug for EciesSecretKey<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "EciesSecretKey([REDACTED])")
    }
}

/// A hybrid ciphertext: ephemeral point V, CBC payload C, truncated tag T
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EciesCiphertext {
    v: Vec<u8>,
    c: Vec<u8>,
    t: Vec<u8>,
}

impl EciesCiphertext {
    /// The encoded ephemeral public point
    pub fn ephemeral_point(&self) -> &[u8] {
        &self.v
    }

    /// The symmetric payload (CBC output, padded)
    pub fn payload(&self) -> &[u8] {
        &self.c
    }

    /// The truncated authentication tag
    pub fn tag(&self) -> &[u8] {
        &self.t
    }

    /// Wire encoding: `V || C || T`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.v.len() + self.c.len() + self.t.len());
        out.extend_from_slice(&self.v);
        out.extend_from_slice(&self.c);
        out.extend_from_slice(&self.t);
        out
    }
}

/// Hybrid encryption over one runtime-selected curve
pub struct EciesSuite<L: Limb = u64> {
    curve: Curve<L>,
    name: &'static str,
}

fn suite_name(curve_name: &str) -> &'static str {
    match curve_name {
        "NIST-P256" => "ECIES-NIST-P256",
        "edwards25519" => "ECIES-edwards25519",
        _ => "ECIES",
    }
}

fn decryption_failed() -> Error {
    Error::DecryptionFailed {
        context: "EciesSuite::decrypt",
        #[cfg(feature = "std")]
        message: "ciphertext rejected".into(),
    }
}

impl<L: Limb> EciesSuite<L> {
    /// Load and validate a curve record, binding it to this suite.
    ///
    /// Montgomery-shape records are rejected: the ephemeral point travels
    /// uncompressed.
    pub fn new(record: &CurveParamsRecord) -> Result<Self> {
        if record.shape == CurveShape::Montgomery {
            return Err(Error::Unsupported {
                feature: "ECIES on x-only Montgomery curves",
            });
        }
        let curve = Curve::from_record(record)?;
        Ok(EciesSuite {
            curve,
            name: suite_name(record.name),
        })
    }

    /// The underlying curve
    pub fn curve(&self) -> &Curve<L> {
        &self.curve
    }

    /// Generate a recipient keypair
    pub fn keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(EciesPublicKey<L>, EciesSecretKey<L>)> {
        let scalar = self.random_scalar(rng)?;
        let public = self.public_from_scalar(&scalar)?;
        Ok((public, EciesSecretKey { scalar }))
    }

    /// Decode and validate a recipient public key
    pub fn public_key_from_bytes(&self, bytes: &[u8]) -> Result<EciesPublicKey<L>> {
        let point = self
            .curve
            .from_bytes(bytes)
            .with_context("EciesSuite::public_key_from_bytes")?;
        self.curve.clear_cofactor(&point)?;
        Ok(EciesPublicKey {
            point,
            encoded: bytes.to_vec(),
        })
    }

    /// Decode a recipient secret key from fixed-width scalar bytes
    pub fn secret_key_from_bytes(&self, bytes: &[u8]) -> Result<EciesSecretKey<L>> {
        let scalar = self
            .curve
            .order()
            .from_bytes_strict(bytes)
            .with_context("EciesSuite::secret_key_from_bytes")?;
        if bool::from(scalar.is_zero()) {
            return Err(Error::InvalidKey {
                context: "EciesSuite::secret_key_from_bytes",
                #[cfg(feature = "std")]
                message: "zero scalar".into(),
            });
        }
        Ok(EciesSecretKey { scalar })
    }

    /// Reassemble a ciphertext from its wire encoding, given the tag width
    /// agreed with the sender
    pub fn ciphertext_from_bytes(&self, bytes: &[u8], tag_len: usize) -> Result<EciesCiphertext> {
        self.check_tag_len(tag_len)?;
        let point_len = self.curve.point_byte_len();
        validate::min_length(
            "EciesSuite::ciphertext_from_bytes",
            bytes.len(),
            point_len + cipher::BLOCK_LEN + tag_len,
        )?;
        let (v, rest) = bytes.split_at(point_len);
        let (c, t) = rest.split_at(rest.len() - tag_len);
        Ok(EciesCiphertext {
            v: v.to_vec(),
            c: c.to_vec(),
            t: t.to_vec(),
        })
    }

    fn check_tag_len(&self, tag_len: usize) -> Result<()> {
        validate::min_length("EciesSuite tag length", tag_len, MIN_TAG_LEN)?;
        validate::max_length(
            "EciesSuite tag length",
            tag_len,
            self.curve.hash().output_len(),
        )
    }

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

    fn public_from_scalar(&self, scalar: &MpInt<L>) -> Result<EciesPublicKey<L>> {
        let point = self.curve.scalar_mul(self.curve.generator(), scalar)?;
        let encoded = self.curve.to_bytes(&point, false)?;
        Ok(EciesPublicKey { point, encoded })
    }

    /// Diffie-Hellman to fixed-width x-coordinate bytes
    fn agree(&self, scalar: &MpInt<L>, point: &CurvePoint<L>) -> Result<Vec<u8>> {
        let product = self.curve.scalar_mul(point, scalar)?;
        match product.x() {
            Some(x) => x.to_be_bytes(self.curve.field_byte_len()),
            None => Err(Error::InvalidKey {
                context: "EciesSuite::agree",
                #[cfg(feature = "std")]
                message: "agreement produced the identity".into(),
            }),
        }
    }

    /// Derive the cipher and MAC keys: KDF2 over `V || Z` with context `p1`
    fn derive_keys(&self, v: &[u8], z: &[u8], p1: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
        let key_len = self.curve.key_len();
        let mut input = Vec::with_capacity(v.len() + z.len());
        input.extend_from_slice(v);
        input.extend_from_slice(z);
        let mut keys = kdf::kdf2(self.curve.hash(), &input, p1, 2 * key_len)?;
        input.zeroize();
        let k1 = keys[..key_len].to_vec();
        let k2 = keys[key_len..].to_vec();
        keys.zeroize();
        Ok((k1, k2))
    }

    /// Tag over `C || p2 || len64be(p2)`, truncated
    fn compute_tag(&self, mac_key: &[u8], c: &[u8], p2: &[u8], tag_len: usize) -> Result<Vec<u8>> {
        let mut p2_len = [0u8; 8];
        BigEndian::write_u64(&mut p2_len, p2.len() as u64);
        let mut tag = self.curve.hash().hmac(mac_key, &[c, p2, &p2_len])?;
        tag.truncate(tag_len);
        Ok(tag)
    }
}

impl<L: Limb> HybridEncryption for EciesSuite<L> {
    type PublicKey = EciesPublicKey<L>;
    type SecretKey = EciesSecretKey<L>;
    type Ciphertext = EciesCiphertext;

    fn name(&self) -> &'static str {
        self.name
    }

    fn encrypt<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        recipient: &Self::PublicKey,
        message: &[u8],
        kdf_context: &[u8],
        mac_context: &[u8],
        tag_len: usize,
    ) -> Result<Self::Ciphertext> {
        self.check_tag_len(tag_len)?;

        let mut ephemeral = self.random_scalar(rng)?;
        let v_point = self.curve.scalar_mul(self.curve.generator(), &ephemeral)?;
        let v = self.curve.to_bytes(&v_point, false)?;

        let agreement = self.agree(&ephemeral, &recipient.point);
        ephemeral.zeroize();
        let mut z = agreement?;
        let derived = self.derive_keys(&v, &z, kdf_context);
        z.zeroize();
        let (mut k1, mut k2) = derived?;

        let encrypted = cipher::encrypt(&k1, message);
        k1.zeroize();
        let c = encrypted?;
        let tag = self.compute_tag(&k2, &c, mac_context, tag_len);
        k2.zeroize();
        Ok(EciesCiphertext { v, c, t: tag? })
    }

    fn decrypt(
        &self,
        recipient: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
        kdf_context: &[u8],
        mac_context: &[u8],
    ) -> Result<Vec<u8>> {
        self.check_tag_len(ciphertext.t.len())
            .map_err(|_| decryption_failed())?;
        let v_point = self
            .curve
            .from_bytes(&ciphertext.v)
            .map_err(|_| decryption_failed())?;
        let mut z = self
            .agree(&recipient.scalar, &v_point)
            .map_err(|_| decryption_failed())?;
        let derived = self.derive_keys(&ciphertext.v, &z, kdf_context);
        z.zeroize();
        let (mut k1, mut k2) = derived.map_err(|_| decryption_failed())?;

        let tag = self.compute_tag(&k2, &ciphertext.c, mac_context, ciphertext.t.len());
        k2.zeroize();
        let tag_ok = match tag {
            Ok(expected) => bool::from(expected.ct_eq(&ciphertext.t)),
            Err(_) => false,
        };

        // Run the cipher regardless so the tag outcome does not gate the
        // work performed, then collapse every failure into one error.
        let decrypted = cipher::decrypt(&k1, &ciphertext.c);
        k1.zeroize();
        match (tag_ok, decrypted) {
            (true, Ok(message)) => Ok(message),
            _ => Err(decryption_failed()),
        }
    }
}
