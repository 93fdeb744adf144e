//! Trait definition for Diffie-Hellman key agreement over elliptic curves
//!
//! Unlike compile-time parameterized schemes, an eckit suite is built around
//! a curve selected at initialization time, so the trait methods take `&self`
//! and all byte-level decoding goes through the suite (the key types alone
//! cannot know the expected widths).

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Trait for Diffie-Hellman key agreement with domain-specific types.
///
/// # Security Design
///
/// Secret keys are opaque types without `AsRef`/`AsMut` byte access;
/// serialization goes through explicit methods and returns zeroizing
/// containers.
pub trait KeyAgreement {
    /// Public key type (an encoded, validated curve point).
    type PublicKey: Clone;

    /// Secret key type.
    ///
    /// # Security Note
    /// Implements `Zeroize` for secure memory cleanup.
    type SecretKey: Zeroize + Clone;

    /// Shared secret type.
    ///
    /// # Security Note
    /// - Implements `Zeroize` for secure memory cleanup.
    /// - Should be fed to a KDF immediately rather than used as a key.
    type SharedSecret: Zeroize + Clone;

    /// Returns the suite name, e.g. `"ECDH-P256"`.
    fn name(&self) -> &'static str;

    /// Generate a new keypair.
    ///
    /// # Security Requirements
    /// - Must use the provided CSPRNG for all randomness.
    /// - The secret scalar must be reduced into the valid range for the
    ///   curve order before use.
    fn keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Derive a keypair from caller-provided scalar bytes.
    ///
    /// The input is interpreted as a big-endian integer and reduced modulo
    /// the curve order. Callers should zeroize the input after use.
    fn keypair_from_scalar(&self, scalar: &[u8]) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Decode and validate a public key from its byte encoding.
    fn public_key_from_bytes(&self, bytes: &[u8]) -> Result<Self::PublicKey>;

    /// Decode a secret key from scalar bytes of the exact curve width.
    fn secret_key_from_bytes(&self, bytes: &[u8]) -> Result<Self::SecretKey>;

    /// Run full public key validation, including the small-subgroup check.
    ///
    /// Decoding already guarantees the point is on the curve; this
    /// additionally rejects points whose order divides the cofactor.
    fn validate_public_key(&self, public_key: &Self::PublicKey) -> Result<()>;

    /// Compute the Diffie-Hellman shared secret.
    ///
    /// # Security Requirements
    /// - Must be constant-time with respect to the secret scalar.
    /// - Must reject results that land on the point at infinity.
    fn shared_secret(
        &self,
        secret_key: &Self::SecretKey,
        public_key: &Self::PublicKey,
    ) -> Result<Self::SharedSecret>;
}
