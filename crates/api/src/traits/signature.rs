//! Digital signature traits for eckit
//!
//! The design does not require mutable byte access to secret keys, and the
//! signing entry points are explicit about their nonce source: `sign` draws
//! fresh randomness per call, `sign_with_nonce` consumes a caller-supplied
//! nonce (for derandomized schemes and known-answer testing).

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Core trait for digital signature suites
pub trait SignatureScheme {
    /// Public key type for this suite
    type PublicKey: Clone;

    /// Secret key type - must be zeroizable but not byte-accessible
    type SecretKey: Zeroize + Clone;

    /// Signature data type
    type SignatureData: Clone;

    /// Returns the suite name, e.g. `"ECDSA-P256"`.
    fn name(&self) -> &'static str;

    /// Generate a new key pair using the provided RNG
    fn keypair<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(Self::PublicKey, Self::SecretKey)>;

    /// Sign a message, drawing the nonce from the provided RNG
    ///
    /// # Security Requirements
    /// - The per-signature nonce must never repeat for the same key.
    /// - Must not leak information about the secret key through timing.
    fn sign<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        message: &[u8],
        secret_key: &Self::SecretKey,
    ) -> Result<Self::SignatureData>;

    /// Sign a message with a caller-supplied nonce
    ///
    /// The nonce bytes are interpreted as a big-endian integer and reduced
    /// modulo the curve order. Unlike the randomized path, a degenerate
    /// outcome (zero component) is reported as an error instead of retried,
    /// since retrying with the same nonce cannot make progress.
    ///
    /// # Security Warning
    /// Reusing a nonce across two messages reveals the secret key. This
    /// entry point exists for deterministic nonce constructions and for
    /// known-answer tests.
    fn sign_with_nonce(
        &self,
        message: &[u8],
        secret_key: &Self::SecretKey,
        nonce: &[u8],
    ) -> Result<Self::SignatureData>;

    /// Verify a signature against a message and public key
    ///
    /// Returns `Ok(())` only if the signature is valid.
    fn verify(
        &self,
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> Result<()>;
}
