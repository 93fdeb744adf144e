//! Hybrid public-key encryption traits for eckit
//!
//! The construction is ECIES-style: an ephemeral Diffie-Hellman exchange
//! feeds a KDF, which keys a symmetric cipher and a MAC. Two caller-supplied
//! context strings are bound into the result, one mixed into key derivation
//! and one authenticated alongside the ciphertext.

use crate::Result;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

/// Core trait for hybrid encryption suites
pub trait HybridEncryption {
    /// Recipient public key type
    type PublicKey: Clone;

    /// Recipient secret key type
    type SecretKey: Zeroize + Clone;

    /// Ciphertext type carrying the ephemeral key, encrypted payload, and tag
    type Ciphertext: Clone;

    /// Returns the suite name, e.g. `"ECIES-P256"`.
    fn name(&self) -> &'static str;

    /// Encrypt a message to the recipient's public key.
    ///
    /// `kdf_context` is mixed into key derivation; `mac_context` is
    /// authenticated together with the ciphertext. Either may be empty.
    /// `tag_len` selects the truncated MAC width in bytes.
    ///
    /// # Security Requirements
    /// - Must mint a fresh ephemeral keypair per call from the provided RNG.
    /// - The ephemeral secret must be wiped before returning.
    fn encrypt<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
        recipient: &Self::PublicKey,
        message: &[u8],
        kdf_context: &[u8],
        mac_context: &[u8],
        tag_len: usize,
    ) -> Result<Self::Ciphertext>;

    /// Decrypt a ciphertext with the recipient's secret key.
    ///
    /// The same `kdf_context` and `mac_context` used at encryption time must
    /// be supplied.
    ///
    /// # Security Requirements
    /// - All failure modes (bad ephemeral key, padding error, tag mismatch)
    ///   must surface as the same undifferentiated error.
    fn decrypt(
        &self,
        recipient: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
        kdf_context: &[u8],
        mac_context: &[u8],
    ) -> Result<Vec<u8>>;
}
