//! Hash and MAC dispatch for the three supported digest widths
//!
//! Each security level binds one SHA-2 member; protocol code carries a
//! [`HashAlg`] tag taken from the curve and never names a digest directly.

use crate::error::{Error, Result};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha384, Sha512};

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

/// A digest algorithm selected by a curve's security level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlg {
    /// SHA-256, for the 128-bit level
    Sha256,
    /// SHA-384, for the 192-bit level
    Sha384,
    /// SHA-512, for the 256-bit level
    Sha512,
}

impl HashAlg {
    /// Digest output width in bytes
    pub fn output_len(&self) -> usize {
        match self {
            HashAlg::Sha256 => 32,
            HashAlg::Sha384 => 48,
            HashAlg::Sha512 => 64,
        }
    }

    /// One-shot digest over concatenated parts
    pub fn digest(&self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            HashAlg::Sha256 => {
                let mut h = Sha256::new();
                for part in parts {
                    h.update(part);
                }
                h.finalize().to_vec()
            }
            HashAlg::Sha384 => {
                let mut h = Sha384::new();
                for part in parts {
                    h.update(part);
                }
                h.finalize().to_vec()
            }
            HashAlg::Sha512 => {
                let mut h = Sha512::new();
                for part in parts {
                    h.update(part);
                }
                h.finalize().to_vec()
            }
        }
    }

    /// One-shot HMAC over concatenated parts
    pub fn hmac(&self, key: &[u8], parts: &[&[u8]]) -> Result<Vec<u8>> {
        fn run<M: Mac + hmac::digest::KeyInit>(
            key: &[u8],
            parts: &[&[u8]],
        ) -> Result<Vec<u8>> {
            let mut mac = <M as Mac>::new_from_slice(key).map_err(|_| Error::InvalidKey {
                context: "HashAlg::hmac",
                #[cfg(feature = "std")]
                message: "unusable MAC key".into(),
            })?;
            for part in parts {
                mac.update(part);
            }
            Ok(mac.finalize().into_bytes().to_vec())
        }
        match self {
            HashAlg::Sha256 => run::<Hmac<Sha256>>(key, parts),
            HashAlg::Sha384 => run::<Hmac<Sha384>>(key, parts),
            HashAlg::Sha512 => run::<Hmac<Sha512>>(key, parts),
        }
    }
}
