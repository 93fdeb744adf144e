//! AES-CBC with PKCS#7 padding, dispatched by key width
//!
//! The hybrid encryption construction derives a fresh key per message, so
//! the IV is fixed to zero; key width (16, 24 or 32 bytes) selects the AES
//! member. Padding failures surface as a decryption error without further
//! detail.

use crate::error::{Error, Result};
use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::vec::Vec;

/// AES block width
pub const BLOCK_LEN: usize = 16;

const ZERO_IV: [u8; BLOCK_LEN] = [0u8; BLOCK_LEN];

fn bad_key() -> Error {
    Error::InvalidKey {
        context: "cipher",
        #[cfg(feature = "std")]
        message: "key width selects no AES member".into(),
    }
}

fn bad_ciphertext() -> Error {
    Error::DecryptionFailed {
        context: "cipher",
        #[cfg(feature = "std")]
        message: "ciphertext rejected".into(),
    }
}

/// Encrypt with the AES member matching the key width
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    match key.len() {
        16 => Ok(cbc::Encryptor::<Aes128>::new_from_slices(key, &ZERO_IV)
            .map_err(|_| bad_key())?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        24 => Ok(cbc::Encryptor::<Aes192>::new_from_slices(key, &ZERO_IV)
            .map_err(|_| bad_key())?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        32 => Ok(cbc::Encryptor::<Aes256>::new_from_slices(key, &ZERO_IV)
            .map_err(|_| bad_key())?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)),
        _ => Err(bad_key()),
    }
}

/// Decrypt with the AES member matching the key width
pub fn decrypt(key: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(bad_ciphertext());
    }
    match key.len() {
        16 => cbc::Decryptor::<Aes128>::new_from_slices(key, &ZERO_IV)
            .map_err(|_| bad_key())?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| bad_ciphertext()),
        24 => cbc::Decryptor::<Aes192>::new_from_slices(key, &ZERO_IV)
            .map_err(|_| bad_key())?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| bad_ciphertext()),
        32 => cbc::Decryptor::<Aes256>::new_from_slices(key, &ZERO_IV)
            .map_err(|_| bad_key())?
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| bad_ciphertext()),
        _ => Err(bad_key()),
    }
}
