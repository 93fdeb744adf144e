//! Shared security primitives for the ECKIT library
//!
//! This crate provides the secret-handling types used across the eckit
//! workspace: zeroizing byte containers for scalars, shared secrets, and
//! derived keys.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod security;

// Re-export core security types
pub use security::SecureZeroingType;

// Conditionally re-export SecretVec only when alloc feature is enabled
#[cfg(feature = "alloc")]
pub use security::secret::SecretVec;
