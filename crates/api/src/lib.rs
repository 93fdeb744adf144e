//! Public API traits and types for the ECKIT library
//!
//! This crate provides the public API surface for the eckit ecosystem:
//! trait definitions for the three curve protocols (key agreement,
//! signatures, hybrid encryption) and the error types shared by every
//! crate in the workspace.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

pub mod error;
pub mod traits;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, ErrorClass, Result};

// Re-export all traits from the traits module
pub use traits::{HybridEncryption, KeyAgreement, SignatureScheme};

// Re-export trait modules for direct access
pub use traits::{agreement, encryption, signature};
