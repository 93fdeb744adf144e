//! Security primitives for sensitive cryptographic material
//!
//! Curve scalars, shared secrets, and derived symmetric keys in eckit all
//! have widths fixed at curve-initialization time rather than compile time,
//! so the containers here are length-erased byte buffers with guaranteed
//! zeroization.

pub mod secret;

// Re-export core security types
pub use secret::SecureZeroingType;

// Conditionally re-export SecretVec only when alloc feature is enabled
#[cfg(feature = "alloc")]
pub use secret::SecretVec;
