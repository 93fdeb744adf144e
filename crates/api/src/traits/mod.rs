//! Trait definitions for the curve protocol suites

pub mod agreement;
pub mod encryption;
pub mod signature;

pub use agreement::KeyAgreement;
pub use encryption::HybridEncryption;
pub use signature::SignatureScheme;
