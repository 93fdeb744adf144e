//! Curve parameter records for the ECKIT library
//!
//! This crate holds the published domain parameters for every curve eckit
//! ships, as plain data with no arithmetic attached. Records are hex strings
//! so they can be audited character-for-character against the standards that
//! define them; parsing and validation happen in `eckit-algorithms` when a
//! curve is instantiated.

#![no_std]
#![deny(missing_docs)]

pub mod curves;

pub use curves::{CurveParamsRecord, CurveShape};

// Re-export the shipped records at the crate root
pub use curves::edwards::EDWARDS25519;
pub use curves::montgomery::CURVE25519;
pub use curves::nist::NIST_P256;
