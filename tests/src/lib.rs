//! Shared helpers for the eckit cross-crate integration suites
//!
//! The integration tests exercise the protocol crates together over every
//! shipped curve record; this crate holds the few helpers they share.

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Deterministic RNG for reproducible test streams
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// Decode a hex vector, panicking on malformed test data
pub fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("test vector hex")
}

/// The shipped curve records, by name, for parameterized suites
pub fn shipped_records() -> &'static [&'static eckit_params::CurveParamsRecord] {
    &eckit_params::curves::ALL
}
