//! # eckit
//!
//! A pure-Rust elliptic-curve cryptography library: key agreement (ECDH),
//! digital signatures (ECDSA) and hybrid encryption (ECIES) over
//! runtime-configured curves of Weierstrass, Edwards and Montgomery shape.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! eckit = "0.2"
//! ```
//!
//! ```
//! use eckit::api::KeyAgreement;
//! use eckit::ecdh::EcdhSuite;
//!
//! let suite: EcdhSuite = EcdhSuite::new(&eckit::params::NIST_P256)?;
//! let mut rng = rand::rngs::OsRng;
//! let (alice_pub, alice_sec) = suite.keypair(&mut rng)?;
//! let (bob_pub, bob_sec) = suite.keypair(&mut rng)?;
//! assert_eq!(
//!     suite.shared_secret(&alice_sec, &bob_pub)?.as_ref(),
//!     suite.shared_secret(&bob_sec, &alice_pub)?.as_ref(),
//! );
//! # Ok::<(), eckit::api::Error>(())
//! ```
//!
//! ## Features
//!
//! - `suites` (default): the three protocol crates and the engines
//! - `algorithms` / `ecdh` / `sign` / `pke`: individual components
//! - `std` (default): standard-library support
//!
//! ## Crate Structure
//!
//! This is a facade crate re-exporting the workspace members:
//!
//! - [`api`]: protocol traits, `Error`/`Result`, error classes
//! - [`common`]: zeroizing secret containers
//! - [`internal`]: constant-time and byte-order helpers
//! - [`params`]: declarative per-curve parameter records
//! - [`algorithms`]: bignum, Montgomery field and curve-group engines
//! - [`ecdh`] / [`sign`] / [`pke`]: the protocol suites

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use eckit_api as api;
pub use eckit_common as common;
pub use eckit_internal as internal;
pub use eckit_params as params;

// Feature-gated re-exports
#[cfg(feature = "algorithms")]
pub use eckit_algorithms as algorithms;

#[cfg(feature = "ecdh")]
pub use eckit_ecdh as ecdh;

#[cfg(feature = "sign")]
pub use eckit_sign as sign;

#[cfg(feature = "pke")]
pub use eckit_pke as pke;

// Convenience re-exports of the most used types
pub use eckit_api::{Error, ErrorClass, Result};

#[cfg(feature = "algorithms")]
pub use eckit_algorithms::ec::{Curve, CurvePoint, CurveShape};
