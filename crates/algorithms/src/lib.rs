//! Arithmetic and curve-group engines for the eckit library
//!
//! Three engines are layered here, each built strictly on the one below:
//!
//! 1. [`bignum`]: fixed-width multi-precision unsigned integers over a
//!    compile-time selected digit ([`bignum::Limb`]: `u32` or `u64`),
//! 2. [`field`]: modular arithmetic through a Montgomery-domain reduction
//!    context precomputed once per modulus,
//! 3. [`ec`]: the curve-group engine, polymorphic over the Weierstrass,
//!    Edwards and Montgomery curve shapes, with one group-law object chosen
//!    at curve initialization.
//!
//! The [`hash`], [`kdf`] and [`cipher`] modules bind the external primitive
//! collaborators (SHA-2, HMAC, KDF2, AES-CBC) that the protocol crates
//! compose with the engines.
//!
//! # Security
//!
//! All arithmetic on secret values runs over fixed limb counts with
//! data-independent execution patterns. Variable-time shortcuts exist only
//! on paths whose inputs are public (verification, cofactor clearing,
//! parameter validation) and are named `_vartime`.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Multi-precision integer engine
pub mod bignum;
pub use bignum::{Limb, MpInt};

// Montgomery-domain field engine
pub mod field;
pub use field::MontgomeryDomain;

// Curve-group engine
pub mod ec;
pub use ec::{Curve, CurvePoint};

// External primitive collaborators
pub mod cipher;
pub mod hash;
pub mod kdf;
pub use hash::HashAlg;
