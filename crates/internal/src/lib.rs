//! Internal utilities for the eckit library
//!
//! Constant-time helpers shared by the engine crates. Nothing in this
//! crate is a stability promise; it exists so the arithmetic and protocol
//! crates agree on one implementation of these primitives.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod constant_time;

pub use constant_time::{ct_assign, ct_swap};
