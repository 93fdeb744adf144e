//! Error handling for the arithmetic and curve engines
//!
//! The engines share the workspace-wide [`eckit_api::Error`] type rather
//! than defining their own: every failure an engine can produce (malformed
//! encoding, out-of-range value, unsupported shape/operation pairing,
//! entropy exhaustion) already has a classified variant there, and keeping
//! one type lets protocol crates bubble engine errors without conversion.

pub use eckit_api::error::{validate, Error, ErrorClass, Result};
