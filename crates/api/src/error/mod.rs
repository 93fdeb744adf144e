//! Error handling for the eckit ecosystem
//!
//! Protocol failures fall into three classes (`ErrorClass`): decoding
//! failures, semantic violations, and entropy failures. The distinction
//! matters at trust boundaries, where a caller may log the class but must
//! not act on the specific variant.

pub mod traits;
pub mod types;
pub mod validate;

// Re-export the primary error type and result
pub use types::{Error, ErrorClass, Result};

// Re-export error traits
pub use traits::ResultExt;

// Re-export validation utilities module
pub use validate as validation;

// Implement standard Error trait when std is available
#[cfg(feature = "std")]
impl std::error::Error for Error {}
