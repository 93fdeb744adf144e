//! Error type definitions for curve protocol operations

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::string::String;

#[cfg(feature = "std")]
use std::string::String;

/// Coarse classification of protocol failures
///
/// Every error maps to exactly one class. Callers that must not leak which
/// internal check failed (hybrid decryption in particular) can report the
/// class alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The input bytes could not be parsed into the expected object at all:
    /// wrong length, unknown prefix byte, coordinate outside the field, or a
    /// point that is not on the curve.
    Decoding,
    /// The input parsed but violates a protocol rule: scalar out of range,
    /// point in a small subgroup, signature component zero or out of range,
    /// or an authentication tag mismatch.
    Semantic,
    /// The operating system randomness source failed.
    Entropy,
}

/// Primary error type for curve protocol operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input bytes do not parse as a point, scalar, or wire structure
    InvalidEncoding {
        /// Operation that rejected the encoding
        context: &'static str,
        /// Details (only with std)
        #[cfg(feature = "std")]
        message: String,
    },

    /// Input has the wrong length for the curve in use
    InvalidLength {
        /// Operation that rejected the input
        context: &'static str,
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        actual: usize,
    },

    /// Key material violates a protocol rule
    InvalidKey {
        /// Operation that rejected the key
        context: &'static str,
        /// Details (only with std)
        #[cfg(feature = "std")]
        message: String,
    },

    /// Signature is malformed or does not verify
    InvalidSignature {
        /// Operation that rejected the signature
        context: &'static str,
        /// Details (only with std)
        #[cfg(feature = "std")]
        message: String,
    },

    /// Authentication tag mismatch
    AuthenticationFailed {
        /// Operation that rejected the tag
        context: &'static str,
        /// Details (only with std)
        #[cfg(feature = "std")]
        message: String,
    },

    /// Hybrid decryption failed
    ///
    /// Deliberately does not say which internal step rejected the
    /// ciphertext.
    DecryptionFailed {
        /// Operation that failed
        context: &'static str,
        /// Details (only with std)
        #[cfg(feature = "std")]
        message: String,
    },

    /// A caller-supplied parameter is out of range or inconsistent
    InvalidParameter {
        /// Operation that rejected the parameter
        context: &'static str,
        /// Details (only with std)
        #[cfg(feature = "std")]
        message: String,
    },

    /// The operation is not defined for the curve shape in use
    Unsupported {
        /// Name of the unsupported operation
        feature: &'static str,
    },

    /// Random generation error
    RandomGeneration {
        /// Operation that needed randomness
        context: &'static str,
        /// Details (only with std)
        #[cfg(feature = "std")]
        message: String,
    },

    /// Other error
    Other {
        /// Operation that failed
        context: &'static str,
        /// Details (only with std)
        #[cfg(feature = "std")]
        message: String,
    },
}

/// Result type for curve protocol operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Classify this error as decoding, semantic, or entropy failure
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidEncoding { .. } | Self::InvalidLength { .. } => ErrorClass::Decoding,
            Self::RandomGeneration { .. } => ErrorClass::Entropy,
            _ => ErrorClass::Semantic,
        }
    }

    /// Add context to an existing error
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::InvalidEncoding { .. } => Self::InvalidEncoding {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::InvalidKey { .. } => Self::InvalidKey {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::InvalidSignature { .. } => Self::InvalidSignature {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::AuthenticationFailed { .. } => Self::AuthenticationFailed {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::DecryptionFailed { .. } => Self::DecryptionFailed {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::InvalidParameter { .. } => Self::InvalidParameter {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::Unsupported { feature } => Self::Unsupported { feature },
            Self::RandomGeneration { .. } => Self::RandomGeneration {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
            Self::Other { .. } => Self::Other {
                context,
                #[cfg(feature = "std")]
                message: String::new(),
            },
        }
    }

}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidEncoding { context, .. } => {
                write!(f, "Invalid encoding: {}", context)
            }
            Self::InvalidLength {
                context,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "{}: invalid length (expected {}, got {})",
                    context, expected, actual
                )
            }
            Self::InvalidKey { context, .. } => {
                write!(f, "Invalid key: {}", context)
            }
            Self::InvalidSignature { context, .. } => {
                write!(f, "Invalid signature: {}", context)
            }
            #[cfg(feature = "std")]
            Self::AuthenticationFailed { context, message } => {
                write!(f, "Authentication failed: {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Self::AuthenticationFailed { context } => {
                write!(f, "Authentication failed: {}", context)
            }
            Self::DecryptionFailed { context, .. } => {
                write!(f, "Decryption failed: {}", context)
            }
            #[cfg(feature = "std")]
            Self::InvalidParameter { context, message } => {
                write!(f, "{}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Self::InvalidParameter { context } => {
                write!(f, "Invalid parameter: {}", context)
            }
            Self::Unsupported { feature } => {
                write!(f, "{} is not supported for this curve", feature)
            }
            #[cfg(feature = "std")]
            Self::RandomGeneration { context, message } => {
                write!(f, "Random generation error: {}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Self::RandomGeneration { context } => {
                write!(f, "Random generation error: {}", context)
            }
            #[cfg(feature = "std")]
            Self::Other { context, message } => {
                write!(f, "{}: {}", context, message)
            }
            #[cfg(not(feature = "std"))]
            Self::Other { context } => {
                write!(f, "Error: {}", context)
            }
        }
    }
}
