//! Validation utilities shared by protocol implementations

use super::types::{Error, Result};

/// Check a parameter condition, raising `InvalidParameter` on failure
pub fn parameter(condition: bool, context: &'static str, reason: &'static str) -> Result<()> {
    if !condition {
        return Err(Error::InvalidParameter {
            context,
            #[cfg(feature = "std")]
            message: reason.into(),
        });
    }
    #[cfg(not(feature = "std"))]
    let _ = reason;
    Ok(())
}

/// Check an exact length, raising `InvalidLength` on failure
pub fn length(context: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::InvalidLength {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Check a minimum length, raising `InvalidLength` on failure
pub fn min_length(context: &'static str, actual: usize, min: usize) -> Result<()> {
    if actual < min {
        return Err(Error::InvalidLength {
            context,
            expected: min,
            actual,
        });
    }
    Ok(())
}

/// Check a maximum length, raising `InvalidLength` on failure
pub fn max_length(context: &'static str, actual: usize, max: usize) -> Result<()> {
    if actual > max {
        return Err(Error::InvalidLength {
            context,
            expected: max,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_checks() {
        assert!(length("test", 32, 32).is_ok());
        assert!(length("test", 31, 32).is_err());
        assert!(min_length("test", 32, 16).is_ok());
        assert!(min_length("test", 8, 16).is_err());
        assert!(max_length("test", 8, 16).is_ok());
        assert!(max_length("test", 32, 16).is_err());
    }

    #[test]
    fn parameter_check_classifies_as_semantic() {
        let err = parameter(false, "test", "out of range").unwrap_err();
        assert_eq!(err.class(), crate::ErrorClass::Semantic);
    }
}
