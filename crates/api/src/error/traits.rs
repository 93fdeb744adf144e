//! Error handling extension traits

use super::types::{Error, Result};

/// Extension trait for Result types
///
/// Lets a caller relabel an error bubbling up from a lower layer with the
/// operation that was actually being performed, so a decode failure deep in
/// the field engine surfaces under the protocol entry point that triggered
/// it.
pub trait ResultExt<T, E>: Sized {
    /// Add context to an error when converting to Error
    fn with_context(self, context: &'static str) -> Result<T>
    where
        E: Into<Error>;
}

impl<T, E> ResultExt<T, E> for core::result::Result<T, E> {
    fn with_context(self, context: &'static str) -> Result<T>
    where
        E: Into<Error>,
    {
        self.map_err(|e| e.into().with_context(context))
    }
}
