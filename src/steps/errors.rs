//! Error types for walkthrough generation
//!
//! Generation is pure and instantaneous, so there is a single failure kind:
//! the requested input is unusable. Nothing is emitted when it is raised.

use std::fmt;

/// Errors raised before any step is generated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The input is non-positive, not an integer, empty, or above the ceiling
    InvalidInput { value: String, reason: String },
}

impl GenerateError {
    pub(crate) fn invalid(value: impl ToString, reason: impl Into<String>) -> Self {
        GenerateError::InvalidInput {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// The short reason, suitable for a form-validation message
    pub fn reason(&self) -> &str {
        match self {
            GenerateError::InvalidInput { reason, .. } => reason,
        }
    }
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::InvalidInput { value, reason } => {
                if value.is_empty() {
                    write!(f, "Invalid input: {}", reason)
                } else {
                    write!(f, "Invalid input '{}': {}", value, reason)
                }
            }
        }
    }
}

impl std::error::Error for GenerateError {}
