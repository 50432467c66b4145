//! Validation error types and request-body field helpers

use std::fmt;

use serde_json::{Map, Value};

/// Validation error for request payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is absent or null
    Missing { field: &'static str },

    /// Field is present but empty
    Empty { field: &'static str },

    /// Field has the wrong JSON type or shape
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Field cannot be read as a decimal number
    NotNumeric { field: &'static str },

    /// Field is numeric but zero where a non-zero value is required
    Zero { field: &'static str },

    /// Field is numeric but too large for its column
    OutOfRange { field: &'static str },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::Empty { field }
            | Self::InvalidFormat { field, .. }
            | Self::NotNumeric { field }
            | Self::Zero { field }
            | Self::OutOfRange { field } => field,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::NotNumeric { field } => write!(f, "{} must be a number", field),
            Self::Zero { field } => write!(f, "{} cannot be zero", field),
            Self::OutOfRange { field } => write!(f, "{} is out of range", field),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Read a required, non-empty string field. The value is kept as sent.
pub(crate) fn required_text(
    body: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match body.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing { field }),
        Some(Value::String(s)) if s.is_empty() => Err(ValidationError::Empty { field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::InvalidFormat {
            field,
            reason: "expected a string",
        }),
    }
}
