//! Validation error types

use std::fmt;

/// Validation error for request input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field was not supplied at all
    Missing { field: &'static str },

    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Value doesn't parse as the expected type
    InvalidFormat { field: &'static str, value: String },

    /// Value parses but is outside the accepted range
    OutOfRange { field: &'static str, reason: &'static str },

    /// Request body is not the JSON we expect
    MalformedBody { reason: String },

    /// Query string doesn't deserialize (e.g. a repeated `_start`)
    MalformedQuery { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::InvalidFormat { field, value } => {
                write!(f, "{} must be an integer, got '{}'", field, value)
            }
            Self::OutOfRange { field, reason } => write!(f, "{}: {}", field, reason),
            Self::MalformedBody { reason } => write!(f, "invalid JSON body: {}", reason),
            Self::MalformedQuery { reason } => write!(f, "invalid query string: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidFormat {
            field: "_start",
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "_start must be an integer, got 'abc'");

        let err = ValidationError::Missing { field: "info_type" };
        assert_eq!(err.to_string(), "info_type is required");

        let err = ValidationError::MalformedQuery {
            reason: "duplicate field `_start`".into(),
        };
        assert_eq!(err.to_string(), "invalid query string: duplicate field `_start`");
    }
}
