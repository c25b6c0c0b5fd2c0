//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },

    /// Amount must be strictly greater than zero
    NotPositive { field: &'static str },

    /// Value falls outside the accepted range
    OutOfRange { field: &'static str, reason: &'static str },

    /// Request body could not be decoded
    Malformed { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::NotPositive { field } => write!(f, "{} must be greater than zero", field),
            Self::OutOfRange { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Malformed { reason } => write!(f, "malformed request: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim `s` and check it is non-empty and at most `max` characters.
pub(crate) fn bounded_text(
    field: &'static str,
    s: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Optional free text: blank collapses to `None`, otherwise capped at `max`.
pub(crate) fn optional_text(
    field: &'static str,
    s: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) if text.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        Some(text) => Ok(Some(text.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "name",
            max: 50,
        };
        assert_eq!(
            err.to_string(),
            "name exceeds maximum length of 50 characters"
        );

        let err = ValidationError::InvalidVariant {
            field: "period",
            value: "hourly".into(),
        };
        assert_eq!(err.to_string(), "invalid period value: 'hourly'");
    }

    #[test]
    fn bounded_text_trims_and_limits() {
        assert_eq!(bounded_text("name", "  Rex ", 10).unwrap(), "Rex");
        assert_eq!(
            bounded_text("name", "   ", 10).unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
        assert!(matches!(
            bounded_text("name", &"x".repeat(11), 10),
            Err(ValidationError::TooLong { max: 10, .. })
        ));
    }

    #[test]
    fn optional_text_blank_is_none() {
        assert_eq!(optional_text("description", None, 5).unwrap(), None);
        assert_eq!(optional_text("description", Some("  "), 5).unwrap(), None);
        assert_eq!(
            optional_text("description", Some("rent"), 5).unwrap(),
            Some("rent".to_owned())
        );
        assert!(optional_text("description", Some("too long"), 5).is_err());
    }
}
