//! Keyed record contract and field validation errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// A record addressable by a unique string key.
pub trait Record: Clone {
    /// Returns the unique key of this record.
    fn key(&self) -> &str;

    /// Checks field-level rules before the record is persisted.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty or whitespace only.
    BlankField(&'static str),
    /// Field exceeds the maximum number of characters.
    FieldTooLong { field: &'static str, max_chars: usize },
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "field `{field}` must not be blank"),
            Self::FieldTooLong { field, max_chars } => {
                write!(f, "field `{field}` exceeds {max_chars} characters")
            }
            Self::InvalidEmail(value) => write!(f, "invalid email address `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Rejects blank values and values longer than `max_chars` (when set).
pub(crate) fn check_text(
    field: &'static str,
    value: &str,
    max_chars: Option<usize>,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    if let Some(max_chars) = max_chars {
        if value.chars().count() > max_chars {
            return Err(ValidationError::FieldTooLong { field, max_chars });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{check_text, ValidationError};

    #[test]
    fn check_text_rejects_whitespace_only() {
        assert_eq!(
            check_text("email", "   ", None),
            Err(ValidationError::BlankField("email"))
        );
    }

    #[test]
    fn check_text_counts_chars_not_bytes() {
        assert!(check_text("name", "ééé", Some(3)).is_ok());
        assert_eq!(
            check_text("name", "éééé", Some(3)),
            Err(ValidationError::FieldTooLong {
                field: "name",
                max_chars: 3
            })
        );
    }
}
