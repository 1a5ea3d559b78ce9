//! Input validation

use thiserror::Error;

/// A user-supplied value was missing or out of range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was not supplied (or was blank).
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A numeric field fell outside its allowed range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Name of the offending field
        field: &'static str,

        /// Smallest accepted value
        min: i64,

        /// Largest accepted value
        max: i64,

        /// Value that was supplied
        value: i64,
    },

    /// The lower bound of a range exceeds its upper bound.
    #[error("{min_field} must not exceed {max_field}")]
    InvertedRange {
        /// Name of the lower bound field
        min_field: &'static str,

        /// Name of the upper bound field
        max_field: &'static str,
    },
}

/// A label did not match any variant of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownLabel {
    /// What kind of label was being parsed (e.g. "category")
    pub kind: &'static str,

    /// The rejected input
    pub value: String,
}

impl UnknownLabel {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

pub(crate) fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

/// Require a non-blank string, returning it trimmed.
pub(crate) fn required_text(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

pub(crate) fn within<T>(
    field: &'static str,
    value: T,
    min: i64,
    max: i64,
) -> Result<T, ValidationError>
where
    T: Copy + Into<i64>,
{
    let as_i64 = value.into();

    if (min..=max).contains(&as_i64) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value: as_i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank() {
        assert_eq!(
            required_text("title", Some("   ".to_string())),
            Err(ValidationError::MissingField("title"))
        );
        assert_eq!(
            required_text("title", None),
            Err(ValidationError::MissingField("title"))
        );
    }

    #[test]
    fn required_text_trims() {
        assert_eq!(
            required_text("title", Some("  Hike ".to_string())),
            Ok("Hike".to_string())
        );
    }

    #[test]
    fn within_reports_bounds() {
        assert_eq!(within("max_spots", 6_u8, 1, 6), Ok(6));
        assert_eq!(
            within("max_spots", 7_u8, 1, 6),
            Err(ValidationError::OutOfRange {
                field: "max_spots",
                min: 1,
                max: 6,
                value: 7,
            })
        );
    }

    #[test]
    fn errors_name_the_field() {
        assert_eq!(
            ValidationError::MissingField("area").to_string(),
            "area is required"
        );
    }
}
