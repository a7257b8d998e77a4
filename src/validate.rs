//! Row validation seam
//!
//! The reader hands each tokenized field sequence to a [`RowValidator`] and
//! reports whatever comes back. It never looks inside the validator: a
//! closure, a [`crate::schema::RowSchema`], or any user type works.
//!
//! ```
//! use csvstream::{CsvReader, ParsedRow, ValidationError};
//!
//! let validator = |fields: &[String]| -> Result<u32, ValidationError> {
//!     fields[1]
//!         .parse::<u32>()
//!         .map_err(|_| ValidationError::field(1, "age must be a number"))
//! };
//!
//! let mut reader = CsvReader::from_text("Alice,23\nBob,thirty");
//! let items: Vec<_> = reader.validated_rows(validator).collect::<Result<_, _>>()?;
//!
//! assert!(matches!(&items[0], ParsedRow::Row(r) if r.data == 23));
//! assert!(matches!(&items[1], ParsedRow::Error(e) if e.message == "age must be a number"));
//! # Ok::<(), csvstream::CsvError>(())
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One problem found in a row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldIssue {
    /// Column index the issue refers to (None for row-level issues)
    pub column: Option<usize>,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.column {
            Some(col) => write!(f, "[{}] {}", col, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Validation failure returned by a [`RowValidator`]
///
/// `message` is what the reader puts into [`crate::types::RowError::message`];
/// `issues` carries the per-column detail when the validator has any.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValidationError {
    /// Human-readable error message
    pub message: String,
    /// Individual problems, in the order they were found
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Create a new validation error with just a message
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            issues: Vec::new(),
        }
    }

    /// Create a validation error for a specific column
    pub fn field<M: Into<String>>(column: usize, message: M) -> Self {
        let message = message.into();
        Self {
            issues: vec![FieldIssue {
                column: Some(column),
                message: message.clone(),
            }],
            message,
        }
    }

    /// Build one error from several issues
    ///
    /// The message joins the issue messages with `"; "`.
    pub fn from_issues(issues: Vec<FieldIssue>) -> Self {
        let message = issues
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self { message, issues }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Turns a field sequence into a typed value or a validation failure
pub trait RowValidator {
    /// Value produced for accepted rows
    type Output;

    /// Validate one row's fields
    fn validate(&self, fields: &[String]) -> Result<Self::Output, ValidationError>;
}

impl<F, T> RowValidator for F
where
    F: Fn(&[String]) -> Result<T, ValidationError>,
{
    type Output = T;

    fn validate(&self, fields: &[String]) -> Result<T, ValidationError> {
        self(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_carries_issue() {
        let err = ValidationError::field(2, "expected number");
        assert_eq!(err.message, "expected number");
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].column, Some(2));
    }

    #[test]
    fn test_from_issues_joins_messages() {
        let err = ValidationError::from_issues(vec![
            FieldIssue {
                column: Some(0),
                message: "required".to_string(),
            },
            FieldIssue {
                column: None,
                message: "too many columns".to_string(),
            },
        ]);
        assert_eq!(err.message, "[0] required; too many columns");
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn test_closure_is_validator() {
        let v = |fields: &[String]| -> Result<usize, ValidationError> {
            if fields.is_empty() {
                Err(ValidationError::new("empty"))
            } else {
                Ok(fields.len())
            }
        };
        assert_eq!(v.validate(&["a".to_string(), "b".to_string()]), Ok(2));
        assert!(v.validate(&[]).is_err());
    }
}
