//! Tuple-style row schemas with coercion and refinements
//!
//! A [`RowSchema`] is a ready-made [`RowValidator`]: it checks the column
//! count, coerces each field to its declared [`ColumnType`], then runs
//! row-level refinements over the coerced values.
//!
//! # Examples
//!
//! ```
//! use csvstream::{ColumnType, CsvReader, ParsedRow, RowSchema};
//!
//! let schema = RowSchema::new()
//!     .column(ColumnType::String)
//!     .column(ColumnType::Number)
//!     .refine(
//!         |row| row[1].as_f64().is_some_and(|q| q.fract() == 0.0),
//!         "Quantity must be an integer",
//!     );
//!
//! let mut reader = CsvReader::from_text("Widget,10.5");
//! let items: Vec<_> = reader.validated_rows(schema).collect::<Result<_, _>>()?;
//!
//! match &items[0] {
//!     ParsedRow::Error(e) => assert_eq!(e.message, "Quantity must be an integer"),
//!     ParsedRow::Row(_) => unreachable!(),
//! }
//! # Ok::<(), csvstream::CsvError>(())
//! ```

use crate::types::{parse_bool, CellValue};
use crate::validate::{FieldIssue, RowValidator, ValidationError};
use chrono::NaiveDate;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Target type for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColumnType {
    /// Any text, kept as-is
    String,
    /// Finite number, stored as `CellValue::Float`
    Number,
    /// Whole number, stored as `CellValue::Int`
    Integer,
    /// `true/false`, `yes/no`, `1/0` (case-insensitive)
    Bool,
    /// ISO date, `YYYY-MM-DD`
    Date,
}

impl ColumnType {
    /// Get the type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Integer => "integer",
            ColumnType::Bool => "boolean",
            ColumnType::Date => "date",
        }
    }

    /// Coerce a raw field
    ///
    /// Numeric, boolean and date fields are trimmed before parsing; strings
    /// are kept verbatim.
    pub fn coerce(&self, value: &str) -> Option<CellValue> {
        match self {
            ColumnType::String => Some(CellValue::String(value.to_string())),
            ColumnType::Number => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(CellValue::Float),
            ColumnType::Integer => value.trim().parse::<i64>().ok().map(CellValue::Int),
            ColumnType::Bool => parse_bool(value).map(CellValue::Bool),
            ColumnType::Date => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .ok()
                .map(CellValue::Date),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

/// One declared column
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Column {
    /// Column name used in messages (falls back to the index)
    pub name: Option<String>,
    /// Target type
    pub column_type: ColumnType,
    /// Empty field becomes `CellValue::Empty` instead of failing
    pub optional: bool,
}

impl Column {
    fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => format!("'{}'", name),
            None => format!("column {}", index),
        }
    }
}

type Predicate = Box<dyn Fn(&[CellValue]) -> bool + Send + Sync>;

struct Refinement {
    check: Predicate,
    message: String,
}

/// Schema for a tuple of typed columns
#[derive(Default)]
pub struct RowSchema {
    columns: Vec<Column>,
    refinements: Vec<Refinement>,
    allow_extra: bool,
}

impl fmt::Debug for RowSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowSchema")
            .field("columns", &self.columns)
            .field(
                "refinements",
                &self.refinements.iter().map(|r| &r.message).collect::<Vec<_>>(),
            )
            .field("allow_extra", &self.allow_extra)
            .finish()
    }
}

impl RowSchema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a required unnamed column
    pub fn column(self, column_type: ColumnType) -> Self {
        self.push(None, column_type, false)
    }

    /// Append a required named column
    pub fn named_column<S: Into<String>>(self, name: S, column_type: ColumnType) -> Self {
        self.push(Some(name.into()), column_type, false)
    }

    /// Append a column that may be left empty
    pub fn optional_column(self, column_type: ColumnType) -> Self {
        self.push(None, column_type, true)
    }

    fn push(mut self, name: Option<String>, column_type: ColumnType, optional: bool) -> Self {
        self.columns.push(Column {
            name,
            column_type,
            optional,
        });
        self
    }

    /// Accept rows longer than the declared columns; extra fields are kept as strings
    pub fn allow_extra_columns(mut self, allow: bool) -> Self {
        self.allow_extra = allow;
        self
    }

    /// Add a row-level check run after every column coerced successfully
    pub fn refine<F, S>(mut self, check: F, message: S) -> Self
    where
        F: Fn(&[CellValue]) -> bool + Send + Sync + 'static,
        S: Into<String>,
    {
        self.refinements.push(Refinement {
            check: Box::new(check),
            message: message.into(),
        });
        self
    }

    /// Declared columns, in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn check_arity(&self, actual: usize) -> Option<FieldIssue> {
        let expected = self.columns.len();
        let ok = if self.allow_extra {
            actual >= expected
        } else {
            actual == expected
        };
        if ok {
            return None;
        }
        let message = if actual < expected {
            format!("Too few columns: expected {}, got {}", expected, actual)
        } else {
            format!("Too many columns: expected {}, got {}", expected, actual)
        };
        Some(FieldIssue {
            column: None,
            message,
        })
    }
}

impl RowValidator for RowSchema {
    type Output = Vec<CellValue>;

    fn validate(&self, fields: &[String]) -> Result<Vec<CellValue>, ValidationError> {
        let mut issues: Vec<FieldIssue> = self.check_arity(fields.len()).into_iter().collect();
        let mut values = Vec::with_capacity(fields.len());

        for (index, (column, raw)) in self.columns.iter().zip(fields).enumerate() {
            if column.optional && raw.trim().is_empty() {
                values.push(CellValue::Empty);
                continue;
            }
            match column.column_type.coerce(raw) {
                Some(value) => values.push(value),
                None => issues.push(FieldIssue {
                    column: Some(index),
                    message: format!(
                        "{}: expected {}, got \"{}\"",
                        column.label(index),
                        column.column_type,
                        raw
                    ),
                }),
            }
        }

        if !issues.is_empty() {
            return Err(ValidationError::from_issues(issues));
        }

        values.extend(
            fields
                .iter()
                .skip(self.columns.len())
                .map(|s| CellValue::String(s.clone())),
        );

        let failed: Vec<FieldIssue> = self
            .refinements
            .iter()
            .filter(|r| !(r.check)(&values))
            .map(|r| FieldIssue {
                column: None,
                message: r.message.clone(),
            })
            .collect();

        if failed.is_empty() {
            Ok(values)
        } else {
            Err(ValidationError::from_issues(failed))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn person() -> RowSchema {
        RowSchema::new()
            .named_column("name", ColumnType::String)
            .named_column("age", ColumnType::Number)
    }

    #[test]
    fn test_coerces_values() {
        let values = person().validate(&fields(&["Alice", " 23 "])).unwrap();
        assert_eq!(
            values,
            vec![CellValue::String("Alice".to_string()), CellValue::Float(23.0)]
        );
    }

    #[test]
    fn test_non_numeric_field() {
        let err = person().validate(&fields(&["Bob", "thirty"])).unwrap_err();
        assert_eq!(err.message, "[1] 'age': expected number, got \"thirty\"");
        assert_eq!(err.issues[0].column, Some(1));
    }

    #[test]
    fn test_too_many_columns() {
        let err = person()
            .validate(&fields(&["Alice", "23", "extra"]))
            .unwrap_err();
        assert_eq!(err.message, "Too many columns: expected 2, got 3");
    }

    #[test]
    fn test_too_few_columns() {
        let err = person().validate(&fields(&["Alice"])).unwrap_err();
        assert_eq!(err.message, "Too few columns: expected 2, got 1");
    }

    #[test]
    fn test_extra_columns_allowed() {
        let schema = person().allow_extra_columns(true);
        let values = schema.validate(&fields(&["Alice", "23", "NYC"])).unwrap();
        assert_eq!(values[2], CellValue::String("NYC".to_string()));
    }

    #[test]
    fn test_refinement_message() {
        let schema = RowSchema::new()
            .column(ColumnType::String)
            .column(ColumnType::Number)
            .refine(
                |row| row[1].as_f64().is_some_and(|q| q.fract() == 0.0),
                "Quantity must be an integer",
            );

        assert!(schema.validate(&fields(&["Widget", "10"])).is_ok());

        let err = schema.validate(&fields(&["Widget", "10.5"])).unwrap_err();
        assert_eq!(err.message, "Quantity must be an integer");
    }

    #[test]
    fn test_refinements_skipped_when_coercion_fails() {
        let schema = RowSchema::new()
            .column(ColumnType::Integer)
            .refine(|_| false, "never reached");
        let err = schema.validate(&fields(&["1.5"])).unwrap_err();
        assert_eq!(err.message, "[0] column 0: expected integer, got \"1.5\"");
    }

    #[test]
    fn test_optional_and_typed_columns() {
        let schema = RowSchema::new()
            .column(ColumnType::Bool)
            .optional_column(ColumnType::Date)
            .column(ColumnType::Integer);

        let values = schema.validate(&fields(&["YES", "", "-4"])).unwrap();
        assert_eq!(
            values,
            vec![CellValue::Bool(true), CellValue::Empty, CellValue::Int(-4)]
        );

        let values = schema.validate(&fields(&["no", "2024-03-01", "0"])).unwrap();
        assert_eq!(
            values[1],
            CellValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_rejects_non_finite_numbers() {
        assert_eq!(ColumnType::Number.coerce("NaN"), None);
        assert_eq!(ColumnType::Number.coerce("inf"), None);
        assert_eq!(ColumnType::Number.coerce("1e3"), Some(CellValue::Float(1000.0)));
    }
}
