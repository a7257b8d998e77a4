//! Type definitions for parsed CSV rows

use crate::validate::ValidationError;
use chrono::NaiveDate;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Header row shared by every row emitted after it
pub type Header = Arc<[String]>;

/// A single typed value produced by a row schema
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellValue {
    /// Empty field
    Empty,
    /// String value
    String(String),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Calendar date
    Date(NaiveDate),
}

impl CellValue {
    /// Convert value to string
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Check if value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Try to convert to integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            CellValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Try to convert to float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Int(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Try to convert to boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Int(i) => Some(*i != 0),
            CellValue::String(s) => parse_bool(s),
            _ => None,
        }
    }

    /// Try to convert to date
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            CellValue::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }
}

pub(crate) fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

/// A successfully parsed row
///
/// `data` is the raw field sequence (`Vec<String>`) when no validator is used,
/// or whatever the validator produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<T> {
    /// Row payload
    pub data: T,
    /// Header captured from the first record, when header mode is on
    pub header: Option<Header>,
    /// 1-based logical record number
    pub row_number: u64,
}

impl<T> Row<T> {
    /// Create a new row
    pub fn new(data: T, header: Option<Header>, row_number: u64) -> Self {
        Row {
            data,
            header,
            row_number,
        }
    }

    /// Position of a named column in the header
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.as_ref()?.iter().position(|h| h == name)
    }
}

impl<C> Row<Vec<C>> {
    /// Get field at column index
    pub fn get(&self, col: usize) -> Option<&C> {
        self.data.get(col)
    }

    /// Get field by header name
    pub fn get_by_name(&self, name: &str) -> Option<&C> {
        self.column_index(name).and_then(|i| self.data.get(i))
    }

    /// Get number of fields
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if row has no fields
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<C: Clone> Row<Vec<C>> {
    /// Zip header names with field values, keeping column order
    ///
    /// Returns `None` without a header. Extra fields beyond the header
    /// length are not included.
    pub fn to_map(&self) -> Option<IndexMap<String, C>> {
        let header = self.header.as_ref()?;
        Some(
            header
                .iter()
                .cloned()
                .zip(self.data.iter().cloned())
                .collect(),
        )
    }
}

/// Why a row was rejected
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RowErrorKind {
    /// Field count differs from the header (only checked without a validator)
    ColumnCountMismatch {
        /// Header length
        expected: usize,
        /// Field count of the offending row
        actual: usize,
    },
    /// The validator rejected the row
    Validation(ValidationError),
}

/// A rejected row, reported in-band so later rows keep flowing
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowError {
    /// 1-based logical record number
    pub row_number: u64,
    /// Human-readable message
    pub message: String,
    /// Record text as read, physical lines joined with `\n`
    pub raw_line: String,
    /// Structured cause
    pub kind: RowErrorKind,
}

impl RowError {
    /// Column-count mismatch against the header
    pub fn column_count(row_number: u64, raw_line: String, expected: usize, actual: usize) -> Self {
        RowError {
            row_number,
            message: format!(
                "Column count mismatch: expected {}, got {}",
                expected, actual
            ),
            raw_line,
            kind: RowErrorKind::ColumnCountMismatch { expected, actual },
        }
    }

    /// Validation failure; the message comes from the validator
    pub fn validation(row_number: u64, raw_line: String, cause: ValidationError) -> Self {
        RowError {
            row_number,
            message: cause.message.clone(),
            raw_line,
            kind: RowErrorKind::Validation(cause),
        }
    }

    /// Validation detail, if the validator produced this error
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match &self.kind {
            RowErrorKind::Validation(e) => Some(e),
            RowErrorKind::ColumnCountMismatch { .. } => None,
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row_number, self.message)
    }
}

impl std::error::Error for RowError {}

/// One item of the row stream: a row or an in-band row error
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow<T> {
    /// Successfully parsed (and validated) row
    Row(Row<T>),
    /// Rejected row
    Error(RowError),
}

impl<T> ParsedRow<T> {
    /// Row number of either variant
    pub fn row_number(&self) -> u64 {
        match self {
            ParsedRow::Row(r) => r.row_number,
            ParsedRow::Error(e) => e.row_number,
        }
    }

    /// Check if this is a successful row
    pub fn is_row(&self) -> bool {
        matches!(self, ParsedRow::Row(_))
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> std::result::Result<Row<T>, RowError> {
        match self {
            ParsedRow::Row(r) => Ok(r),
            ParsedRow::Error(e) => Err(e),
        }
    }

    /// Borrow the row, if any
    pub fn as_row(&self) -> Option<&Row<T>> {
        match self {
            ParsedRow::Row(r) => Some(r),
            ParsedRow::Error(_) => None,
        }
    }

    /// Borrow the error, if any
    pub fn as_error(&self) -> Option<&RowError> {
        match self {
            ParsedRow::Row(_) => None,
            ParsedRow::Error(e) => Some(e),
        }
    }
}
