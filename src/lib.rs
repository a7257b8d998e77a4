//! # csvstream
//!
//! Streaming CSV reader that turns raw delimited text into untyped or
//! validated rows, one logical record at a time.
//!
//! - Quoted fields may contain delimiters, newlines and `""` escapes
//! - Comment lines are skipped by a configurable marker
//! - The first record can be captured as a header and shared with every row
//! - Each row can be checked by a [`RowValidator`] (closures and [`RowSchema`] included)
//! - Bad rows are reported in-band as [`ParsedRow::Error`]; the stream keeps going
//!
//! ## Quick Start
//!
//! ```
//! use csvstream::{CsvReader, ParsedRow};
//!
//! let data = "name,role\n\"Mallory, Alice\",senior developer\n";
//! let mut reader = CsvReader::from_text(data).has_header(true);
//!
//! for item in reader.rows() {
//!     match item? {
//!         ParsedRow::Row(row) => {
//!             assert_eq!(row.data, vec!["Mallory, Alice", "senior developer"]);
//!             assert_eq!(row.get_by_name("role").map(String::as_str), Some("senior developer"));
//!         }
//!         ParsedRow::Error(e) => panic!("unexpected row error: {}", e),
//!     }
//! }
//! # Ok::<(), csvstream::CsvError>(())
//! ```
//!
//! ## Typed Rows
//!
//! ```
//! use csvstream::{CellValue, ColumnType, CsvReader, RowSchema};
//!
//! let schema = RowSchema::new()
//!     .named_column("item", ColumnType::String)
//!     .named_column("qty", ColumnType::Integer);
//!
//! let mut reader = CsvReader::from_text("Widget,3\nGadget,lots");
//! let items: Vec<_> = reader.validated_rows(schema).collect::<Result<_, _>>()?;
//!
//! let first = items[0].as_row().unwrap();
//! assert_eq!(first.data[1], CellValue::Int(3));
//! assert!(items[1].as_error().is_some());
//! # Ok::<(), csvstream::CsvError>(())
//! ```

pub mod config;
pub mod csv;
pub mod csv_reader;
pub mod error;
pub mod schema;
pub mod source;
pub mod types;
pub mod validate;

pub use config::ReaderConfig;
pub use csv_reader::{CsvReader, CsvRowIterator, Record, ValidatedRowIterator};
pub use error::{CsvError, Result};
pub use schema::{Column, ColumnType, RowSchema};
pub use source::LineSource;
pub use types::{CellValue, Header, ParsedRow, Row, RowError, RowErrorKind};
pub use validate::{FieldIssue, RowValidator, ValidationError};
