//! Reader configuration

use crate::error::{CsvError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling how a [`crate::CsvReader`] turns lines into rows
///
/// # Examples
///
/// ```
/// use csvstream::ReaderConfig;
///
/// let config = ReaderConfig::new()
///     .has_header(true)
///     .comment_char("#")
///     .delimiter(b';');
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReaderConfig {
    /// Field delimiter (default `,`)
    pub delimiter: u8,
    /// Quote character (default `"`)
    pub quote_char: u8,
    /// Treat the first non-blank record as column names
    pub has_header: bool,
    /// Skip physical lines starting with this marker after leading whitespace
    pub comment_char: Option<String>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            delimiter: b',',
            quote_char: b'"',
            has_header: false,
            comment_char: None,
        }
    }
}

impl ReaderConfig {
    /// Create configuration with defaults (comma, double quote, no header)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.delimiter = delim;
        self
    }

    /// Set custom quote character
    pub fn quote_char(mut self, quote: u8) -> Self {
        self.quote_char = quote;
        self
    }

    /// Indicate that the first record contains headers
    pub fn has_header(mut self, has: bool) -> Self {
        self.has_header = has;
        self
    }

    /// Skip lines starting with `marker`
    pub fn comment_char<S: Into<String>>(mut self, marker: S) -> Self {
        self.comment_char = Some(marker.into());
        self
    }

    /// Check option consistency
    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() {
            return Err(CsvError::InvalidConfig(format!(
                "delimiter must be ASCII, got 0x{:02X}",
                self.delimiter
            )));
        }
        if !self.quote_char.is_ascii() {
            return Err(CsvError::InvalidConfig(format!(
                "quote character must be ASCII, got 0x{:02X}",
                self.quote_char
            )));
        }
        if self.delimiter == self.quote_char {
            return Err(CsvError::InvalidConfig(
                "delimiter and quote character must differ".to_string(),
            ));
        }
        if matches!(self.delimiter, b'\n' | b'\r') || matches!(self.quote_char, b'\n' | b'\r') {
            return Err(CsvError::InvalidConfig(
                "line terminators cannot be used as delimiter or quote".to_string(),
            ));
        }
        if self.comment_char.as_deref() == Some("") {
            return Err(CsvError::InvalidConfig(
                "comment marker must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Check whether a physical line is a comment
    pub fn is_comment(&self, line: &str) -> bool {
        match self.comment_char.as_deref() {
            Some(marker) if !marker.is_empty() => line.trim_start().starts_with(marker),
            _ => false,
        }
    }
}
