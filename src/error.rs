//! Error types for stream-level failures
//!
//! Row-level problems (column-count mismatch, validation failure) are never
//! errors here: they travel through the row iterator as [`crate::types::RowError`].

use thiserror::Error;

/// Result type for csvstream operations
pub type Result<T> = std::result::Result<T, CsvError>;

/// Errors that terminate a CSV stream
#[derive(Error, Debug)]
pub enum CsvError {
    /// Failed to open, read or decompress the line source
    #[error("Read error: {0}")]
    ReadError(String),

    /// Reader configuration rejected before any input was consumed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for CsvError {
    fn from(e: std::io::Error) -> Self {
        CsvError::ReadError(format!("Failed to read line: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_becomes_read_error() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let err: CsvError = io.into();
        assert!(matches!(err, CsvError::ReadError(_)));
        assert_eq!(
            err.to_string(),
            "Read error: Failed to read line: stream did not contain valid UTF-8"
        );
    }

    #[test]
    fn test_invalid_config_message() {
        let err = CsvError::InvalidConfig("comment marker must not be empty".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: comment marker must not be empty"
        );
    }
}
