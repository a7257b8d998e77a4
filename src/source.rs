//! Physical line sources: files (plain or compressed), strings and readers

use crate::error::{CsvError, Result};
use s_zip::StreamingZipReader;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::Path;
use tracing::debug;

type Lines = Box<dyn Iterator<Item = std::io::Result<String>> + Send>;

/// Lazy sequence of physical lines with `\n` / `\r\n` stripped
///
/// Owns its underlying handle; dropping the source closes it, whether the
/// lines were exhausted or not.
pub struct LineSource {
    lines: Lines,
    failed: bool,
}

impl fmt::Debug for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSource")
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl LineSource {
    /// Open a file - auto-detects compression from file extension
    ///
    /// # File Extensions
    /// - `.csv` (or anything else) → direct buffered read
    /// - `.csv.zst`, `.csv.zip` → first `.csv` entry of a ZIP archive (Zstd or
    ///   Deflate entries), decompressed up front
    ///
    /// Bare gzip streams are not ZIP archives and are not supported.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_str().unwrap_or("");

        if path_str.ends_with(".csv.zst") || path_str.ends_with(".csv.zip") {
            let mut zip = StreamingZipReader::open(path_ref)
                .map_err(|e| CsvError::ReadError(format!("Failed to open ZIP: {}", e)))?;

            // Find first .csv entry
            let entry_name = zip
                .entries()
                .iter()
                .find(|e| e.name.ends_with(".csv"))
                .or_else(|| zip.entries().first())
                .ok_or_else(|| CsvError::ReadError("No CSV entry found in archive".to_string()))?
                .name
                .clone();

            let data = zip
                .read_entry_by_name(&entry_name)
                .map_err(|e| CsvError::ReadError(format!("Failed to read ZIP entry: {}", e)))?;

            debug!(path = %path_ref.display(), entry = %entry_name, bytes = data.len(), "opened compressed CSV");
            Ok(Self::from_bytes(data))
        } else {
            let file = File::open(path_ref)
                .map_err(|e| CsvError::ReadError(format!("Failed to open CSV file: {}", e)))?;

            debug!(path = %path_ref.display(), "opened CSV file");
            Ok(Self::from_reader(file))
        }
    }

    /// Read lines from an in-memory string
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Self::from_bytes(text.into().into_bytes())
    }

    /// Read lines from in-memory bytes (must be UTF-8)
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            lines: Box::new(Cursor::new(data).lines()),
            failed: false,
        }
    }

    /// Read lines from any reader, buffered
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            lines: Box::new(BufReader::new(reader).lines()),
            failed: false,
        }
    }
}

impl Iterator for LineSource {
    type Item = Result<String>;

    /// Yields `Err` at most once; the source is finished after a read error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.lines.next()? {
            Ok(line) => Some(Ok(line)),
            Err(e) => {
                self.failed = true;
                Some(Err(e.into()))
            }
        }
    }
}
