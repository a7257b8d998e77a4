//! CSV reading with streaming support, comments, headers and validation

use crate::config::ReaderConfig;
use crate::csv::{CsvParser, RecordAssembler};
use crate::error::Result;
use crate::source::LineSource;
use crate::types::{Header, ParsedRow, Row, RowError};
use crate::validate::RowValidator;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace, warn};

/// CSV reader with streaming capabilities
///
/// Reads records lazily, one logical record per `next()`. Quoted fields may
/// span physical lines. Row-level problems (column-count mismatch,
/// validation failure) are yielded as [`ParsedRow::Error`] and never stop
/// the stream; only source failures come back as `Err`.
///
/// # Examples
///
/// ```no_run
/// use csvstream::{CsvReader, ParsedRow};
///
/// let mut reader = CsvReader::open("data.csv").unwrap();
///
/// for item in reader.rows() {
///     match item.unwrap() {
///         ParsedRow::Row(row) => println!("{}: {:?}", row.row_number, row.data),
///         ParsedRow::Error(e) => eprintln!("{}", e),
///     }
/// }
/// ```
///
/// # With Headers and Comments
///
/// ```
/// use csvstream::{CsvReader, ParsedRow};
///
/// let mut reader = CsvReader::from_text("# people\nname,age\nAlice,23\nBob")
///     .has_header(true)
///     .comment_char("#");
///
/// let items: Vec<_> = reader.rows().collect::<Result<_, _>>()?;
/// assert_eq!(reader.headers(), Some(&["name".to_string(), "age".to_string()][..]));
/// assert!(matches!(&items[0], ParsedRow::Row(r) if r.data == ["Alice", "23"]));
/// assert!(matches!(&items[1], ParsedRow::Error(e) if e.message == "Column count mismatch: expected 2, got 1"));
/// # Ok::<(), csvstream::CsvError>(())
/// ```
#[derive(Debug)]
pub struct CsvReader {
    source: LineSource,
    assembler: RecordAssembler,
    parser: CsvParser,
    config: ReaderConfig,

    // State
    row_count: u64,
    headers: Option<Header>,
    config_checked: bool,
    finished: bool,
}

/// A completed, non-blank, non-header logical record
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based logical record number
    pub row_number: u64,
    /// Record text, physical lines joined with `\n`
    pub raw: String,
    /// Tokenized fields
    pub fields: Vec<String>,
}

impl CsvReader {
    /// Open CSV file - auto-detects compression from file extension
    ///
    /// # File Extensions
    /// - `.csv` → Uncompressed, direct read
    /// - `.csv.zst`, `.csv.zip` → ZIP archive; the first `.csv` entry is
    ///   decompressed (Zstd or Deflate) and read line by line
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_source(LineSource::open(path)?))
    }

    /// Read CSV from an in-memory string
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Self::from_source(LineSource::from_text(text))
    }

    /// Read CSV from any reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self::from_source(LineSource::from_reader(reader))
    }

    /// Read CSV from an existing line source
    pub fn from_source(source: LineSource) -> Self {
        let config = ReaderConfig::default();
        CsvReader {
            source,
            assembler: RecordAssembler::new(config.quote_char),
            parser: CsvParser::new(config.delimiter, config.quote_char),
            config,
            row_count: 0,
            headers: None,
            config_checked: false,
            finished: false,
        }
    }

    /// Replace the whole configuration (builder pattern)
    pub fn with_config(mut self, config: ReaderConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        self.config_checked = true;
        self.rebuild();
        Ok(self)
    }

    /// Set custom delimiter (builder pattern)
    ///
    /// # Examples
    ///
    /// ```
    /// use csvstream::CsvReader;
    ///
    /// let mut reader = CsvReader::from_text("a;b").delimiter(b';');
    /// let row = reader.read_row()?.unwrap().into_result().unwrap();
    /// assert_eq!(row.data, vec!["a", "b"]);
    /// # Ok::<(), csvstream::CsvError>(())
    /// ```
    pub fn delimiter(mut self, delim: u8) -> Self {
        self.config.delimiter = delim;
        self.config_checked = false;
        self.rebuild();
        self
    }

    /// Set custom quote character (builder pattern)
    pub fn quote_char(mut self, quote: u8) -> Self {
        self.config.quote_char = quote;
        self.config_checked = false;
        self.rebuild();
        self
    }

    /// Indicate that the first record contains headers (builder pattern)
    ///
    /// When set to `true`, the first non-blank record is stored, is
    /// accessible via `headers()`, and is attached to every emitted row.
    pub fn has_header(mut self, has: bool) -> Self {
        self.config.has_header = has;
        self
    }

    /// Skip physical lines starting with `marker` (builder pattern)
    pub fn comment_char<S: Into<String>>(mut self, marker: S) -> Self {
        self.config.comment_char = Some(marker.into());
        self.config_checked = false;
        self
    }

    fn rebuild(&mut self) {
        self.parser = CsvParser::new(self.config.delimiter, self.config.quote_char);
        self.assembler = RecordAssembler::new(self.config.quote_char);
    }

    /// Get the active configuration
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Get header row if available
    ///
    /// Returns `Some(&[String])` once the header record was read, `None` otherwise.
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Get the number of logical records counted so far (header included)
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Read the next data record, before any column or validation checks
    ///
    /// Comment lines and blank records are skipped, continuation lines are
    /// merged, and the header record is captured. Returns `Ok(None)` at EOF.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        if self.finished {
            return Ok(None);
        }
        if !self.config_checked {
            if let Err(e) = self.config.validate() {
                self.finished = true;
                return Err(e);
            }
            self.config_checked = true;
        }

        loop {
            let line = match self.source.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.finished = true;
                    return Err(e);
                }
                None => {
                    self.finished = true;
                    let lines = self.assembler.pending_lines();
                    if self.assembler.finish().is_some() {
                        warn!(
                            lines,
                            "unterminated quoted field at end of input, record dropped"
                        );
                    }
                    return Ok(None);
                }
            };

            if self.config.is_comment(&line) {
                trace!("skipping comment line");
                continue;
            }

            let Some(raw) = self.assembler.push(&line) else {
                continue;
            };

            let fields = self.parser.parse_line(&raw);
            if fields.len() == 1 && fields[0].is_empty() {
                trace!("skipping blank record");
                continue;
            }

            self.row_count += 1;

            if self.config.has_header && self.headers.is_none() {
                debug!(columns = fields.len(), "captured header row");
                self.headers = Some(fields.into());
                continue;
            }

            return Ok(Some(Record {
                row_number: self.row_count,
                raw,
                fields,
            }));
        }
    }

    /// Read a single row without a validator
    ///
    /// With a header, rows whose field count differs from it come back as
    /// [`ParsedRow::Error`]. Returns `Ok(None)` when EOF is reached.
    pub fn read_row(&mut self) -> Result<Option<ParsedRow<Vec<String>>>> {
        let Some(record) = self.read_record()? else {
            return Ok(None);
        };

        if let Some(header) = &self.headers {
            if header.len() != record.fields.len() {
                debug!(row = record.row_number, "column count mismatch");
                return Ok(Some(ParsedRow::Error(RowError::column_count(
                    record.row_number,
                    record.raw,
                    header.len(),
                    record.fields.len(),
                ))));
            }
        }

        Ok(Some(ParsedRow::Row(Row::new(
            record.fields,
            self.headers.clone(),
            record.row_number,
        ))))
    }

    /// Read a single row through a validator
    ///
    /// Column counts are not checked against the header here; arity is the
    /// validator's concern. Returns `Ok(None)` when EOF is reached.
    pub fn read_validated<V: RowValidator>(
        &mut self,
        validator: &V,
    ) -> Result<Option<ParsedRow<V::Output>>> {
        let Some(record) = self.read_record()? else {
            return Ok(None);
        };

        let item = match validator.validate(&record.fields) {
            Ok(data) => ParsedRow::Row(Row::new(data, self.headers.clone(), record.row_number)),
            Err(cause) => {
                debug!(row = record.row_number, error = %cause, "row failed validation");
                ParsedRow::Error(RowError::validation(record.row_number, record.raw, cause))
            }
        };
        Ok(Some(item))
    }

    /// Get iterator over rows
    ///
    /// # Examples
    ///
    /// ```
    /// use csvstream::CsvReader;
    ///
    /// let mut reader = CsvReader::from_text("a,b\nc,d");
    ///
    /// for item in reader.rows() {
    ///     let row = item?.into_result().unwrap();
    ///     println!("{:?}", row.data);
    /// }
    /// # Ok::<(), csvstream::CsvError>(())
    /// ```
    pub fn rows(&mut self) -> CsvRowIterator<'_> {
        CsvRowIterator { reader: self }
    }

    /// Get iterator over rows checked by `validator`
    pub fn validated_rows<V: RowValidator>(&mut self, validator: V) -> ValidatedRowIterator<'_, V> {
        ValidatedRowIterator {
            reader: self,
            validator,
        }
    }
}

/// Iterator over CSV rows
pub struct CsvRowIterator<'a> {
    reader: &'a mut CsvReader,
}

impl<'a> Iterator for CsvRowIterator<'a> {
    type Item = Result<ParsedRow<Vec<String>>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_row().transpose()
    }
}

/// Iterator over validated CSV rows
pub struct ValidatedRowIterator<'a, V> {
    reader: &'a mut CsvReader,
    validator: V,
}

impl<'a, V: RowValidator> Iterator for ValidatedRowIterator<'a, V> {
    type Item = Result<ParsedRow<V::Output>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_validated(&self.validator).transpose()
    }
}
