//! Logical-record assembly from physical lines

use super::quote::QuoteTracker;
use tracing::trace;

/// Joins physical lines into logical records while a quoted field is open
///
/// Each pushed line is scanned once by the [`QuoteTracker`]; quote state is
/// carried between lines as a flag, so total work is linear in input size.
///
/// ```
/// use csvstream::csv::RecordAssembler;
///
/// let mut assembler = RecordAssembler::default();
/// assert_eq!(assembler.push(r#"1,"multi"#), None);
/// assert_eq!(
///     assembler.push(r#"line",2"#).as_deref(),
///     Some("1,\"multi\nline\",2")
/// );
/// ```
#[derive(Debug, Default)]
pub struct RecordAssembler {
    tracker: QuoteTracker,
    buffer: String,
    in_quotes: bool,
    pending_lines: usize,
}

impl RecordAssembler {
    /// Create an assembler for a custom quote character
    pub fn new(quote_char: u8) -> Self {
        Self {
            tracker: QuoteTracker::new(quote_char),
            ..Self::default()
        }
    }

    /// Feed one physical line (without its terminator)
    ///
    /// Returns the completed logical record once quotes are balanced,
    /// `None` while a quoted field is still open.
    pub fn push(&mut self, line: &str) -> Option<String> {
        if self.pending_lines > 0 {
            self.buffer.push('\n');
        }
        self.buffer.push_str(line);
        self.pending_lines += 1;

        self.in_quotes = self.tracker.track(line, self.in_quotes);
        if self.in_quotes {
            trace!(lines = self.pending_lines, "quoted field continues");
            return None;
        }

        self.pending_lines = 0;
        Some(std::mem::take(&mut self.buffer))
    }

    /// Check if a record is waiting for more lines
    pub fn is_pending(&self) -> bool {
        self.pending_lines > 0
    }

    /// Number of physical lines held in the open record
    pub fn pending_lines(&self) -> usize {
        self.pending_lines
    }

    /// Take the unterminated record left at end of input, if any
    pub fn finish(&mut self) -> Option<String> {
        if !self.is_pending() {
            return None;
        }
        self.in_quotes = false;
        self.pending_lines = 0;
        Some(std::mem::take(&mut self.buffer))
    }

    /// Drop any open record
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.in_quotes = false;
        self.pending_lines = 0;
    }
}
