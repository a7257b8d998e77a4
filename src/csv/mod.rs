//! CSV record assembly and tokenization
//!
//! Physical lines go through the [`RecordAssembler`] (which uses the
//! [`QuoteTracker`] to know when a quoted field spans a line break), and each
//! completed logical record is split into fields by the [`CsvParser`].

mod assembler;
mod parser;
mod quote;

pub use assembler::RecordAssembler;
pub use parser::{tokenize, CsvParser};
pub use quote::{track, QuoteTracker};
