//! Parse a CSV file and print each row or row error
//!
//! Run with: cargo run --example run_parser -- data/people.csv [--header]
//!
//! Set `RUST_LOG=csvstream=trace` to see skipped comments and continuation lines.

use csvstream::{CsvReader, ParsedRow};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "data/people.csv".to_string());
    let header = args.any(|a| a == "--header");

    println!("=== Reading {} ===\n", path);
    let start = Instant::now();

    let mut reader = CsvReader::open(&path)?
        .has_header(header)
        .comment_char("#");

    let mut ok = 0;
    let mut failed = 0;
    for item in reader.rows() {
        match item? {
            ParsedRow::Row(row) => {
                ok += 1;
                println!("{:>5}: {:?}", row.row_number, row.data);
            }
            ParsedRow::Error(e) => {
                failed += 1;
                eprintln!("ERR line {} - {}", e.row_number, e.message);
            }
        }
    }

    if let Some(headers) = reader.headers() {
        println!("\nHeaders: {:?}", headers);
    }
    println!(
        "\n{} rows, {} errors in {:?}",
        ok,
        failed,
        start.elapsed()
    );
    Ok(())
}
