//! Tabular parser for published spreadsheet CSV exports
//!
//! Turns loosely-structured comma-separated text into an ordered list of
//! header-keyed [`Record`](crate::models::Record)s. Parsing never fails:
//! malformed quoting degrades to best-effort continuation, and an
//! unterminated quote simply absorbs the rest of the input.
//!
//! ## Architecture
//!
//! - [`scanner`] - quote-aware field/row splitting state machine
//! - [`records`] - header row handling and record construction
//! - [`stats`] - diagnostics describing what the parse dropped
//! - [`writer`] - serialization of records back into CSV text
//!
//! ## Usage
//!
//! ```rust
//! use sheet_calendar::tabular;
//!
//! let records = tabular::parse("key,value\nclosed_label,\"Full, sorry\"\n");
//! assert_eq!(records[0].field("value"), "Full, sorry");
//! ```

pub mod records;
pub mod scanner;
pub mod stats;
pub mod writer;

#[cfg(test)]
mod tests;

pub use records::build_records;
pub use scanner::{QuoteState, RowScanner};
pub use stats::{ParseReport, ParseResult};
pub use writer::write_records;

use crate::constants::BOM;
use crate::models::Record;
use tracing::{debug, warn};

/// Parse delimited text into records, discarding diagnostics
pub fn parse(text: &str) -> Vec<Record> {
    parse_with_report(text).records
}

/// Parse delimited text into records along with a report of what was dropped
pub fn parse_with_report(text: &str) -> ParseResult {
    let text = text.strip_prefix(BOM).unwrap_or(text);

    let mut scanner = RowScanner::new(text);
    let mut report = ParseReport::default();
    let records = build_records(&mut scanner, &mut report);

    report.rows_scanned = scanner.rows_scanned();
    report.blank_rows = scanner.blank_rows();
    report.unterminated_quote = scanner.state() == QuoteState::Quoted;

    if report.unterminated_quote {
        warn!("Unterminated quoted field; the remainder of the input was read as one field");
    }
    if report.overflow_fields > 0 {
        warn!(
            "Dropped {} fields beyond the header width",
            report.overflow_fields
        );
    }
    debug!(
        "Parsed {} records from {} rows ({} blank rows, {} empty records)",
        report.records_emitted, report.rows_scanned, report.blank_rows, report.empty_records
    );

    ParseResult { records, report }
}
