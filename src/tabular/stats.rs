//! Parse diagnostics and result structures

use crate::models::Record;
use serde::Serialize;

/// What a parse kept and what it silently dropped
///
/// Parsing never fails, so this is the only way to notice upstream
/// data-entry problems such as a stray quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    /// Physical rows closed by a line break or end of input
    pub rows_scanned: usize,
    /// Rows elided because every field was blank
    pub blank_rows: usize,
    /// Records emitted to the caller
    pub records_emitted: usize,
    /// Data rows dropped because all header-mapped values were empty
    pub empty_records: usize,
    /// Fields dropped for lying beyond the header width
    pub overflow_fields: usize,
    /// Input ended inside a quoted field
    pub unterminated_quote: bool,
}

impl ParseReport {
    /// True when nothing suggests malformed input
    pub fn is_clean(&self) -> bool {
        !self.unterminated_quote && self.overflow_fields == 0
    }
}

/// Records plus the diagnostics of the parse that produced them
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub records: Vec<Record>,
    pub report: ParseReport,
}
