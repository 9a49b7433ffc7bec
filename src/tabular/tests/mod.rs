//! Test utilities for tabular parser testing
//!
//! Sample sheet exports shared by the parser test modules.

use crate::models::Record;


/// Rules sheet as published, with CRLF line endings and a quoted template
pub fn create_rules_csv() -> String {
    "key,value\r\n\
     closed_label,마감\r\n\
     open_label,접수 가능\r\n\
     footer_template,\"다음 접수일은 {next_open_md}, 입니다\"\r\n"
        .to_string()
}

/// Closed ranges sheet with a blank spacer row and a multi-line reason
pub fn create_closed_ranges_csv() -> String {
    "start_date,end_date,reason\n\
     2024-03-10,2024-03-12,\"holiday\nline two\"\n\
     ,,\n\
     2024-03-20,2024-03-20,\n"
        .to_string()
}

/// Build a record from column/value pairs
pub fn record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().copied().collect()
}
