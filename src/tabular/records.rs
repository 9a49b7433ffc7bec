//! Record construction from scanned rows
//!
//! The first retained row is the header. Each following row is mapped onto
//! the header positions with trimmed values.

use super::stats::ParseReport;
use crate::models::Record;
use tracing::debug;

/// Build header-keyed records from raw rows
///
/// Fields beyond the header width are dropped; missing trailing fields
/// become empty strings. A record whose values are all empty is dropped.
pub fn build_records<I>(rows: I, report: &mut ParseReport) -> Vec<Record>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut rows = rows.into_iter();

    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row.iter().map(|h| h.trim().to_string()).collect();
    debug!("Header columns: {:?}", headers);

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        if row.len() > headers.len() {
            report.overflow_fields += row.len() - headers.len();
            debug!(
                "Data row {} has {} fields for {} header columns",
                index + 1,
                row.len(),
                headers.len()
            );
        }

        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let value = row.get(i).map(|v| v.trim()).unwrap_or_default();
                (header.as_str(), value)
            })
            .collect();

        if record.is_blank() {
            report.empty_records += 1;
            continue;
        }
        records.push(record);
    }

    report.records_emitted = records.len();
    records
}
