//! Serialization of records back into delimited text
//!
//! Fields containing the delimiter, a quote or a line break are quoted and
//! embedded quotes doubled, so the output parses back to the same records.

use crate::constants::{DELIMITER, QUOTE};
use crate::error::{Result, SheetError};
use crate::models::Record;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io;

/// Write a header row followed by one row per record, each ending in `\n`
///
/// Columns a record lacks are written as empty fields.
pub fn write_records<S: AsRef<str>>(headers: &[S], records: &[Record]) -> Result<String> {
    let mut wtr = WriterBuilder::new()
        .delimiter(DELIMITER as u8)
        .quote(QUOTE as u8)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(headers.iter().map(|h| h.as_ref()))?;
    for record in records {
        wtr.write_record(headers.iter().map(|h| record.field(h.as_ref())))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| SheetError::from(csv::Error::from(e.into_error())))?;
    String::from_utf8(bytes).map_err(|e| {
        SheetError::from(csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
    })
}
