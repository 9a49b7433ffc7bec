//! Calendar input mapping
//!
//! Maps the rules, closed-ranges and meta sheets onto the types the
//! calendar deriver consumes. Dates are parsed here, at the boundary, so
//! only zero-padded `YYYY-MM-DD` values ever reach the deriver.

use crate::calendar::derive_month_view;
use crate::constants::columns;
use crate::models::{
    ClosedRange, MonthKey, MonthMeta, MonthMetaTable, MonthView, Record, RuleSet, parse_ymd,
};
use serde::Serialize;
use tracing::debug;

/// Counts of sheet rows the mappers could not use
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingReport {
    /// Rule rows without a key
    pub rules_ignored: usize,
    /// Range rows with a missing or malformed date, or start after end
    pub ranges_dropped: usize,
    /// Meta rows without a valid month key
    pub meta_ignored: usize,
}

impl MappingReport {
    pub fn total_dropped(&self) -> usize {
        self.rules_ignored + self.ranges_dropped + self.meta_ignored
    }
}

fn map_rules(records: &[Record], report: &mut MappingReport) -> RuleSet {
    let mut rules = RuleSet::new();
    for record in records {
        let key = record.field(columns::KEY).trim();
        if key.is_empty() {
            report.rules_ignored += 1;
            continue;
        }
        rules.insert(key, record.field(columns::VALUE).trim());
    }
    rules
}

fn map_closed_range(record: &Record) -> Option<ClosedRange> {
    let start = record.field(columns::START_DATE);
    let end = record.field(columns::END_DATE);
    if start.is_empty() || end.is_empty() {
        debug!("Dropping closed range with a missing date: {:?}", record);
        return None;
    }

    let (Some(start_date), Some(end_date)) = (parse_ymd(start), parse_ymd(end)) else {
        debug!("Dropping closed range with malformed dates: {} .. {}", start, end);
        return None;
    };

    let range = ClosedRange::new(start_date, end_date);
    if !range.is_ordered() {
        debug!("Dropping inverted closed range: {} .. {}", start, end);
        return None;
    }

    let reason = record.field(columns::REASON).trim();
    Some(if reason.is_empty() {
        range
    } else {
        range.with_reason(reason)
    })
}

fn map_closed_ranges(records: &[Record], report: &mut MappingReport) -> Vec<ClosedRange> {
    records
        .iter()
        .filter_map(|record| {
            let range = map_closed_range(record);
            if range.is_none() {
                report.ranges_dropped += 1;
            }
            range
        })
        .collect()
}

fn map_month_meta(records: &[Record], report: &mut MappingReport) -> MonthMetaTable {
    let mut table = MonthMetaTable::new();
    for record in records {
        let month = record.field(columns::MONTH);
        let Ok(key) = month.parse::<MonthKey>() else {
            if !month.is_empty() {
                debug!("Ignoring meta row with malformed month '{}'", month);
            }
            report.meta_ignored += 1;
            continue;
        };

        let next_open_date = parse_ymd(record.field(columns::NEXT_OPEN_DATE));
        table.insert(key, MonthMeta { next_open_date });
    }
    table
}

/// Reduce `key`/`value` rows into a rule set; later keys overwrite earlier ones
pub fn rules_from_records(records: &[Record]) -> RuleSet {
    map_rules(records, &mut MappingReport::default())
}

/// Map `start_date`/`end_date`/`reason` rows, dropping unusable ranges
pub fn closed_ranges_from_records(records: &[Record]) -> Vec<ClosedRange> {
    map_closed_ranges(records, &mut MappingReport::default())
}

/// Map `month`/`next_open_date` rows into a month-keyed table; the last row
/// for a month wins
pub fn month_meta_from_records(records: &[Record]) -> MonthMetaTable {
    map_month_meta(records, &mut MappingReport::default())
}

/// Everything the deriver needs, mapped from the three calendar sheets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarInputs {
    pub rules: RuleSet,
    pub closed_ranges: Vec<ClosedRange>,
    pub month_meta: MonthMetaTable,
}

impl CalendarInputs {
    /// Map the rules, closed-ranges and meta sheets in one pass
    pub fn from_records(
        rules: &[Record],
        closed_ranges: &[Record],
        month_meta: &[Record],
    ) -> (Self, MappingReport) {
        let mut report = MappingReport::default();
        let inputs = Self {
            rules: map_rules(rules, &mut report),
            closed_ranges: map_closed_ranges(closed_ranges, &mut report),
            month_meta: map_month_meta(month_meta, &mut report),
        };

        debug!(
            "Mapped {} rules, {} closed ranges, {} month entries ({} rows dropped)",
            inputs.rules.len(),
            inputs.closed_ranges.len(),
            inputs.month_meta.len(),
            report.total_dropped()
        );
        (inputs, report)
    }

    pub fn derive(&self, month: MonthKey) -> MonthView {
        derive_month_view(month, &self.rules, &self.closed_ranges, &self.month_meta)
    }
}
