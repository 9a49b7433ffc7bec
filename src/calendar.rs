//! Month-view availability derivation.
//!
//! Builds the fixed 6-week grid for a target month, marks each day open or
//! closed from the closed ranges, and composes the footer naming the next
//! open date. Everything here is a pure function of its arguments.

use crate::constants::{GRID_CELLS, NEXT_OPEN_TOKEN};
use crate::models::{
    CalendarCell, CellStatus, ClosedRange, MonthKey, MonthMetaTable, MonthView, RuleSet,
};
use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

/// A date is closed when any range contains it
pub fn is_closed(date: NaiveDate, ranges: &[ClosedRange]) -> bool {
    ranges.iter().any(|range| range.contains(date))
}

/// First cell of the grid: the Sunday on or before the first of the month
pub fn grid_start(month: MonthKey) -> NaiveDate {
    let first = month.first_day();
    let offset = u64::from(first.weekday().num_days_from_sunday());
    first.checked_sub_days(Days::new(offset)).unwrap_or(first)
}

/// Build the 42 consecutive cells of a month grid
pub fn build_month_cells(month: MonthKey, ranges: &[ClosedRange]) -> Vec<CalendarCell> {
    grid_start(month)
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| CalendarCell {
            date,
            is_other_month: !month.contains(date),
            status: if is_closed(date, ranges) {
                CellStatus::Closed
            } else {
                CellStatus::Open
            },
        })
        .collect()
}

/// Format a date as `M월 D일` without zero padding
pub fn format_month_day(date: NaiveDate) -> String {
    format!("{}월 {}일", date.month(), date.day())
}

/// Footer for the target month, empty unless both a next open date and a
/// footer template are available
pub fn footer_text(month: MonthKey, rules: &RuleSet, month_meta: &MonthMetaTable) -> String {
    let next_open = month_meta
        .get(&month)
        .and_then(|meta| meta.next_open_date);

    match (next_open, rules.footer_template()) {
        (Some(date), Some(template)) => {
            template.replacen(NEXT_OPEN_TOKEN, &format_month_day(date), 1)
        }
        _ => String::new(),
    }
}

/// Derive the complete month view
///
/// Range ordering is not validated here; an inverted range never matches
/// any date, so the affected days simply stay open.
pub fn derive_month_view(
    month: MonthKey,
    rules: &RuleSet,
    closed_ranges: &[ClosedRange],
    month_meta: &MonthMetaTable,
) -> MonthView {
    let cells = build_month_cells(month, closed_ranges);
    let footer_text = footer_text(month, rules, month_meta);

    let view = MonthView {
        month,
        cells,
        footer_text,
    };
    debug!(
        "Derived {}: {} closed / {} open days, footer {}",
        month,
        view.closed_days_in_month(),
        view.open_days_in_month(),
        if view.has_footer() { "set" } else { "empty" }
    );
    view
}
