//! Record mappers
//!
//! Turn parsed sheet records into typed inputs: the calendar's rule set,
//! closed ranges and month metadata, plus the notice and portfolio widget
//! items. Mappers never fail; rows they cannot use are dropped and logged.
//!
//! - [`availability`] - rules, closed ranges, month metadata
//! - [`widgets`] - notice list and portfolio catalog
//! - [`youtube`] - video id extraction for portfolio rows

pub mod availability;
pub mod widgets;
pub mod youtube;

pub use availability::{
    CalendarInputs, MappingReport, closed_ranges_from_records, month_meta_from_records,
    rules_from_records,
};
pub use widgets::{PortfolioCatalog, notices_from_records, portfolio_from_records};
pub use youtube::youtube_video_id;

/// Parse a sheet's numeric `order` cell, falling back for blank or non-finite values
pub(crate) fn parse_order(value: &str, fallback: f64) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(fallback)
}
