//! Sheet Calendar Library
//!
//! Drives a work-availability calendar and two small widgets from
//! spreadsheets published as CSV.
//!
//! This library provides tools for:
//! - Parsing delimited text with quoted fields into header-keyed records
//! - Mapping records into rules, closed date ranges and per-month metadata
//! - Deriving the 42-cell month grid with open/closed status and footer text
//! - Mapping the notice list and the YouTube portfolio catalog
//! - Fetching published sheets over HTTP or from local files
//!
//! ```
//! use sheet_calendar::{CalendarInputs, MonthKey, parse};
//!
//! let (inputs, _) = CalendarInputs::from_records(
//!     &parse("key,value\nfooter_template,Opens {next_open_md}\n"),
//!     &parse("start_date,end_date\n2024-03-10,2024-03-12\n"),
//!     &parse("month,next_open_date\n2024-03,2024-04-05\n"),
//! );
//! let view = inputs.derive(MonthKey::new(2024, 3).unwrap());
//!
//! assert_eq!(view.cells.len(), 42);
//! assert_eq!(view.footer_text, "Opens 4월 5일");
//! ```

pub mod calendar;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod mapping;
pub mod models;
pub mod render;
pub mod tabular;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use calendar::derive_month_view;
pub use config::{Config, SourceConfig, SourceKind};
pub use error::{Result, SheetError};
pub use fetch::{Source, SourceFetcher};
pub use mapping::{CalendarInputs, MappingReport, PortfolioCatalog};
pub use models::{
    CalendarCell, CellStatus, ClosedRange, MonthKey, MonthMeta, MonthMetaTable, MonthTab,
    MonthView, NoticeItem, PortfolioItem, Record, RuleSet,
};
pub use tabular::{ParseReport, ParseResult, parse, parse_with_report};
