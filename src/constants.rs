//! Application constants for the sheet calendar
//!
//! Column names of the published sheets, rule keys, default labels and
//! the fixed geometry of the month grid.

// =============================================================================
// Tabular Format
// =============================================================================

/// Field delimiter of the published CSV export
pub const DELIMITER: char = ',';

/// Quote character; doubled inside a quoted field to produce a literal quote
pub const QUOTE: char = '"';

/// Byte-order mark some exports prepend to the first header cell
pub const BOM: char = '\u{feff}';

// =============================================================================
// Month Grid
// =============================================================================

/// Days per week row of the grid
pub const DAYS_PER_WEEK: usize = 7;

/// Week rows rendered for every month, regardless of its length
pub const WEEKS_PER_GRID: usize = 6;

/// Total cells in the month grid
pub const GRID_CELLS: usize = DAYS_PER_WEEK * WEEKS_PER_GRID;

/// Weekday header, Sunday first
pub const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["일", "월", "화", "수", "목", "금", "토"];

/// Placeholder replaced with the next open date in the footer template
pub const NEXT_OPEN_TOKEN: &str = "{next_open_md}";

/// Date format of every date exchanged with the sheets
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Rule Set
// =============================================================================

/// Rule keys read by the calendar
pub mod rule_keys {
    pub const CLOSED_LABEL: &str = "closed_label";
    pub const OPEN_LABEL: &str = "open_label";
    pub const FOOTER_TEMPLATE: &str = "footer_template";
}

/// Label shown on closed days when the rule set has none
pub const DEFAULT_CLOSED_LABEL: &str = "마감";

/// Label shown on open days when the rule set has none
pub const DEFAULT_OPEN_LABEL: &str = "접수 가능";

// =============================================================================
// Sheet Columns
// =============================================================================

/// Columns of each published sheet
pub mod columns {
    pub const KEY: &str = "key";
    pub const VALUE: &str = "value";

    pub const START_DATE: &str = "start_date";
    pub const END_DATE: &str = "end_date";
    pub const REASON: &str = "reason";

    pub const MONTH: &str = "month";
    pub const NEXT_OPEN_DATE: &str = "next_open_date";

    pub const ORDER: &str = "order";
    pub const ICON: &str = "icon";
    pub const DESC: &str = "desc";

    pub const CATEGORY: &str = "category";
    pub const TITLE: &str = "title";
    pub const YOUTUBE: &str = "youtube";
    pub const TAGS: &str = "tags";
}

// =============================================================================
// Widgets
// =============================================================================

/// Sort position for notice and portfolio rows without a usable order
pub const DEFAULT_ORDER: f64 = 9999.0;

/// Icon shown next to a notice that has none
pub const DEFAULT_NOTICE_ICON: &str = "ℹ️";

/// Portfolio categories in display order, with their tab labels
pub const PORTFOLIO_CATEGORIES: &[(&str, &str)] = &[
    ("collab", "협업 패키지"),
    ("legacy", "레거시 패키지"),
    ("migrate", "CSS 이식"),
];

/// Length of a YouTube video id
pub const YOUTUBE_ID_LEN: usize = 11;

// =============================================================================
// Configuration
// =============================================================================

/// Directory under the platform config dir holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = "sheet-calendar";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.yaml";
