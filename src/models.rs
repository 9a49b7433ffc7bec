//! Core data structures for parsed sheets and the month view.
//!
//! Defines the parsed `Record`, the availability inputs (rules, closed
//! ranges, month metadata), the derived month grid, and the widget items
//! mapped from the notice and portfolio sheets.

use crate::constants::{
    DATE_FORMAT, DEFAULT_CLOSED_LABEL, DEFAULT_NOTICE_ICON, DEFAULT_OPEN_LABEL, DAYS_PER_WEEK,
    rule_keys,
};
use crate::error::{Result, SheetError};
use chrono::{Datelike, Months, NaiveDate};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// One parsed data row, keyed by header name in header order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value; a repeated column name replaces the earlier value
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Value of a column, or the empty string when the column is absent
    pub fn field(&self, column: &str) -> &str {
        self.get(column).unwrap_or_default()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every value is empty
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

/// Parse a zero-padded `YYYY-MM-DD` date
///
/// Anything else is rejected so that date order always matches the
/// order of the sheet's ISO strings.
pub fn parse_ymd(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// A calendar month, identified as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey(NaiveDate);

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// The following month, saturating at the last representable month
    pub fn succ(&self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .map(Self)
            .unwrap_or(*self)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| SheetError::invalid_month(s))?;
        let digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !digits(year, 4) || !digits(month, 2) {
            return Err(SheetError::invalid_month(s));
        }
        let year = year.parse().map_err(|_| SheetError::invalid_month(s))?;
        let month = month.parse().map_err(|_| SheetError::invalid_month(s))?;
        MonthKey::new(year, month).ok_or_else(|| SheetError::invalid_month(s))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which month the calendar shows, relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthTab {
    #[default]
    This,
    Next,
}

impl MonthTab {
    pub fn resolve(self, today: NaiveDate) -> MonthKey {
        let current = MonthKey::from_date(today);
        match self {
            MonthTab::This => current,
            MonthTab::Next => current.succ(),
        }
    }
}

/// Inclusive date interval during which no work is accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosedRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ClosedRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Inclusive on both ends; an inverted range contains nothing
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_ordered(&self) -> bool {
        self.start_date <= self.end_date
    }
}

/// Per-month metadata from the meta sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthMeta {
    pub next_open_date: Option<NaiveDate>,
}

/// Month metadata keyed by month
pub type MonthMetaTable = HashMap<MonthKey, MonthMeta>;

/// Flat key/value settings from the rules sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    values: HashMap<String, String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule; a later value for the same key overwrites the earlier one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn closed_label(&self) -> &str {
        self.non_empty(rule_keys::CLOSED_LABEL)
            .unwrap_or(DEFAULT_CLOSED_LABEL)
    }

    pub fn open_label(&self) -> &str {
        self.non_empty(rule_keys::OPEN_LABEL)
            .unwrap_or(DEFAULT_OPEN_LABEL)
    }

    pub fn footer_template(&self) -> Option<&str> {
        self.non_empty(rule_keys::FOOTER_TEMPLATE)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rules = RuleSet::new();
        for (k, v) in iter {
            rules.insert(k, v);
        }
        rules
    }
}

/// Availability of a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStatus {
    Open,
    Closed,
}

impl CellStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CellStatus::Open => "open",
            CellStatus::Closed => "closed",
        }
    }

    /// Display label for this status taken from the rule set
    pub fn label<'a>(&self, rules: &'a RuleSet) -> &'a str {
        match self {
            CellStatus::Open => rules.open_label(),
            CellStatus::Closed => rules.closed_label(),
        }
    }
}

/// One day of the month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub is_other_month: bool,
    pub status: CellStatus,
}

impl CalendarCell {
    pub fn ymd(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn is_closed(&self) -> bool {
        self.status == CellStatus::Closed
    }

    /// Only in-month cells are ever highlighted as today
    pub fn is_today(&self, today: NaiveDate) -> bool {
        !self.is_other_month && self.date == today
    }
}

/// Derived month grid plus footer text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub month: MonthKey,
    pub cells: Vec<CalendarCell>,
    pub footer_text: String,
}

impl MonthView {
    /// Cells grouped into week rows, Sunday first
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn has_footer(&self) -> bool {
        !self.footer_text.is_empty()
    }

    pub fn closed_days_in_month(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| !c.is_other_month && c.is_closed())
            .count()
    }

    pub fn open_days_in_month(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| !c.is_other_month && !c.is_closed())
            .count()
    }
}

/// Entry of the notice list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticeItem {
    pub order: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub desc: String,
}

impl NoticeItem {
    pub fn icon_or_default(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_NOTICE_ICON)
    }
}

/// Video sample in the portfolio catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioItem {
    pub category: String,
    pub order: f64,
    pub title: String,
    pub video_id: String,
    pub tags: Vec<String>,
}

impl PortfolioItem {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(s: &str) -> NaiveDate {
        parse_ymd(s).unwrap()
    }

    #[test]
    fn test_parse_ymd_requires_zero_padding() {
        assert_eq!(ymd("2024-03-09"), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        assert_eq!(parse_ymd(" 2024-03-09 "), Some(ymd("2024-03-09")));
        assert_eq!(parse_ymd("2024-3-9"), None);
        assert_eq!(parse_ymd("2024/03/09"), None);
        assert_eq!(parse_ymd("2024-02-30"), None);
        assert_eq!(parse_ymd(""), None);
    }

    #[test]
    fn test_month_key_round_trip_display() {
        let key: MonthKey = "2024-03".parse().unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 3);
        assert_eq!(key.to_string(), "2024-03");
        assert_eq!(key.first_day(), ymd("2024-03-01"));

        assert!("2024-3".parse::<MonthKey>().is_err());
        assert!("2024-13".parse::<MonthKey>().is_err());
        assert!("march".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_key_succ_crosses_year() {
        let december = MonthKey::new(2024, 12).unwrap();
        assert_eq!(december.succ(), MonthKey::new(2025, 1).unwrap());
    }

    #[test]
    fn test_month_tab_resolve() {
        let today = ymd("2024-01-31");
        assert_eq!(MonthTab::This.resolve(today).to_string(), "2024-01");
        assert_eq!(MonthTab::Next.resolve(today).to_string(), "2024-02");
    }

    #[test]
    fn test_closed_range_inclusive() {
        let range = ClosedRange::new(ymd("2024-03-10"), ymd("2024-03-12"));
        assert!(!range.contains(ymd("2024-03-09")));
        assert!(range.contains(ymd("2024-03-10")));
        assert!(range.contains(ymd("2024-03-11")));
        assert!(range.contains(ymd("2024-03-12")));
        assert!(!range.contains(ymd("2024-03-13")));
    }

    #[test]
    fn test_inverted_range_contains_nothing() {
        let range = ClosedRange::new(ymd("2024-03-12"), ymd("2024-03-10"));
        assert!(!range.is_ordered());
        assert!(!range.contains(ymd("2024-03-11")));
        assert!(!range.contains(ymd("2024-03-10")));
        assert!(!range.contains(ymd("2024-03-12")));
    }

    #[test]
    fn test_rule_set_defaults_and_overwrite() {
        let mut rules = RuleSet::new();
        assert_eq!(rules.closed_label(), DEFAULT_CLOSED_LABEL);
        assert_eq!(rules.open_label(), DEFAULT_OPEN_LABEL);
        assert_eq!(rules.footer_template(), None);

        rules.insert("closed_label", "Closed");
        rules.insert("closed_label", "Full");
        rules.insert("footer_template", "");
        assert_eq!(rules.closed_label(), "Full");
        assert_eq!(rules.footer_template(), None);
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_record_blank_and_field_access() {
        let record: Record = [("a", ""), ("b", "")].into_iter().collect();
        assert!(record.is_blank());
        assert_eq!(record.field("missing"), "");

        let record: Record = [("a", "1"), ("b", "")].into_iter().collect();
        assert!(!record.is_blank());
        assert_eq!(record.columns().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_month_key_serializes_as_string() {
        let key = MonthKey::new(2024, 4).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-04\"");
    }
}
