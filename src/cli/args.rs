//! Command-line argument definitions for sheetcal
//!
//! Global flags pick the configuration file and log verbosity; each
//! subcommand reads one group of published sheets.

use crate::config::{Config, SourceKind};
use crate::error::{Result, SheetError};
use crate::models::{MonthKey, MonthTab};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// CLI arguments for the sheet-backed availability calendar
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sheetcal",
    version,
    about = "Show a work-availability calendar and widgets driven by published spreadsheets",
    long_about = "Reads published CSV sheets (rules, closed date ranges, per-month metadata, \
                  notices and a portfolio catalog) and renders the month availability grid, \
                  the notice list or the portfolio in the terminal or as JSON."
)]
pub struct Args {
    /// Configuration file (YAML)
    ///
    /// Defaults to sheet-calendar/config.yaml under the platform config directory.
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Enable verbose logging (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress the progress spinner and all logging below errors
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show the availability calendar for a month
    Calendar(CalendarArgs),
    /// Show the notice list
    Notices(NoticesArgs),
    /// Show the portfolio catalog
    Portfolio(PortfolioArgs),
    /// Parse any CSV source and dump its records
    Parse(ParseArgs),
}

/// Month selection: the current month, the next one, or an explicit `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthArg {
    Tab(MonthTab),
    Explicit(MonthKey),
}

impl Default for MonthArg {
    fn default() -> Self {
        MonthArg::Tab(MonthTab::This)
    }
}

impl MonthArg {
    pub fn resolve(self, today: NaiveDate) -> MonthKey {
        match self {
            MonthArg::Tab(tab) => tab.resolve(today),
            MonthArg::Explicit(month) => month,
        }
    }
}

impl FromStr for MonthArg {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "this" => Ok(MonthArg::Tab(MonthTab::This)),
            "next" => Ok(MonthArg::Tab(MonthTab::Next)),
            other => other.parse().map(MonthArg::Explicit),
        }
    }
}

/// Output format for the calendar, notices and portfolio commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewFormat {
    /// Colored terminal rendering
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Output format for the parse command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RecordFormat {
    /// One `column: value` block per record
    #[default]
    Text,
    /// JSON array of records
    Json,
    /// Re-serialized CSV
    Csv,
}

/// Per-command overrides for where the calendar sheets live
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CalendarSourceArgs {
    /// Rules sheet (URL or file path)
    #[arg(long = "rules", value_name = "SOURCE")]
    pub rules: Option<String>,

    /// Closed date ranges sheet (URL or file path)
    #[arg(long = "closed", value_name = "SOURCE")]
    pub closed_ranges: Option<String>,

    /// Month metadata sheet (URL or file path)
    #[arg(long = "meta", value_name = "SOURCE")]
    pub meta: Option<String>,
}

/// Arguments for the calendar command
#[derive(Debug, Clone, Parser)]
pub struct CalendarArgs {
    /// Month to show: this, next or YYYY-MM
    #[arg(short = 'm', long = "month", default_value = "this", value_parser = parse_month_arg)]
    pub month: MonthArg,

    /// Date treated as today (YYYY-MM-DD); defaults to the local date
    #[arg(long = "today", value_name = "DATE", value_parser = parse_today)]
    pub today: Option<NaiveDate>,

    #[command(flatten)]
    pub sources: CalendarSourceArgs,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = ViewFormat::Text)]
    pub format: ViewFormat,
}

/// Arguments for the notices command
#[derive(Debug, Clone, Parser)]
pub struct NoticesArgs {
    /// Notice sheet (URL or file path)
    #[arg(long = "source", value_name = "SOURCE")]
    pub source: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = ViewFormat::Text)]
    pub format: ViewFormat,
}

/// Arguments for the portfolio command
#[derive(Debug, Clone, Parser)]
pub struct PortfolioArgs {
    /// Only show one category (collab, legacy or migrate)
    #[arg(long = "category", value_name = "KEY")]
    pub category: Option<String>,

    /// Portfolio sheet (URL or file path)
    #[arg(long = "source", value_name = "SOURCE")]
    pub source: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = ViewFormat::Text)]
    pub format: ViewFormat,
}

/// Arguments for the parse command
#[derive(Debug, Clone, Parser)]
pub struct ParseArgs {
    /// URL or file path of the CSV text
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = RecordFormat::Text)]
    pub format: RecordFormat,
}

fn parse_month_arg(value: &str) -> std::result::Result<MonthArg, String> {
    value.parse().map_err(|e: SheetError| e.to_string())
}

fn parse_today(value: &str) -> std::result::Result<NaiveDate, String> {
    crate::models::parse_ymd(value)
        .ok_or_else(|| format!("Invalid date '{}': expected YYYY-MM-DD", value))
}

impl Args {
    /// Get the log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show the fetch spinner (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Apply any per-command source overrides on top of the loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        match &self.command {
            Commands::Calendar(args) => {
                let overrides = [
                    (SourceKind::Rules, &args.sources.rules),
                    (SourceKind::ClosedRanges, &args.sources.closed_ranges),
                    (SourceKind::Meta, &args.sources.meta),
                ];
                for (kind, location) in overrides {
                    if let Some(location) = location {
                        config = config.with_source(kind, location.clone());
                    }
                }
            }
            Commands::Notices(NoticesArgs {
                source: Some(location),
                ..
            }) => config = config.with_source(SourceKind::Notice, location.clone()),
            Commands::Portfolio(PortfolioArgs {
                source: Some(location),
                ..
            }) => config = config.with_source(SourceKind::Portfolio, location.clone()),
            _ => {}
        }
        config
    }
}
