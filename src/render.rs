//! Terminal rendering of the month view and widget lists.
//!
//! Status labels come from the rule set and are passed through untouched.

use crate::config::SourceKind;
use crate::constants::WEEKDAY_LABELS;
use crate::mapping::PortfolioCatalog;
use crate::models::{CalendarCell, MonthView, NoticeItem, RuleSet};
use chrono::NaiveDate;
use colored::*;
use std::fmt::Write;

fn render_cell(cell: &CalendarCell, today: NaiveDate) -> String {
    let day = format!("{:>2}", cell.day());
    let styled = match (cell.is_other_month, cell.is_closed()) {
        (true, _) => day.bright_black(),
        (false, true) => day.bright_red(),
        (false, false) => day.bright_green(),
    };
    let styled = if cell.is_today(today) {
        styled.bold().underline()
    } else {
        styled
    };
    let mark = if cell.is_closed() { "×" } else { " " };
    format!(" {}{}", styled, mark)
}

/// Render the month grid with title, weekday header, legend and footer
pub fn render_month(view: &MonthView, rules: &RuleSet, today: NaiveDate) -> String {
    let mut out = String::new();

    let title = format!("{}.{:02}", view.month.year(), view.month.month());
    let _ = writeln!(out, "{}", title.bright_cyan().bold());

    let header: Vec<String> = WEEKDAY_LABELS.iter().map(|w| format!(" {} ", w)).collect();
    let _ = writeln!(out, "{}", header.join(""));

    for week in view.weeks() {
        let row: String = week.iter().map(|c| render_cell(c, today)).collect();
        let _ = writeln!(out, "{}", row);
    }

    let _ = writeln!(
        out,
        "{} {} ({})   {} {} ({})",
        "■".bright_green(),
        rules.open_label(),
        view.open_days_in_month(),
        "■".bright_red(),
        rules.closed_label(),
        view.closed_days_in_month()
    );

    if view.has_footer() {
        let _ = writeln!(out, "{}", view.footer_text.bright_white());
    }
    out
}

/// Render the notice list, one line per notice; nothing at all when empty
pub fn render_notices(items: &[NoticeItem]) -> String {
    let mut out = String::new();
    if items.is_empty() {
        return out;
    }
    let _ = writeln!(out, "{}", "작업 전 안내".bright_green().bold());
    for item in items {
        let _ = writeln!(out, "  {} {}", item.icon_or_default(), item.desc);
    }
    out
}

/// Render the portfolio, either one category or every known category
pub fn render_portfolio(catalog: &PortfolioCatalog, category: Option<&str>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "포트폴리오".bright_green().bold());

    for (key, label) in PortfolioCatalog::categories() {
        if category.is_some_and(|c| c != key) {
            continue;
        }
        let _ = writeln!(out, "{}", label.bright_cyan());

        let items = catalog.by_category(key);
        if items.is_empty() {
            let _ = writeln!(out, "  {}", "등록된 샘플이 아직 없어요.".bright_black());
            continue;
        }
        for item in items {
            let tags = if item.tags.is_empty() {
                String::new()
            } else {
                format!(" {}", item.tags.join(" ").bright_black())
            };
            let _ = writeln!(out, "  {} {}{}", item.title, item.watch_url(), tags);
        }
    }
    out
}

/// Placeholder shown when a source could not be retrieved
pub fn load_failure_message(kind: SourceKind, message: &str) -> String {
    let subject = match kind {
        SourceKind::Rules | SourceKind::ClosedRanges | SourceKind::Meta => "캘린더를",
        SourceKind::Notice => "공지사항을",
        SourceKind::Portfolio => "포트폴리오를",
    };
    format!("{} 불러오지 못했어요. {}", subject, message)
}
