//! Integration tests for the sheet-to-calendar pipeline
//!
//! These tests write published-sheet exports to a temporary directory and run
//! them through the fetcher, mappers and deriver exactly as the CLI does.

use sheet_calendar::{
    CalendarInputs, CellStatus, Config, MonthKey, MonthTab, PortfolioCatalog, SheetError,
    SourceFetcher, SourceKind, parse,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Rules sheet as exported by the spreadsheet, with CRLF endings and a BOM
const RULES_CSV: &str = "\u{feff}key,value\r\n\
closed_label,마감\r\n\
open_label,접수 가능\r\n\
footer_template,\"다음 오픈: {next_open_md}, 선착순\"\r\n\
,orphan value\r\n";

const CLOSED_CSV: &str = "start_date,end_date,reason\n\
2024-09-03,2024-09-05,휴가\n\
2024-09-28,2024-10-02,\"추석, 연휴\"\n\
2024-09-20,2024-09-18,inverted\n\
2024/09/10,2024-09-11,bad format\n\
\n\
,,\n";

const META_CSV: &str = "month,next_open_date\n\
2024-09,2024-10-07\n\
2024-10,\n\
not-a-month,2024-11-01\n";

fn write_sheets(dir: &Path) -> Config {
    let sheets = [
        (SourceKind::Rules, "rules.csv", RULES_CSV),
        (SourceKind::ClosedRanges, "closed.csv", CLOSED_CSV),
        (SourceKind::Meta, "meta.csv", META_CSV),
    ];
    let mut config = Config::default();
    for (kind, name, text) in sheets {
        let path = dir.join(name);
        fs::write(&path, text).unwrap();
        config = config.with_source(kind, path.display().to_string());
    }
    config
}

fn ymd(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Load all three calendar sheets from disk and derive September 2024
#[tokio::test]
async fn test_calendar_from_sheet_files() {
    let dir = TempDir::new().unwrap();
    let config = write_sheets(dir.path());
    let fetcher = SourceFetcher::new(&config).unwrap();

    let (inputs, report) = fetcher
        .fetch_calendar_inputs(&config.sources)
        .await
        .unwrap();

    assert_eq!(inputs.rules.len(), 3);
    assert_eq!(inputs.closed_ranges.len(), 2);
    assert_eq!(inputs.closed_ranges[1].reason.as_deref(), Some("추석, 연휴"));
    assert_eq!(report.rules_ignored, 1);
    assert_eq!(report.ranges_dropped, 2);
    assert_eq!(report.meta_ignored, 1);

    let view = inputs.derive(MonthKey::new(2024, 9).unwrap());

    // September 2024 starts on a Sunday, so there is no leading spillover
    assert_eq!(view.cells.len(), 42);
    assert_eq!(view.cells[0].date, ymd(2024, 9, 1));
    assert!(!view.cells[0].is_other_month);
    assert_eq!(view.cells[41].date, ymd(2024, 10, 12));

    let closed: Vec<u32> = view
        .cells
        .iter()
        .filter(|c| !c.is_other_month && c.status == CellStatus::Closed)
        .map(|c| c.day())
        .collect();
    assert_eq!(closed, vec![3, 4, 5, 28, 29, 30]);

    // Spillover days carry status too
    let oct_1 = view.cells.iter().find(|c| c.date == ymd(2024, 10, 1)).unwrap();
    assert!(oct_1.is_other_month);
    assert!(oct_1.is_closed());

    assert_eq!(view.footer_text, "다음 오픈: 10월 7일, 선착순");
}

/// A month whose meta row has no reopening date gets no footer
#[tokio::test]
async fn test_month_without_next_open_date() {
    let dir = TempDir::new().unwrap();
    let config = write_sheets(dir.path());
    let fetcher = SourceFetcher::new(&config).unwrap();

    let (inputs, _) = fetcher
        .fetch_calendar_inputs(&config.sources)
        .await
        .unwrap();

    let next = MonthTab::Next.resolve(ymd(2024, 9, 15));
    assert_eq!(next.to_string(), "2024-10");

    let view = inputs.derive(next);
    assert_eq!(view.footer_text, "");
    assert_eq!(view.cells[0].date, ymd(2024, 9, 29));
    assert!(view.cells[0].is_closed());
}

/// One unreadable sheet fails the whole calendar load
#[tokio::test]
async fn test_one_missing_sheet_fails_the_load() {
    let dir = TempDir::new().unwrap();
    let config = write_sheets(dir.path())
        .with_source(SourceKind::Meta, dir.path().join("gone.csv").display().to_string());
    let fetcher = SourceFetcher::new(&config).unwrap();

    let err = fetcher
        .fetch_calendar_inputs(&config.sources)
        .await
        .unwrap_err();
    assert!(matches!(err, SheetError::SourceFile { .. }));
}

/// Deriving the same inputs twice gives the same view
#[test]
fn test_derivation_is_idempotent() {
    let (inputs, _) = CalendarInputs::from_records(
        &parse(RULES_CSV),
        &parse(CLOSED_CSV),
        &parse(META_CSV),
    );
    let month = MonthKey::new(2024, 9).unwrap();
    assert_eq!(inputs.derive(month), inputs.derive(month));
}

#[tokio::test]
async fn test_widgets_from_sheet_files() {
    let dir = TempDir::new().unwrap();
    let notice_path = dir.path().join("notice.csv");
    let portfolio_path = dir.path().join("portfolio.csv");
    fs::write(
        &notice_path,
        "order,icon,desc\n2,📌,\"작업 기간은 \"\"2주\"\" 입니다\"\n1,,문의는 DM으로\n",
    )
    .unwrap();
    fs::write(
        &portfolio_path,
        "category,order,title,youtube,tags\n\
         legacy,1,Old sample,https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10,#retro\n\
         collab,1,Shorts,https://youtu.be/dQw4w9WgXcQ?si=abc,\n",
    )
    .unwrap();

    let config = Config::default()
        .with_source(SourceKind::Notice, notice_path.display().to_string())
        .with_source(SourceKind::Portfolio, portfolio_path.display().to_string());
    let fetcher = SourceFetcher::new(&config).unwrap();

    let notices = sheet_calendar::mapping::notices_from_records(
        &fetcher
            .fetch_kind(&config.sources, SourceKind::Notice)
            .await
            .unwrap(),
    );
    assert_eq!(notices[0].desc, "문의는 DM으로");
    assert_eq!(notices[1].desc, "작업 기간은 \"2주\" 입니다");

    let catalog = PortfolioCatalog::from_records(
        &fetcher
            .fetch_kind(&config.sources, SourceKind::Portfolio)
            .await
            .unwrap(),
    );
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.by_category("legacy")[0].video_id, "dQw4w9WgXcQ");
    assert_eq!(catalog.by_category("collab")[0].video_id, "dQw4w9WgXcQ");
}
