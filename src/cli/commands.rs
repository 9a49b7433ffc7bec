//! Command implementations for sheetcal
//!
//! Each handler fetches the sheets it needs behind a spinner, maps them and
//! prints either the colored rendering or JSON to stdout. Logging goes to
//! stderr so JSON output stays clean.

use crate::cli::args::{
    Args, CalendarArgs, Commands, NoticesArgs, ParseArgs, PortfolioArgs, RecordFormat,
    ViewFormat,
};
use crate::config::{Config, SourceKind};
use crate::fetch::{Source, SourceFetcher};
use crate::mapping::{PortfolioCatalog, notices_from_records};
use crate::models::{MonthView, NoticeItem, Record, RuleSet};
use crate::render::{load_failure_message, render_month, render_notices, render_portfolio};
use crate::tabular::{self, write_records};
use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fmt::Write;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main command dispatcher
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;

    let config = Config::resolve(args.config.as_deref()).context("Failed to load configuration")?;
    let config = args.apply_overrides(config);
    let fetcher = SourceFetcher::new(&config).context("Failed to set up the HTTP client")?;

    let output = match &args.command {
        Commands::Calendar(command) => run_calendar(&args, command, &config, &fetcher).await?,
        Commands::Notices(command) => run_notices(&args, command, &config, &fetcher).await?,
        Commands::Portfolio(command) => run_portfolio(&args, command, &config, &fetcher).await?,
        Commands::Parse(command) => run_parse(&args, command, &fetcher).await?,
    };

    print!("{}", output);
    Ok(())
}

/// Setup logging based on verbosity flags
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sheet_calendar={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Run a fetch behind a spinner, turning failures into the load placeholder
async fn with_spinner<T, F>(args: &Args, kind: SourceKind, message: &str, fetch: F) -> Result<T>
where
    F: Future<Output = crate::Result<T>>,
{
    let progress_bar = if args.show_progress() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = fetch.await;

    if let Some(pb) = progress_bar {
        pb.finish_and_clear();
    }

    result.map_err(|e| {
        warn!("Loading {} failed: {}", kind, e);
        anyhow!(load_failure_message(kind, &e.to_string()))
    })
}

async fn run_calendar(
    args: &Args,
    command: &CalendarArgs,
    config: &Config,
    fetcher: &SourceFetcher,
) -> Result<String> {
    let today = command.today.unwrap_or_else(|| Local::now().date_naive());
    let month = command.month.resolve(today);
    info!("Showing calendar for {}", month);

    let (inputs, report) = with_spinner(
        args,
        SourceKind::Rules,
        "Loading calendar sheets...",
        fetcher.fetch_calendar_inputs(&config.sources),
    )
    .await?;
    if report.total_dropped() > 0 {
        warn!("Ignored {} unusable calendar rows: {:?}", report.total_dropped(), report);
    }

    let view = inputs.derive(month);
    format_calendar(&view, &inputs.rules, today, command.format)
}

async fn run_notices(
    args: &Args,
    command: &NoticesArgs,
    config: &Config,
    fetcher: &SourceFetcher,
) -> Result<String> {
    let records = with_spinner(
        args,
        SourceKind::Notice,
        "Loading notices...",
        fetcher.fetch_kind(&config.sources, SourceKind::Notice),
    )
    .await?;

    let items = notices_from_records(&records);
    debug!("Mapped {} notices from {} rows", items.len(), records.len());
    format_notices(&items, command.format)
}

async fn run_portfolio(
    args: &Args,
    command: &PortfolioArgs,
    config: &Config,
    fetcher: &SourceFetcher,
) -> Result<String> {
    let category = command.category.as_deref();
    if let Some(key) = category {
        if !PortfolioCatalog::categories().any(|(known, _)| known == key) {
            let known: Vec<&str> = PortfolioCatalog::categories().map(|(k, _)| k).collect();
            bail!(
                "Unknown portfolio category '{}': expected one of {}",
                key,
                known.join(", ")
            );
        }
    }

    let records = with_spinner(
        args,
        SourceKind::Portfolio,
        "Loading portfolio...",
        fetcher.fetch_kind(&config.sources, SourceKind::Portfolio),
    )
    .await?;

    let catalog = PortfolioCatalog::from_records(&records);
    debug!("Mapped {} portfolio items from {} rows", catalog.len(), records.len());
    format_portfolio(&catalog, category, command.format)
}

async fn run_parse(args: &Args, command: &ParseArgs, fetcher: &SourceFetcher) -> Result<String> {
    let source = Source::parse(&command.source)?;
    let fetched = if args.show_progress() && matches!(source, Source::Url(_)) {
        let pb = ProgressBar::new_spinner();
        pb.set_message(format!("Fetching {}...", source));
        pb.enable_steady_tick(Duration::from_millis(100));
        let fetched = fetcher.fetch_text(&source).await;
        pb.finish_and_clear();
        fetched
    } else {
        fetcher.fetch_text(&source).await
    };
    let text = fetched.with_context(|| format!("Failed to read {}", source))?;

    let result = tabular::parse_with_report(&text);
    info!("Parse summary for {}: {:?}", source, result.report);
    if result.report.unterminated_quote {
        warn!("{} ends inside a quoted field; the last field absorbed the rest of the input", source);
    }

    format_records(&result.records, command.format)
}

/// Month view plus the labels needed to present it
#[derive(Serialize)]
struct CalendarOutput<'a> {
    #[serde(flatten)]
    view: &'a MonthView,
    open_label: &'a str,
    closed_label: &'a str,
}

fn format_calendar(
    view: &MonthView,
    rules: &RuleSet,
    today: NaiveDate,
    format: ViewFormat,
) -> Result<String> {
    match format {
        ViewFormat::Text => Ok(render_month(view, rules, today)),
        ViewFormat::Json => to_json(&CalendarOutput {
            view,
            open_label: rules.open_label(),
            closed_label: rules.closed_label(),
        }),
    }
}

fn format_notices(items: &[NoticeItem], format: ViewFormat) -> Result<String> {
    match format {
        ViewFormat::Text => Ok(render_notices(items)),
        ViewFormat::Json => to_json(&items),
    }
}

fn format_portfolio(
    catalog: &PortfolioCatalog,
    category: Option<&str>,
    format: ViewFormat,
) -> Result<String> {
    match (format, category) {
        (ViewFormat::Text, _) => Ok(render_portfolio(catalog, category)),
        (ViewFormat::Json, Some(key)) => to_json(&catalog.by_category(key)),
        (ViewFormat::Json, None) => to_json(catalog),
    }
}

fn format_records(records: &[Record], format: RecordFormat) -> Result<String> {
    match format {
        RecordFormat::Json => to_json(&records),
        RecordFormat::Csv => match records.first() {
            Some(first) => {
                let headers: Vec<&str> = first.columns().collect();
                Ok(write_records(&headers, records)?)
            }
            None => Ok(String::new()),
        },
        RecordFormat::Text => {
            let mut out = String::new();
            for (index, record) in records.iter().enumerate() {
                let _ = writeln!(out, "{}", format!("#{}", index + 1).bright_cyan().bold());
                for (column, value) in record.iter() {
                    let _ = writeln!(out, "  {}: {}", column.bright_black(), value);
                }
            }
            let _ = writeln!(
                out,
                "{}",
                format!("{} records", records.len()).bright_green()
            );
            Ok(out)
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::CalendarInputs;
    use crate::models::{MonthKey, parse_ymd};
    use crate::tabular::parse;

    fn calendar_inputs() -> CalendarInputs {
        let (inputs, _) = CalendarInputs::from_records(
            &parse("key,value\nclosed_label,Full\nfooter_template,Next {next_open_md}\n"),
            &parse("start_date,end_date\n2024-03-10,2024-03-12\n"),
            &parse("month,next_open_date\n2024-03,2024-04-05\n"),
        );
        inputs
    }

    #[test]
    fn test_format_calendar_json() {
        let inputs = calendar_inputs();
        let view = inputs.derive(MonthKey::new(2024, 3).unwrap());
        let json = format_calendar(
            &view,
            &inputs.rules,
            parse_ymd("2024-03-01").unwrap(),
            ViewFormat::Json,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["month"], "2024-03");
        assert_eq!(value["footer_text"], "Next 4월 5일");
        assert_eq!(value["closed_label"], "Full");
        assert_eq!(value["open_label"], "접수 가능");
        assert_eq!(value["cells"].as_array().unwrap().len(), 42);
    }

    #[test]
    fn test_format_records_csv_round_trips() {
        let text = "name,note\nA,\"x, y\"\nB,\"say \"\"hi\"\"\"\n";
        let records = parse(text);
        let csv = format_records(&records, RecordFormat::Csv).unwrap();
        assert_eq!(csv, text);
        assert_eq!(parse(&csv), records);
    }

    #[test]
    fn test_format_records_json_and_empty() {
        let records = parse("key,value\nopen_label,Open\n");
        let json = format_records(&records, RecordFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["key"], "open_label");

        assert_eq!(format_records(&[], RecordFormat::Csv).unwrap(), "");
    }

    #[test]
    fn test_format_portfolio_json_by_category() {
        let catalog = PortfolioCatalog::from_records(&parse(
            "category,order,title,youtube,tags\n\
             collab,2,B,dQw4w9WgXcQ,\n\
             legacy,1,C,dQw4w9WgXcA,\n\
             collab,1,A,dQw4w9WgXcB,\n",
        ));
        let json = format_portfolio(&catalog, Some("collab"), ViewFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let titles: Vec<_> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_parse_command_reads_file() {
        use std::io::Write as _;

        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        write!(temp_file, "key,value\nopen_label,Open\n").unwrap();

        let args = Args {
            config: None,
            verbose: 0,
            quiet: true,
            command: Commands::Parse(ParseArgs {
                source: temp_file.path().display().to_string(),
                format: RecordFormat::Csv,
            }),
        };
        let Commands::Parse(command) = &args.command else {
            unreachable!()
        };
        let fetcher = SourceFetcher::new(&Config::default()).unwrap();
        let output = run_parse(&args, command, &fetcher).await.unwrap();
        assert_eq!(output, "key,value\nopen_label,Open\n");
    }

    #[tokio::test]
    async fn test_missing_source_shows_placeholder() {
        let args = Args {
            config: None,
            verbose: 0,
            quiet: true,
            command: Commands::Notices(NoticesArgs {
                source: None,
                format: ViewFormat::Text,
            }),
        };
        let Commands::Notices(command) = &args.command else {
            unreachable!()
        };
        let config = Config::default();
        let fetcher = SourceFetcher::new(&config).unwrap();

        let err = run_notices(&args, command, &config, &fetcher)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "공지사항을 불러오지 못했어요. Source 'notice' is not configured"
        );
    }
}
