//! Source retrieval.
//!
//! Fetches the published sheets over HTTP (or reads them from disk) and
//! hands the text to the tabular parser. There is no retry, backoff or
//! caching here; a failed request fails the whole load, and callers cancel
//! by dropping the future.

use crate::config::{Config, SourceConfig, SourceKind};
use crate::error::{Result, SheetError};
use crate::mapping::{CalendarInputs, MappingReport};
use crate::models::Record;
use crate::tabular;
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

/// Where a sheet's text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(Url),
    File(PathBuf),
}

impl Source {
    /// Interpret a configured location; `http(s)://` locations are URLs,
    /// anything else is a file path
    pub fn parse(location: &str) -> Result<Self> {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(location).map_err(|e| {
                SheetError::configuration(format!("invalid source URL '{}': {}", location, e))
            })?;
            Ok(Source::Url(url))
        } else {
            Ok(Source::File(PathBuf::from(location)))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{}", url),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Retrieves sheet text and parses it into records
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    /// Build a fetcher with the configured timeout and user agent
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            SheetError::configuration(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn fetch_url(&self, url: &Url) -> Result<String> {
        let transport = |source| SheetError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SheetError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(transport)
    }

    /// Raw text of a source
    pub async fn fetch_text(&self, source: &Source) -> Result<String> {
        debug!("Fetching {}", source);
        let text = match source {
            Source::Url(url) => self.fetch_url(url).await?,
            Source::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| SheetError::SourceFile {
                        path: path.clone(),
                        source: e,
                    })?
            }
        };
        debug!("Fetched {} bytes from {}", text.len(), source);
        Ok(text)
    }

    /// Fetch a source and parse it into records
    pub async fn fetch_records(&self, source: &Source) -> Result<Vec<Record>> {
        let text = self.fetch_text(source).await?;
        let result = tabular::parse_with_report(&text);
        if !result.report.is_clean() {
            warn!("Source {} looks malformed: {:?}", source, result.report);
        }
        Ok(result.records)
    }

    /// Fetch the configured sheet of the given kind
    pub async fn fetch_kind(&self, sources: &SourceConfig, kind: SourceKind) -> Result<Vec<Record>> {
        let source = Source::parse(sources.require(kind)?)?;
        self.fetch_records(&source).await
    }

    /// Fetch the rules, closed-ranges and meta sheets concurrently and map them
    pub async fn fetch_calendar_inputs(
        &self,
        sources: &SourceConfig,
    ) -> Result<(CalendarInputs, MappingReport)> {
        let (rules, closed_ranges, meta) = futures::try_join!(
            self.fetch_kind(sources, SourceKind::Rules),
            self.fetch_kind(sources, SourceKind::ClosedRanges),
            self.fetch_kind(sources, SourceKind::Meta),
        )?;

        info!(
            "Loaded calendar sheets: {} rules, {} closed ranges, {} meta rows",
            rules.len(),
            closed_ranges.len(),
            meta.len()
        );
        Ok(CalendarInputs::from_records(&rules, &closed_ranges, &meta))
    }
}
