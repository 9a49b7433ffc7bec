//! Configuration management.
//!
//! Names where each published sheet lives (a URL or a local file path) and
//! how the fetcher talks to the server. Loaded from YAML; every field has a
//! default so a partial file is enough.

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::error::{Result, SheetError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// The published sheets the application reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Rules,
    ClosedRanges,
    Meta,
    Notice,
    Portfolio,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Rules => "rules",
            SourceKind::ClosedRanges => "closed_ranges",
            SourceKind::Meta => "meta",
            SourceKind::Notice => "notice",
            SourceKind::Portfolio => "portfolio",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Location of each sheet: an `http(s)` URL or a local file path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub rules: Option<String>,
    pub closed_ranges: Option<String>,
    pub meta: Option<String>,
    pub notice: Option<String>,
    pub portfolio: Option<String>,
}

impl SourceConfig {
    pub fn get(&self, kind: SourceKind) -> Option<&str> {
        let slot = match kind {
            SourceKind::Rules => &self.rules,
            SourceKind::ClosedRanges => &self.closed_ranges,
            SourceKind::Meta => &self.meta,
            SourceKind::Notice => &self.notice,
            SourceKind::Portfolio => &self.portfolio,
        };
        slot.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Location of a sheet, failing when it is not configured
    pub fn require(&self, kind: SourceKind) -> Result<&str> {
        self.get(kind).ok_or_else(|| SheetError::MissingSource {
            name: kind.name().to_string(),
        })
    }

    pub fn set(&mut self, kind: SourceKind, location: impl Into<String>) {
        let location = Some(location.into());
        match kind {
            SourceKind::Rules => self.rules = location,
            SourceKind::ClosedRanges => self.closed_ranges = location,
            SourceKind::Meta => self.meta = location,
            SourceKind::Notice => self.notice = location,
            SourceKind::Portfolio => self.portfolio = location,
        }
    }
}

/// Global configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where each sheet is read from
    pub sources: SourceConfig,

    /// Per-request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourceConfig::default(),
            timeout_secs: 30,
            user_agent: format!("sheet-calendar/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Platform default location of the configuration file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SheetError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| SheetError::ConfigFormat {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Load an explicitly given file, else the default file if present, else defaults
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Set the location of one sheet
    pub fn with_source(mut self, kind: SourceKind, location: impl Into<String>) -> Self {
        self.sources.set(kind, location);
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
        assert!(config.user_agent.starts_with("sheet-calendar/"));
        assert!(config.sources.get(SourceKind::Rules).is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml(
            "sources:\n  rules: https://example.com/rules.csv\n  meta: ./meta.csv\n",
        )
        .unwrap();

        assert_eq!(
            config.sources.get(SourceKind::Rules),
            Some("https://example.com/rules.csv")
        );
        assert_eq!(config.sources.get(SourceKind::Meta), Some("./meta.csv"));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_require_missing_source() {
        let config = Config::default().with_source(SourceKind::Notice, "  ");
        let err = config.sources.require(SourceKind::Notice).unwrap_err();
        assert!(matches!(err, SheetError::MissingSource { ref name } if name == "notice"));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "timeout_secs: 0").unwrap();
        writeln!(temp_file, "sources:").unwrap();
        writeln!(temp_file, "  closed_ranges: closed.csv").unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.timeout(), None);
        assert_eq!(
            config.sources.require(SourceKind::ClosedRanges).unwrap(),
            "closed.csv"
        );
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "timeout_secs: [not, a, number]").unwrap();

        let err = Config::load(temp_file.path()).unwrap_err();
        assert!(matches!(err, SheetError::ConfigFormat { .. }));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let err = Config::resolve(Some(Path::new("/nonexistent/sheetcal.yaml"))).unwrap_err();
        assert!(matches!(err, SheetError::ConfigRead { .. }));
    }
}
