//! Error handling for source retrieval and configuration.
//!
//! The parsing and calendar derivation code never fails; these errors only
//! surface at the edges where text is fetched, files are read, or
//! configuration and command-line values are interpreted.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("CSV write error: {0}")]
    CsvWrite(#[from] csv::Error),

    #[error("CSV fetch failed: {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read source file: {path} - {source}")]
    SourceFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to read configuration file: {path} - {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file: {path} - {source}")]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid month '{value}': expected this, next or YYYY-MM")]
    InvalidMonth { value: String },

    #[error("Source '{name}' is not configured")]
    MissingSource { name: String },
}

impl SheetError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid month error
    pub fn invalid_month(value: impl Into<String>) -> Self {
        Self::InvalidMonth {
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
