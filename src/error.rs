//! Error taxonomy shared by every pipeline stage

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Failed to fetch {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Request to {url} returned {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse markup: {0}")]
    Parse(String),

    #[error("Unexpected document structure: {0}")]
    Structural(String),

    #[error("Non-numeric value '{value}' in {context}")]
    Value { context: String, value: String },

    #[error("No exchange rate for currency '{0}'")]
    MissingRate(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl EtlError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type EtlResult<T> = Result<T, EtlError>;
