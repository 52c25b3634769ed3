//! Largest banks extractor
//!
//! Fetches the page (or reads a saved copy) and parses its first table body
//! into [`BankRecord`]s.

use super::{BankRecord, parse_bank_table};
use crate::client::PageClient;
use crate::config::EtlConfig;
use crate::error::{EtlError, EtlResult};
use crate::etl::Extractor;
use std::path::PathBuf;

/// Where the page markup comes from
#[derive(Clone, Debug)]
pub enum PageSource {
    /// Fetch over HTTP
    Url { client: PageClient, url: String },
    /// Read a previously saved page
    File(PathBuf),
}

/// Extractor for the largest banks table
///
/// # Example
/// ```no_run
/// use banks_etl::banks::BanksExtractor;
/// use banks_etl::config::EtlConfig;
/// use banks_etl::etl::Extractor;
///
/// # async fn example() -> banks_etl::error::EtlResult<()> {
/// let extractor = BanksExtractor::from_config(&EtlConfig::default())?;
/// let banks = extractor.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct BanksExtractor {
    source: PageSource,
}

impl BanksExtractor {
    pub fn new(source: PageSource) -> Self {
        Self { source }
    }

    /// Create an extractor that fetches `url`
    pub fn from_url(url: impl Into<String>) -> EtlResult<Self> {
        Ok(Self::new(PageSource::Url {
            client: PageClient::try_new()?,
            url: url.into(),
        }))
    }

    /// Create an extractor that reads a saved page
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(PageSource::File(path.into()))
    }

    /// Use the saved page if one is configured, otherwise the source URL
    pub fn from_config(config: &EtlConfig) -> EtlResult<Self> {
        match &config.html_file {
            Some(path) => Ok(Self::from_file(path)),
            None => Self::from_url(&config.source_url),
        }
    }

    pub fn source(&self) -> &PageSource {
        &self.source
    }

    async fn fetch_markup(&self) -> EtlResult<String> {
        match &self.source {
            PageSource::Url { client, url } => {
                log::debug!("Fetching bank table from {}", url);
                client.get_text(url).await
            }
            PageSource::File(path) => {
                log::debug!("Reading bank table from {}", path.display());
                std::fs::read_to_string(path).map_err(|e| EtlError::io(path, e))
            }
        }
    }
}

impl Extractor for BanksExtractor {
    type Item = BankRecord;

    async fn extract(&self) -> EtlResult<Vec<Self::Item>> {
        let markup = self.fetch_markup().await?;
        let banks = parse_bank_table(&markup)?;

        log::info!("Extracted {} bank(s)", banks.len());

        Ok(banks)
    }
}
