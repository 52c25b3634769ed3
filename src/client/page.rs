//! HTTP client for fetching source pages

use crate::error::{EtlError, EtlResult};
use reqwest::Client;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Fetches raw markup from a URL.
///
/// A single GET per call with the transport's default behaviour: no retry and
/// no explicit timeout.
///
/// # Example
/// ```no_run
/// use banks_etl::client::PageClient;
///
/// # async fn example() -> banks_etl::error::EtlResult<()> {
/// let client = PageClient::try_new()?;
/// let markup = client.get_text("https://example.org/").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Build a client that identifies itself with this crate's name and version
    ///
    /// # Errors
    /// Returns [`EtlError::HttpClient`] if the underlying client cannot be built
    pub fn try_new() -> EtlResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(EtlError::HttpClient)?;
        Ok(Self { client })
    }

    /// GET a page and return its body as text
    ///
    /// # Errors
    /// - [`EtlError::Config`] if `url` does not parse
    /// - [`EtlError::Network`] if the request or body read fails
    /// - [`EtlError::HttpStatus`] if the server answers with a non-success status
    pub async fn get_text(&self, url: &str) -> EtlResult<String> {
        let parsed = Url::parse(url)
            .map_err(|e| EtlError::Config(format!("invalid source URL '{}': {}", url, e)))?;

        log::debug!("GET {}", parsed);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| EtlError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(|source| EtlError::Network {
            url: url.to_string(),
            source,
        })?;

        log::debug!("Fetched {} byte(s) from {}", body.len(), url);
        Ok(body)
    }
}
