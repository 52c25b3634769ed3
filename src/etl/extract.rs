//! Extractor trait for pulling records out of a source

use crate::error::EtlResult;

/// Extractor trait for extracting data from a source
///
/// Implementors define how to extract items from sources like:
/// - Web pages
/// - Saved HTML files
///
/// # Example
/// ```no_run
/// use banks_etl::error::EtlResult;
/// use banks_etl::etl::Extractor;
/// use std::path::PathBuf;
///
/// struct LinesExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for LinesExtractor {
///     type Item = String;
///
///     async fn extract(&self) -> EtlResult<Vec<Self::Item>> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// The type of items extracted
    type Item: Send;

    /// Extract items from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, I/O, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = EtlResult<Vec<Self::Item>>> + Send;
}
