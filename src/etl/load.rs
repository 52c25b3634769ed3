//! Loader trait for writing records to destinations

use crate::error::EtlResult;

/// Loader trait for loading data to a destination
///
/// Implementors define how to load items to destinations:
/// - Flat files
/// - Databases
///
/// Loaders borrow the items so the same table can be written to several
/// sinks in turn.
///
/// # Example
/// ```no_run
/// use banks_etl::error::EtlResult;
/// use banks_etl::etl::Loader;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     type Item = String;
///
///     async fn load(&self, items: &[Self::Item]) -> EtlResult<usize> {
///         Ok(items.len())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// The type of items to load
    type Item: Send + Sync;

    /// Load items to the destination
    ///
    /// Returns the number of items written
    ///
    /// # Errors
    /// Returns an error if loading fails (I/O, database, etc.)
    fn load(
        &self,
        items: &[Self::Item],
    ) -> impl std::future::Future<Output = EtlResult<usize>> + Send;
}
