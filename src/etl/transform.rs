//! Transformer trait for data transformation

use crate::error::EtlResult;

/// Transformer trait for transforming data items
///
/// Implementors define how to transform items:
/// - Data enrichment (adding derived columns)
/// - Format conversion
///
/// # Example
/// ```no_run
/// use banks_etl::error::EtlResult;
/// use banks_etl::etl::Transformer;
///
/// struct Uppercase;
///
/// impl Transformer for Uppercase {
///     type Input = String;
///     type Output = String;
///
///     fn transform(&self, input: Self::Input) -> EtlResult<Self::Output> {
///         Ok(input.to_uppercase())
///     }
/// }
/// ```
pub trait Transformer: Send + Sync {
    /// Input item type
    type Input: Send;

    /// Output item type after transformation
    type Output: Send;

    /// Transform a single item
    ///
    /// # Errors
    /// Returns an error if transformation fails (validation, conversion, etc.)
    fn transform(&self, input: Self::Input) -> EtlResult<Self::Output>;

    /// Transform multiple items (default batch implementation)
    fn transform_many(&self, inputs: Vec<Self::Input>) -> EtlResult<Vec<Self::Output>> {
        inputs.into_iter().map(|i| self.transform(i)).collect()
    }
}
