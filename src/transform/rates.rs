//! Exchange rate side file

use crate::error::{EtlError, EtlResult};
use std::collections::HashMap;
use std::path::Path;

/// Name of the column holding the multipliers
pub const RATE_COLUMN: &str = "Rate";

/// Currency code → multiplier from USD
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExchangeRates {
    rates: HashMap<String, f64>,
}

impl ExchangeRates {
    /// Read rates from a CSV file
    ///
    /// The first column is the currency code; the multiplier is taken from
    /// the column named `Rate`. Other columns are ignored.
    ///
    /// # Errors
    /// - [`EtlError::Io`] if the file cannot be opened
    /// - [`EtlError::Structural`] if there is no `Rate` column
    /// - [`EtlError::Value`] if a rate is not a number
    pub fn from_csv(path: impl AsRef<Path>) -> EtlResult<Self> {
        let path = path.as_ref();
        log::debug!("Reading exchange rates from {}", path.display());

        let file = std::fs::File::open(path).map_err(|e| EtlError::io(path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let rate_index = reader
            .headers()?
            .iter()
            .position(|h| h == RATE_COLUMN)
            .ok_or_else(|| {
                EtlError::Structural(format!(
                    "{} has no '{}' column",
                    path.display(),
                    RATE_COLUMN
                ))
            })?;

        let mut rates = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let code = record.get(0).unwrap_or_default();
            let raw = record.get(rate_index).unwrap_or_default();
            let rate = raw.parse::<f64>().map_err(|_| EtlError::Value {
                context: format!("exchange rate for '{}'", code),
                value: raw.to_string(),
            })?;
            rates.insert(code.to_string(), rate);
        }

        log::debug!("Loaded {} exchange rate(s)", rates.len());
        Ok(Self { rates })
    }

    /// Look up the multiplier for a currency code
    ///
    /// # Errors
    /// Returns [`EtlError::MissingRate`] if the code is absent
    pub fn get(&self, code: &str) -> EtlResult<f64> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| EtlError::MissingRate(code.to_string()))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ExchangeRates {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
