//! Bank table records

use crate::transform::Currency;

/// One row of the largest banks table
#[derive(Clone, Debug, PartialEq)]
pub struct BankRecord {
    /// Rank as printed on the page
    pub rank: String,
    pub name: String,
    /// Market cap in billions of USD, rounded to 2 decimals
    pub market_cap_usd: f64,
    /// Derived market caps, filled by [`crate::transform::CurrencyConverter`]
    pub market_caps: Vec<ConvertedCap>,
}

/// Market cap converted into another currency
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvertedCap {
    pub currency: Currency,
    pub value: f64,
}

impl BankRecord {
    pub fn new(rank: impl Into<String>, name: impl Into<String>, market_cap_usd: f64) -> Self {
        Self {
            rank: rank.into(),
            name: name.into(),
            market_cap_usd,
            market_caps: Vec::new(),
        }
    }

    /// Converted market cap for a currency, if it has been derived
    pub fn market_cap(&self, currency: Currency) -> Option<f64> {
        self.market_caps
            .iter()
            .find(|cap| cap.currency == currency)
            .map(|cap| cap.value)
    }
}

/// Column layout shared by the CSV and SQLite sinks
#[derive(Clone, Debug, PartialEq)]
pub struct TableSchema {
    /// Rank, name and USD market cap labels
    pub base: [String; 3],
    pub currencies: Vec<Currency>,
}

impl TableSchema {
    pub fn new(base: [String; 3], currencies: Vec<Currency>) -> Self {
        Self { base, currencies }
    }

    /// All output column names, base columns first
    pub fn column_names(&self) -> Vec<String> {
        self.base
            .iter()
            .cloned()
            .chain(self.currencies.iter().map(|c| c.column_name()))
            .collect()
    }
}

/// Round half to even at two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Render a float the way the CSV and text outputs expect (`80.0`, `432.92`)
pub fn format_real(value: f64) -> String {
    format!("{:?}", value)
}
