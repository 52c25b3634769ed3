//! Market cap currency conversion

use super::ExchangeRates;
use crate::banks::{BankRecord, ConvertedCap, round2};
use crate::error::EtlResult;
use crate::etl::Transformer;

/// Currencies a USD market cap can be converted into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Currency {
    Gbp,
    Eur,
    Inr,
}

impl Currency {
    /// Derived columns produced by a full run, in output order
    pub const DERIVED: [Currency; 3] = [Currency::Gbp, Currency::Eur, Currency::Inr];

    pub fn code(self) -> &'static str {
        match self {
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
            Self::Inr => "INR",
        }
    }

    /// Output column holding market caps in this currency
    pub fn column_name(self) -> String {
        format!("MC_{}_Billion", self.code())
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Adds converted market cap columns to each record
///
/// Rates are resolved when the converter is built, so a missing rate fails
/// before any record is touched.
///
/// # Example
/// ```
/// use banks_etl::banks::BankRecord;
/// use banks_etl::etl::Transformer;
/// use banks_etl::transform::{Currency, CurrencyConverter, ExchangeRates};
///
/// # fn example() -> banks_etl::error::EtlResult<()> {
/// let rates: ExchangeRates = [("GBP", 0.8)].into_iter().collect();
/// let converter = CurrencyConverter::new(&rates, &[Currency::Gbp])?;
///
/// let record = converter.transform(BankRecord::new("1", "A", 100.0))?;
/// assert_eq!(record.market_cap(Currency::Gbp), Some(80.0));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct CurrencyConverter {
    rates: Vec<(Currency, f64)>,
}

impl CurrencyConverter {
    /// Build a converter for the given currencies
    ///
    /// # Errors
    /// Returns [`EtlError::MissingRate`](crate::error::EtlError::MissingRate) for the first currency without a rate
    pub fn new(rates: &ExchangeRates, currencies: &[Currency]) -> EtlResult<Self> {
        let rates = currencies
            .iter()
            .map(|&currency| Ok((currency, rates.get(currency.code())?)))
            .collect::<EtlResult<Vec<_>>>()?;
        Ok(Self { rates })
    }

    /// Currencies this converter adds, in column order
    pub fn currencies(&self) -> Vec<Currency> {
        self.rates.iter().map(|(currency, _)| *currency).collect()
    }
}

impl Transformer for CurrencyConverter {
    type Input = BankRecord;
    type Output = BankRecord;

    fn transform(&self, mut input: Self::Input) -> EtlResult<Self::Output> {
        input.market_caps = self
            .rates
            .iter()
            .map(|&(currency, rate)| ConvertedCap {
                currency,
                value: round2(input.market_cap_usd * rate),
            })
            .collect();
        Ok(input)
    }
}
