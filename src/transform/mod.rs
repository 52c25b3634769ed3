//! Record transformations
//!
//! Converts USD market caps into other currencies using rates from the
//! exchange rate side file.

mod currency;
mod rates;

pub use currency::{Currency, CurrencyConverter};
pub use rates::{ExchangeRates, RATE_COLUMN};
