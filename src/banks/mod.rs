//! Largest banks table
//!
//! Record types and the extractor that scrapes them from the source page.

mod extractor;
mod record;
mod table;

pub use extractor::{BanksExtractor, PageSource};
pub use record::{BankRecord, ConvertedCap, TableSchema, format_real, round2};
pub use table::parse_bank_table;
