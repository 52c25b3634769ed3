//! Largest Banks ETL
//!
//! Scrapes the largest banks table, converts market caps into other
//! currencies and loads the result into a CSV file and a SQLite table.

pub mod banks;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod etl;
pub mod query;
pub mod storage;
pub mod transform;

// Re-exports for convenience
pub use banks::{BankRecord, BanksExtractor};
pub use config::EtlConfig;
pub use error::{EtlError, EtlResult};
pub use etl::{Extractor, Loader, Pipeline, Transformer};
pub use storage::{BankStore, CsvWriter, ProgressLog, TableLoader};
