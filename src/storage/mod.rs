//! File system and database sinks
//!
//! This module handles all output of the job:
//! - CSV file writing
//! - SQLite table loading and querying
//! - The append-only progress log

mod csv_writer;
mod progress_log;
mod sqlite;

pub use csv_writer::CsvWriter;
pub use progress_log::{ProgressLog, TIMESTAMP_FORMAT, format_entry};
pub use sqlite::{BankStore, TableLoader};
