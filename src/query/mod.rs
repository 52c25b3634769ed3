//! Queries against the loaded table
//!
//! [`run_query`] executes a statement on a [`BankStore`] and prints the
//! statement and its result set.

mod text_table;

pub use text_table::TextTable;

use crate::banks::{BankRecord, format_real};
use crate::error::{EtlError, EtlResult};
use crate::storage::BankStore;
use rusqlite::types::Value;
use std::io::Write;

/// Rows returned by a statement
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    pub fn to_text_table(&self) -> TextTable {
        TextTable::new(
            self.columns.clone(),
            self.rows
                .iter()
                .map(|row| row.iter().map(format_value).collect())
                .collect(),
        )
    }

    /// First column of the first row, if it is numeric
    pub fn scalar_f64(&self) -> Option<f64> {
        match self.rows.first()?.first()? {
            Value::Real(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => format_real(*v),
        Value::Text(v) => v.clone(),
        Value::Blob(v) => format!("<{} bytes>", v.len()),
    }
}

/// The three statements a full run prints, with the table name substituted
pub fn fixed_queries(table: &str) -> [String; 3] {
    [
        format!("SELECT * FROM {}", table),
        format!("SELECT AVG(MC_GBP_Billion) FROM {}", table),
        format!("SELECT Name from {} LIMIT 5", table),
    ]
}

/// Execute `query` and write it, its result table and a blank line to `out`
///
/// # Errors
/// - [`EtlError::Store`] if the statement fails
/// - [`EtlError::Io`] if the output cannot be written
pub fn run_query(query: &str, store: &BankStore, out: &mut dyn Write) -> EtlResult<QueryResult> {
    log::debug!("Running query: {}", query);
    let result = store.query(query)?;

    print_result(query, &result, out).map_err(|e| EtlError::io("<output>", e))?;

    Ok(result)
}

fn print_result(query: &str, result: &QueryResult, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "{}", query)?;
    writeln!(out, "{}", result.to_text_table())?;
    writeln!(out)
}

/// Render extracted records as a three column table
pub fn records_table(columns: &[String; 3], records: &[BankRecord]) -> TextTable {
    TextTable::new(
        columns.to_vec(),
        records
            .iter()
            .map(|r| {
                vec![
                    r.rank.clone(),
                    r.name.clone(),
                    format_real(r.market_cap_usd),
                ]
            })
            .collect(),
    )
}
