//! SQLite persistence
//!
//! [`BankStore`] owns the single connection used for loading and querying.
//! Dropping the store closes the connection, so an aborted run never leaks
//! it; [`BankStore::close`] closes it explicitly and reports failures.

use crate::banks::{BankRecord, TableSchema};
use crate::error::{EtlError, EtlResult};
use crate::etl::Loader;
use crate::query::QueryResult;
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub struct BankStore {
    conn: Mutex<Connection>,
}

impl BankStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> EtlResult<Self> {
        let path = path.as_ref();
        log::debug!("Opening SQLite database {}", path.display());
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> EtlResult<Self> {
        Ok(Self {
            conn: Mutex::new(Connection::open_in_memory()?),
        })
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop and recreate `table`, then insert every record
    ///
    /// Runs in one transaction; on failure the previous table is left intact.
    pub fn replace_table(
        &self,
        table: &str,
        schema: &TableSchema,
        records: &[BankRecord],
    ) -> EtlResult<usize> {
        let columns = schema.column_names();
        let table = quote_identifier(table);

        let definitions = columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let sql_type = if i < 2 { "TEXT" } else { "REAL" };
                format!("{} {}", quote_identifier(name), sql_type)
            })
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; columns.len()].join(", ");

        let mut conn = self.connection();
        let tx = conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", table), [])?;
        tx.execute(&format!("CREATE TABLE {} ({})", table, definitions), [])?;
        {
            let mut insert =
                tx.prepare(&format!("INSERT INTO {} VALUES ({})", table, placeholders))?;
            for record in records {
                insert.execute(params_from_iter(row_values(record, schema)))?;
            }
        }
        tx.commit()?;

        Ok(records.len())
    }

    /// Run a statement and collect every row
    pub fn query(&self, sql: &str) -> EtlResult<QueryResult> {
        let conn = self.connection();
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<Result<Vec<_>, _>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(QueryResult { columns, rows })
    }

    /// Number of rows in `table`
    pub fn row_count(&self, table: &str) -> EtlResult<usize> {
        let count: i64 = self.connection().query_row(
            &format!("SELECT COUNT(*) FROM {}", quote_identifier(table)),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Close the connection, surfacing any error SQLite reports
    pub fn close(self) -> EtlResult<()> {
        let conn = self.conn.into_inner().unwrap_or_else(PoisonError::into_inner);
        conn.close().map_err(|(_, e)| EtlError::Store(e))
    }
}

fn row_values(record: &BankRecord, schema: &TableSchema) -> Vec<Value> {
    let mut values = vec![
        Value::Text(record.rank.clone()),
        Value::Text(record.name.clone()),
        Value::Real(record.market_cap_usd),
    ];
    values.extend(schema.currencies.iter().map(|&c| {
        record
            .market_cap(c)
            .map(Value::Real)
            .unwrap_or(Value::Null)
    }));
    values
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Loads records into one table of a [`BankStore`], replacing its contents
pub struct TableLoader<'a> {
    store: &'a BankStore,
    table: String,
    schema: TableSchema,
}

impl<'a> TableLoader<'a> {
    pub fn new(store: &'a BankStore, table: impl Into<String>, schema: TableSchema) -> Self {
        Self {
            store,
            table: table.into(),
            schema,
        }
    }
}

impl Loader for TableLoader<'_> {
    type Item = BankRecord;

    async fn load(&self, items: &[Self::Item]) -> EtlResult<usize> {
        let count = self.store.replace_table(&self.table, &self.schema, items)?;
        log::debug!("Loaded {} row(s) into table {}", count, self.table);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::banks::ConvertedCap;
    use crate::transform::Currency;
    use tempfile::TempDir;

    fn schema() -> TableSchema {
        TableSchema::new(
            ["Rank", "Name", "MC_USD_Billion"].map(String::from),
            vec![Currency::Gbp],
        )
    }

    fn records(count: usize) -> Vec<BankRecord> {
        (1..=count)
            .map(|i| {
                let mut record = BankRecord::new(i.to_string(), format!("Bank {}", i), i as f64);
                record.market_caps.push(ConvertedCap {
                    currency: Currency::Gbp,
                    value: i as f64 * 0.8,
                });
                record
            })
            .collect()
    }

    #[test]
    fn test_replace_table_creates_columns() {
        let store = BankStore::in_memory().unwrap();
        store
            .replace_table("Largest_banks", &schema(), &records(2))
            .unwrap();

        let result = store.query("SELECT * FROM Largest_banks").unwrap();
        assert_eq!(
            result.columns,
            vec!["Rank", "Name", "MC_USD_Billion", "MC_GBP_Billion"]
        );
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0][0], Value::Text("1".to_string()));
        assert_eq!(result.rows[1][3], Value::Real(1.6));
    }

    #[test]
    fn test_replace_table_overwrites() {
        let store = BankStore::in_memory().unwrap();
        store.replace_table("banks", &schema(), &records(5)).unwrap();
        store.replace_table("banks", &schema(), &records(10)).unwrap();

        assert_eq!(store.row_count("banks").unwrap(), 10);
    }

    #[test]
    fn test_missing_conversion_is_null() {
        let store = BankStore::in_memory().unwrap();
        store
            .replace_table("banks", &schema(), &[BankRecord::new("1", "A", 1.0)])
            .unwrap();

        let result = store.query("SELECT MC_GBP_Billion FROM banks").unwrap();
        assert_eq!(result.rows, vec![vec![Value::Null]]);
    }

    #[test]
    fn test_invalid_query() {
        let store = BankStore::in_memory().unwrap();
        let result = store.query("SELECT * FROM missing_table");
        assert!(matches!(result, Err(EtlError::Store(_))));
    }

    #[test]
    fn test_persisted_across_connections() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Banks.db");

        let store = BankStore::open(&path).unwrap();
        store.replace_table("banks", &schema(), &records(3)).unwrap();
        store.close().unwrap();

        let reopened = BankStore::open(&path).unwrap();
        assert_eq!(reopened.row_count("banks").unwrap(), 3);
    }

    #[tokio::test]
    async fn test_table_loader() {
        let store = BankStore::in_memory().unwrap();
        let loader = TableLoader::new(&store, "banks", schema());

        let count = loader.load(&records(4)).await.unwrap();
        assert_eq!(count, 4);
        assert_eq!(store.row_count("banks").unwrap(), 4);
    }
}
