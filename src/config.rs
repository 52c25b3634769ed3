//! Job configuration
//!
//! [`EtlConfig::default`] reproduces the fixed paths and names the job has
//! always used. [`EtlConfig::from_env`] layers `BANKS_*` environment
//! variables (typically sourced from a dotenv file) on top of the defaults.

use crate::error::{EtlError, EtlResult};
use crate::transform::Currency;
use regex::Regex;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_SOURCE_URL: &str =
    "https://web.archive.org/web/20230908091635/https://en.wikipedia.org/wiki/List_of_largest_banks";
pub const DEFAULT_TABLE_NAME: &str = "Largest_banks";
pub const DEFAULT_COLUMNS: [&str; 3] = ["Rank", "Name", "MC_USD_Billion"];

/// SQLite keywords; a table name matching one (in any case) breaks the
/// unquoted fixed queries
const SQL_KEYWORDS: [&str; 147] = [
    "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND", "AS", "ASC",
    "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY", "CASCADE", "CASE", "CAST",
    "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT", "CONSTRAINT", "CREATE", "CROSS",
    "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "DATABASE", "DEFAULT",
    "DEFERRABLE", "DEFERRED", "DELETE", "DESC", "DETACH", "DISTINCT", "DO", "DROP", "EACH",
    "ELSE", "END", "ESCAPE", "EXCEPT", "EXCLUDE", "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL",
    "FILTER", "FIRST", "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB",
    "GROUP", "GROUPS", "HAVING", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX", "INDEXED",
    "INITIALLY", "INNER", "INSERT", "INSTEAD", "INTERSECT", "INTO", "IS", "ISNULL", "JOIN",
    "KEY", "LAST", "LEFT", "LIKE", "LIMIT", "MATCH", "MATERIALIZED", "NATURAL", "NO", "NOT",
    "NOTHING", "NOTNULL", "NULL", "NULLS", "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS",
    "OUTER", "OVER", "PARTITION", "PLAN", "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE",
    "RANGE", "RECURSIVE", "REFERENCES", "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE",
    "RESTRICT", "RETURNING", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT", "SELECT", "SET",
    "TABLE", "TEMP", "TEMPORARY", "THEN", "TIES", "TO", "TRANSACTION", "TRIGGER", "UNBOUNDED",
    "UNION", "UNIQUE", "UPDATE", "USING", "VACUUM", "VALUES", "VIEW", "VIRTUAL", "WHEN",
    "WHERE", "WINDOW", "WITH", "WITHOUT",
];

/// Everything the driver needs to know about where data comes from and goes to.
#[derive(Clone, Debug, PartialEq)]
pub struct EtlConfig {
    /// Page holding the bank table
    pub source_url: String,
    /// Saved copy of the page, used instead of `source_url` when set
    pub html_file: Option<PathBuf>,
    /// SQLite table the records are loaded into
    pub table_name: String,
    /// Labels for rank, name and USD market cap, in that order
    pub columns: [String; 3],
    /// Derived market cap columns, in output order
    pub currencies: Vec<Currency>,
    pub exchange_rate_path: PathBuf,
    pub output_csv_path: PathBuf,
    pub database_path: PathBuf,
    pub log_path: PathBuf,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            html_file: None,
            table_name: DEFAULT_TABLE_NAME.to_string(),
            columns: DEFAULT_COLUMNS.map(String::from),
            currencies: Currency::DERIVED.to_vec(),
            exchange_rate_path: PathBuf::from("./exchange_rate.csv"),
            output_csv_path: PathBuf::from("./Largest_banks_data.csv"),
            database_path: PathBuf::from("./Banks.db"),
            log_path: PathBuf::from("./code_log.txt"),
        }
    }
}

impl EtlConfig {
    /// Build a configuration from the defaults and `BANKS_*` environment variables
    ///
    /// Recognized variables:
    /// - BANKS_SOURCE_URL: page to scrape
    /// - BANKS_HTML_FILE: saved page to read instead of fetching
    /// - BANKS_TABLE_NAME: SQLite table name
    /// - BANKS_EXCHANGE_RATES: exchange rate CSV
    /// - BANKS_OUTPUT_CSV: output CSV
    /// - BANKS_DATABASE: SQLite database file
    /// - BANKS_LOG_FILE: progress log
    ///
    /// # Errors
    /// Returns [`EtlError::Config`] if the URL or table name is invalid
    pub fn from_env() -> EtlResult<Self> {
        let mut config = Self::default();

        if let Some(url) = env_var("BANKS_SOURCE_URL") {
            config.source_url = url;
        }
        if let Some(path) = env_var("BANKS_HTML_FILE") {
            config.html_file = Some(PathBuf::from(path));
        }
        if let Some(table) = env_var("BANKS_TABLE_NAME") {
            config.table_name = table;
        }
        if let Some(path) = env_var("BANKS_EXCHANGE_RATES") {
            config.exchange_rate_path = PathBuf::from(path);
        }
        if let Some(path) = env_var("BANKS_OUTPUT_CSV") {
            config.output_csv_path = PathBuf::from(path);
        }
        if let Some(path) = env_var("BANKS_DATABASE") {
            config.database_path = PathBuf::from(path);
        }
        if let Some(path) = env_var("BANKS_LOG_FILE") {
            config.log_path = PathBuf::from(path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the values that end up inside URLs and SQL text
    ///
    /// The table name is written unquoted into the printed queries, so it
    /// must be a plain identifier that is not an SQL keyword.
    pub fn validate(&self) -> EtlResult<()> {
        if self.html_file.is_none() {
            Url::parse(&self.source_url).map_err(|e| {
                EtlError::Config(format!("invalid source URL '{}': {}", self.source_url, e))
            })?;
        }

        let identifier = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")
            .map_err(|e| EtlError::Config(e.to_string()))?;
        if !identifier.is_match(&self.table_name) {
            return Err(EtlError::Config(format!(
                "table name '{}' must be a plain SQL identifier",
                self.table_name
            )));
        }
        if SQL_KEYWORDS
            .iter()
            .any(|keyword| keyword.eq_ignore_ascii_case(&self.table_name))
        {
            return Err(EtlError::Config(format!(
                "table name '{}' is an SQL keyword",
                self.table_name
            )));
        }

        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
