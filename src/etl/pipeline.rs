//! Pipeline orchestration for the bank table job

use super::{Extractor, Loader, Transformer};
use crate::banks::{BankRecord, TableSchema};
use crate::config::EtlConfig;
use crate::error::{EtlError, EtlResult};
use crate::query::{QueryResult, fixed_queries, records_table, run_query};
use crate::storage::{BankStore, CsvWriter, ProgressLog, TableLoader};
use crate::transform::{CurrencyConverter, ExchangeRates};
use std::io::Write;

/// Milestones written to the progress log
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Checkpoint {
    Init,
    Extracted,
    Transformed,
    CsvLoaded,
    StoreConnected,
    StoreLoaded,
    Queried,
    Closed,
    /// End of the extraction-only run
    ExtractionFinished,
}

impl Checkpoint {
    /// Checkpoints of a full run, in order
    pub const FULL_RUN: [Checkpoint; 8] = [
        Checkpoint::Init,
        Checkpoint::Extracted,
        Checkpoint::Transformed,
        Checkpoint::CsvLoaded,
        Checkpoint::StoreConnected,
        Checkpoint::StoreLoaded,
        Checkpoint::Queried,
        Checkpoint::Closed,
    ];

    pub fn message(self) -> &'static str {
        match self {
            Self::Init => "Preliminaries complete. Initializing ETL process.",
            Self::Extracted => "Data extraction complete. Initiating Transformation process",
            Self::Transformed => "Data transformation complete. Initiating Loading process",
            Self::CsvLoaded => "Data saved to CSV file",
            Self::StoreConnected => "SQL Connection initiated",
            Self::StoreLoaded => "Data loaded to Database as a table, Executing queries",
            Self::Queried => "Process Complete",
            Self::Closed => "Server Connection closed",
            Self::ExtractionFinished => "Data extraction complete. Process Complete",
        }
    }
}

/// Outcome of a full run
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Records as written to the CSV file and the database
    pub records: Vec<BankRecord>,
    /// Each fixed query with its result
    pub queries: Vec<(String, QueryResult)>,
}

/// Drives extraction, conversion, loading and querying once, in order
///
/// Any failure aborts the run and is returned as is. The database
/// connection is closed when the run ends, successfully or not.
///
/// # Example
/// ```no_run
/// use banks_etl::banks::BanksExtractor;
/// use banks_etl::config::EtlConfig;
/// use banks_etl::etl::Pipeline;
///
/// # async fn example() -> banks_etl::error::EtlResult<()> {
/// let config = EtlConfig::default();
/// let pipeline = Pipeline::new(BanksExtractor::from_config(&config)?, config);
///
/// let summary = pipeline.run(&mut std::io::stdout()).await?;
/// println!("Loaded {} banks", summary.records.len());
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E> {
    extractor: E,
    config: EtlConfig,
    progress: ProgressLog,
}

impl<E> Pipeline<E>
where
    E: Extractor<Item = BankRecord>,
{
    /// Create a new pipeline
    pub fn new(extractor: E, config: EtlConfig) -> Self {
        let progress = ProgressLog::new(&config.log_path);
        Self {
            extractor,
            config,
            progress,
        }
    }

    fn checkpoint(&self, checkpoint: Checkpoint) -> EtlResult<()> {
        log::info!("{}", checkpoint.message());
        self.progress.record(checkpoint.message())
    }

    /// Run the complete job, printing the fixed queries to `out`
    ///
    /// Steps:
    /// 1. Extract bank records from the page
    /// 2. Add converted market cap columns
    /// 3. Write the CSV file
    /// 4. Replace the database table
    /// 5. Run the fixed queries
    ///
    /// # Errors
    /// Returns [`EtlError::Config`] for an invalid configuration before
    /// anything is written, otherwise the first error raised by any stage
    pub async fn run(&self, out: &mut dyn Write) -> EtlResult<RunSummary> {
        self.config.validate()?;
        self.checkpoint(Checkpoint::Init)?;

        let banks = self.extractor.extract().await?;
        if banks.is_empty() {
            log::warn!("No banks extracted, loading an empty table");
        }
        self.checkpoint(Checkpoint::Extracted)?;

        log::debug!(
            "Reading exchange rates from {}",
            self.config.exchange_rate_path.display()
        );
        let rates = ExchangeRates::from_csv(&self.config.exchange_rate_path)?;
        let converter = CurrencyConverter::new(&rates, &self.config.currencies)?;
        let records = converter.transform_many(banks)?;
        log::info!("Transformed {} record(s)", records.len());
        self.checkpoint(Checkpoint::Transformed)?;

        let schema = TableSchema::new(self.config.columns.clone(), converter.currencies());

        let csv = CsvWriter::new(&self.config.output_csv_path, schema.clone());
        let written = csv.load(&records).await?;
        log::info!("Wrote {} row(s) to {}", written, csv.path().display());
        self.checkpoint(Checkpoint::CsvLoaded)?;

        let store = BankStore::open(&self.config.database_path)?;
        self.checkpoint(Checkpoint::StoreConnected)?;

        let loaded = TableLoader::new(&store, &self.config.table_name, schema)
            .load(&records)
            .await?;
        log::info!(
            "Loaded {} row(s) into table {}",
            loaded,
            self.config.table_name
        );
        self.checkpoint(Checkpoint::StoreLoaded)?;

        let mut queries = Vec::new();
        for query in fixed_queries(&self.config.table_name) {
            let result = run_query(&query, &store, out)?;
            queries.push((query, result));
        }
        self.checkpoint(Checkpoint::Queried)?;

        store.close()?;
        self.checkpoint(Checkpoint::Closed)?;

        Ok(RunSummary { records, queries })
    }

    /// Extract only, printing the raw three column table to `out`
    ///
    /// # Errors
    /// Returns the extraction error, or an I/O error writing the output or log
    pub async fn run_extract(&self, out: &mut dyn Write) -> EtlResult<Vec<BankRecord>> {
        self.checkpoint(Checkpoint::Init)?;

        let banks = self.extractor.extract().await?;
        writeln!(out, "{}", records_table(&self.config.columns, &banks))
            .map_err(|e| EtlError::io("<output>", e))?;

        self.checkpoint(Checkpoint::ExtractionFinished)?;
        Ok(banks)
    }
}
