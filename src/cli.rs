//! CLI helper functions

use crate::{
    banks::{BankRecord, BanksExtractor},
    config::EtlConfig,
    etl::{Pipeline, RunSummary},
};
use eyre::{Context, Result};

/// Build the extractor and pipeline described by `config`
fn build_pipeline(config: &EtlConfig) -> Result<Pipeline<BanksExtractor>> {
    let extractor =
        BanksExtractor::from_config(config).context("Failed to create bank table extractor")?;
    Ok(Pipeline::new(extractor, config.clone()))
}

/// Run the full job, printing the fixed queries to stdout
///
/// Pipeline: BanksExtractor → CurrencyConverter → CsvWriter → TableLoader → queries
pub async fn run_etl(config: &EtlConfig) -> Result<RunSummary> {
    let pipeline = build_pipeline(config)?;

    match &config.html_file {
        Some(path) => log::info!("Reading saved page {}", path.display()),
        None => log::info!("Scraping {}", config.source_url),
    }

    let summary = pipeline
        .run(&mut std::io::stdout())
        .await
        .context("ETL run failed")?;

    log::info!(
        "✓ Loaded {} bank(s) into {} and {}",
        summary.records.len(),
        config.output_csv_path.display(),
        config.database_path.display()
    );

    Ok(summary)
}

/// Extract the bank table and print it to stdout
pub async fn run_extract(config: &EtlConfig) -> Result<Vec<BankRecord>> {
    let pipeline = build_pipeline(config)?;

    let banks = pipeline
        .run_extract(&mut std::io::stdout())
        .await
        .context("Extraction failed")?;

    log::info!("✓ Extracted {} bank(s)", banks.len());
    Ok(banks)
}
