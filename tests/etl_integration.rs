//! Integration tests for the bank table ETL job
//!
//! These tests run the pipeline end to end against saved pages under
//! `tests/fixtures`, with real file and SQLite I/O in a scratch directory.

use banks_etl::banks::{BankRecord, BanksExtractor, TableSchema};
use banks_etl::etl::{Checkpoint, Extractor, Pipeline};
use banks_etl::storage::BankStore;
use banks_etl::transform::Currency;
use banks_etl::{EtlConfig, EtlError};
use eyre::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Configuration reading `page` and writing every output under `dir`
fn config_in(dir: &Path, page: &str) -> EtlConfig {
    EtlConfig {
        html_file: Some(fixture(page)),
        exchange_rate_path: fixture("exchange_rate.csv"),
        output_csv_path: dir.join("Largest_banks_data.csv"),
        database_path: dir.join("Banks.db"),
        log_path: dir.join("code_log.txt"),
        ..EtlConfig::default()
    }
}

fn pipeline_for(config: &EtlConfig) -> Result<Pipeline<BanksExtractor>> {
    Ok(Pipeline::new(
        BanksExtractor::from_config(config)?,
        config.clone(),
    ))
}

#[tokio::test]
async fn test_extract_saved_page() -> Result<()> {
    let banks = BanksExtractor::from_file(fixture("largest_banks.html"))
        .extract()
        .await?;

    assert_eq!(banks.len(), 10);
    assert_eq!(banks[0], BankRecord::new("1", "JPMorgan Chase", 432.92));
    assert_eq!(banks[6].name, "HSBC Holdings PLC");
    assert_eq!(banks[6].market_cap_usd, 148.9);
    assert_eq!(banks[9], BankRecord::new("10", "Bank of China", 136.81));

    let ranks: Vec<&str> = banks.iter().map(|b| b.rank.as_str()).collect();
    assert_eq!(ranks, ["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]);

    Ok(())
}

#[tokio::test]
async fn test_full_run_writes_all_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), "largest_banks.html");

    let mut out = Vec::<u8>::new();
    let summary = pipeline_for(&config)?.run(&mut out).await?;
    assert_eq!(summary.records.len(), 10);

    // CSV: header plus one line per bank, no index column
    let csv = std::fs::read_to_string(&config.output_csv_path)?;
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(
        lines[0],
        "Rank,Name,MC_USD_Billion,MC_GBP_Billion,MC_EUR_Billion,MC_INR_Billion"
    );
    assert_eq!(lines[1], "1,JPMorgan Chase,432.92,346.34,402.62,35910.71");
    assert_eq!(lines[7], "7,HSBC Holdings PLC,148.9,119.12,138.48,12351.26");

    // Database table
    let store = BankStore::open(&config.database_path)?;
    assert_eq!(store.row_count("Largest_banks")?, 10);
    let first = store.query("SELECT Name, MC_INR_Billion FROM Largest_banks LIMIT 1")?;
    assert_eq!(first.to_text_table().rows[0], ["JPMorgan Chase", "35910.71"]);

    // Progress log
    let log = std::fs::read_to_string(&config.log_path)?;
    let messages: Vec<&str> = log
        .lines()
        .filter_map(|line| line.split_once(" : ").map(|(_, m)| m))
        .collect();
    let expected: Vec<&str> = Checkpoint::FULL_RUN.iter().map(|c| c.message()).collect();
    assert_eq!(messages, expected);

    // Console output: each query, its table and a blank line
    let printed = String::from_utf8(out)?;
    let blocks: Vec<&str> = printed.split("\n\n").filter(|b| !b.is_empty()).collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[0].starts_with("SELECT * FROM Largest_banks\n"));
    assert_eq!(blocks[0].lines().count(), 12);
    assert!(blocks[1].starts_with("SELECT AVG(MC_GBP_Billion) FROM Largest_banks\n"));
    assert!(blocks[2].starts_with("SELECT Name from Largest_banks LIMIT 5\n"));
    assert_eq!(blocks[2].lines().count(), 7);
    assert!(blocks[2].ends_with("HDFC Bank"));

    Ok(())
}

#[tokio::test]
async fn test_rerun_replaces_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), "largest_banks.html");
    let pipeline = pipeline_for(&config)?;

    pipeline.run(&mut Vec::<u8>::new()).await?;
    let first_csv = std::fs::read(&config.output_csv_path)?;

    pipeline.run(&mut Vec::<u8>::new()).await?;
    let second_csv = std::fs::read(&config.output_csv_path)?;

    assert_eq!(first_csv, second_csv);

    let store = BankStore::open(&config.database_path)?;
    assert_eq!(store.row_count("Largest_banks")?, 10);

    // The progress log is append-only
    let log = std::fs::read_to_string(&config.log_path)?;
    assert_eq!(log.lines().count(), 16);

    Ok(())
}

#[tokio::test]
async fn test_load_replaces_smaller_table() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), "largest_banks.html");

    {
        let store = BankStore::open(&config.database_path)?;
        let schema = TableSchema::new(config.columns.clone(), vec![]);
        let old: Vec<BankRecord> = (1..=5)
            .map(|i| BankRecord::new(i.to_string(), format!("Old {}", i), 1.0))
            .collect();
        store.replace_table("Largest_banks", &schema, &old)?;
        store.close()?;
    }

    pipeline_for(&config)?.run(&mut Vec::<u8>::new()).await?;

    let store = BankStore::open(&config.database_path)?;
    assert_eq!(store.row_count("Largest_banks")?, 10);
    let old = store.query("SELECT * FROM Largest_banks WHERE Name LIKE 'Old %'")?;
    assert!(old.rows.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_three_bank_scenario_with_gbp_only() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let rates = temp_dir.path().join("exchange_rate.csv");
    std::fs::write(&rates, "Currency,Rate\nGBP,0.8\n")?;

    let config = EtlConfig {
        exchange_rate_path: rates,
        currencies: vec![Currency::Gbp],
        ..config_in(temp_dir.path(), "three_banks.html")
    };

    let summary = pipeline_for(&config)?.run(&mut Vec::<u8>::new()).await?;

    let rows: Vec<(&str, &str, f64, Option<f64>)> = summary
        .records
        .iter()
        .map(|r| {
            (
                r.rank.as_str(),
                r.name.as_str(),
                r.market_cap_usd,
                r.market_cap(Currency::Gbp),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("1", "A", 100.0, Some(80.0)),
            ("2", "B", 90.0, Some(72.0)),
            ("3", "C", 80.0, Some(64.0)),
        ]
    );

    let (query, average) = &summary.queries[1];
    assert_eq!(query, "SELECT AVG(MC_GBP_Billion) FROM Largest_banks");
    assert_eq!(average.scalar_f64(), Some(72.0));

    let csv = std::fs::read_to_string(&config.output_csv_path)?;
    assert_eq!(
        csv,
        "Rank,Name,MC_USD_Billion,MC_GBP_Billion\n1,A,100.0,80.0\n2,B,90.0,72.0\n3,C,80.0,64.0\n"
    );

    Ok(())
}

#[tokio::test]
async fn test_missing_inr_rate_leaves_no_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let rates = temp_dir.path().join("exchange_rate.csv");
    std::fs::write(&rates, "Currency,Rate\nGBP,0.8\nEUR,0.93\n")?;

    let config = EtlConfig {
        exchange_rate_path: rates,
        ..config_in(temp_dir.path(), "largest_banks.html")
    };

    let result = pipeline_for(&config)?.run(&mut Vec::<u8>::new()).await;

    assert!(matches!(result, Err(EtlError::MissingRate(code)) if code == "INR"));
    assert!(!config.output_csv_path.exists());
    assert!(!config.database_path.exists());

    Ok(())
}

#[tokio::test]
async fn test_extract_only_prints_raw_table() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), "largest_banks.html");

    let mut out = Vec::<u8>::new();
    let banks = pipeline_for(&config)?.run_extract(&mut out).await?;
    assert_eq!(banks.len(), 10);

    let printed = String::from_utf8(out)?;
    let lines: Vec<&str> = printed.lines().collect();
    assert_eq!(lines.len(), 11);
    assert!(lines[0].trim_start().starts_with("Rank"));
    assert!(lines[0].ends_with("MC_USD_Billion"));
    assert!(lines[1].ends_with("432.92"));

    assert!(!config.output_csv_path.exists());
    assert_eq!(std::fs::read_to_string(&config.log_path)?.lines().count(), 2);

    Ok(())
}

#[tokio::test]
async fn test_page_without_table_body() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let page = temp_dir.path().join("empty.html");
    std::fs::write(&page, "<html><body><p>Page moved</p></body></html>")?;

    let config = EtlConfig {
        html_file: Some(page),
        ..config_in(temp_dir.path(), "largest_banks.html")
    };

    let result = pipeline_for(&config)?.run(&mut Vec::<u8>::new()).await;
    assert!(matches!(result, Err(EtlError::Structural(_))));

    Ok(())
}
