use banks_etl::cli::{run_etl, run_extract};
use banks_etl::config::EtlConfig;
use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use owo_colors::OwoColorize;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Largest Banks ETL: scrape the largest banks table, convert market caps and load them to CSV and SQLite
#[derive(Parser)]
#[command(name = "banks-etl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source BANKS_* settings from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute (defaults to `run`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, transform and load the bank table, then print the sample queries
    Run,

    /// Only extract the bank table and print it
    Extract,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dotenv = dotenvy::from_filename(&cli.env);

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    if let Err(e) = dotenv {
        log::debug!("No settings loaded from {}: {}", cli.env.bright_black(), e);
    }

    let config = EtlConfig::from_env()?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            log::info!(
                "Running ETL into table {} ({})",
                config.table_name.cyan(),
                config.database_path.display().bright_black()
            );
            run_etl(&config).await?;
        }
        Commands::Extract => {
            log::info!("Extracting bank table");
            run_extract(&config).await?;
        }
    }

    Ok(())
}
