//! Herbaria Ingest - corpus validation and loading tool

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use herbaria_common::logging::{init_logging, LogConfig, LogLevel};
use herbaria_ingest::config::{ConfigOverrides, IngestConfig};
use herbaria_ingest::pipeline::{Pipeline, PipelineOptions};
use herbaria_ingest::sink::PgSink;
use herbaria_ingest::Kind;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "herbaria-ingest")]
#[command(author, version, about = "Migrate the herbarium corpus to PostgreSQL")]
struct Cli {
    /// Tables to migrate (default: all)
    #[arg(short, long, value_enum, num_args = 1..)]
    tables: Vec<Kind>,

    /// Perform database transactions but don't commit changes
    #[arg(short, long)]
    dry_run: bool,

    /// Skip pre-validation of the data (also disables foreign key filtering)
    #[arg(short = 'n', long)]
    no_validate: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Directory containing occurrences.txt, annotations.txt, types.txt and media.txt
    #[arg(long)]
    corpus_dir: Option<PathBuf>,

    /// Validation report path
    #[arg(long)]
    report: Option<PathBuf>,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("herbaria-ingest")
        .build();

    // Merge with environment variables (they take precedence)
    let log_config = log_config.merge_env()?;
    let _guard = init_logging(&log_config)?;

    let overrides = ConfigOverrides {
        corpus_dir: cli.corpus_dir,
        report_path: cli.report,
        database_url: cli.database_url,
    };
    let config = IngestConfig::load_with(overrides).context("Failed to load configuration")?;

    let options = PipelineOptions {
        kinds: cli.tables,
        dry_run: cli.dry_run,
        skip_validation: cli.no_validate,
        ..PipelineOptions::from_config(&config)
    };

    let mut sink = PgSink::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    let report = Pipeline::new(options).run(&mut sink).await?;

    if report.failed_batches() > 0 {
        warn!(failed_batches = report.failed_batches(), "Ingestion completed with failed batches");
    }
    info!(rows = report.rows_forwarded(), "Ingestion complete");
    Ok(())
}
