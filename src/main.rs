//! Weather Stats - command line entry point
//!
//! Loads weather CSV files into SQLite and prints summary statistics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use weather_stats::pipeline::{self, PipelineError};
use weather_stats::{logging, RecordStore, Settings, SqliteStore, StatisticsResult, StatsCalculator};

#[derive(Parser)]
#[command(author, version, about = "Weather CSV ingestion & summary statistics")]
struct Args {
    /// TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ingest a CSV file into the database as one batch
    Load {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Average min/max temperature and total rainfall of stored records
    Stats,
    /// Describe selected columns
    Describe {
        /// CSV file to describe (header names); defaults to the configured file
        #[arg(short, long, conflicts_with = "stored")]
        file: Option<PathBuf>,
        /// Describe stored records instead (field names such as min_temp)
        #[arg(long)]
        stored: bool,
        #[arg(long)]
        json: bool,
        columns: Vec<String>,
    },
    /// Read, aggregate and report without persisting anything
    Run {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = logging::init(&settings.log_filter) {
        eprintln!("failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match execute(args.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Load { file } => {
            let path = file.unwrap_or_else(|| settings.data_path.clone());
            let mut store = open_store(settings)?;

            match pipeline::load_into_store(&path, &mut store) {
                Ok(report) => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(())
                }
                Err(e) => {
                    println!("{}", serde_json::json!({ "error": e.to_string() }));
                    Err(e).context("load failed")
                }
            }
        }
        Command::Stats => {
            let records = open_store(settings)?.all()?;
            print_result(&StatsCalculator::compute(&records), false)
        }
        Command::Describe {
            file,
            stored,
            json,
            columns,
        } => {
            let result = if stored {
                let records = open_store(settings)?.all()?;
                StatsCalculator::describe_records(&records, &columns)?
            } else {
                let path = file.unwrap_or_else(|| settings.data_path.clone());
                let table = pipeline::load_table(&path).map_err(PipelineError::from)?;
                StatsCalculator::describe_table(&table, &columns)?
            };
            print_result(&result, json)
        }
        Command::Run { file } => {
            let path = file.unwrap_or_else(|| settings.data_path.clone());
            let output = pipeline::run_batch(&path, settings.high_rainfall_threshold)?;
            print_result(&output.statistics, false)?;
            println!("{}", output.high_rainfall);
            Ok(())
        }
    }
}

fn open_store(settings: &Settings) -> Result<SqliteStore> {
    SqliteStore::connect(&settings.database_url)
        .with_context(|| format!("failed to open {}", settings.database_url))
}

fn print_result(result: &StatisticsResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        for line in result.lines() {
            println!("{line}");
        }
    }
    Ok(())
}
