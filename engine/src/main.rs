// Engine main entry point
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use engine::config::settings::EngineSettings;
use engine::data::{BatchCsvParser, JsonFileHistoryStore};
use engine::CalculatorService;
use shared::models::{CalculationRow, OperationCategory, OperationType};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "engine", version, about = "Percentages, ratios, list folds, time sums and arithmetic")]
struct Cli {
    /// JSON settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate one row
    Calc {
        /// Operation tag, e.g. percent_of, add_time, simple_calc
        operation: OperationType,
        value1: String,
        #[arg(default_value = "")]
        value2: String,
        value3: Option<String>,
        /// Do not record the result in the history
        #[arg(long)]
        no_history: bool,
    },
    /// Evaluate every row of a delimited batch file in order
    Batch {
        file: PathBuf,
        /// Operation for rows without an `operation` column value
        #[arg(short, long)]
        operation: Option<OperationType>,
    },
    /// Inspect or manage the stored history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// List the available operations
    Ops,
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    Show,
    Clear,
    /// Write one result per line to a text file
    Export {
        #[arg(default_value = "calculator_history.txt")]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = EngineSettings::load(cli.config.as_deref()).context("Failed to load engine settings")?;
    let store = JsonFileHistoryStore::new(&settings.history_path, settings.history_limit);
    info!(history = %store.path().display(), "Starting calculator engine");

    let mut service = CalculatorService::new(store, &settings);

    match cli.command {
        Command::Calc { operation, value1, value2, value3, no_history } => {
            let row = CalculationRow { value1, value2, value3 };
            let result = if no_history {
                service.calculate(&row, operation)
            } else {
                service
                    .calculate_all(std::slice::from_ref(&row), operation)
                    .remove(0)
            };
            println!("{}", result.formatted());
            if !result.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Batch { file, operation } => {
            let path = file.to_string_lossy();
            let rows = BatchCsvParser::load_rows_from_csv(&path, settings.batch_delimiter as u8)?;
            let results = service.calculate_batch(&rows, operation)?;
            for result in &results {
                println!("{}", result.formatted());
            }
            let failures = results.iter().filter(|r| !r.is_success()).count();
            info!(rows = results.len(), failures, "Batch finished");
            if failures > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::History { action } => match action {
            HistoryAction::Show => {
                for result in service.history() {
                    println!("{}  {}", result.timestamp.format("%Y-%m-%d %H:%M:%S"), result.formatted());
                }
            }
            HistoryAction::Clear => service.clear_history(),
            HistoryAction::Export { path } => {
                let written = service.write_export(&path)?;
                println!("Exported {} entries to {}", written, path.display());
            }
        },
        Command::Ops => {
            for category in OperationCategory::ALL {
                println!("{}:", category.label());
                for op in OperationType::ALL.iter().filter(|op| op.category() == category) {
                    let fields: Vec<&str> = op.field_labels().into_iter().filter(|l| !l.is_empty()).collect();
                    println!("  {:<24} {} [{}]", op.tag(), op.label(), fields.join(" | "));
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
