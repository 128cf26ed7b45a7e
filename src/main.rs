//! MedsMate CLI
//!
//! Extract patient details, medicines and reminder rows from the OCR text of
//! a scanned prescription.
//!
//! Usage:
//!   medsmate patient [INPUT]
//!   medsmate medicines [INPUT]
//!   medsmate reminders [INPUT]
//!   medsmate all [INPUT]
//!
//! INPUT is a text file, or `-` / omitted for stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use medsmate_lib::config;
use medsmate_lib::pipeline::extraction::ExtractionError;
use medsmate_lib::pipeline::structuring::structure_prescription;
use medsmate_lib::reminders::expand_reminder_rows;

#[derive(Parser)]
#[command(name = "medsmate")]
#[command(version)]
#[command(about = "Extract patient details and medicine schedules from prescription OCR text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print single-line JSON
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Patient and doctor fields
    Patient {
        /// OCR text file, or '-' for stdin
        input: Option<PathBuf>,
    },

    /// Medicine table rows
    Medicines {
        /// OCR text file, or '-' for stdin
        input: Option<PathBuf>,
    },

    /// One reminder row per dosage slot, starting today
    Reminders {
        /// OCR text file, or '-' for stdin
        input: Option<PathBuf>,
    },

    /// Patient and medicines together
    All {
        /// OCR text file, or '-' for stdin
        input: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    medsmate_lib::init_tracing();
    let cli = Cli::parse();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "{} failed", config::APP_NAME);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ExtractionError> {
    let input = match &cli.command {
        Commands::Patient { input }
        | Commands::Medicines { input }
        | Commands::Reminders { input }
        | Commands::All { input } => input.as_deref(),
    };
    let raw = read_input(input)?;
    let extraction = structure_prescription(&raw);

    match &cli.command {
        Commands::Patient { .. } => print_json(&extraction.patient, cli.compact),
        Commands::Medicines { .. } => print_json(&extraction.medicines, cli.compact),
        Commands::Reminders { .. } => {
            let now = chrono::Local::now().naive_local();
            let rows = expand_reminder_rows(&extraction.patient, &extraction.medicines, now);
            print_json(&rows, cli.compact)
        }
        Commands::All { .. } => print_json(&extraction, cli.compact),
    }
}

fn read_input(path: Option<&Path>) -> Result<String, ExtractionError> {
    match path {
        Some(p) if p != Path::new("-") => {
            let bytes = fs::read(p)?;
            Ok(String::from_utf8(bytes)?)
        }
        _ => {
            let mut bytes = Vec::new();
            io::stdin().read_to_end(&mut bytes)?;
            Ok(String::from_utf8(bytes)?)
        }
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<(), ExtractionError> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{json}");
    Ok(())
}
