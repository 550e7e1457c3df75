//! Execution controls CLI
//!
//! Validates and summarises controls documents before they are handed to a
//! test run, and shows what a configuration resolves to.

#![allow(clippy::print_stdout)]

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use application::TestingMode;
use clap::{Parser, Subcommand};
use domain::Endpoint;
use infrastructure::{AppConfig, ControlsDocument, TelemetryConfig, init_telemetry};
use tracing::debug;

/// Execution controls CLI
#[derive(Debug, Parser)]
#[command(name = "controls-cli")]
#[command(author, version, about = "Inspect fault injection controls documents", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check that a controls document parses and every injection is valid
    ///
    /// Example: controls-cli validate ./controls.json
    Validate {
        /// Path to the JSON controls document
        file: PathBuf,
    },

    /// List the injections of a document and whether each is armed on an endpoint
    ///
    /// Example: controls-cli summary ./controls.json --address 10.0.0.5 --port 31010
    Summary {
        /// Path to the JSON controls document
        file: PathBuf,

        /// Address of the endpoint to evaluate filters against
        #[arg(long, default_value = "localhost")]
        address: String,

        /// Port of the endpoint to evaluate filters against
        #[arg(long, default_value_t = 0)]
        port: u16,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show what the application configuration resolves to
    Config {
        /// Configuration file (defaults to ./controls.toml if present)
        #[arg(short, long, env = "EXEC_CONTROLS_CONFIG")]
        file: Option<PathBuf>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Returns `false` when the document itself is invalid
fn validate(file: &Path) -> anyhow::Result<bool> {
    match ControlsDocument::from_file(file) {
        Ok(document) => {
            println!(
                "✅ {}: {} valid injection(s)",
                file.display(),
                document.len()
            );
            Ok(true)
        },
        Err(e) if e.is_document_error() => {
            println!("❌ {}: {e}", file.display());
            Ok(false)
        },
        Err(e) => Err(e.into()),
    }
}

fn summary(file: &Path, address: String, port: u16, json: bool) -> anyhow::Result<()> {
    let document = ControlsDocument::from_file(file)
        .with_context(|| format!("failed to load {}", file.display()))?;
    let endpoint = Endpoint::new(address, port).context("invalid endpoint")?;
    let rows = report::summarize(&document, &endpoint)?;
    debug!(rows = rows.len(), endpoint = %endpoint, "Summarised controls document");

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("📋 Injections for {endpoint}:");
        print!("{}", report::render_table(&rows));
        let armed = rows.iter().filter(|row| row.armed).count();
        println!("{armed} of {} armed", rows.len());
    }
    Ok(())
}

fn show_config(file: Option<&Path>) -> anyhow::Result<()> {
    let config = match file {
        Some(path) => AppConfig::load_from_and_install(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => AppConfig::load_and_install().context("failed to load configuration")?,
    };
    let controls = config
        .execution_controls()
        .context("invalid controls configuration")?;

    println!("⚙️  Configuration:");
    println!("   Testing mode: {}", TestingMode::current());
    println!("   Endpoint:     {}", controls.endpoint());
    println!("   Injections:   {} armed", controls.len());
    println!("   Log filter:   {}", config.telemetry.log_filter);
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig {
        thread_ids: false,
        ..TelemetryConfig::with_filter(log_filter_from_verbosity(cli.verbose))
    };
    init_telemetry(&telemetry)?;

    match cli.command {
        Commands::Validate { file } => {
            let valid = validate(&file)?;
            Ok(if valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        },
        Commands::Summary {
            file,
            address,
            port,
            json,
        } => summary(&file, address, port, json).map(|()| ExitCode::SUCCESS),
        Commands::Config { file } => show_config(file.as_deref()).map(|()| ExitCode::SUCCESS),
    }
}
