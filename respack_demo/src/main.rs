//! # Respack Demo Binary
//!
//! Runs the layered sample application and decodes raw result codes.
//!
//! # Usage
//!
//! ```bash
//! # Run the sample app with a failing RPC backend (exit code 1)
//! respack_demo run
//!
//! # Run it against a healthy backend (exit code 0)
//! respack_demo run --backend healthy
//!
//! # Decode raw codes against the configured layout
//! respack_demo --config config/respack_demo.toml decode 0x65 0b10100001
//!
//! # Decode an aggregate, JSON output
//! respack_demo --json decode --aggregate 0x0051B2A1
//!
//! # Show the configured layout
//! respack_demo layout
//! ```

use clap::{Parser, Subcommand};
use respack_demo::app::backend_access::{BackendOutcome, SimulatedBackend};
use respack_demo::app::ui;
use respack_demo::config::{ConfigLoader, DemoConfig, LogLevel};
use respack_demo::report::{DecodeReport, LayoutReport, Render, RunReport};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

/// Respack Demo - categorized result codes packed into integers
#[derive(Parser, Debug)]
#[command(name = "respack_demo")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Runs the layered sample application and decodes packed result codes")]
#[command(long_about = None)]
struct Args {
    /// Path to the TOML configuration. Built-in defaults when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs and reports in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the sample application and report the aggregated errors
    Run {
        /// How the simulated backend query ends
        #[arg(long, value_enum, default_value_t = BackendOutcome::RpcFailure)]
        backend: BackendOutcome,
    },

    /// Decode raw codes (decimal, 0x or 0b) against the configured layout
    Decode {
        /// Treat every value as an aggregate of several results
        #[arg(short, long)]
        aggregate: bool,

        /// Raw values to decode
        #[arg(required = true, value_name = "RAW")]
        raw: Vec<String>,
    },

    /// Print the configured layout
    Layout,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match run() {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("respack_demo failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the sample application reported errors.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DemoConfig::load(path),
        None => Ok(DemoConfig::default()),
    };
    let log_level = config
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, log_level);

    let config = config?;
    config.validate()?;
    info!(
        "{} v{} ({})",
        config.shared.service_name,
        env!("CARGO_PKG_VERSION"),
        args.config
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in config".to_string())
    );

    match &args.command {
        Command::Run { backend } => {
            debug!(?backend, "running sample application");
            let errors = ui::retrieve_data(&SimulatedBackend::new(*backend));
            let report = RunReport::new(&config.shared.service_name, &errors);
            emit(&args, &report)?;
            if !report.success {
                info!("{} error(s) aggregated", report.errors.len());
            }
            Ok(report.success)
        }
        Command::Decode { aggregate, raw } => {
            let report = DecodeReport::new(&config.layout, raw, *aggregate)?;
            emit(&args, &report)?;
            Ok(true)
        }
        Command::Layout => {
            let report = LayoutReport::new(&config.layout)?;
            emit(&args, &report)?;
            Ok(true)
        }
    }
}

/// Print a report as pretty JSON or plain text.
fn emit<T: Serialize + Render>(args: &Args, report: &T) -> Result<(), serde_json::Error> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report.render());
    }
    Ok(())
}

/// Setup tracing subscriber from CLI arguments and the configured level.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured.into()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
