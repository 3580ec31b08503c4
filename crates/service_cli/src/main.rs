//! Valuer CLI - Command Line Operations for Company Valuation
//!
//! This is the operational entry point for the valuer engine.
//!
//! # Commands
//!
//! - `valuer dcf <case>` - DCF valuation with its breakdown
//! - `valuer comparables <case>` - Peer-multiple valuation
//! - `valuer sensitivity <case>` - WACC x terminal growth grid
//! - `valuer trends <case>` - Historical CAGR, volatility and stability
//! - `valuer sector <case>` - Sector KPIs
//! - `valuer validate <case>` - Rule validation
//! - `valuer report <case>` - Full valuation report
//! - `valuer check` - Effective configuration
//!
//! Case files are JSON documents describing one company; see
//! `valuation_engine::ValuationCase`.
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate loads configuration, installs
//! the tracing subscriber and hands case files to `valuation_engine`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod case;
mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use config::{build_config, CliArgs};
use output::OutputFormat;

/// Valuer company valuation CLI
#[derive(Parser)]
#[command(name = "valuer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "VALUER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Discount rate override, as a fraction
    #[arg(long, global = true)]
    wacc: Option<f64>,

    /// Terminal growth override, as a fraction
    #[arg(long, global = true)]
    growth: Option<f64>,

    /// Headline multiple (ev_to_ebitda, ev_to_ebit, pe_ratio, ...)
    #[arg(long, global = true)]
    multiple: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value the projected cash flows with a DCF
    Dcf {
        /// Path to case file (JSON)
        case: String,
    },

    /// Value the company from peer multiples
    Comparables {
        /// Path to case file (JSON)
        case: String,
    },

    /// Tabulate DCF values over a WACC x growth grid
    Sensitivity {
        /// Path to case file (JSON)
        case: String,
    },

    /// Analyse historical trends
    Trends {
        /// Path to case file (JSON)
        case: String,
    },

    /// Compute sector KPIs from operational data
    Sector {
        /// Path to case file (JSON)
        case: String,
    },

    /// Run the validation rules
    Validate {
        /// Path to case file (JSON)
        case: String,
    },

    /// Build the full valuation report
    Report {
        /// Path to case file (JSON)
        case: String,
    },

    /// Print the effective configuration and registered sectors
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config_file: cli.config.clone(),
        log_level: cli.log_level.clone(),
        wacc: cli.wacc,
        terminal_growth: cli.growth,
        multiple: cli.multiple.clone(),
    };
    let config = build_config(&args)?;

    // Initialise tracing; RUST_LOG wins over the configured level
    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let settings = config.to_settings();
    let format = cli.format;

    match cli.command {
        Commands::Dcf { case } => commands::dcf::run(&case, &settings, format),
        Commands::Comparables { case } => commands::comparables::run(&case, &settings, format),
        Commands::Sensitivity { case } => commands::sensitivity::run(&case, &settings, format),
        Commands::Trends { case } => commands::trends::run(&case, format),
        Commands::Sector { case } => commands::sector::run(&case, format),
        Commands::Validate { case } => commands::validate::run(&case, &settings, format),
        Commands::Report { case } => commands::report::run(&case, &settings, format),
        Commands::Check => commands::check::run(&config, format),
    }
}
