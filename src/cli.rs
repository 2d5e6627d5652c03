//! CLI argument parsing for biostat.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text report (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "biostat")]
#[command(version)]
#[command(about = "Automated statistical test selection for numeric sample groups", long_about = None)]
pub struct Cli {
    /// Input file with one group per line ("Name: 1.0, 2.0, 3.0");
    /// reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Run the built-in Control/Target demo instead of reading input
    #[arg(long)]
    pub demo: bool,

    /// Enable debug logging to stderr
    #[arg(short, long)]
    pub debug: bool,
}
