use anyhow::{Context, Result};
use biostat::analysis::{analyze, AnalysisError};
use biostat::cli::{Cli, OutputFormat};
use biostat::input::parse_groups;
use biostat::report;
use biostat::sample::SampleSet;
use clap::Parser;
use std::io::Read;
use tracing_subscriber::EnvFilter;

/// The seeded example groups from the interactive front end.
const DEMO_INPUT: &str = "Control: 100 102 98 105 95\nTarget: 80 85 78 82 88\n";

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn read_input(cli: &Cli) -> Result<String> {
    if cli.demo {
        return Ok(DEMO_INPUT.to_string());
    }
    match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let text = read_input(&cli)?;
    let parsed = parse_groups(&text);
    for name in &parsed.malformed {
        eprintln!("⚠️  skipped malformed group: {name}");
    }

    let set = SampleSet::from_groups(parsed.groups);
    for name in set.dropped() {
        eprintln!("⚠️  excluded group: {name}");
    }

    match analyze(&set) {
        Ok(result) => match cli.format {
            OutputFormat::Text => print!("{}", report::render(&result)),
            OutputFormat::Json => {
                let json =
                    serde_json::to_string_pretty(&result).context("failed to serialize result")?;
                println!("{json}");
            }
        },
        Err(AnalysisError::InsufficientData(msg)) => {
            println!("⚠️  Not enough data: {msg}");
            println!("Enter at least two groups with three or more values each.");
        }
    }

    Ok(())
}
