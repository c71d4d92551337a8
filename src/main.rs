//! earthseries
//!
//! Generates a synthetic 1850-2025 series for one environmental variable,
//! writes it as CSV and prints a short analytic report.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --select 2 --seed 42
//! cargo run -- --config run.toml --output co2.csv --no-report
//! ```

mod export;
mod report;

use anyhow::Context;
use clap::Parser;
use earthseries_core::builder::SeriesBuilder;
use earthseries_core::config::GeneratorConfig;
use earthseries_core::profile::VariableKind;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Synthetic environmental series generator
#[derive(Parser, Debug)]
#[command(name = "earthseries")]
#[command(about = "Generate a synthetic annual environmental series and export it as CSV")]
struct Args {
    /// Variable to generate, as its number in the menu. Prompts when omitted
    #[arg(short, long)]
    select: Option<String>,

    /// Seed for the noise sources. A random seed is drawn and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CSV output path. Defaults to earth_<variable>_data_<start>_<end>.csv
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the analytic report
    #[arg(long)]
    no_report: bool,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GeneratorConfig> {
    match path {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            GeneratorConfig::from_toml_str(&source)
                .with_context(|| format!("invalid config {}", path.display()))
        }
        None => Ok(GeneratorConfig::default()),
    }
}

fn prompt_selection() -> anyhow::Result<String> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Available variables:")?;
    for (i, kind) in VariableKind::SELECTABLE.iter().enumerate() {
        writeln!(stdout, "{}. {}", i + 1, kind.profile().description)?;
    }
    write!(stdout, "\nChoose the number of the variable to generate: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    let input = match args.select {
        Some(input) => input,
        None => prompt_selection()?,
    };
    let selection = VariableKind::from_selection(&input);
    if selection.fell_back {
        info!(
            input = input.trim(),
            "invalid choice, using {} by default",
            selection.kind
        );
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, kind = %selection.kind, "generating series");

    let builder = SeriesBuilder::new(selection.kind, config)?;
    let records = builder.generate(seed);

    let output = args
        .output
        .unwrap_or_else(|| export::default_path(selection.kind, builder.config()));
    export::write_csv_file(&output, &records)?;
    info!(path = %output.display(), records = records.len(), "saved series");

    if !args.no_report {
        print!("{}", report::render(&builder, &records));
    }

    Ok(())
}
