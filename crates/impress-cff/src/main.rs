//! impress-cff command line
//!
//! `impress-cff validate CITATION.cff` checks a citation file;
//! `impress-cff render CITATION.cff --format bibtex` prints a citation.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use impress_cff::{render_with, CffConfig, Loader, RenderFormat};
use tracing_subscriber::EnvFilter;

/// Validate and render CITATION.cff files
#[derive(Parser, Debug)]
#[command(name = "impress-cff", version)]
#[command(about = "Validate and render Citation File Format documents", long_about = None)]
struct Cli {
    /// Configuration file (defaults to $IMPRESS_CFF_CONFIG or the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that a citation file is well-formed and complete
    Validate {
        /// Path to the CITATION.cff file
        path: PathBuf,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Print a formatted citation
    Render {
        /// Path to the CITATION.cff file
        path: PathBuf,

        /// Output format (defaults to the configured format)
        #[arg(long, value_enum)]
        format: Option<RenderFormat>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config =
        CffConfig::discover(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Validate { path, strict } => {
            let mut loader_config = config.loader.clone();
            loader_config.strict |= strict;
            validate_file(&Loader::new(loader_config), &path)
        }
        Command::Render { path, format } => {
            let loader = Loader::new(config.loader.clone());
            let record = loader
                .load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            let format = format.unwrap_or(config.render.default_format);
            println!("{}", render_with(&record, format, &config.render.options()));
            Ok(())
        }
    }
}

fn validate_file(loader: &Loader, path: &Path) -> Result<()> {
    let validated = loader
        .load_validated(path)
        .with_context(|| format!("Invalid citation file {}", path.display()))?;

    // Individual warnings were already logged to stderr during validation
    println!("✓ {} is valid", path.display());
    println!("  Title: {}", validated.record.title());
    println!("  Authors: {}", validated.record.authors().len());
    if !validated.warnings.is_empty() {
        println!("  Warnings: {}", validated.warnings.len());
    }
    Ok(())
}
