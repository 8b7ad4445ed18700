//! karuta-pdf - print sheets for a karuta deck
//!
//! Reads the deck CSV, assigns bonus cards and writes a duplex-ready A4 PDF
//! with picture fronts, picture backs, reading fronts and reading backs.

use anyhow::{Context, Result};
use clap::Parser;
use karuta::{generate, DeckConfig};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "karuta-pdf")]
#[command(about = "Lay out a karuta deck as business-card sized cards on A4 sheets")]
struct Args {
    /// Card CSV file
    #[arg(short, long, default_value = "JDC_karuta.csv")]
    input: PathBuf,

    /// PDF file to write
    #[arg(short, long, default_value = "DUALIS_karuta_print.pdf")]
    output: PathBuf,

    /// JSON file overriding deck settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Warnings only unless -v; RUST_LOG wins when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => DeckConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DeckConfig::default(),
    };
    debug!(?config, "deck configuration");

    let summary = generate(&args.input, &args.output, &config).with_context(|| {
        format!(
            "Failed to generate {} from {}",
            args.output.display(),
            args.input.display()
        )
    })?;
    info!(
        cards = summary.cards,
        pages = summary.pages,
        bonus_cards = summary.bonus_cards,
        "done"
    );

    println!("Wrote: {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_paths() {
        let args = Args::parse_from(["karuta-pdf"]);
        assert_eq!(args.input, PathBuf::from("JDC_karuta.csv"));
        assert_eq!(args.output, PathBuf::from("DUALIS_karuta_print.pdf"));
        assert!(args.config.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "karuta-pdf",
            "--input",
            "deck.csv",
            "-o",
            "out.pdf",
            "--config",
            "deck.json",
            "-v",
        ]);
        assert_eq!(args.input, PathBuf::from("deck.csv"));
        assert_eq!(args.output, PathBuf::from("out.pdf"));
        assert_eq!(args.config, Some(PathBuf::from("deck.json")));
        assert!(args.verbose);
    }
}
