//! Karuta deck printing
//!
//! This crate provides:
//! - Deck configuration (card size, grid, palette, bonus pool)
//! - CSV card record loading with per-field defaults
//! - Deterministic bonus card assignment
//! - Sheet layout with duplex mirroring
//! - Rendering of the four card faces into a PDF
//!
//! # Example
//!
//! ```ignore
//! use karuta::{generate, DeckConfig};
//!
//! let config = DeckConfig::default();
//! let summary = generate("JDC_karuta.csv", "DUALIS_karuta_print.pdf", &config)?;
//! println!("{} cards on {} pages", summary.cards, summary.pages);
//! ```

pub mod bonus;
pub mod config;
pub mod face;
mod generate;
pub mod layout;
pub mod loader;
mod record;
mod renderer;

pub use bonus::{assign_bonus, bonus_target, BonusReport, PoolCursor};
pub use config::{DeckConfig, FontSource};
pub use face::{Face, FaceSpec, FaceText};
pub use generate::{generate, render_deck, GenerationSummary};
pub use layout::{mirror_rows, GridLayout, GridPosition};
pub use loader::{load_cards, read_cards};
pub use record::CardRecord;
pub use renderer::CardRenderer;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a deck
#[derive(Debug, Error)]
pub enum KarutaError {
    #[error("Failed to read card source {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No cards found in {}", .0.display())]
    EmptyDeck(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Failed to read font {}: {source}", .path.display())]
    FontRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),
}

/// Result type for deck operations
pub type Result<T> = std::result::Result<T, KarutaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KarutaError::EmptyDeck(PathBuf::from("deck.csv"));
        assert_eq!(err.to_string(), "No cards found in deck.csv");

        let err = KarutaError::Config("cols must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: cols must be at least 1"
        );
    }
}
