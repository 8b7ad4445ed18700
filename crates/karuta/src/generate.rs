//! Deck to PDF pipeline

use crate::bonus::assign_bonus;
use crate::config::DeckConfig;
use crate::face::Face;
use crate::loader::load_cards;
use crate::record::CardRecord;
use crate::renderer::CardRenderer;
use crate::{KarutaError, Result};
use pdf_core::PdfDocument;
use std::path::Path;
use tracing::{debug, info};

/// What a run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Cards in the deck
    pub cards: usize,
    /// Pages written
    pub pages: usize,
    /// Cards printed with a bonus activity
    pub bonus_cards: usize,
}

/// Load a deck from CSV and write its print PDF
///
/// Nothing is written if loading or rendering fails.
///
/// # Arguments
/// * `input` - Card CSV file
/// * `output` - PDF file to create
/// * `config` - Deck settings
pub fn generate<P, Q>(input: P, output: Q, config: &DeckConfig) -> Result<GenerationSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    config.validate()?;

    let input = input.as_ref();
    let output = output.as_ref();

    let mut cards = load_cards(input, config)?;
    info!(path = %input.display(), cards = cards.len(), "loaded deck");

    let report = assign_bonus(&mut cards, &config.bonus_pool, config.bonus_every);
    info!(
        target = report.target,
        named = report.named,
        flagged = report.flagged,
        total = report.total,
        "assigned bonus cards"
    );

    let mut doc = render_deck(&cards, config)?;
    let pages = doc.page_count();
    doc.save(output)?;
    info!(path = %output.display(), pages, "wrote PDF");

    Ok(GenerationSummary {
        cards: cards.len(),
        pages,
        bonus_cards: cards.iter().filter(|card| card.has_bonus_text()).count(),
    })
}

/// Render a deck into a new document without saving it
///
/// Pages are grouped by face: every picture-front sheet, then every
/// picture-back sheet, then the reading fronts and the reading backs.
pub fn render_deck(cards: &[CardRecord], config: &DeckConfig) -> Result<PdfDocument> {
    let mut doc = PdfDocument::new();
    register_fonts(&mut doc, config)?;

    let renderer = CardRenderer::new(config);
    let sheet = renderer.layout().sheet_size();

    for face in Face::ALL {
        for sheet_cards in renderer.layout().paginate(cards) {
            let page = doc.add_page(sheet)?;
            renderer.draw_face(&mut doc, page, face, sheet_cards)?;
        }
        debug!(face = face.label(), pages = doc.page_count(), "rendered face");
    }

    Ok(doc)
}

fn register_fonts(doc: &mut PdfDocument, config: &DeckConfig) -> Result<()> {
    for font in &config.fonts {
        let data = std::fs::read(&font.path).map_err(|source| KarutaError::FontRead {
            path: font.path.clone(),
            source,
        })?;
        doc.add_font(&font.id, &data)?;
        debug!(id = %font.id, path = %font.path.display(), "registered font");
    }
    Ok(())
}
