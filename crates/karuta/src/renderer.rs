//! Card face rendering

use crate::config::DeckConfig;
use crate::face::{Face, FaceSpec};
use crate::layout::{mirror_rows, GridLayout, GridPosition};
use crate::record::CardRecord;
use crate::Result;
use pdf_core::{Color, PdfDocument};
use tracing::debug;

/// Draws one face of one sheet of cards
pub struct CardRenderer<'a> {
    /// Deck settings (border width, text margin)
    config: &'a DeckConfig,
    layout: GridLayout,
    /// Front-side positions, top row first
    positions: Vec<GridPosition>,
    /// Back-side positions, columns reversed per row
    mirrored: Vec<GridPosition>,
}

impl<'a> CardRenderer<'a> {
    /// Create a renderer for a deck configuration
    pub fn new(config: &'a DeckConfig) -> Self {
        let layout = GridLayout::from_config(config);
        let positions = layout.positions();
        let mirrored = mirror_rows(&positions, layout.cols());

        Self {
            config,
            layout,
            positions,
            mirrored,
        }
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Positions a face is drawn at
    pub fn positions_for(&self, face: Face) -> &[GridPosition] {
        if face.spec().mirrored {
            &self.mirrored
        } else {
            &self.positions
        }
    }

    /// Draw one face of a sheet of cards onto `page`
    ///
    /// Cards are paired with positions in order; extra cards beyond the
    /// sheet's cells are ignored and unused cells stay blank.
    ///
    /// # Returns
    /// Number of cells drawn
    pub fn draw_face(
        &self,
        doc: &mut PdfDocument,
        page: usize,
        face: Face,
        cards: &[CardRecord],
    ) -> Result<usize> {
        let spec = face.spec();
        let mut drawn = 0;

        for (card, position) in cards.iter().zip(self.positions_for(face)) {
            self.draw_card(doc, page, &spec, card, *position)?;
            drawn += 1;
        }

        Ok(drawn)
    }

    /// Border in the card colour, then the face text centred in black
    fn draw_card(
        &self,
        doc: &mut PdfDocument,
        page: usize,
        spec: &FaceSpec,
        card: &CardRecord,
        position: GridPosition,
    ) -> Result<()> {
        let card_size = self.layout.card_size();

        let border = Color::from_hex(&card.color_code).unwrap_or_else(|| {
            debug!(number = %card.number, color = %card.color_code, "invalid colour, using black");
            Color::black()
        });
        doc.set_stroke_color(border);
        doc.set_line_width(self.config.border_width);
        doc.draw_rect(
            page,
            position.x,
            position.y,
            card_size.width,
            card_size.height,
        )?;

        let Some(text) = spec.text_for(card) else {
            return Ok(());
        };

        doc.set_text_color(Color::black());
        doc.set_font(&card.font, spec.font_size(card.point_size) as f32)?;
        doc.draw_centered_text(
            page,
            position.x,
            position.y,
            card_size.width,
            card_size.height,
            &text,
            self.config.text_margin,
            None,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_positions_for_faces() {
        let config = DeckConfig::default();
        let renderer = CardRenderer::new(&config);

        let front = renderer.positions_for(Face::PictureFront);
        let back = renderer.positions_for(Face::PictureBack);
        assert_eq!(front.len(), 10);
        assert_eq!(back[0], front[1]);
        assert_eq!(renderer.positions_for(Face::ReadingBack), back);
    }

    #[test]
    fn test_draw_partial_sheet() {
        let config = DeckConfig::default();
        let renderer = CardRenderer::new(&config);
        let mut doc = PdfDocument::new();
        let page = doc.add_page(config.sheet_size()).unwrap();

        let cards = vec![CardRecord::new("001", "One"), CardRecord::new("002", "Two")];
        let drawn = renderer
            .draw_face(&mut doc, page, Face::PictureFront, &cards)
            .unwrap();
        assert_eq!(drawn, 2);
    }

    #[test]
    fn test_draw_ignores_extra_cards() {
        let config = DeckConfig::default();
        let renderer = CardRenderer::new(&config);
        let mut doc = PdfDocument::new();
        let page = doc.add_page(config.sheet_size()).unwrap();

        let cards: Vec<CardRecord> = (0..12)
            .map(|i| CardRecord::new(i.to_string(), "x"))
            .collect();
        let drawn = renderer
            .draw_face(&mut doc, page, Face::ReadingFront, &cards)
            .unwrap();
        assert_eq!(drawn, 10);
    }

    #[test]
    fn test_unknown_card_font_is_an_error() {
        let config = DeckConfig::default();
        let renderer = CardRenderer::new(&config);
        let mut doc = PdfDocument::new();
        let page = doc.add_page(config.sheet_size()).unwrap();

        let mut card = CardRecord::new("001", "One");
        card.font = "NoSuchFont".to_string();
        let result = renderer.draw_face(&mut doc, page, Face::PictureFront, &[card]);
        assert!(result.is_err());
    }
}
