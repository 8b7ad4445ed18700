//! Sheet layout
//!
//! Cards tile the sheet in a centred `cols x rows` block with no gaps.
//! Positions are lower-left corners in PDF points (origin at the bottom of
//! the page) listed in reading order: row 0 is the top row.

use crate::config::DeckConfig;
use pdf_core::Size;
use std::slice::Chunks;

/// Lower-left corner of one grid cell in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPosition {
    pub x: f64,
    pub y: f64,
}

/// Fixed grid of equally sized cards on a sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    sheet: Size,
    card: Size,
    cols: usize,
    rows: usize,
}

impl GridLayout {
    /// Create a layout
    ///
    /// # Arguments
    /// * `sheet` - Sheet size in points
    /// * `card` - Card size in points
    /// * `cols` - Cards per row
    /// * `rows` - Rows per sheet
    pub fn new(sheet: Size, card: Size, cols: usize, rows: usize) -> Self {
        Self {
            sheet,
            card,
            cols,
            rows,
        }
    }

    /// Layout described by a deck configuration
    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(
            config.sheet_size(),
            config.card_size(),
            config.cols,
            config.rows,
        )
    }

    pub fn sheet_size(&self) -> Size {
        self.sheet
    }

    pub fn card_size(&self) -> Size {
        self.card
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells on one sheet
    pub fn cards_per_page(&self) -> usize {
        self.cols * self.rows
    }

    /// Horizontal and vertical margin around the block of cards
    pub fn margins(&self) -> (f64, f64) {
        let grid_width = self.card.width * self.cols as f64;
        let grid_height = self.card.height * self.rows as f64;
        (
            (self.sheet.width - grid_width) / 2.0,
            (self.sheet.height - grid_height) / 2.0,
        )
    }

    /// Cell positions in row-major order, top row first
    pub fn positions(&self) -> Vec<GridPosition> {
        let (margin_x, margin_y) = self.margins();

        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .map(|(row, col)| GridPosition {
                x: margin_x + col as f64 * self.card.width,
                y: margin_y + (self.rows - 1 - row) as f64 * self.card.height,
            })
            .collect()
    }

    /// Sheets needed for a deck of `deck_len` cards
    pub fn pages_needed(&self, deck_len: usize) -> usize {
        match self.cards_per_page() {
            0 => 0,
            per_page => deck_len.div_ceil(per_page),
        }
    }

    /// Split a deck into sheets; the last one may be short
    pub fn paginate<'a, T>(&self, cards: &'a [T]) -> Chunks<'a, T> {
        cards.chunks(self.cards_per_page().max(1))
    }
}

/// Reverse the columns of every row, keeping row order
///
/// Back faces use this so that a long-edge duplex flip puts each back
/// behind its front. Applying it twice gives the original list.
pub fn mirror_rows(positions: &[GridPosition], cols: usize) -> Vec<GridPosition> {
    if cols == 0 {
        return positions.to_vec();
    }

    positions
        .chunks(cols)
        .flat_map(|row| row.iter().rev().copied())
        .collect()
}
