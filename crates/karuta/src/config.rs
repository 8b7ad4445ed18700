//! Deck configuration
//!
//! Every layout and content constant lives here with its default. A JSON
//! file may override any subset of fields:
//!
//! ```json
//! {
//!   "defaultPointSize": 24,
//!   "bonusEvery": 10,
//!   "fonts": [{ "id": "NotoSansJP", "path": "fonts/NotoSansJP-Regular.ttf" }]
//! }
//! ```

use crate::{KarutaError, Result};
use pdf_core::{Color, Size, StandardFont};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Colour used when a card's colour cannot be derived
pub const BLACK: &str = "#000000";

/// Default font for cards without a usable font
pub const DEFAULT_FONT: &str = "Helvetica";

/// Default text size in points
pub const DEFAULT_POINT_SIZE: u32 = 28;

/// Colours indexed by the last digit of a card number
pub const DEFAULT_DIGIT_COLORS: [&str; 10] = [
    "#8E8E93", "#007AFF", "#34C759", "#FF9500", "#FF2D55", "#AF52DE", "#5AC8FA", "#FF3B30",
    "#FFD60A", "#FF9F0A",
];

/// Bonus activities handed out to bonus cards, in order
pub const DEFAULT_BONUS_POOL: [&str; 11] = [
    "カレントアウェアネスから気になる記事について議論せよ",
    "略称を覚えよう！",
    "図書館員の倫理綱領",
    "図書館の自由に関する宣言を読み上げる",
    "ブックトーク",
    "よみきかせ",
    "クイズ（親が出す）",
    "とびきりの笑顔",
    "研究者を調べる（データベースを使う学習）",
    "自由設定1",
    "自由設定2",
];

/// A TrueType font to embed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FontSource {
    /// Name cards use in their `font` column
    pub id: String,

    /// Path to the TTF file
    pub path: PathBuf,
}

/// Deck layout and content settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckConfig {
    /// Card width in millimeters
    pub card_width_mm: f64,
    /// Card height in millimeters
    pub card_height_mm: f64,
    /// Cards per row
    pub cols: usize,
    /// Rows per sheet
    pub rows: usize,
    /// Font for cards with a blank or unknown font
    pub default_font: String,
    /// Text size for cards with a blank or invalid point size
    pub default_point_size: u32,
    /// Border colours indexed by the last digit of the card number
    pub digit_colors: Vec<String>,
    /// Bonus activity names, used cyclically
    pub bonus_pool: Vec<String>,
    /// Roughly one card in this many becomes a bonus card
    pub bonus_every: usize,
    /// Card border stroke width in points
    pub border_width: f64,
    /// Horizontal text margin inside a card in points
    pub text_margin: f64,
    /// Extra TrueType fonts cards may name
    pub fonts: Vec<FontSource>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            card_width_mm: 91.0,
            card_height_mm: 55.0,
            cols: 2,
            rows: 5,
            default_font: DEFAULT_FONT.to_string(),
            default_point_size: DEFAULT_POINT_SIZE,
            digit_colors: DEFAULT_DIGIT_COLORS.iter().map(|c| c.to_string()).collect(),
            bonus_pool: DEFAULT_BONUS_POOL.iter().map(|n| n.to_string()).collect(),
            bonus_every: 20,
            border_width: 1.0,
            text_margin: 3.0,
            fonts: Vec::new(),
        }
    }
}

impl DeckConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DeckConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    ///
    /// Relative font paths are resolved against the config file's directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| KarutaError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&json)?;
        if let Some(base) = path.parent() {
            for font in &mut config.fonts {
                if font.path.is_relative() {
                    font.path = base.join(&font.path);
                }
            }
        }

        Ok(config)
    }

    /// Check that the settings describe a printable deck
    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 || self.rows == 0 {
            return Err(KarutaError::Config(format!(
                "grid must have at least one column and one row (got {}x{})",
                self.cols, self.rows
            )));
        }

        let card = self.card_size();
        if !card.is_valid() {
            return Err(KarutaError::Config(format!(
                "card size must be positive (got {}x{} mm)",
                self.card_width_mm, self.card_height_mm
            )));
        }

        let sheet = self.sheet_size();
        let grid_width = card.width * self.cols as f64;
        let grid_height = card.height * self.rows as f64;
        if grid_width > sheet.width || grid_height > sheet.height {
            return Err(KarutaError::Config(format!(
                "{}x{} grid of {}x{} mm cards does not fit on the sheet",
                self.cols, self.rows, self.card_width_mm, self.card_height_mm
            )));
        }

        let margin_fits = self.text_margin >= 0.0 && 2.0 * self.text_margin < card.width;
        if !margin_fits {
            return Err(KarutaError::Config(format!(
                "textMargin must be non-negative and leave room for text (got {})",
                self.text_margin
            )));
        }
        if !(self.border_width.is_finite() && self.border_width > 0.0) {
            return Err(KarutaError::Config(format!(
                "borderWidth must be positive (got {})",
                self.border_width
            )));
        }

        if self.digit_colors.len() != 10 {
            return Err(KarutaError::Config(format!(
                "digitColors must have 10 entries (got {})",
                self.digit_colors.len()
            )));
        }
        if let Some(bad) = self
            .digit_colors
            .iter()
            .find(|c| Color::from_hex(c).is_none())
        {
            return Err(KarutaError::Config(format!(
                "digitColors entry {bad:?} is not a #RRGGBB colour"
            )));
        }

        if self.bonus_pool.is_empty() {
            return Err(KarutaError::Config("bonusPool must not be empty".to_string()));
        }
        if self.bonus_every == 0 {
            return Err(KarutaError::Config("bonusEvery must be at least 1".to_string()));
        }
        if self.default_point_size == 0 {
            return Err(KarutaError::Config(
                "defaultPointSize must be at least 1".to_string(),
            ));
        }
        if !self.is_known_font(&self.default_font) {
            return Err(KarutaError::Config(format!(
                "defaultFont {:?} is neither a standard font nor a configured font",
                self.default_font
            )));
        }

        Ok(())
    }

    /// Card size in points
    pub fn card_size(&self) -> Size {
        Size::from_mm(self.card_width_mm, self.card_height_mm)
    }

    /// Sheet size in points (always A4 portrait)
    pub fn sheet_size(&self) -> Size {
        Size::A4
    }

    /// Whether cards may use `name` as their font
    pub fn is_known_font(&self, name: &str) -> bool {
        StandardFont::from_name(name).is_some() || self.fonts.iter().any(|f| f.id == name)
    }
}
