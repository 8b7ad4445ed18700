//! Card records

use crate::config::{BLACK, DEFAULT_FONT, DEFAULT_POINT_SIZE};
use serde::Deserialize;

/// One physical card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    /// Card identifier, e.g. "007"
    pub number: String,
    /// Card label
    pub name: String,
    /// Border colour as `#RRGGBB`
    pub color_code: String,
    /// Font name (standard or configured)
    pub font: String,
    /// Base text size in points
    pub point_size: u32,
    /// Whether the card carries a bonus activity
    pub is_bonus_game: bool,
    /// Bonus activity printed on the reading card's back
    pub bonus_game_name: String,
}

impl CardRecord {
    /// A plain card with default presentation
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            color_code: BLACK.to_string(),
            font: DEFAULT_FONT.to_string(),
            point_size: DEFAULT_POINT_SIZE,
            is_bonus_game: false,
            bonus_game_name: String::new(),
        }
    }

    /// Whether the reading card's back shows a bonus activity
    pub fn has_bonus_text(&self) -> bool {
        self.is_bonus_game && !self.bonus_game_name.is_empty()
    }
}

/// One CSV row as read, before defaults are applied
///
/// Missing columns deserialize as `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawCardRow {
    pub number: Option<String>,
    pub name: Option<String>,
    pub color_code: Option<String>,
    pub font: Option<String>,
    pub point_size: Option<String>,
    pub is_bonus_game: Option<String>,
    pub bonus_game_name: Option<String>,
}
