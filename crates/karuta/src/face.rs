//! The four printed card faces

use crate::record::CardRecord;

/// One printed side of one card kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    PictureFront,
    PictureBack,
    ReadingFront,
    ReadingBack,
}

/// Which card field a face prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceText {
    /// The card number
    Number,
    /// The card name
    Name,
    /// Number, two spaces, then name
    NumberAndName,
    /// The bonus activity, on bonus cards only
    BonusName,
}

/// How a face is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceSpec {
    pub text: FaceText,
    /// Smallest text size in points
    pub min_size: u32,
    /// Multiplier applied to the card's point size
    pub scale: f64,
    /// Whether the face uses row-mirrored positions
    pub mirrored: bool,
}

impl Face {
    /// All faces in output order
    pub const ALL: [Face; 4] = [
        Face::PictureFront,
        Face::PictureBack,
        Face::ReadingFront,
        Face::ReadingBack,
    ];

    pub fn spec(self) -> FaceSpec {
        match self {
            Face::PictureFront => FaceSpec {
                text: FaceText::Number,
                min_size: 0,
                scale: 1.0,
                mirrored: false,
            },
            Face::PictureBack => FaceSpec {
                text: FaceText::Name,
                min_size: 16,
                scale: 0.8,
                mirrored: true,
            },
            Face::ReadingFront => FaceSpec {
                text: FaceText::NumberAndName,
                min_size: 18,
                scale: 0.8,
                mirrored: false,
            },
            Face::ReadingBack => FaceSpec {
                text: FaceText::BonusName,
                min_size: 14,
                scale: 0.7,
                mirrored: true,
            },
        }
    }

    /// Short name for logs
    pub fn label(self) -> &'static str {
        match self {
            Face::PictureFront => "picture-front",
            Face::PictureBack => "picture-back",
            Face::ReadingFront => "reading-front",
            Face::ReadingBack => "reading-back",
        }
    }
}

impl FaceSpec {
    /// Text printed for `card`, `None` when the cell stays blank
    pub fn text_for(&self, card: &CardRecord) -> Option<String> {
        let text = match self.text {
            FaceText::Number => card.number.clone(),
            FaceText::Name => card.name.clone(),
            FaceText::NumberAndName => format!("{}  {}", card.number, card.name),
            FaceText::BonusName if card.has_bonus_text() => card.bonus_game_name.clone(),
            FaceText::BonusName => return None,
        };

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Text size for a card: `max(min_size, floor(point_size * scale))`
    pub fn font_size(&self, point_size: u32) -> u32 {
        let scaled = (point_size as f64 * self.scale).floor() as u32;
        scaled.max(self.min_size)
    }
}
