//! CSV card record loading
//!
//! Columns are matched by header name: `number`, `name`, `color_code`,
//! `font`, `point_size`, `is_bonus_game`, `bonus_game_name`. Unknown columns
//! are ignored and missing ones read as blank. A bad field never rejects its
//! row; it falls back to the configured default instead.

use crate::config::{DeckConfig, BLACK};
use crate::record::{CardRecord, RawCardRow};
use crate::{KarutaError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Load all cards from a CSV file
///
/// Fails with [`KarutaError::SourceRead`] if the file cannot be opened and
/// with [`KarutaError::EmptyDeck`] if it holds no card rows.
pub fn load_cards<P: AsRef<Path>>(path: P, config: &DeckConfig) -> Result<Vec<CardRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| KarutaError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;

    let cards = read_cards(BufReader::new(file), config)?;
    if cards.is_empty() {
        return Err(KarutaError::EmptyDeck(path.to_path_buf()));
    }

    debug!(path = %path.display(), cards = cards.len(), "loaded card records");
    Ok(cards)
}

/// Read cards from any CSV source
///
/// Rows the CSV reader cannot decode (for example invalid UTF-8) are skipped
/// with a warning. I/O failures abort the read.
pub fn read_cards<R: Read>(reader: R, config: &DeckConfig) -> Result<Vec<CardRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    // Header problems are fatal; row problems are not
    csv_reader.headers()?;

    let mut cards = Vec::new();
    for (index, result) in csv_reader.deserialize::<RawCardRow>().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                warn!(row = index + 1, error = %err, "skipping unreadable row");
                continue;
            }
        };
        cards.push(card_from_row(row, config));
    }

    Ok(cards)
}

fn card_from_row(row: RawCardRow, config: &DeckConfig) -> CardRecord {
    let number = field(row.number);
    let name = field(row.name);

    let color_code = match field(row.color_code) {
        color if color.is_empty() => resolve_color(&number, &config.digit_colors),
        color => color,
    };
    let font = resolve_font(&field(row.font), config);

    CardRecord {
        number,
        name,
        color_code,
        font,
        point_size: parse_point_size(&field(row.point_size), config.default_point_size),
        is_bonus_game: parse_flag(&field(row.is_bonus_game)),
        bonus_game_name: field(row.bonus_game_name),
    }
}

/// Trimmed field value, blank when missing
fn field(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Border colour for a card with no explicit colour
///
/// The last character of `number` picks a palette entry; an empty number
/// uses entry 0. Full-width digits count as digits; anything else gives
/// black.
pub fn resolve_color(number: &str, palette: &[String]) -> String {
    let digit = match number.chars().last() {
        None => Some(0),
        Some(c) => digit_value(c),
    };

    digit
        .and_then(|d| palette.get(d as usize))
        .cloned()
        .unwrap_or_else(|| BLACK.to_string())
}

/// Value of an ASCII (`0`-`9`) or full-width (`０`-`９`) decimal digit
fn digit_value(c: char) -> Option<u32> {
    c.to_digit(10).or_else(|| {
        ('０'..='９')
            .contains(&c)
            .then(|| c as u32 - '０' as u32)
    })
}

/// The requested font if it is known, otherwise the default font
pub fn resolve_font(font: &str, config: &DeckConfig) -> String {
    if font.is_empty() {
        return config.default_font.clone();
    }
    if config.is_known_font(font) {
        return font.to_string();
    }

    debug!(font, fallback = %config.default_font, "unknown font");
    config.default_font.clone()
}

/// Parse a point size, truncating fractions
///
/// Blank, unparsable or sub-1 values give `default`.
pub fn parse_point_size(value: &str, default: u32) -> u32 {
    match value.trim().parse::<f64>() {
        Ok(size) if size.is_finite() && size >= 1.0 => size.trunc().min(u32::MAX as f64) as u32,
        _ => default,
    }
}

/// Case-insensitive truthy flag: `true`, `1`, `yes` or `y`
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn read(csv: &str) -> Vec<CardRecord> {
        read_cards(csv.as_bytes(), &DeckConfig::default()).unwrap()
    }

    #[test]
    fn test_full_row() {
        let cards = read(
            "number,name,color_code,font,point_size,is_bonus_game,bonus_game_name\n\
             007,Library,#123456,Courier,30,yes,Quiz\n",
        );

        assert_eq!(
            cards,
            vec![CardRecord {
                number: "007".to_string(),
                name: "Library".to_string(),
                color_code: "#123456".to_string(),
                font: "Courier".to_string(),
                point_size: 30,
                is_bonus_game: true,
                bonus_game_name: "Quiz".to_string(),
            }]
        );
    }

    #[test]
    fn test_defaults_from_minimal_columns() {
        let cards = read("number,name\n003,Card\n");
        let card = &cards[0];

        assert_eq!(card.color_code, "#FF9500");
        assert_eq!(card.font, "Helvetica");
        assert_eq!(card.point_size, 28);
        assert!(!card.is_bonus_game);
        assert_eq!(card.bonus_game_name, "");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let cards = read("number,name,font\n  012 ,  Name  , Times-Roman \n");
        assert_eq!(cards[0].number, "012");
        assert_eq!(cards[0].name, "Name");
        assert_eq!(cards[0].font, "Times-Roman");
        assert_eq!(cards[0].color_code, "#34C759");
    }

    #[test]
    fn test_unknown_columns_ignored() {
        let cards = read("number,extra,name\n1,ignored,One\n");
        assert_eq!(cards[0].name, "One");
    }

    #[test]
    fn test_short_row_reads_blank() {
        let cards = read("number,name,point_size\n5\n");
        assert_eq!(cards[0].number, "5");
        assert_eq!(cards[0].name, "");
        assert_eq!(cards[0].point_size, 28);
    }

    #[test]
    fn test_utf8_names() {
        let cards = read("number,name\n001,図書館の自由\n");
        assert_eq!(cards[0].name, "図書館の自由");
    }

    #[test]
    fn test_invalid_utf8_row_skipped() {
        let mut data = b"number,name\n001,ok\n002,".to_vec();
        data.extend_from_slice(&[0xFF, 0xFE]);
        data.extend_from_slice(b"\n003,fine\n");

        let cards = read_cards(data.as_slice(), &DeckConfig::default()).unwrap();
        let numbers: Vec<&str> = cards.iter().map(|c| c.number.as_str()).collect();
        assert_eq!(numbers, vec!["001", "003"]);
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(read("number,name\n").is_empty());
        assert!(read("").is_empty());
    }

    #[test]
    fn test_resolve_color() {
        let palette = DeckConfig::default().digit_colors;
        assert_eq!(resolve_color("007", &palette), "#FF3B30");
        assert_eq!(resolve_color("120", &palette), "#8E8E93");
        assert_eq!(resolve_color("", &palette), "#8E8E93");
        assert_eq!(resolve_color("A-x", &palette), "#000000");
    }

    #[test]
    fn test_resolve_color_full_width_digits() {
        let palette = DeckConfig::default().digit_colors;
        assert_eq!(resolve_color("００７", &palette), "#FF3B30");
        assert_eq!(resolve_color("１２０", &palette), "#8E8E93");
        assert_eq!(resolve_color("Ａ", &palette), "#000000");
    }

    #[test]
    fn test_resolve_font() {
        let config = DeckConfig::default();
        assert_eq!(resolve_font("", &config), "Helvetica");
        assert_eq!(resolve_font("Courier-Bold", &config), "Courier-Bold");
        assert_eq!(resolve_font("Comic Sans", &config), "Helvetica");
    }

    #[test]
    fn test_parse_point_size() {
        assert_eq!(parse_point_size("30", 28), 30);
        assert_eq!(parse_point_size("24.9", 28), 24);
        assert_eq!(parse_point_size("", 28), 28);
        assert_eq!(parse_point_size("big", 28), 28);
        assert_eq!(parse_point_size("0", 28), 28);
        assert_eq!(parse_point_size("-12", 28), 28);
        assert_eq!(parse_point_size("NaN", 28), 28);
    }

    #[test]
    fn test_parse_flag() {
        for value in ["true", "TRUE", "1", "yes", "Y", " y "] {
            assert!(parse_flag(value), "{value:?} should be true");
        }
        for value in ["", "0", "no", "false", "t", "yes please"] {
            assert!(!parse_flag(value), "{value:?} should be false");
        }
    }
}
