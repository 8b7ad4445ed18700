//! The 14 standard PDF fonts
//!
//! Every conforming viewer ships these, so they are referenced by name and
//! never embedded. Text is written in WinAnsiEncoding; characters outside it
//! are replaced with `?`.

use lopdf::{Dictionary, Object};

/// One of the 14 standard Type1 fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    Symbol,
    ZapfDingbats,
}

// Advance widths (1/1000 em) for WinAnsi 0x20..=0x7E, from the Adobe AFM files.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_ITALIC_WIDTHS: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 675, 675, 675, 500,
    920, 611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833, 667, 722,
    611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556, 389, 278, 389, 422, 500,
    333, 500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722, 500, 500,
    500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389, 400, 275, 400, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_ITALIC_WIDTHS: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    832, 667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889, 722, 722,
    611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611, 333, 278, 333, 570, 500,
    333, 500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778, 556, 500,
    500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389, 348, 220, 348, 570,
];

const MONOSPACE_WIDTH: u16 = 600;

impl StandardFont {
    /// All standard fonts
    pub const ALL: [StandardFont; 14] = [
        StandardFont::Helvetica,
        StandardFont::HelveticaBold,
        StandardFont::HelveticaOblique,
        StandardFont::HelveticaBoldOblique,
        StandardFont::TimesRoman,
        StandardFont::TimesBold,
        StandardFont::TimesItalic,
        StandardFont::TimesBoldItalic,
        StandardFont::Courier,
        StandardFont::CourierBold,
        StandardFont::CourierOblique,
        StandardFont::CourierBoldOblique,
        StandardFont::Symbol,
        StandardFont::ZapfDingbats,
    ];

    /// Look up a standard font by its PostScript name (exact match)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|font| font.base_font() == name)
    }

    /// PostScript name used as `/BaseFont`
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
            StandardFont::Symbol => "Symbol",
            StandardFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Symbolic fonts carry their own encoding
    fn is_symbolic(self) -> bool {
        matches!(self, StandardFont::Symbol | StandardFont::ZapfDingbats)
    }

    /// Width table for the printable ASCII range, `None` for monospace fonts.
    ///
    /// Oblique Helvetica shares the upright metrics. The symbolic fonts are
    /// treated as monospace.
    fn ascii_widths(self) -> Option<&'static [u16; 95]> {
        match self {
            StandardFont::Helvetica | StandardFont::HelveticaOblique => Some(&HELVETICA_WIDTHS),
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique => {
                Some(&HELVETICA_BOLD_WIDTHS)
            }
            StandardFont::TimesRoman => Some(&TIMES_ROMAN_WIDTHS),
            StandardFont::TimesBold => Some(&TIMES_BOLD_WIDTHS),
            StandardFont::TimesItalic => Some(&TIMES_ITALIC_WIDTHS),
            StandardFont::TimesBoldItalic => Some(&TIMES_BOLD_ITALIC_WIDTHS),
            _ => None,
        }
    }

    /// Advance width of one WinAnsi code in 1/1000 em
    fn code_width(self, code: u8) -> u16 {
        match self.ascii_widths() {
            None => MONOSPACE_WIDTH,
            Some(table) => match code {
                0x20..=0x7E => table[(code - 0x20) as usize],
                // Outside ASCII: approximate with the width of 'o'
                _ => table[(b'o' - 0x20) as usize],
            },
        }
    }

    /// Text width in 1/1000 em
    pub fn text_width(self, text: &str) -> u32 {
        text.chars()
            .map(|c| self.code_width(winansi_code(c)) as u32)
            .sum()
    }

    /// Text width in points for a given font size
    pub fn text_width_points(self, text: &str, font_size: f32) -> f32 {
        (self.text_width(text) as f32 / 1000.0) * font_size
    }

    /// Encode text as a hex string for the Tj operator
    pub fn encode_text_hex(self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() * 2 + 2);
        result.push('<');
        for c in text.chars() {
            result.push_str(&format!("{:02X}", winansi_code(c)));
        }
        result.push('>');
        result
    }

    /// Font dictionary referencing the standard font by name
    pub fn to_pdf_dictionary(self) -> Dictionary {
        let mut dict = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type1".into()),
            ("BaseFont", Object::Name(self.base_font().as_bytes().to_vec())),
        ]);
        if !self.is_symbolic() {
            dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        }
        dict
    }
}

/// Map a character to its WinAnsiEncoding byte, `?` when not representable
fn winansi_code(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '™' => 0x99,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_name() {
        assert_eq!(
            StandardFont::from_name("Helvetica"),
            Some(StandardFont::Helvetica)
        );
        assert_eq!(
            StandardFont::from_name("Times-BoldItalic"),
            Some(StandardFont::TimesBoldItalic)
        );
        assert_eq!(StandardFont::from_name("helvetica"), None);
        assert_eq!(StandardFont::from_name("Arial"), None);
    }

    #[test]
    fn test_names_roundtrip() {
        for font in StandardFont::ALL {
            assert_eq!(StandardFont::from_name(font.base_font()), Some(font));
        }
    }

    #[test]
    fn test_helvetica_widths() {
        // Digits are all 556 units wide
        assert_eq!(StandardFont::Helvetica.text_width("007"), 1668);
        assert_eq!(StandardFont::Helvetica.text_width("Wi"), 944 + 222);
        assert_eq!(StandardFont::Helvetica.text_width(""), 0);
    }

    #[test]
    fn test_times_variant_widths() {
        assert_eq!(StandardFont::TimesRoman.text_width("W"), 944);
        assert_eq!(StandardFont::TimesBold.text_width("W"), 1000);
        assert_eq!(StandardFont::TimesBold.text_width("0"), 500);
        assert_eq!(StandardFont::TimesItalic.text_width("A"), 611);
        assert_eq!(StandardFont::TimesBoldItalic.text_width("m"), 778);
        assert_eq!(StandardFont::TimesBoldItalic.text_width("Am"), 667 + 778);
    }

    #[test]
    fn test_width_points() {
        let width = StandardFont::Helvetica.text_width_points("0", 28.0);
        assert!((width - 15.568).abs() < 1e-4);
    }

    #[test]
    fn test_courier_is_monospace() {
        assert_eq!(StandardFont::Courier.text_width("iiii"), 2400);
        assert_eq!(StandardFont::CourierBold.text_width("WWWW"), 2400);
    }

    #[test]
    fn test_encode_ascii() {
        assert_eq!(StandardFont::Helvetica.encode_text_hex("Hi"), "<4869>");
        assert_eq!(StandardFont::Helvetica.encode_text_hex(""), "<>");
    }

    #[test]
    fn test_encode_unrepresentable() {
        // Japanese characters fall back to '?'
        assert_eq!(StandardFont::Helvetica.encode_text_hex("図書"), "<3F3F>");
        assert_eq!(StandardFont::Helvetica.encode_text_hex("é€"), "<E980>");
    }

    #[test]
    fn test_dictionary() {
        let dict = StandardFont::TimesRoman.to_pdf_dictionary();
        assert_eq!(dict.get(b"BaseFont").unwrap().as_name().unwrap(), b"Times-Roman");
        assert!(dict.get(b"Encoding").is_ok());

        let dict = StandardFont::Symbol.to_pdf_dictionary();
        assert!(dict.get(b"Encoding").is_err());
    }
}
