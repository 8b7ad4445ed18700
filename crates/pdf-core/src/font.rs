//! Font handling for PDF documents

use crate::standard::StandardFont;
use crate::{PdfError, Result};
use lopdf::{Dictionary, Object, Stream};
use std::collections::BTreeSet;

/// A font usable by the document: either a standard font referenced by
/// name or an embedded TrueType font
#[derive(Debug, Clone)]
pub enum Font {
    Standard(StandardFont),
    Embedded(FontData),
}

impl Font {
    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        match self {
            Font::Standard(font) => font.text_width_points(text, font_size),
            Font::Embedded(font) => font.text_width_points(text, font_size),
        }
    }

    /// Encode text as hex string for PDF Tj operator
    pub fn encode_text_hex(&self, text: &str) -> String {
        match self {
            Font::Standard(font) => font.encode_text_hex(text),
            Font::Embedded(font) => font.encode_text_hex(text),
        }
    }

    /// Record characters drawn with this font
    pub(crate) fn add_chars(&mut self, text: &str) {
        if let Font::Embedded(font) = self {
            font.add_chars(text);
        }
    }
}

/// Font data structure for embedded fonts
#[derive(Debug, Clone)]
pub struct FontData {
    /// Font name/identifier
    pub name: String,
    /// Raw TTF data
    pub ttf_data: Vec<u8>,
    /// Characters used (for the widths array and ToUnicode map)
    pub used_chars: BTreeSet<char>,
    /// Parsed font face
    face: Option<ttf_parser::Face<'static>>,
}

/// PDF objects generated for font embedding
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont Type2 dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Font file stream (TTF data)
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

impl FontData {
    /// Create font data from TTF bytes
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `ttf_data` - TrueType font file bytes
    pub fn from_ttf(name: &str, ttf_data: &[u8]) -> Result<Self> {
        let data = ttf_data.to_vec();

        // The parsed face borrows its bytes for the lifetime of the process;
        // fonts are loaded once per document run.
        let static_data: &'static [u8] = Box::leak(data.clone().into_boxed_slice());

        let face = ttf_parser::Face::parse(static_data, 0)
            .map_err(|e| PdfError::FontParseError(format!("{name}: {e:?}")))?;

        Ok(Self {
            name: name.to_string(),
            ttf_data: data,
            used_chars: BTreeSet::new(),
            face: Some(face),
        })
    }

    /// Add characters to the used set
    pub fn add_chars(&mut self, text: &str) {
        self.used_chars.extend(text.chars());
    }

    /// Get glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face
            .as_ref()
            .and_then(|face| face.glyph_index(c).map(|id| id.0))
    }

    /// Horizontal advance of a character in font units
    pub fn glyph_advance(&self, c: char) -> Option<u16> {
        let face = self.face.as_ref()?;
        face.glyph_hor_advance(face.glyph_index(c)?)
    }

    /// Get font units per em
    pub fn units_per_em(&self) -> u16 {
        self.face
            .as_ref()
            .map(|face| face.units_per_em())
            .unwrap_or(1000)
    }

    /// Get font ascender
    pub fn ascender(&self) -> i16 {
        self.face
            .as_ref()
            .map(|face| face.ascender())
            .unwrap_or(800)
    }

    /// Get font descender
    pub fn descender(&self) -> i16 {
        self.face
            .as_ref()
            .map(|face| face.descender())
            .unwrap_or(-200)
    }

    /// Sum of glyph advances in font units; missing glyphs count as zero
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .filter_map(|c| self.glyph_advance(c))
            .map(u32::from)
            .sum()
    }

    /// Text width in points at `font_size`
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        self.text_width(text) as f32 * font_size / self.units_per_em() as f32
    }

    /// Glyph IDs as 4-digit hex for an Identity-H `Tj`; unmapped characters use glyph 0
    pub fn encode_text_hex(&self, text: &str) -> String {
        let gids: String = text
            .chars()
            .map(|c| format!("{:04X}", self.glyph_id(c).unwrap_or(0)))
            .collect();
        format!("<{gids}>")
    }

    /// Generate all PDF objects needed to embed this font
    ///
    /// References between the returned objects are placeholders; the
    /// document links them when it adds the objects.
    pub fn to_pdf_objects(&self) -> FontObjects {
        let font_name = Object::Name(self.pdf_font_name().into_bytes());

        let tounicode_content = self.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(
            Dictionary::from_iter(vec![("Type", "CMap".into())]),
            tounicode_content.into_bytes(),
        );

        let font_file_stream = Stream::new(
            Dictionary::from_iter(vec![("Length1", (self.ttf_data.len() as i64).into())]),
            self.ttf_data.clone(),
        );

        let units_per_em = self.units_per_em() as f64;
        let scale = |v: i16| ((v as f64) * 1000.0 / units_per_em).round() as i64;
        let ascent = scale(self.ascender());
        let descent = scale(self.descender());

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", font_name.clone()),
            ("Flags", 4.into()), // Symbolic
            (
                "FontBBox",
                vec![0.into(), descent.into(), 1000.into(), ascent.into()].into(),
            ),
            ("ItalicAngle", 0.into()),
            ("Ascent", ascent.into()),
            ("Descent", descent.into()),
            ("CapHeight", ascent.into()),
            ("StemV", 80.into()),
        ]);

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "CIDFontType2".into()),
            ("BaseFont", font_name.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("W", self.generate_widths_array().into()),
            ("DW", 1000.into()),
        ]);

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", font_name),
            ("Encoding", "Identity-H".into()),
        ]);

        FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        }
    }

    /// PDF names cannot contain whitespace or delimiters
    fn pdf_font_name(&self) -> String {
        self.name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Generate /W array for used glyph widths (scaled to 1000 units per em)
    fn generate_widths_array(&self) -> Vec<Object> {
        let mut widths = Vec::new();
        let face = match &self.face {
            Some(f) => f,
            None => return widths,
        };

        let units_per_em = self.units_per_em() as f64;
        let mut gids: Vec<u16> = self
            .used_chars
            .iter()
            .filter_map(|&c| self.glyph_id(c))
            .collect();
        gids.sort_unstable();
        gids.dedup();

        for gid in gids {
            let advance = face
                .glyph_hor_advance(ttf_parser::GlyphId(gid))
                .unwrap_or(0) as f64;
            let width = (advance * 1000.0 / units_per_em).round() as i64;
            widths.push((gid as i64).into());
            widths.push(vec![width.into()].into());
        }

        widths
    }

    /// ToUnicode CMap mapping every used glyph back to its character
    fn generate_tounicode_cmap(&self) -> String {
        let mut cmap = String::from(CMAP_PROLOGUE);

        let chars: Vec<char> = self.used_chars.iter().copied().collect();
        // At most 100 entries per bfchar section
        for chunk in chars.chunks(100) {
            cmap += &format!("{} beginbfchar\n", chunk.len());
            for &c in chunk {
                let mut utf16 = [0u16; 2];
                let unicode: String = c
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                cmap += &format!("<{:04X}> <{unicode}>\n", self.glyph_id(c).unwrap_or(0));
            }
            cmap += "endbfchar\n";
        }

        cmap + CMAP_EPILOGUE
    }
}

const CMAP_PROLOGUE: &str = "\
/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
";

const CMAP_EPILOGUE: &str = "\
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";
