//! PDF Document builder

use crate::font::{Font, FontData};
use crate::standard::StandardFont;
use crate::text::{
    generate_rect_operators, generate_text_operators, layout_centered_lines, wrap_text,
    TextRenderContext,
};
use crate::units::Size;
use crate::{Align, PdfError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::io::Write;
use std::path::Path;

/// Default line height as a multiple of the font size
pub const DEFAULT_LEADING_FACTOR: f64 = 1.1;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `RRGGBB` or `#RRGGBB` hex string
    ///
    /// Returns `None` for anything that is not exactly six hex digits.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Red color
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }

    /// Blue color
    pub fn blue() -> Self {
        Self::rgb(0.0, 0.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// PDF document built page by page
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Reserved ID of the page tree root
    pages_id: ObjectId,
    /// Page object IDs in page order
    page_ids: Vec<ObjectId>,
    /// Fonts available to the document (standard fonts are added on first use)
    fonts: HashMap<String, Font>,
    /// Current font name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Current stroke color
    current_stroke_color: Color,
    /// Current stroke width in points
    current_line_width: f64,
    /// Embedded fonts (font name -> PDF object ID)
    embedded_fonts: HashMap<String, ObjectId>,
    /// Page font resources (page number -> font name -> resource name)
    page_font_resources: HashMap<usize, BTreeMap<String, String>>,
    /// Next font resource number
    next_font_resource: u32,
    /// Buffered content operators per page (page number -> operators)
    page_content_buffer: HashMap<usize, Vec<u8>>,
    /// Set once content, fonts and the page tree have been written
    finalized: bool,
}

impl PdfDocument {
    /// Create an empty document with no pages
    pub fn new() -> Self {
        let mut inner = Document::with_version("1.5");
        let pages_id = inner.new_object_id();
        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        Self {
            inner,
            pages_id,
            page_ids: Vec::new(),
            fonts: HashMap::new(),
            current_font: None,
            current_font_size: 12.0,
            current_text_color: Color::default(),
            current_stroke_color: Color::default(),
            current_line_width: 1.0,
            embedded_fonts: HashMap::new(),
            page_font_resources: HashMap::new(),
            next_font_resource: 1,
            page_content_buffer: HashMap::new(),
            finalized: false,
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Append a blank page
    ///
    /// # Returns
    /// New page number (1-indexed)
    ///
    /// # Example
    /// ```ignore
    /// let mut doc = PdfDocument::new();
    /// let page = doc.add_page(Size::A4)?;
    /// assert_eq!(page, 1);
    /// ```
    pub fn add_page(&mut self, size: Size) -> Result<usize> {
        if !size.is_valid() {
            return Err(PdfError::InvalidPageSize(size.width, size.height));
        }

        let page_id = self.inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(size.width as _),
                Object::Real(size.height as _),
            ],
            "Resources" => Dictionary::new(),
        });
        self.page_ids.push(page_id);

        Ok(self.page_ids.len())
    }

    /// Add a TrueType font to the document
    ///
    /// # Arguments
    /// * `name` - Font identifier (used in set_font)
    /// * `ttf_data` - TrueType font file bytes
    pub fn add_font(&mut self, name: &str, ttf_data: &[u8]) -> Result<()> {
        if self.has_font(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        let font_data = FontData::from_ttf(name, ttf_data)?;
        self.fonts
            .insert(name.to_string(), Font::Embedded(font_data));

        Ok(())
    }

    /// Whether `name` is a registered font or one of the standard fonts
    pub fn has_font(&self, name: &str) -> bool {
        self.fonts.contains_key(name) || StandardFont::from_name(name).is_some()
    }

    /// Set the current font and size
    ///
    /// # Arguments
    /// * `name` - A registered font identifier or a standard font name
    /// * `size` - Font size in points
    pub fn set_font(&mut self, name: &str, size: f32) -> Result<()> {
        if !self.fonts.contains_key(name) {
            let standard = StandardFont::from_name(name)
                .ok_or_else(|| PdfError::FontNotFound(name.to_string()))?;
            self.fonts
                .insert(name.to_string(), Font::Standard(standard));
        }

        self.current_font = Some(name.to_string());
        self.current_font_size = size;

        Ok(())
    }

    /// Set the text (fill) color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set the stroke color used for outlines
    pub fn set_stroke_color(&mut self, color: Color) {
        self.current_stroke_color = color;
    }

    /// Set the stroke width in points
    pub fn set_line_width(&mut self, width: f64) {
        self.current_line_width = width;
    }

    /// Get the current font (name and data)
    fn current_font(&self) -> Result<(&str, &Font)> {
        let name = self
            .current_font
            .as_deref()
            .ok_or_else(|| PdfError::FontNotFound("No font set".to_string()))?;
        let font = self
            .fonts
            .get(name)
            .ok_or_else(|| PdfError::FontNotFound(name.to_string()))?;
        Ok((name, font))
    }

    fn validate_page(&self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page, page_count));
        }
        Ok(())
    }

    /// Get current font's text width for a string
    ///
    /// # Example
    /// ```ignore
    /// doc.set_font("Helvetica", 12.0)?;
    /// let width = doc.get_text_width("Hello")?;
    /// ```
    pub fn get_text_width(&self, text: &str) -> Result<f64> {
        let (_, font) = self.current_font()?;
        Ok(font.text_width_points(text, self.current_font_size) as f64)
    }

    /// Insert a single line of text
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X anchor in points
    /// * `y` - Baseline Y coordinate in points (from bottom)
    /// * `align` - How the text is placed relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        self.validate_page(page)?;

        let (font_name, font) = self.current_font()?;
        let font_name = font_name.to_string();

        if text.is_empty() {
            return Ok(());
        }

        let text_width = font.text_width_points(text, self.current_font_size) as f64;
        let text_hex = font.encode_text_hex(text);

        if let Some(font) = self.fonts.get_mut(&font_name) {
            font.add_chars(text);
        }

        let font_resource_name = self.get_or_create_font_ref(&font_name, page);

        let ctx = TextRenderContext {
            font_name: font_resource_name,
            font_size: self.current_font_size,
            text_width,
            color: self.current_text_color,
        };
        let operators = generate_text_operators(&text_hex, x, y, align, &ctx);
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Stroke a rectangle outline with the current stroke color and width
    ///
    /// (`x`, `y`) is the lower-left corner.
    pub fn draw_rect(&mut self, page: usize, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        self.validate_page(page)?;

        let operators = generate_rect_operators(
            x,
            y,
            width,
            height,
            self.current_stroke_color,
            self.current_line_width,
        );
        self.buffer_content(page, &operators);

        Ok(())
    }

    /// Wrap text to `max_width` using the current font's metrics
    pub fn wrap_text(&self, text: &str, max_width: f64) -> Result<Vec<String>> {
        let (_, font) = self.current_font()?;
        let size = self.current_font_size;
        Ok(wrap_text(text, max_width, |s| {
            font.text_width_points(s, size) as f64
        }))
    }

    /// Draw wrapped text centered inside a box
    ///
    /// The text is wrapped to the box width minus `margin` on each side.
    /// Every line is centered horizontally and the block of lines is
    /// centered vertically. `leading` defaults to 1.1 times the font size.
    ///
    /// # Returns
    /// Number of lines drawn
    #[allow(clippy::too_many_arguments)]
    pub fn draw_centered_text(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: &str,
        margin: f64,
        leading: Option<f64>,
    ) -> Result<usize> {
        self.validate_page(page)?;

        let lines = self.wrap_text(text, width - 2.0 * margin)?;
        if lines.is_empty() {
            return Ok(0);
        }

        let leading =
            leading.unwrap_or(self.current_font_size as f64 * DEFAULT_LEADING_FACTOR);
        let widths = lines
            .iter()
            .map(|line| self.get_text_width(line))
            .collect::<Result<Vec<_>>>()?;

        let origins = layout_centered_lines(&widths, x, y, width, height, leading);
        for (line, (line_x, line_y)) in lines.iter().zip(origins) {
            self.insert_text(line, page, line_x, line_y, Align::Left)?;
        }

        Ok(lines.len())
    }

    /// Save the document to a file
    ///
    /// # Arguments
    /// * `path` - Output file path
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;

        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Write buffered content, fonts and the page tree into the lopdf document
    fn finalize(&mut self) -> Result<()> {
        if self.finalized {
            return Ok(());
        }

        // 1. Flush buffered content streams to pages
        self.flush_content_buffers()?;

        // 2. Embed fonts and reference them from page resources
        self.embed_fonts()?;

        // 3. Write the page tree root
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        let count = kids.len() as i64;
        self.inner.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        self.finalized = true;
        Ok(())
    }

    /// Get or create a font resource name for a specific page
    ///
    /// Returns the resource name (e.g., "F1", "F2") for use in content streams
    fn get_or_create_font_ref(&mut self, font_name: &str, page: usize) -> String {
        let page_resources = self.page_font_resources.entry(page).or_default();

        if let Some(resource_name) = page_resources.get(font_name) {
            return resource_name.clone();
        }

        let resource_name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;
        page_resources.insert(font_name.to_string(), resource_name.clone());

        resource_name
    }

    /// Buffer content operators for a page (written at save time)
    fn buffer_content(&mut self, page: usize, content: &[u8]) {
        self.page_content_buffer
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Write one compressed content stream per page
    ///
    /// Pages without buffered content get an empty stream.
    fn flush_content_buffers(&mut self) -> Result<()> {
        let mut buffers = std::mem::take(&mut self.page_content_buffer);

        for (index, page_id) in self.page_ids.clone().into_iter().enumerate() {
            let content = buffers.remove(&(index + 1)).unwrap_or_default();
            let stream = Stream::new(
                dictionary! { "Filter" => "FlateDecode" },
                compress(&content)?,
            );
            let stream_id = self.inner.add_object(stream);

            self.update_page_dict(page_id, |page_dict| {
                page_dict.set("Contents", Object::Reference(stream_id));
            })?;
        }

        Ok(())
    }

    /// Embed every font referenced by a page and add the references to
    /// the pages' Resources dictionaries
    fn embed_fonts(&mut self) -> Result<()> {
        let font_names: BTreeSet<String> = self
            .page_font_resources
            .values()
            .flat_map(|fonts| fonts.keys().cloned())
            .collect();

        for font_name in font_names {
            self.embed_font_object(&font_name)?;
        }

        let page_resources: Vec<(usize, BTreeMap<String, String>)> = self
            .page_font_resources
            .iter()
            .map(|(&page, fonts)| (page, fonts.clone()))
            .collect();

        for (page, fonts) in page_resources {
            self.add_fonts_to_page_resources(page, &fonts)?;
        }

        Ok(())
    }

    /// Add a single font's objects to the PDF
    fn embed_font_object(&mut self, font_name: &str) -> Result<ObjectId> {
        let font = self
            .fonts
            .get(font_name)
            .ok_or_else(|| PdfError::FontNotFound(font_name.to_string()))?;

        let font_id = match font {
            Font::Standard(standard) => self.inner.add_object(standard.to_pdf_dictionary()),
            Font::Embedded(font_data) => {
                let font_objects = font_data.to_pdf_objects();

                let font_file_id = self.inner.add_object(font_objects.font_file_stream);

                let mut font_descriptor = font_objects.font_descriptor;
                font_descriptor.set("FontFile2", Object::Reference(font_file_id));
                let font_descriptor_id = self.inner.add_object(font_descriptor);

                let mut cid_font = font_objects.cid_font;
                cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
                let cid_font_id = self.inner.add_object(cid_font);

                let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);

                let mut type0_font = font_objects.type0_font;
                type0_font.set(
                    "DescendantFonts",
                    Object::Array(vec![Object::Reference(cid_font_id)]),
                );
                type0_font.set("ToUnicode", Object::Reference(tounicode_id));

                self.inner.add_object(type0_font)
            }
        };

        self.embedded_fonts.insert(font_name.to_string(), font_id);

        Ok(font_id)
    }

    /// Add font references to a page's Resources dictionary
    fn add_fonts_to_page_resources(
        &mut self,
        page: usize,
        fonts: &BTreeMap<String, String>,
    ) -> Result<()> {
        let page_id = *self
            .page_ids
            .get(page.wrapping_sub(1))
            .ok_or(PdfError::InvalidPage(page, self.page_ids.len()))?;

        let mut font_dict = Dictionary::new();
        for (font_name, resource_name) in fonts {
            let font_ref = self
                .embedded_fonts
                .get(font_name)
                .ok_or_else(|| PdfError::FontNotFound(font_name.to_string()))?;
            font_dict.set(resource_name.as_bytes(), Object::Reference(*font_ref));
        }

        self.update_page_dict(page_id, |page_dict| {
            let mut resources = match page_dict.get(b"Resources") {
                Ok(Object::Dictionary(dict)) => dict.clone(),
                _ => Dictionary::new(),
            };
            resources.set("Font", Object::Dictionary(font_dict));
            page_dict.set("Resources", Object::Dictionary(resources));
        })
    }

    /// Replace a page dictionary with an edited copy
    fn update_page_dict<F>(&mut self, page_id: ObjectId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Dictionary),
    {
        let mut page_dict = self.inner.get_object(page_id)?.as_dict()?.clone();
        edit(&mut page_dict);
        self.inner
            .objects
            .insert(page_id, Object::Dictionary(page_dict));
        Ok(())
    }
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Compress a content stream with FlateDecode (zlib)
fn compress(content: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content)?;
    Ok(encoder.finish()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#FF0000"), Some(Color::red()));
        assert_eq!(Color::from_hex("0000ff"), Some(Color::blue()));
        assert_eq!(Color::from_hex(" #000000 "), Some(Color::black()));
        assert_eq!(
            Color::from_hex("#007AFF"),
            Some(Color::from_rgb(0x00, 0x7A, 0xFF))
        );
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#FFF"), None);
        assert_eq!(Color::from_hex("#GGGGGG"), None);
        assert_eq!(Color::from_hex("#FF00001"), None);
        assert_eq!(Color::from_hex("+12345"), None);
    }

    #[test]
    fn test_add_page_numbers() {
        let mut doc = PdfDocument::new();
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.add_page(Size::A4).unwrap(), 1);
        assert_eq!(doc.add_page(Size::A4).unwrap(), 2);
        assert_eq!(doc.page_count(), 2);
    }

    #[test]
    fn test_add_page_invalid_size() {
        let mut doc = PdfDocument::new();
        let result = doc.add_page(Size::new(0.0, 100.0));
        assert!(matches!(result, Err(PdfError::InvalidPageSize(_, _))));
    }

    #[test]
    fn test_standard_font_is_available() {
        let mut doc = PdfDocument::new();
        assert!(doc.has_font("Courier"));
        doc.set_font("Courier", 10.0).unwrap();
        assert!((doc.get_text_width("abc").unwrap() - 18.0).abs() < 1e-4);
    }

    #[test]
    fn test_add_font_rejects_standard_name() {
        let mut doc = PdfDocument::new();
        let result = doc.add_font("Helvetica", &[0u8; 16]);
        assert!(matches!(result, Err(PdfError::FontAlreadyExists(_))));
    }

    #[test]
    fn test_font_ref_reused_per_page() {
        let mut doc = PdfDocument::new();
        doc.add_page(Size::A4).unwrap();
        doc.add_page(Size::A4).unwrap();

        let first = doc.get_or_create_font_ref("Helvetica", 1);
        assert_eq!(first, "F1");
        assert_eq!(doc.get_or_create_font_ref("Helvetica", 1), "F1");
        assert_eq!(doc.get_or_create_font_ref("Courier", 1), "F2");
        assert_eq!(doc.get_or_create_font_ref("Helvetica", 2), "F3");
    }

    #[test]
    fn test_finalize_is_idempotent() {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(Size::A4).unwrap();
        doc.set_font("Helvetica", 12.0).unwrap();
        doc.insert_text("Hi", page, 10.0, 10.0, Align::Left).unwrap();

        let first = doc.to_bytes().unwrap();
        assert!(doc.finalized);
        assert!(doc.page_content_buffer.is_empty());
        let object_count = doc.inner.objects.len();

        // Saving again re-serializes but must not re-embed fonts or content
        let second = doc.to_bytes().unwrap();
        assert_eq!(doc.page_count(), 1);

        let reload = |bytes: &[u8]| {
            let loaded = Document::load_mem(bytes).unwrap();
            let pages = loaded.get_pages();
            let contents: Vec<Vec<u8>> = pages
                .values()
                .map(|&id| loaded.get_page_content(id).unwrap())
                .collect();
            contents
        };
        let first_contents = reload(&first);
        let second_contents = reload(&second);
        assert_eq!(first_contents.len(), 1);
        assert_eq!(first_contents, second_contents);
        assert!(String::from_utf8_lossy(&second_contents[0]).contains("<4869> Tj"));

        // lopdf may append a cross-reference stream, but no page objects
        assert!(doc.inner.objects.len() <= object_count + 1);
    }
}
