//! Integration tests for pdf-core
//!
//! Documents are built through the public API, serialized, and loaded back
//! with lopdf to check the structure that viewers will see.

use lopdf::{Document, Object};
use pdf_core::{Align, Color, PdfDocument, PdfError, Size};

/// Serialize and reload a document
fn reload(doc: &mut PdfDocument) -> Document {
    let bytes = doc.to_bytes().expect("serialize document");
    assert!(bytes.starts_with(b"%PDF-"));
    Document::load_mem(&bytes).expect("reload document")
}

/// Decompressed content stream of a 1-indexed page
fn page_content(doc: &Document, page: u32) -> String {
    let pages = doc.get_pages();
    let page_id = pages[&page];
    let content = doc.get_page_content(page_id).expect("page content");
    String::from_utf8_lossy(&content).into_owned()
}

#[test]
fn test_empty_pages_roundtrip() {
    let mut doc = PdfDocument::new();
    for _ in 0..3 {
        doc.add_page(Size::A4).unwrap();
    }

    let loaded = reload(&mut doc);
    assert_eq!(loaded.get_pages().len(), 3);
    assert_eq!(page_content(&loaded, 2), "");
}

#[test]
fn test_media_box_is_a4() {
    let mut doc = PdfDocument::new();
    doc.add_page(Size::A4).unwrap();

    let loaded = reload(&mut doc);
    let page_id = loaded.get_pages()[&1];
    let page = loaded.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();

    let height = match &media_box[3] {
        Object::Real(value) => *value as f64,
        Object::Integer(value) => *value as f64,
        other => panic!("unexpected MediaBox entry: {other:?}"),
    };
    assert!((height - Size::A4.height).abs() < 0.01);
}

#[test]
fn test_text_and_rect_in_content() {
    let mut doc = PdfDocument::new();
    let page = doc.add_page(Size::A4).unwrap();

    doc.set_stroke_color(Color::from_rgb(0, 122, 255));
    doc.draw_rect(page, 10.0, 20.0, 100.0, 50.0).unwrap();
    doc.set_font("Helvetica", 12.0).unwrap();
    doc.insert_text("Hello", page, 30.0, 40.0, Align::Left)
        .unwrap();

    let loaded = reload(&mut doc);
    let content = page_content(&loaded, 1);

    assert!(content.contains("10 20 100 50 re"));
    assert!(content.contains("<48656C6C6F> Tj"));
    assert!(content.contains("/F1 12 Tf"));
}

#[test]
fn test_standard_font_resource() {
    let mut doc = PdfDocument::new();
    let page = doc.add_page(Size::A4).unwrap();
    doc.set_font("Times-Roman", 10.0).unwrap();
    doc.insert_text("x", page, 0.0, 0.0, Align::Left).unwrap();

    let loaded = reload(&mut doc);
    let page_id = loaded.get_pages()[&1];
    let page = loaded.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
    let font_id = fonts.get(b"F1").unwrap().as_reference().unwrap();
    let font = loaded.get_dictionary(font_id).unwrap();

    assert_eq!(font.get(b"Subtype").unwrap().as_name().unwrap(), b"Type1");
    assert_eq!(
        font.get(b"BaseFont").unwrap().as_name().unwrap(),
        b"Times-Roman"
    );
}

#[test]
fn test_insert_text_invalid_page() {
    let mut doc = PdfDocument::new();
    doc.add_page(Size::A4).unwrap();
    doc.set_font("Helvetica", 12.0).unwrap();

    let result = doc.insert_text("Hi", 2, 0.0, 0.0, Align::Left);
    assert!(matches!(result, Err(PdfError::InvalidPage(2, 1))));

    let result = doc.draw_rect(0, 0.0, 0.0, 1.0, 1.0);
    assert!(matches!(result, Err(PdfError::InvalidPage(0, 1))));
}

#[test]
fn test_insert_text_without_font() {
    let mut doc = PdfDocument::new();
    let page = doc.add_page(Size::A4).unwrap();

    let result = doc.insert_text("Hi", page, 0.0, 0.0, Align::Left);
    assert!(matches!(result, Err(PdfError::FontNotFound(_))));
}

#[test]
fn test_unknown_font() {
    let mut doc = PdfDocument::new();
    let result = doc.set_font("Comic Sans", 12.0);
    assert!(matches!(result, Err(PdfError::FontNotFound(name)) if name == "Comic Sans"));
}

#[test]
fn test_invalid_ttf_rejected() {
    let mut doc = PdfDocument::new();
    let result = doc.add_font("Broken", b"not a font");
    assert!(matches!(result, Err(PdfError::FontParseError(_))));
    assert!(!doc.has_font("Broken"));
}

#[test]
fn test_centered_text_wraps() {
    let mut doc = PdfDocument::new();
    let page = doc.add_page(Size::A4).unwrap();
    doc.set_font("Courier", 10.0).unwrap();

    // Courier is 6 points per character at size 10; 40 points fits six
    let lines = doc
        .draw_centered_text(page, 0.0, 0.0, 46.0, 100.0, "abc defg", 3.0, None)
        .unwrap();
    assert_eq!(lines, 2);

    let loaded = reload(&mut doc);
    let content = page_content(&loaded, 1);
    assert!(content.contains("<616263> Tj"));
    assert!(content.contains("<64656667> Tj"));
}

#[test]
fn test_centered_text_empty_draws_nothing() {
    let mut doc = PdfDocument::new();
    let page = doc.add_page(Size::A4).unwrap();
    doc.set_font("Helvetica", 12.0).unwrap();

    let lines = doc
        .draw_centered_text(page, 0.0, 0.0, 100.0, 100.0, "  ", 3.0, None)
        .unwrap();
    assert_eq!(lines, 0);

    let loaded = reload(&mut doc);
    assert!(!page_content(&loaded, 1).contains("Tj"));
}

#[test]
fn test_save_to_file() {
    let dir = std::env::temp_dir().join(format!("pdf-core-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("out.pdf");

    let mut doc = PdfDocument::new();
    doc.add_page(Size::A4).unwrap();
    doc.save(&path).unwrap();

    let loaded = Document::load(&path).unwrap();
    assert_eq!(loaded.get_pages().len(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}
