//! PDF Core - Low-level PDF construction
//!
//! This crate provides functionality for:
//! - Building PDF documents page by page from scratch
//! - Using the 14 standard PDF fonts without embedding
//! - Embedding TrueType fonts for scripts the standard fonts cannot show
//! - Stroking rectangles and drawing text at specific coordinates
//! - Wrapping and centering text inside a box
//!
//! All coordinates are PDF user space: points, origin at the bottom-left
//! corner of the page.
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, Color, PdfDocument, Size};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_page(Size::A4)?;
//! doc.set_font("Helvetica", 12.0)?;
//! doc.set_stroke_color(Color::red());
//! doc.draw_rect(page, 100.0, 100.0, 200.0, 50.0)?;
//! doc.insert_text("Hello, World!", page, 200.0, 120.0, Align::Center)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod standard;
mod text;
mod units;

pub use document::{Color, PdfDocument, DEFAULT_LEADING_FACTOR};
pub use font::{Font, FontData, FontObjects};
pub use standard::StandardFont;
pub use text::{
    generate_rect_operators, generate_text_operators, layout_centered_lines, wrap_text,
    TextRenderContext,
};
pub use units::{mm_to_pt, pt_to_mm, Size, POINTS_PER_MM};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Invalid page size: {0} x {1}")]
    InvalidPageSize(f64, f64),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
