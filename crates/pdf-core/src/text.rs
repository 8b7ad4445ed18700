//! Text and path rendering utilities

use crate::document::Color;
use crate::Align;

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Calculate X offset for text alignment
///
/// # Arguments
/// * `text_width` - Width of text in points
/// * `container_width` - Available width for alignment
/// * `align` - Desired alignment
pub fn calculate_x_offset(text_width: f64, container_width: f64, align: Align) -> f64 {
    match align {
        Align::Left => 0.0,
        Align::Center => (container_width - text_width) / 2.0,
        Align::Right => container_width - text_width,
    }
}

/// Generate PDF operators for text insertion
///
/// Creates the PDF text operators (BT, rg, Tf, Td, Tj, ET) to render text
/// anchored at `x` according to `align`.
///
/// # Arguments
/// * `text_hex` - Hex-encoded text (e.g., "<48656C6C6F>")
/// * `x` - X coordinate in points (from left)
/// * `y` - Baseline Y coordinate in points (from bottom)
/// * `align` - Text alignment
/// * `ctx` - Text rendering context
pub fn generate_text_operators(
    text_hex: &str,
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let mut ops = String::new();

    let final_x = match align {
        Align::Left => x,
        Align::Center => x - ctx.text_width / 2.0,
        Align::Right => x - ctx.text_width,
    };

    ops.push_str("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        ctx.color.r, ctx.color.g, ctx.color.b
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{final_x} {y} Td\n"));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Generate PDF operators that stroke a rectangle outline
///
/// The rectangle's lower-left corner is at (`x`, `y`).
pub fn generate_rect_operators(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    color: Color,
    line_width: f64,
) -> Vec<u8> {
    let mut ops = String::new();

    ops.push_str("q\n");
    ops.push_str(&format!("{} {} {} RG\n", color.r, color.g, color.b));
    ops.push_str(&format!("{line_width} w\n"));
    ops.push_str(&format!("{x} {y} {width} {height} re\n"));
    ops.push_str("S\n");
    ops.push_str("Q\n");

    ops.into_bytes()
}

/// Split text into lines that fit `max_width`
///
/// Breaks at whitespace and at explicit newlines. A word wider than
/// `max_width` (or a run of text with no spaces, as in Japanese) is broken
/// between characters. Whitespace-only input yields no lines.
///
/// # Arguments
/// * `text` - Text to split
/// * `max_width` - Maximum line width in points
/// * `measure` - Width of a string in points
pub fn wrap_text<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if measure(word) <= max_width {
                current = word.to_string();
                continue;
            }

            for c in word.chars() {
                current.push(c);
                if current.chars().count() > 1 && measure(&current) > max_width {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(c);
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Compute baseline origins for a block of lines centered in a box
///
/// Each line is centered horizontally on its own; the block as a whole is
/// centered vertically. The first line is the topmost.
///
/// # Arguments
/// * `line_widths` - Width of each line in points
/// * `x`, `y` - Lower-left corner of the box
/// * `width`, `height` - Box size
/// * `leading` - Distance between consecutive baselines
pub fn layout_centered_lines(
    line_widths: &[f64],
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    leading: f64,
) -> Vec<(f64, f64)> {
    let count = line_widths.len() as f64;
    let block_height = leading * count;
    let start_y = y + (height - block_height) / 2.0 + (count - 1.0) * leading;

    line_widths
        .iter()
        .enumerate()
        .map(|(i, line_width)| {
            let line_x = x + calculate_x_offset(*line_width, width, Align::Center);
            (line_x, start_y - i as f64 * leading)
        })
        .collect()
}
