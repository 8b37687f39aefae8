//! Caption measurement, font-fit search, and drawing.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{GrayImage, Luma};
use imageproc::drawing::draw_text_mut;

/// Smallest caption size the fit search will accept.
pub const MIN_FONT_SIZE: f32 = 12.0;

const BLACK: Luma<u8> = Luma([0u8]);

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width(font: &FontRef<'_>, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil() as u32
}

/// Vertical extent of a single text line at the given scale.
pub fn text_height(font: &FontRef<'_>, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent()).ceil() as u32
}

/// Find the largest font size (starting at `max_size`) whose rendered width
/// fits in `max_width` pixels.
///
/// Linear search, one point per step; bottoms out at [`MIN_FONT_SIZE`] and
/// accepts an oversized caption there rather than failing. The string is a
/// short admission number, so the walk is a handful of iterations at most.
pub fn fit_font_size(font: &FontRef<'_>, text: &str, max_size: f32, max_width: u32) -> f32 {
    let mut size = max_size;
    while measure_text_width(font, PxScale::from(size), text) > max_width
        && size > MIN_FONT_SIZE
    {
        size -= 1.0;
    }
    size
}

/// Draw black text at the given position.
pub fn draw_text(img: &mut GrayImage, font: &FontRef<'_>, scale: PxScale, x: i32, y: i32, text: &str) {
    draw_text_mut(img, BLACK, x, y, scale, font, text);
}
