//! Label rendering: plain scaled QR codes and composed thermal labels.

use ab_glyph::{FontRef, PxScale};
use image::{GrayImage, Luma};
use qrcode::EcLevel;
use tracing::debug;

use crate::scale::{Resample, scale_exact};
use crate::size::{self, PRINT_DPI, THERMAL_DPI};
use crate::text::{draw_text, fit_font_size, measure_text_width, text_height};
use crate::{LabelError, qr};

/// Facility/batch tag prepended to every thermal label caption.
pub const CAPTION_PREFIX: &str = "WCN26F-";

/// Breathing room between the QR symbol and the canvas edges.
const CANVAS_MARGIN: u32 = 8;

/// Horizontal gap between the QR symbol and the caption area (wide layout).
const TEXT_GUTTER: u32 = 8;

/// Starting caption size for the side-by-side layout.
const WIDE_MAX_FONT: f32 = 44.0;

/// Starting caption size for the stacked layout.
const TALL_MAX_FONT: f32 = 32.0;

/// A finished label image plus the metadata the caller reports back.
#[derive(Debug, Clone)]
pub struct RenderedLabel {
    pub image: GrayImage,
    pub width_px: u32,
    pub height_px: u32,
    pub dpi: u32,
    /// Caption drawn on the label, when the variant draws one.
    pub label_text: Option<String>,
}

/// General mode: a square QR code scaled smoothly to `size_mm` at 300 DPI.
pub fn render_plain(identifier: &str, size_mm: f64) -> Result<RenderedLabel, LabelError> {
    let id = normalize_identifier(identifier)?;
    let px = size::resolve_mm(size_mm, PRINT_DPI)?;

    let symbol = qr::render_qr(&id, EcLevel::H)?;
    let image = scale_exact(&symbol, px, px, Resample::Smooth);

    debug!(identifier = %id, size_mm, px, "Plain QR label rendered");
    Ok(RenderedLabel {
        image,
        width_px: px,
        height_px: px,
        dpi: PRINT_DPI,
        label_text: None,
    })
}

/// Thermal mode: QR plus caption composed onto a preset-sized label at 203 DPI.
pub fn render_thermal(
    identifier: &str,
    preset_key: &str,
    font: &FontRef<'_>,
) -> Result<RenderedLabel, LabelError> {
    let id = normalize_identifier(identifier)?;
    let preset = size::resolve_preset(preset_key)?;
    let (width, height) = preset.px_size(THERMAL_DPI);
    let caption = format!("{CAPTION_PREFIX}{id}");

    let symbol = qr::render_qr(&id, EcLevel::M)?;
    let mut canvas = GrayImage::from_pixel(width, height, Luma([255u8]));

    // Side-by-side only pays off when the label is clearly wider than tall;
    // 60x40 qualifies, 40x30 gets the stacked layout.
    if width * 2 >= height * 3 {
        compose_wide(&mut canvas, &symbol, &caption, font);
    } else {
        compose_tall(&mut canvas, &symbol, &caption, font);
    }

    debug!(identifier = %id, preset = preset.key, width, height, "Thermal label rendered");
    Ok(RenderedLabel {
        image: canvas,
        width_px: width,
        height_px: height,
        dpi: THERMAL_DPI,
        label_text: Some(caption),
    })
}

/// QR flush left, vertically centered; caption centered in the leftover width.
fn compose_wide(canvas: &mut GrayImage, symbol: &GrayImage, caption: &str, font: &FontRef<'_>) {
    let (width, height) = canvas.dimensions();
    let qr_side = height.saturating_sub(CANVAS_MARGIN * 2).max(1);
    let qr = scale_exact(symbol, qr_side, qr_side, Resample::Crisp);
    let qr_y = (height - qr_side) / 2;
    overlay(canvas, &qr, CANVAS_MARGIN, qr_y);

    let text_x0 = CANVAS_MARGIN + qr_side + TEXT_GUTTER;
    let avail = width.saturating_sub(text_x0 + CANVAS_MARGIN);
    let font_size = fit_font_size(font, caption, WIDE_MAX_FONT, avail);
    let scale = PxScale::from(font_size);

    let tw = measure_text_width(font, scale, caption);
    let th = text_height(font, scale);
    let tx = text_x0 + avail.saturating_sub(tw) / 2;
    let ty = height.saturating_sub(th) / 2;
    draw_text(canvas, font, scale, tx as i32, ty as i32, caption);
}

/// Caption reserved at the bottom; QR centered in the space above it.
fn compose_tall(canvas: &mut GrayImage, symbol: &GrayImage, caption: &str, font: &FontRef<'_>) {
    let (width, height) = canvas.dimensions();
    let avail_text = width.saturating_sub(CANVAS_MARGIN * 2);
    let font_size = fit_font_size(font, caption, TALL_MAX_FONT, avail_text);
    let scale = PxScale::from(font_size);
    let th = text_height(font, scale);

    // Top margin, gap above the caption, bottom margin.
    let qr_max = height.saturating_sub(th + CANVAS_MARGIN * 3);
    let qr_side = qr_max.min(avail_text).max(1);
    let qr = scale_exact(symbol, qr_side, qr_side, Resample::Crisp);
    let qr_x = (width - qr_side) / 2;
    overlay(canvas, &qr, qr_x, CANVAS_MARGIN);

    let tw = measure_text_width(font, scale, caption);
    let tx = width.saturating_sub(tw) / 2;
    let ty = CANVAS_MARGIN + qr_side + CANVAS_MARGIN;
    draw_text(canvas, font, scale, tx as i32, ty as i32, caption);
}

/// Copy `top` onto `base` at the given offset, clipping at canvas bounds.
fn overlay(base: &mut GrayImage, top: &GrayImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let tx = x + dx;
        let ty = y + dy;
        if tx < base.width() && ty < base.height() {
            base.put_pixel(tx, ty, *pixel);
        }
    }
}

fn normalize_identifier(identifier: &str) -> Result<String, LabelError> {
    let trimmed = identifier.trim();
    if trimmed.is_empty() {
        return Err(LabelError::InvalidInput(
            "Admission number is required".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font;

    fn test_font_data() -> Option<Vec<u8>> {
        font::load_font_data(None).ok()
    }

    #[test]
    fn plain_label_30mm_is_354px_square() {
        let label = render_plain("A123", 30.0).unwrap();
        assert_eq!((label.width_px, label.height_px), (354, 354));
        assert_eq!(label.image.dimensions(), (354, 354));
        assert_eq!(label.dpi, 300);
        assert!(label.label_text.is_none());
    }

    #[test]
    fn plain_label_trims_identifier() {
        let label = render_plain("  A123  ", 30.0).unwrap();
        assert_eq!(label.image.dimensions(), (354, 354));
    }

    #[test]
    fn plain_label_rejects_whitespace_identifier() {
        let err = render_plain("   ", 30.0).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("Admission number is required"));
    }

    #[test]
    fn plain_label_rejects_non_positive_size() {
        assert!(render_plain("A123", 0.0).unwrap_err().is_invalid_input());
        assert!(render_plain("A123", -3.0).unwrap_err().is_invalid_input());
    }

    #[test]
    fn plain_label_rejects_absurd_size_instead_of_allocating() {
        let err = render_plain("A1", 100_000.0).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn thermal_60x40_matches_preset_dimensions() {
        let Some(data) = test_font_data() else { return };
        let f = font::parse_font(&data).unwrap();
        let label = render_thermal("A123", "60x40", &f).unwrap();
        assert_eq!((label.width_px, label.height_px), (480, 320));
        assert_eq!(label.image.dimensions(), (480, 320));
        assert_eq!(label.dpi, 203);
        assert_eq!(label.label_text.as_deref(), Some("WCN26F-A123"));
    }

    #[test]
    fn thermal_40x30_uses_stacked_layout_dimensions() {
        let Some(data) = test_font_data() else { return };
        let f = font::parse_font(&data).unwrap();
        let label = render_thermal("A123", "40x30", &f).unwrap();
        assert_eq!(label.image.dimensions(), (320, 240));
    }

    #[test]
    fn thermal_wide_layout_keeps_left_margin_clear() {
        let Some(data) = test_font_data() else { return };
        let f = font::parse_font(&data).unwrap();
        let label = render_thermal("A123", "60x40", &f).unwrap();
        for y in 0..label.image.height() {
            for x in 0..CANVAS_MARGIN {
                assert_eq!(label.image.get_pixel(x, y)[0], 255);
            }
        }
    }

    #[test]
    fn thermal_wide_caption_stays_out_of_qr_region() {
        let Some(data) = test_font_data() else { return };
        let f = font::parse_font(&data).unwrap();
        let label = render_thermal("A123", "60x40", &f).unwrap();
        let qr_side = label.image.height() - CANVAS_MARGIN * 2;
        let gutter_x = CANVAS_MARGIN + qr_side;
        // The gutter column between QR and caption must stay white.
        for y in 0..label.image.height() {
            assert_eq!(label.image.get_pixel(gutter_x + 1, y)[0], 255);
        }
        // And something was actually drawn in the caption area.
        let mut dark = 0;
        for y in 0..label.image.height() {
            for x in gutter_x + TEXT_GUTTER..label.image.width() {
                if label.image.get_pixel(x, y)[0] < 128 {
                    dark += 1;
                }
            }
        }
        assert!(dark > 0, "caption region should contain dark pixels");
    }

    #[test]
    fn thermal_unknown_preset_is_invalid_input() {
        let Some(data) = test_font_data() else { return };
        let f = font::parse_font(&data).unwrap();
        let err = render_thermal("A123", "99x99", &f).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
