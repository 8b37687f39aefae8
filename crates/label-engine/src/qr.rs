//! QR symbol generation for label images.

use image::{GrayImage, Luma};
use qrcode::{EcLevel, QrCode};

use crate::LabelError;

/// Encode `data` into a QR symbol image, one pixel per module.
///
/// The symbol version is the smallest that fits the payload at the given
/// error-correction level. No quiet zone is added; callers place the symbol
/// on their own canvas with whatever margin the layout needs.
pub fn render_qr(data: &str, ec: EcLevel) -> Result<GrayImage, LabelError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), ec)?;
    let modules = code.to_colors();
    let side = code.width() as u32;

    let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));
    for (i, color) in modules.iter().enumerate() {
        if *color == qrcode::Color::Dark {
            let x = (i as u32) % side;
            let y = (i as u32) / side;
            img.put_pixel(x, y, Luma([0u8]));
        }
    }

    tracing::debug!(side, ?ec, "QR symbol rendered");
    Ok(img)
}
