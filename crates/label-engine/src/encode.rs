//! PNG serialization with print-resolution metadata, plus data-URI transport.

use base64::Engine as _;
use base64::engine::general_purpose;
use image::GrayImage;

use crate::LabelError;

const METERS_PER_INCH: f64 = 0.0254;

/// Dots-per-inch expressed as the PNG pHYs pixels-per-meter unit.
pub fn dpi_to_ppm(dpi: u32) -> u32 {
    (f64::from(dpi) / METERS_PER_INCH).round() as u32
}

/// Encode a grayscale label as PNG bytes tagged with `dpi` so downstream
/// print tooling scales the image to its physical size.
pub fn encode_png(img: &GrayImage, dpi: u32) -> Result<Vec<u8>, LabelError> {
    let mut bytes = Vec::new();
    let ppm = dpi_to_ppm(dpi);

    let mut encoder = png::Encoder::new(&mut bytes, img.width(), img.height());
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: png::Unit::Meter,
    }));

    let mut writer = encoder
        .write_header()
        .map_err(|e| LabelError::Encode(e.to_string()))?;
    writer
        .write_image_data(img.as_raw())
        .map_err(|e| LabelError::Encode(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| LabelError::Encode(e.to_string()))?;

    Ok(bytes)
}

/// Wrap PNG bytes as a `data:image/png;base64,…` URI for the JSON response.
pub fn to_data_uri(png_bytes: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(png_bytes)
    )
}
