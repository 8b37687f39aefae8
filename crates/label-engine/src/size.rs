//! Physical label sizes and millimeter-to-pixel resolution.

use crate::LabelError;

/// Print resolution for the general (display/print) mode.
pub const PRINT_DPI: u32 = 300;

/// Print resolution of the supported thermal label printer.
pub const THERMAL_DPI: u32 = 203;

const MM_PER_INCH: f64 = 25.4;

/// Largest label side we will render. A 300 DPI request above this would
/// ask `imageops::resize` for a multi-gigabyte canvas.
pub const MAX_SIDE_PX: u32 = 10_000;

/// A named thermal label size supported by the printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPreset {
    pub key: &'static str,
    pub width_mm: u32,
    pub height_mm: u32,
}

/// The label sizes the thermal printer takes. Fixed at compile time.
pub const LABEL_PRESETS: &[LabelPreset] = &[
    LabelPreset {
        key: "60x40",
        width_mm: 60,
        height_mm: 40,
    },
    LabelPreset {
        key: "40x30",
        width_mm: 40,
        height_mm: 30,
    },
];

impl LabelPreset {
    /// Pixel dimensions of this label at the given print resolution.
    pub fn px_size(&self, dpi: u32) -> (u32, u32) {
        (
            mm_to_px(f64::from(self.width_mm), dpi),
            mm_to_px(f64::from(self.height_mm), dpi),
        )
    }
}

/// Convert a physical length in millimeters to pixels at `dpi`.
pub fn mm_to_px(mm: f64, dpi: u32) -> u32 {
    (mm / MM_PER_INCH * f64::from(dpi)).round() as u32
}

/// Look up a label preset by its request key (e.g. `"60x40"`).
pub fn resolve_preset(key: &str) -> Result<&'static LabelPreset, LabelError> {
    LABEL_PRESETS
        .iter()
        .find(|p| p.key == key)
        .ok_or_else(|| {
            let supported = LABEL_PRESETS
                .iter()
                .map(|p| p.key)
                .collect::<Vec<_>>()
                .join(", ");
            LabelError::InvalidInput(format!(
                "Unknown label size '{key}' (supported: {supported})"
            ))
        })
}

/// Validate a free-form millimeter size from the request.
pub fn validate_mm(mm: f64) -> Result<f64, LabelError> {
    if mm.is_finite() && mm > 0.0 {
        Ok(mm)
    } else {
        Err(LabelError::InvalidInput(format!(
            "Size must be a positive number of millimeters, got {mm}"
        )))
    }
}

/// Resolve a free-form millimeter size to a pixel side length at `dpi`,
/// rejecting sizes that round to nothing or exceed [`MAX_SIDE_PX`].
pub fn resolve_mm(mm: f64, dpi: u32) -> Result<u32, LabelError> {
    let mm = validate_mm(mm)?;
    let px = mm_to_px(mm, dpi);
    if px == 0 {
        return Err(LabelError::InvalidInput(format!(
            "Size {mm}mm is too small to render at {dpi} DPI"
        )));
    }
    if px > MAX_SIDE_PX {
        return Err(LabelError::InvalidInput(format!(
            "Size {mm}mm is too large to render (max {MAX_SIDE_PX} px per side at {dpi} DPI)"
        )));
    }
    Ok(px)
}
