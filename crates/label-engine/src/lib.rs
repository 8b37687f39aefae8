//! QR label rendering for admission numbers.
//!
//! Turns an admission number into a print-ready PNG: QR symbol generation,
//! millimeter-to-pixel size resolution, resampling, and (for thermal labels)
//! caption compositing with a font-fit search.

pub mod encode;
pub mod font;
pub mod label;
pub mod qr;
pub mod scale;
pub mod size;
pub mod text;

// Re-exports for convenience
pub use encode::{encode_png, to_data_uri};
pub use label::{CAPTION_PREFIX, RenderedLabel, render_plain, render_thermal};
pub use scale::Resample;
pub use size::{LabelPreset, MAX_SIDE_PX, PRINT_DPI, THERMAL_DPI, mm_to_px, resolve_mm, resolve_preset};

/// Errors produced while rendering a label.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    /// Caller-supplied input was rejected; maps to an HTTP 400.
    #[error("{0}")]
    InvalidInput(String),
    #[error("QR encode error: {0}")]
    Qr(#[from] qrcode::types::QrError),
    #[error("font error: {0}")]
    Font(String),
    #[error("image encode error: {0}")]
    Encode(String),
}

impl LabelError {
    /// Whether this error is the caller's fault (400) rather than ours (500).
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
