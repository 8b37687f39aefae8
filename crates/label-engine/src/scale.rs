//! Resampling to exact label pixel dimensions.

use image::GrayImage;
use image::imageops::{self, FilterType};
use tracing::debug;

/// Resampling policy for scaling a rendered symbol to print size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resample {
    /// Lanczos3 interpolation; smooth edges for general display/print.
    Smooth,
    /// Nearest-neighbor; keeps module edges crisp for low-DPI thermal output.
    Crisp,
}

impl Resample {
    fn filter(self) -> FilterType {
        match self {
            Self::Smooth => FilterType::Lanczos3,
            Self::Crisp => FilterType::Nearest,
        }
    }
}

/// Resample `img` to exactly `width` x `height` pixels.
pub fn scale_exact(img: &GrayImage, width: u32, height: u32, policy: Resample) -> GrayImage {
    if img.width() == width && img.height() == height {
        debug!(width, height, "Image already at target size, skipping resample");
        return img.clone();
    }

    debug!(
        orig_w = img.width(),
        orig_h = img.height(),
        width,
        height,
        ?policy,
        "Resampling image to target size"
    );
    imageops::resize(img, width, height, policy.filter())
}
