//! Caption font loading with a filesystem fallback chain.

use std::path::Path;

use ab_glyph::FontRef;

use crate::LabelError;

/// Load raw font bytes: the explicit override first, then system candidates.
pub fn load_font_data(override_path: Option<&Path>) -> Result<Vec<u8>, LabelError> {
    if let Some(path) = override_path {
        match std::fs::read(path) {
            Ok(data) => return Ok(data),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Configured font not readable, trying system fonts");
            }
        }
    }

    for path in system_font_candidates() {
        if let Ok(data) = std::fs::read(path) {
            tracing::debug!(path = %path, "Using system font for label captions");
            return Ok(data);
        }
    }

    Err(LabelError::Font(
        "no usable caption font found (set a font path or install system fonts)".to_string(),
    ))
}

/// Parse TTF/OTF bytes into a usable font.
pub fn parse_font(data: &[u8]) -> Result<FontRef<'_>, LabelError> {
    FontRef::try_from_slice(data)
        .map_err(|_| LabelError::Font("failed to parse font data (TTF/OTF)".to_string()))
}

fn system_font_candidates() -> &'static [&'static str] {
    #[cfg(target_os = "macos")]
    {
        &[
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/System/Library/Fonts/Supplemental/Helvetica.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
        ]
    }
    #[cfg(target_os = "windows")]
    {
        &["C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\calibri.ttf"]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        ]
    }
}
