//! Server configuration from environment variables.

use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3002;

/// Read-only process configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Explicit caption font; system fonts are tried when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            font_path: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment (`QR_GEN_PORT`, `QR_GEN_FONT`).
    pub fn load() -> Self {
        let port = std::env::var("QR_GEN_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let font_path = std::env::var("QR_GEN_FONT")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self { port, font_path }
    }
}
