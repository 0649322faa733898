/// Application configuration
///
/// Read from a JSON file in the user's config directory:
/// - Linux: ~/.config/gallery-admin/config.json
/// - macOS: ~/Library/Application Support/gallery-admin/config.json
/// - Windows: %APPDATA%\gallery-admin\config.json
///
/// A missing or unreadable file falls back to defaults; on first launch a
/// default file is written so there is something to edit. Authentication
/// itself is out of scope here: the optional token is produced elsewhere
/// and only ever forwarded as a bearer header.
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::view::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Base URL of the gallery REST backend
    pub base_url: String,
    /// Optional bearer token attached to every request
    pub auth_token: Option<String>,
    /// Items per page in the gallery grid
    pub page_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000/api".to_string(),
            auth_token: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Path of the config file inside the user's config directory.
pub fn config_path() -> PathBuf {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push("gallery-admin");
    path.push("config.json");
    path
}

/// Load the configuration, falling back to defaults when the file is
/// missing or malformed. A missing file is written back with defaults so
/// the user has a template to edit; failures to do so are only logged.
pub fn load() -> AppConfig {
    let path = config_path();
    match fs::read_to_string(&path) {
        Ok(raw) => match serde_json::from_str::<AppConfig>(&raw) {
            Ok(mut config) => {
                if config.page_size == 0 {
                    warn!("pageSize 0 in {} ignored, using default", path.display());
                    config.page_size = DEFAULT_PAGE_SIZE;
                }
                config
            }
            Err(error) => {
                warn!("invalid config {}: {error}", path.display());
                AppConfig::default()
            }
        },
        Err(_) => {
            let config = AppConfig::default();
            if let Err(error) = save(&config) {
                warn!("could not write default config: {error}");
            }
            config
        }
    }
}

/// Persist the configuration, creating the parent directory if needed.
pub fn save(config: &AppConfig) -> io::Result<()> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(config)?;
    fs::write(path, raw)
}
