//! User settings stored as settings.json in the app data directory

use crate::constants::{DATA_SOURCE_ENV, DEFAULT_DATA_SOURCE, DEFAULT_IMAGE_CONCURRENCY};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Data
    pub data_source: Option<String>,
    pub image_concurrency: usize,

    // View
    pub large_cards: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            data_source: None,
            image_concurrency: DEFAULT_IMAGE_CONCURRENCY,
            large_cards: true,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    /// Data source to load: environment override, then settings, then default.
    pub fn resolved_data_source(&self) -> String {
        Self::pick_data_source(std::env::var(DATA_SOURCE_ENV).ok(), self.data_source.as_deref())
    }

    fn pick_data_source(env: Option<String>, configured: Option<&str>) -> String {
        env.filter(|s| !s.trim().is_empty())
            .or_else(|| configured.map(str::to_owned))
            .unwrap_or_else(|| DEFAULT_DATA_SOURCE.to_owned())
    }

    pub fn image_concurrency_or_default(&self) -> usize {
        if self.image_concurrency == 0 {
            DEFAULT_IMAGE_CONCURRENCY
        } else {
            self.image_concurrency
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"large_cards": false}"#).unwrap();
        assert!(!settings.large_cards);
        assert_eq!(settings.image_concurrency, DEFAULT_IMAGE_CONCURRENCY);
        assert_eq!(settings.data_source, None);
    }

    #[test]
    fn test_data_source_precedence() {
        assert_eq!(Settings::pick_data_source(None, None), DEFAULT_DATA_SOURCE);
        assert_eq!(Settings::pick_data_source(None, Some("cards.json")), "cards.json");
        assert_eq!(
            Settings::pick_data_source(Some("https://x/data.json".into()), Some("cards.json")),
            "https://x/data.json"
        );
        assert_eq!(Settings::pick_data_source(Some("  ".into()), Some("cards.json")), "cards.json");
    }

    #[test]
    fn test_zero_concurrency_falls_back() {
        let settings = Settings { image_concurrency: 0, ..Settings::default() };
        assert_eq!(settings.image_concurrency_or_default(), DEFAULT_IMAGE_CONCURRENCY);
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("card-gallery-settings-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let settings = Settings {
            window_w: Some(1024.0),
            data_source: Some("cards.json".into()),
            ..Settings::default()
        };
        settings.save(&dir);
        assert_eq!(Settings::load(&dir), settings);

        std::fs::remove_dir_all(&dir).ok();
    }
}
