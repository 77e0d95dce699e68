//! Utility functions

use crate::constants::APP_NAME;
use std::path::{Path, PathBuf};

/// Get the app data directory (settings, logs)
pub fn get_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// True for sources fetched over HTTP rather than read from disk
pub fn is_remote(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve an image reference from data.json against the data source.
///
/// Absolute URLs and absolute paths pass through. Relative references are
/// joined onto the data source's directory (or URL prefix).
pub fn resolve_image_source(data_source: &str, image: &str) -> String {
    if is_remote(image) || Path::new(image).is_absolute() {
        return image.to_string();
    }

    if is_remote(data_source) {
        let image = image.trim_start_matches("./");
        let host_start = data_source.find("://").map_or(0, |i| i + 3);
        return match data_source.rfind('/') {
            Some(idx) if idx >= host_start => format!("{}/{}", &data_source[..idx], image),
            _ => format!("{}/{}", data_source.trim_end_matches('/'), image),
        };
    }

    match Path::new(data_source).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(image).to_string_lossy().to_string(),
        _ => image.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/data.json"));
        assert!(is_remote("HTTP://example.com/data.json"));
        assert!(!is_remote("data.json"));
        assert!(!is_remote("/srv/gallery/data.json"));
    }

    #[test]
    fn test_absolute_images_pass_through() {
        assert_eq!(
            resolve_image_source("gallery/data.json", "https://cdn.example/cat.png"),
            "https://cdn.example/cat.png"
        );
    }

    #[test]
    fn test_relative_image_next_to_data_file() {
        let resolved = resolve_image_source("gallery/data.json", "cat.png");
        assert_eq!(PathBuf::from(resolved), Path::new("gallery").join("cat.png"));
        assert_eq!(resolve_image_source("data.json", "cat.png"), "cat.png");
    }

    #[test]
    fn test_relative_image_next_to_remote_data() {
        assert_eq!(
            resolve_image_source("https://host.example/cards/data.json", "./img/cat.png"),
            "https://host.example/cards/img/cat.png"
        );
        assert_eq!(
            resolve_image_source("https://host.example", "cat.png"),
            "https://host.example/cat.png"
        );
    }
}
