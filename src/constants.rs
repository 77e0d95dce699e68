//! Application constants and configuration

pub const APP_NAME: &str = "Card Gallery";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default data source, resolved against the working directory
pub const DEFAULT_DATA_SOURCE: &str = "data.json";

/// Environment override for the data source (path or http(s) URL)
pub const DATA_SOURCE_ENV: &str = "GALLERY_DATA_SOURCE";

/// The only message ever shown when the initial load fails
pub const LOAD_ERROR_MESSAGE: &str = "Something went wrong while loading the gallery.";

/// Concurrent image downloads
pub const DEFAULT_IMAGE_CONCURRENCY: usize = 8;
