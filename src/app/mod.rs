//! App module - contains the main application state and logic

mod fetch;
mod gallery;
mod images;
mod keys;
mod overlay;
mod views;

use crate::settings::Settings;
use crate::theme;
use crate::types::CardId;
use crate::ui::card::CardView;
use eframe::egui;
use fetch::FetchSlot;
use gallery::Gallery;
use images::{ImageLoader, TextureCache};
use keys::KeyHooks;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::debug;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) gallery: Gallery,
    pub(crate) card_views: HashMap<CardId, CardView>,
    pub(crate) fetch: Option<(CancellationToken, FetchSlot)>,
    // Images
    pub(crate) images: ImageLoader,
    pub(crate) textures: TextureCache,
    pub(crate) client: reqwest::Client,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Settings
    pub(crate) data_source: String,
    pub(crate) image_concurrency: usize,
    pub(crate) large_cards: bool,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new()?;
        let client = reqwest::Client::new();
        let image_concurrency = settings.image_concurrency_or_default();
        let data_source = settings.resolved_data_source();

        debug!(data_source = %data_source, image_concurrency, "App state initialized");

        let mut app = Self {
            gallery: Gallery::new(KeyHooks::default()),
            card_views: HashMap::new(),
            fetch: None,
            images: ImageLoader::new(client.clone(), image_concurrency),
            textures: HashMap::new(),
            client,
            runtime,
            data_source,
            image_concurrency,
            large_cards: settings.large_cards,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        };

        app.mount(&cc.egui_ctx);
        Ok(app)
    }

    pub fn save_settings(&self) {
        let stored = Settings::load(&self.data_dir);
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            // Keep what the user wrote, not an environment override
            data_source: stored.data_source,
            image_concurrency: self.image_concurrency,
            large_cards: self.large_cards,
        };
        settings.save(&self.data_dir);
    }
}
