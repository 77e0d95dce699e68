//! Card image loading

use super::App;
use crate::types::CardRecord;
use crate::ui::card::CardView;
use crate::utils::{is_remote, resolve_image_source};
use eframe::egui;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Decoded image or failure reason, keyed by source
type Finished = Arc<Mutex<Vec<(String, Result<egui::ColorImage, String>)>>>;

pub fn decode_image(bytes: &[u8]) -> Result<egui::ColorImage, ImageError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

pub async fn load_image(client: &reqwest::Client, source: &str) -> Result<egui::ColorImage, ImageError> {
    let bytes = if is_remote(source) {
        let response = client.get(source).send().await?;
        if !response.status().is_success() {
            return Err(ImageError::Status(response.status()));
        }
        response.bytes().await?.to_vec()
    } else {
        tokio::fs::read(source).await?
    };
    decode_image(&bytes)
}

/// Background image downloads with bounded concurrency
pub struct ImageLoader {
    client: reqwest::Client,
    semaphore: Arc<Semaphore>,
    finished: Finished,
    requested: std::collections::HashSet<String>,
}

impl ImageLoader {
    pub fn new(client: reqwest::Client, concurrency: usize) -> Self {
        Self {
            client,
            semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
            finished: Arc::new(Mutex::new(Vec::new())),
            requested: std::collections::HashSet::new(),
        }
    }

    /// Start loading `source` unless it was requested before.
    pub fn request(&mut self, runtime: &tokio::runtime::Handle, ctx: &egui::Context, source: &str) {
        if !self.requested.insert(source.to_string()) {
            return;
        }

        let client = self.client.clone();
        let sem = self.semaphore.clone();
        let finished = self.finished.clone();
        let ctx = ctx.clone();
        let source = source.to_string();

        runtime.spawn(async move {
            let _permit = sem.acquire().await.ok();
            let result = match load_image(&client, &source).await {
                Ok(image) => {
                    debug!(source = %source, "Image loaded");
                    Ok(image)
                }
                Err(e) => {
                    warn!(source = %source, error = %e, "Image failed to load");
                    Err(e.to_string())
                }
            };
            if let Ok(mut done) = finished.lock() {
                done.push((source, result));
            }
            ctx.request_repaint();
        });
    }

    /// Take every load that completed since the last call.
    pub fn drain_finished(&self) -> Vec<(String, Result<egui::ColorImage, String>)> {
        match self.finished.lock() {
            Ok(mut done) => std::mem::take(&mut *done),
            Err(_) => Vec::new(),
        }
    }
}

/// Loaded texture or a failure marker for one image source
pub enum LoadedImage {
    Texture(egui::TextureHandle),
    Failed,
}

/// Deliver the loaded/failed signal for a card's image, if it has settled.
pub fn feed_image_signal(
    view: &mut CardView,
    loaded: Option<&LoadedImage>,
) -> Option<egui::TextureHandle> {
    match loaded {
        Some(LoadedImage::Texture(tex)) => {
            view.image_loaded();
            Some(tex.clone())
        }
        Some(LoadedImage::Failed) => {
            view.image_failed();
            None
        }
        None => None,
    }
}

impl App {
    /// Upload finished images to the GPU.
    pub fn poll_images(&mut self, ctx: &egui::Context) {
        for (source, result) in self.images.drain_finished() {
            let loaded = match result {
                Ok(image) => LoadedImage::Texture(ctx.load_texture(
                    source.clone(),
                    image,
                    egui::TextureOptions::LINEAR,
                )),
                Err(_) => LoadedImage::Failed,
            };
            self.textures.insert(source, loaded);
        }
    }

    pub fn image_source(&self, card: &CardRecord) -> String {
        resolve_image_source(&self.data_source, &card.image_url)
    }

    /// Make sure a card has its view and that its image is on the way.
    ///
    /// Feeds the loaded/failed signal into the view once the image settles.
    pub fn prepare_card(
        &mut self,
        ctx: &egui::Context,
        card: &CardRecord,
    ) -> (CardView, Option<egui::TextureHandle>) {
        let source = self.image_source(card);
        let view = self.card_views.entry(card.id).or_insert_with(CardView::new);
        let loaded = self.textures.get(&source);
        let texture = feed_image_signal(view, loaded);
        if loaded.is_none() && view.is_loading() {
            self.images.request(self.runtime.handle(), ctx, &source);
        }
        (*view, texture)
    }

    /// Start loading an image outside the grid (overlay opened early).
    pub fn request_image(&mut self, ctx: &egui::Context, image_url: &str) {
        let source = resolve_image_source(&self.data_source, image_url);
        if !self.textures.contains_key(&source) {
            self.images.request(self.runtime.handle(), ctx, &source);
        }
    }

    /// Texture for the overlay, if that image has arrived.
    pub fn overlay_texture(&self, image_url: &str) -> Option<&LoadedImage> {
        let source = resolve_image_source(&self.data_source, image_url);
        self.textures.get(&source)
    }
}

/// Textures keyed by resolved image source
pub type TextureCache = HashMap<String, LoadedImage>;
