//! Initial data load (data.json over HTTP or from disk)

use super::App;
use crate::types::{assign_ids, CardRecord, DataFile};
use crate::utils::is_remote;
use eframe::egui;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Outcome handed from the fetch task back to the UI thread
pub type FetchSlot = Arc<Mutex<Option<Result<Vec<CardRecord>, FetchError>>>>;

/// Take the finished outcome, if any. A poisoned lock still yields its value
/// so the load can always be committed.
pub fn take_outcome(slot: &FetchSlot) -> Option<Result<Vec<CardRecord>, FetchError>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner).take()
}

/// Parse a data.json body and assign fresh identifiers.
pub fn parse_cards(bytes: &[u8]) -> Result<Vec<CardRecord>, FetchError> {
    let file: DataFile = serde_json::from_slice(bytes)?;
    Ok(assign_ids(file.data))
}

async fn read_source(client: &reqwest::Client, source: &str) -> Result<Vec<u8>, FetchError> {
    if is_remote(source) {
        let response = client.get(source).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        Ok(response.bytes().await?.to_vec())
    } else {
        tokio::fs::read(source).await.map_err(|e| FetchError::Io {
            path: source.to_string(),
            source: e,
        })
    }
}

/// Load the card list. Returns `Ok(None)` if `token` fires first.
pub async fn fetch_cards(
    client: &reqwest::Client,
    source: &str,
    token: &CancellationToken,
) -> Result<Option<Vec<CardRecord>>, FetchError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Ok(None),
        bytes = read_source(client, source) => {
            let cards = parse_cards(&bytes?)?;
            if token.is_cancelled() {
                return Ok(None);
            }
            Ok(Some(cards))
        }
    }
}

impl App {
    /// Mount the gallery and kick off the initial load.
    pub fn mount(&mut self, ctx: &egui::Context) {
        let token = self.gallery.mount();
        let slot: FetchSlot = Arc::new(Mutex::new(None));
        self.fetch = Some((token.clone(), slot.clone()));

        let source = self.data_source.clone();
        let client = self.client.clone();
        let ctx = ctx.clone();

        info!(source = %source, "Loading gallery");

        self.runtime.spawn(async move {
            let Some(outcome) = fetch_cards(&client, &source, &token).await.transpose() else {
                debug!("Gallery fetch cancelled");
                return;
            };
            if token.is_cancelled() {
                return;
            }
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(outcome);
            ctx.request_repaint();
        });
    }

    pub fn unmount(&mut self) {
        if !self.gallery.is_mounted() {
            return;
        }
        self.gallery.unmount();
        self.fetch = None;
        self.card_views.clear();
    }

    /// Pick up a finished fetch, if any.
    pub fn poll_fetch(&mut self) {
        let Some((token, slot)) = &self.fetch else {
            return;
        };
        let Some(outcome) = take_outcome(slot) else {
            return;
        };

        let token = token.clone();
        self.fetch = None;
        if self.gallery.commit(&token, outcome) {
            let live: std::collections::HashSet<_> =
                self.gallery.state.cards.iter().map(|c| c.id).collect();
            self.card_views.retain(|id, _| live.contains(id));
        }
    }
}
