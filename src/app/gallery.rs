//! Gallery state: card order, load status, overlay target and the mount lifecycle

use super::fetch::FetchError;
use super::keys::{EscapeHook, KeyHooks};
use crate::constants::LOAD_ERROR_MESSAGE;
use crate::types::{CardId, CardRecord};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct GalleryState {
    pub cards: Vec<CardRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub overlay: Option<String>,
}

/// Move the element at `from` to `to`, shifting everything in between by one.
///
/// Returns a new list. A missing destination or an out-of-range index leaves
/// the order untouched.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: Option<usize>) -> Vec<T> {
    let mut result = items.to_vec();
    let Some(to) = to else {
        return result;
    };
    if from >= result.len() || to >= result.len() || from == to {
        return result;
    }
    let moved = result.remove(from);
    result.insert(to, moved);
    result
}

/// Root view state plus the resources it holds while mounted.
pub struct Gallery {
    pub state: GalleryState,
    hooks: KeyHooks,
    escape_hook: Option<EscapeHook>,
    cancel_token: Option<CancellationToken>,
}

impl Gallery {
    pub fn new(hooks: KeyHooks) -> Self {
        Self {
            state: GalleryState::default(),
            hooks,
            escape_hook: None,
            cancel_token: None,
        }
    }

    /// Acquire the Escape hook and start the initial load.
    ///
    /// Returns the token the fetch must honor. Calling this while already
    /// mounted cancels the previous fetch but never installs a second hook.
    pub fn mount(&mut self) -> CancellationToken {
        if self.escape_hook.is_none() {
            self.escape_hook = Some(self.hooks.install());
        }
        if let Some(old) = self.cancel_token.take() {
            old.cancel();
        }

        let token = CancellationToken::new();
        self.cancel_token = Some(token.clone());
        self.state.loading = true;
        self.state.error = None;
        debug!(hooks = self.hooks.installed(), "Gallery mounted");
        token
    }

    /// Release the Escape hook and abandon any fetch still in flight.
    pub fn unmount(&mut self) {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        self.escape_hook = None;
        self.state.loading = false;
        debug!("Gallery unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.escape_hook.is_some()
    }

    pub fn escape_hook(&self) -> Option<&EscapeHook> {
        self.escape_hook.as_ref()
    }

    /// Commit a fetch outcome unless its token has been cancelled.
    ///
    /// Returns false when the result was discarded.
    pub fn commit(
        &mut self,
        token: &CancellationToken,
        result: Result<Vec<CardRecord>, FetchError>,
    ) -> bool {
        let is_current = self
            .cancel_token
            .as_ref()
            .is_some_and(|current| !current.is_cancelled() && !token.is_cancelled());
        if !is_current {
            debug!("Discarding result of cancelled fetch");
            return false;
        }
        self.finish_load(result);
        true
    }

    /// Store the outcome of the initial load. Clears `loading` on every path.
    pub fn finish_load(&mut self, result: Result<Vec<CardRecord>, FetchError>) {
        self.state.loading = false;
        match result {
            Ok(cards) => {
                info!(count = cards.len(), "Gallery loaded");
                self.state.cards = cards;
                self.state.error = None;
            }
            Err(e) => {
                warn!(error = %e, "Gallery load failed");
                self.state.cards.clear();
                self.state.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub fn open_overlay(&mut self, image_url: impl Into<String>) {
        self.state.overlay = Some(image_url.into());
    }

    pub fn close_overlay(&mut self) {
        self.state.overlay = None;
    }

    /// Escape closes the overlay; with nothing open it does nothing.
    pub fn handle_escape(&mut self) {
        if self.state.overlay.is_some() {
            self.close_overlay();
        }
    }

    /// Apply a drag-and-drop release. `to` is `None` when dropped outside any card.
    pub fn drop_card(&mut self, from: usize, to: Option<usize>) {
        self.state.cards = reorder(&self.state.cards, from, to);
    }

    pub fn index_of(&self, id: CardId) -> Option<usize> {
        self.state.cards.iter().position(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{assign_ids, RawCard};
    use std::collections::HashSet;

    fn cards(n: usize) -> Vec<CardRecord> {
        assign_ids(
            (0..n)
                .map(|i| RawCard {
                    kind: format!("type-{}", i),
                    title: format!("card {}", i),
                    image_url: format!("https://img.example/{}.png", i),
                })
                .collect(),
        )
    }

    fn loaded(n: usize) -> Gallery {
        let mut gallery = Gallery::new(KeyHooks::default());
        let token = gallery.mount();
        assert!(gallery.commit(&token, Ok(cards(n))));
        gallery
    }

    fn ids(gallery: &Gallery) -> Vec<CardId> {
        gallery.state.cards.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_reorder_forward() {
        assert_eq!(reorder(&[0, 1, 2, 3, 4], 1, Some(3)), vec![0, 2, 3, 1, 4]);
    }

    #[test]
    fn test_reorder_backward() {
        assert_eq!(reorder(&[0, 1, 2, 3, 4], 4, Some(0)), vec![4, 0, 1, 2, 3]);
    }

    #[test]
    fn test_reorder_is_not_self_inverse() {
        let once = reorder(&[0, 1, 2, 3], 0, Some(2));
        assert_eq!(once, vec![1, 2, 0, 3]);
        assert_ne!(reorder(&once, 0, Some(2)), vec![0, 1, 2, 3]);
        assert_eq!(reorder(&once, 2, Some(0)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_reorder_without_destination_or_out_of_range() {
        let items = [0, 1, 2];
        assert_eq!(reorder(&items, 1, None), items);
        assert_eq!(reorder(&items, 5, Some(0)), items);
        assert_eq!(reorder(&items, 0, Some(3)), items);
        assert_eq!(reorder(&items, 1, Some(1)), items);
    }

    #[test]
    fn test_load_success_keeps_order_and_ids() {
        let gallery = loaded(4);
        assert!(!gallery.state.loading);
        assert_eq!(gallery.state.error, None);
        let titles: Vec<&str> = gallery.state.cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["card 0", "card 1", "card 2", "card 3"]);
        assert_eq!(ids(&gallery).into_iter().collect::<HashSet<_>>().len(), 4);
    }

    #[test]
    fn test_load_failure_sets_fixed_message() {
        let mut gallery = Gallery::new(KeyHooks::default());
        let token = gallery.mount();
        assert!(gallery.state.loading);

        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "offline");
        gallery.commit(&token, Err(FetchError::Io { path: "data.json".into(), source: io }));

        assert!(!gallery.state.loading);
        assert!(gallery.state.cards.is_empty());
        assert_eq!(gallery.state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
    }

    #[test]
    fn test_drop_card_moves_single_element_and_keeps_ids() {
        let mut gallery = loaded(5);
        let before = ids(&gallery);

        gallery.drop_card(0, Some(3));
        let after = ids(&gallery);

        assert_eq!(after, vec![before[1], before[2], before[3], before[0], before[4]]);
        assert_eq!(
            after.iter().collect::<HashSet<_>>(),
            before.iter().collect::<HashSet<_>>()
        );
    }

    #[test]
    fn test_drop_without_destination_is_noop() {
        let mut gallery = loaded(3);
        let before = gallery.state.cards.clone();
        gallery.drop_card(1, None);
        assert_eq!(gallery.state.cards, before);
    }

    #[test]
    fn test_overlay_open_replace_close() {
        let mut gallery = loaded(2);
        gallery.open_overlay("a.png");
        assert_eq!(gallery.state.overlay.as_deref(), Some("a.png"));

        gallery.open_overlay("b.png");
        assert_eq!(gallery.state.overlay.as_deref(), Some("b.png"));

        gallery.handle_escape();
        assert_eq!(gallery.state.overlay, None);

        gallery.open_overlay("a.png");
        gallery.close_overlay();
        assert_eq!(gallery.state.overlay, None);
    }

    #[test]
    fn test_escape_without_overlay_is_noop() {
        let mut gallery = loaded(2);
        let before = gallery.state.cards.clone();
        gallery.handle_escape();
        assert_eq!(gallery.state.overlay, None);
        assert_eq!(gallery.state.cards, before);
    }

    #[test]
    fn test_repeated_mount_keeps_single_hook() {
        let hooks = KeyHooks::default();
        let mut gallery = Gallery::new(hooks.clone());

        gallery.mount();
        gallery.mount();
        assert_eq!(hooks.installed(), 1);

        for _ in 0..3 {
            gallery.unmount();
            assert_eq!(hooks.installed(), 0);
            gallery.mount();
            assert_eq!(hooks.installed(), 1);
        }
        gallery.unmount();
        assert_eq!(hooks.installed(), 0);
        assert!(!gallery.is_mounted());
    }

    #[test]
    fn test_result_after_unmount_is_discarded() {
        let mut gallery = Gallery::new(KeyHooks::default());
        let token = gallery.mount();
        gallery.unmount();

        assert!(token.is_cancelled());
        assert!(!gallery.commit(&token, Ok(cards(3))));
        assert!(gallery.state.cards.is_empty());
        assert!(!gallery.state.loading);
    }

    #[test]
    fn test_stale_fetch_after_remount_is_discarded() {
        let mut gallery = Gallery::new(KeyHooks::default());
        let first = gallery.mount();
        let second = gallery.mount();

        assert!(!gallery.commit(&first, Ok(cards(2))));
        assert!(gallery.state.loading);
        assert!(gallery.commit(&second, Ok(cards(3))));
        assert_eq!(gallery.state.cards.len(), 3);
    }
}
