//! View rendering (status screens, card grid)

use super::gallery::Gallery;
use super::App;
use crate::theme;
use crate::types::{CardId, CardRecord};
use crate::ui::card::{show_card, CardView};
use crate::ui::components::centered_message;
use eframe::egui;
use tracing::debug;

/// Columns and card size for the grid at a given width
pub fn grid_layout(available: f32, base: (f32, f32), spacing: f32) -> (usize, egui::Vec2) {
    let (base_w, base_h) = base;
    let num_cols = ((available + spacing) / (base_w + spacing)).floor().max(1.0);
    let card_w = ((available - spacing * (num_cols - 1.0)) / num_cols).floor().max(1.0);
    let card_h = (base_h * (card_w / base_w)).floor();
    (num_cols as usize, egui::vec2(card_w, card_h))
}

impl App {
    pub fn render_loading(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.add(egui::Spinner::new().size(36.0).color(theme::ACCENT));
            ui.add_space(theme::SPACING_MD);
            ui.label(egui::RichText::new("Loading cards...").color(theme::TEXT_MUTED));
        });
    }

    pub fn render_error(&self, ui: &mut egui::Ui, message: &str) {
        centered_message(ui, egui_phosphor::regular::WARNING_CIRCLE, message, theme::STATUS_ERROR);
    }

    pub fn render_empty(&self, ui: &mut egui::Ui) {
        centered_message(ui, egui_phosphor::regular::IMAGES, "No cards to show", theme::TEXT_MUTED);
    }

    /// Card grid with drag-to-reorder. Clicking a card opens the overlay.
    pub fn render_grid_view(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let spacing = theme::SPACING_LG;
        let base = if self.large_cards {
            theme::CARD_LARGE
        } else {
            theme::CARD_SMALL
        };
        let (_, card_size) = grid_layout(ui.available_width(), base, spacing);

        // Snapshot so drawing never races with the reorder applied below
        let cards = self.gallery.state.cards.clone();

        let output = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .drag_to_scroll(false)
            .id_salt("grid_scroll")
            .show(ui, |ui| {
                card_grid(ui, &cards, card_size, spacing, |card| self.prepare_card(ctx, card))
            })
            .inner;

        output.apply(&mut self.gallery);
    }
}

/// What happened in the grid this frame. Applied after drawing.
#[derive(Debug, Default)]
pub struct GridOutput {
    pub clicked: Option<String>,
    pub dropped: Option<(CardId, usize)>,
}

impl GridOutput {
    pub fn apply(self, gallery: &mut Gallery) {
        if let Some(url) = self.clicked {
            gallery.open_overlay(url);
        }

        if let Some((id, to)) = self.dropped {
            if let Some(from) = gallery.index_of(id) {
                debug!(card = %id, from, to, "Card dropped");
                gallery.drop_card(from, Some(to));
            }
        }
    }
}

/// Wrapped rows of cards.
///
/// Press and release in place is a click. Once the pointer moves past the
/// click threshold the card carries its `CardId` as the drag payload, and
/// releasing over another card reports a drop at that card's index.
pub fn card_grid(
    ui: &mut egui::Ui,
    cards: &[CardRecord],
    card_size: egui::Vec2,
    spacing: f32,
    mut prepare: impl FnMut(&CardRecord) -> (CardView, Option<egui::TextureHandle>),
) -> GridOutput {
    let mut output = GridOutput::default();

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = egui::vec2(spacing, spacing);

        for (idx, card) in cards.iter().enumerate() {
            let (view, texture) = prepare(card);
            let response = show_card(ui, card, &view, texture.as_ref(), card_size);

            if response.clicked() {
                output.clicked = Some(card.image_url.clone());
            }

            if response.dragged() && ui.input(|i| i.pointer.is_decidedly_dragging()) {
                egui::DragAndDrop::set_payload(ui.ctx(), card.id);
                paint_drag_ghost(ui, card, &response);
            }

            if let Some(payload) = response.dnd_hover_payload::<CardId>() {
                if *payload != card.id {
                    ui.painter().rect_stroke(
                        response.rect,
                        theme::RADIUS_LARGE,
                        egui::Stroke::new(theme::STROKE_THICK, theme::ACCENT),
                        egui::StrokeKind::Outside,
                    );
                }
            }

            if let Some(payload) = response.dnd_release_payload::<CardId>() {
                output.dropped = Some((*payload, idx));
            }
        }
    });

    output
}

/// Dim the card being dragged and float a small copy under the pointer.
fn paint_drag_ghost(ui: &egui::Ui, card: &CardRecord, response: &egui::Response) {
    ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
    ui.painter()
        .rect_filled(response.rect, theme::RADIUS_LARGE, egui::Color32::from_black_alpha(140));

    let Some(pointer) = ui.ctx().pointer_interact_pos() else {
        return;
    };
    let painter = ui
        .ctx()
        .layer_painter(egui::LayerId::new(egui::Order::Tooltip, response.id.with("ghost")));
    let rect = egui::Rect::from_center_size(pointer, response.rect.size() * 0.5);
    painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_ELEVATED);
    painter.rect_stroke(
        rect,
        theme::RADIUS_LARGE,
        egui::Stroke::new(theme::STROKE_THICK, theme::ACCENT),
        egui::StrokeKind::Outside,
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        &card.title,
        egui::FontId::proportional(theme::FONT_LABEL),
        theme::TEXT_PRIMARY,
    );
}
