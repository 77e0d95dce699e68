//! Gallery card: image with title and type underneath

use crate::theme;
use crate::types::{CardRecord, ImageStatus};
use eframe::egui;

/// Per-card view state. Lives from first render until the card leaves the gallery.
#[derive(Clone, Copy, Debug)]
pub struct CardView {
    status: ImageStatus,
}

impl Default for CardView {
    fn default() -> Self {
        Self::new()
    }
}

impl CardView {
    pub fn new() -> Self {
        Self { status: ImageStatus::Loading }
    }

    pub fn status(&self) -> ImageStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == ImageStatus::Loading
    }

    /// Image arrived. Returns true if this changed the state.
    pub fn image_loaded(&mut self) -> bool {
        self.settle(ImageStatus::Ready)
    }

    /// Image could not be loaded. Returns true if this changed the state.
    pub fn image_failed(&mut self) -> bool {
        self.settle(ImageStatus::Failed)
    }

    fn settle(&mut self, to: ImageStatus) -> bool {
        if self.status != ImageStatus::Loading {
            return false;
        }
        self.status = to;
        true
    }
}

/// Draw one card. Senses clicks and drags; the caller decides what they mean.
pub fn show_card(
    ui: &mut egui::Ui,
    card: &CardRecord,
    view: &CardView,
    texture: Option<&egui::TextureHandle>,
    size: egui::Vec2,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());

    if !ui.is_rect_visible(rect) {
        return response;
    }

    let painter = ui.painter();
    painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_ELEVATED);

    let image_rect = egui::Rect::from_min_max(
        rect.min,
        egui::pos2(rect.max.x, rect.max.y - theme::CARD_LABEL_HEIGHT),
    );

    match (view.status(), texture) {
        (ImageStatus::Ready, Some(tex)) => {
            // Textured RectShape so the image follows the rounded top corners
            let brush = egui::epaint::Brush {
                fill_texture_id: tex.id(),
                uv: cover_uv(tex.size_vec2(), image_rect.size()),
            };
            let mut shape = egui::epaint::RectShape::filled(
                image_rect,
                egui::CornerRadius {
                    nw: theme::RADIUS_LARGE as u8,
                    ne: theme::RADIUS_LARGE as u8,
                    sw: 0,
                    se: 0,
                },
                egui::Color32::WHITE,
            );
            shape.brush = Some(std::sync::Arc::new(brush));
            painter.add(shape);
        }
        (ImageStatus::Failed, _) => {
            painter.text(
                image_rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::IMAGE_BROKEN,
                egui::FontId::proportional(32.0),
                theme::TEXT_DIM,
            );
        }
        _ => {
            let spinner_rect =
                egui::Rect::from_center_size(image_rect.center(), egui::vec2(24.0, 24.0));
            egui::Spinner::new().color(theme::ACCENT).paint_at(ui, spinner_rect);
        }
    }

    let text_rect = egui::Rect::from_min_max(
        egui::pos2(rect.min.x, image_rect.max.y),
        rect.max,
    )
    .shrink2(egui::vec2(theme::SPACING_LG, theme::SPACING_SM));

    painter.text(
        text_rect.left_top(),
        egui::Align2::LEFT_TOP,
        &card.title,
        egui::FontId::proportional(theme::FONT_LABEL),
        theme::TEXT_PRIMARY,
    );
    painter.text(
        text_rect.left_bottom(),
        egui::Align2::LEFT_BOTTOM,
        &card.kind,
        egui::FontId::proportional(theme::FONT_CAPTION),
        theme::TEXT_MUTED,
    );

    if response.hovered() && !response.dragged() {
        painter.rect_filled(rect, theme::RADIUS_LARGE, egui::Color32::from_white_alpha(6));
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    painter.rect_stroke(
        rect,
        theme::RADIUS_LARGE,
        egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_DEFAULT),
        egui::StrokeKind::Outside,
    );

    response
}

/// UV rect that crops the texture to fill `target` without stretching.
pub fn cover_uv(texture: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let full = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    if texture.x <= 0.0 || texture.y <= 0.0 || target.x <= 0.0 || target.y <= 0.0 {
        return full;
    }

    let tex_aspect = texture.x / texture.y;
    let target_aspect = target.x / target.y;
    if tex_aspect > target_aspect {
        let w = target_aspect / tex_aspect;
        egui::Rect::from_min_max(egui::pos2((1.0 - w) / 2.0, 0.0), egui::pos2((1.0 + w) / 2.0, 1.0))
    } else {
        let h = tex_aspect / target_aspect;
        egui::Rect::from_min_max(egui::pos2(0.0, (1.0 - h) / 2.0), egui::pos2(1.0, (1.0 + h) / 2.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_starts_loading() {
        let view = CardView::new();
        assert_eq!(view.status(), ImageStatus::Loading);
        assert!(view.is_loading());
    }

    #[test]
    fn test_loaded_is_terminal() {
        let mut view = CardView::new();
        assert!(view.image_loaded());
        assert!(!view.image_loaded());
        assert!(!view.image_failed());
        assert_eq!(view.status(), ImageStatus::Ready);
    }

    #[test]
    fn test_failed_is_distinct_and_terminal() {
        let mut view = CardView::new();
        assert!(view.image_failed());
        assert!(!view.image_loaded());
        assert_eq!(view.status(), ImageStatus::Failed);
        assert!(!view.is_loading());
    }

    #[test]
    fn test_cover_uv_crops_wide_texture() {
        let uv = cover_uv(egui::vec2(200.0, 100.0), egui::vec2(100.0, 100.0));
        assert!((uv.min.x - 0.25).abs() < 1e-6);
        assert!((uv.max.x - 0.75).abs() < 1e-6);
        assert_eq!(uv.min.y, 0.0);
        assert_eq!(uv.max.y, 1.0);
    }

    #[test]
    fn test_cover_uv_crops_tall_texture() {
        let uv = cover_uv(egui::vec2(100.0, 400.0), egui::vec2(100.0, 100.0));
        assert_eq!(uv.min.x, 0.0);
        assert!((uv.min.y - 0.375).abs() < 1e-6);
        assert!((uv.max.y - 0.625).abs() < 1e-6);
    }
}
