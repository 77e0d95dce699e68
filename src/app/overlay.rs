//! Full-window image overlay

use super::images::LoadedImage;
use super::App;
use crate::theme;
use crate::ui::components::fit_rect;
use eframe::egui;

impl App {
    /// Dimmed layer over the whole window with the image enlarged.
    /// Any click on it closes the overlay.
    pub fn render_overlay(&mut self, ctx: &egui::Context) {
        let Some(image_url) = self.gallery.state.overlay.clone() else {
            return;
        };

        if self.overlay_texture(&image_url).is_none() {
            self.request_image(ctx, &image_url);
        }

        let screen = ctx.screen_rect();
        let mut close = false;

        egui::Area::new(egui::Id::new("image_overlay"))
            .fixed_pos(screen.min)
            .order(egui::Order::Foreground)
            .interactable(true)
            .show(ctx, |ui| {
                let response = ui.allocate_response(screen.size(), egui::Sense::click());
                let painter = ui.painter();
                painter.rect_filled(
                    screen,
                    0.0,
                    egui::Color32::from_black_alpha(theme::OVERLAY_DIM_ALPHA),
                );

                let bounds = egui::Rect::from_center_size(
                    screen.center(),
                    screen.size() * theme::OVERLAY_FILL_RATIO,
                );

                match self.overlay_texture(&image_url) {
                    Some(LoadedImage::Texture(tex)) => {
                        let rect = fit_rect(tex.size_vec2(), bounds);
                        painter.image(
                            tex.id(),
                            rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                    Some(LoadedImage::Failed) => {
                        painter.text(
                            bounds.center(),
                            egui::Align2::CENTER_CENTER,
                            egui_phosphor::regular::IMAGE_BROKEN,
                            egui::FontId::proportional(64.0),
                            theme::TEXT_DIM,
                        );
                    }
                    None => {
                        let spinner_rect =
                            egui::Rect::from_center_size(bounds.center(), egui::vec2(40.0, 40.0));
                        egui::Spinner::new().color(theme::ACCENT).paint_at(ui, spinner_rect);
                    }
                }

                if response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if response.clicked() {
                    close = true;
                }
            });

        if close {
            self.gallery.close_overlay();
        }
    }
}
