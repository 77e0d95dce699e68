//! Reusable UI components
//!
//! This module contains standalone UI components that can be used
//! throughout the application.

use crate::theme;
use eframe::egui;

/// Large icon with a message underneath, centered in the remaining space
pub fn centered_message(ui: &mut egui::Ui, icon: &str, message: &str, color: egui::Color32) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        ui.label(egui::RichText::new(icon).size(48.0).color(color));
        ui.add_space(theme::SPACING_MD);
        ui.label(
            egui::RichText::new(message)
                .size(theme::FONT_HEADING)
                .color(theme::TEXT_MUTED),
        );
    });
}

/// Scale `image` to fit inside `bounds`, centered, keeping aspect ratio.
pub fn fit_rect(image: egui::Vec2, bounds: egui::Rect) -> egui::Rect {
    if image.x <= 0.0 || image.y <= 0.0 {
        return egui::Rect::from_center_size(bounds.center(), egui::Vec2::ZERO);
    }
    let scale = (bounds.width() / image.x).min(bounds.height() / image.y);
    egui::Rect::from_center_size(bounds.center(), image * scale)
}

/// "1 card" / "3 cards"
pub fn card_count_label(count: usize) -> String {
    if count == 1 {
        "1 card".to_string()
    } else {
        format!("{} cards", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_rect_enlarges_small_image() {
        let bounds = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(1000.0, 500.0));
        let rect = fit_rect(egui::vec2(100.0, 100.0), bounds);
        assert_eq!(rect.size(), egui::vec2(500.0, 500.0));
        assert_eq!(rect.center(), bounds.center());
    }

    #[test]
    fn test_fit_rect_wide_image_limited_by_width() {
        let bounds = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(400.0, 400.0));
        let rect = fit_rect(egui::vec2(800.0, 200.0), bounds);
        assert_eq!(rect.size(), egui::vec2(400.0, 100.0));
    }

    #[test]
    fn test_card_count_label() {
        assert_eq!(card_count_label(0), "0 cards");
        assert_eq!(card_count_label(1), "1 card");
        assert_eq!(card_count_label(12), "12 cards");
    }
}
