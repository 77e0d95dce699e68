//! Centralized theme constants for Card Gallery
//! All colors, sizes, and styling should reference these constants

use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x09, 0x09, 0x0b); // zinc-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b); // zinc-900
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800

// =============================================================================
// COLORS - Accent (Teal)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe7); // zinc-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa); // zinc-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800 - faint gray for outlines
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;
pub const FONT_CAPTION: f32 = 10.0;

// =============================================================================
// DIMENSIONS - Layout
// =============================================================================
pub const TOP_BAR_HEIGHT: f32 = 44.0;

// =============================================================================
// DIMENSIONS - Grid Cards
// =============================================================================
pub const CARD_SMALL: (f32, f32) = (180.0, 170.0);
pub const CARD_LARGE: (f32, f32) = (260.0, 240.0);
pub const CARD_LABEL_HEIGHT: f32 = 46.0;

// =============================================================================
// DIMENSIONS - Overlay
// =============================================================================
pub const OVERLAY_FILL_RATIO: f32 = 0.9;
pub const OVERLAY_DIM_ALPHA: u8 = 200;

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_LARGE: f32 = 8.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_THICK: f32 = 2.0;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPER - Apply global visuals
// =============================================================================
pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_BASE;
    // Scroll bar track
    visuals.extreme_bg_color = BG_BASE;
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);

    let widgets = &mut visuals.widgets;
    widgets.noninteractive.fg_stroke = egui::Stroke::new(STROKE_DEFAULT, TEXT_PRIMARY);
    widgets.inactive.weak_bg_fill = BTN_DEFAULT;
    widgets.inactive.bg_fill = BG_ELEVATED;
    widgets.inactive.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE);
    widgets.inactive.fg_stroke = egui::Stroke::new(STROKE_DEFAULT, TEXT_SECONDARY);
    widgets.hovered.weak_bg_fill = BG_SURFACE;
    widgets.hovered.bg_fill = BG_SURFACE;
    widgets.hovered.bg_stroke = egui::Stroke::new(STROKE_DEFAULT, ACCENT);
    widgets.active.weak_bg_fill = BG_SURFACE;
    widgets.active.bg_fill = BG_SURFACE;
    for w in [&mut widgets.inactive, &mut widgets.hovered, &mut widgets.active] {
        w.corner_radius = RADIUS_DEFAULT.into();
    }
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.spacing.scroll.bar_width = 6.0;
        style.spacing.scroll.floating = false;
    });
}

// =============================================================================
// HELPER - Button styles
// =============================================================================

/// Default gray button
pub fn button(text: impl Into<String>) -> egui::Button<'static> {
    egui::Button::new(text.into())
        .fill(BTN_DEFAULT)
        .corner_radius(RADIUS_DEFAULT)
}
