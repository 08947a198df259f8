//! Bootstrap-like light theme and button/banner palette for egui.

use eframe::{egui, epaint};
use epaint::Color32;

use crate::ui::notification::NotificationKind;

pub const PRIMARY: Color32 = Color32::from_rgb(13, 110, 253);
pub const DANGER: Color32 = Color32::from_rgb(220, 53, 69);
pub const SECONDARY: Color32 = Color32::from_rgb(108, 117, 125);

/// Apply the light theme to the current egui Context.
pub fn set_light_style(ctx: &egui::Context) {
    use egui::Visuals;

    let mut visuals = Visuals::light();
    visuals.window_fill = Color32::from_rgb(248, 249, 250);
    visuals.panel_fill = Color32::WHITE;
    visuals.widgets.active.bg_fill = PRIMARY;
    visuals.widgets.active.fg_stroke = epaint::Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(233, 236, 239);
    visuals.hyperlink_color = PRIMARY;
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);
    ctx.set_style(style);
}

/// Filled button in one of the palette colors with white text.
pub fn filled_button(text: &str, fill: Color32) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_owned()).color(Color32::WHITE)).fill(fill)
}

/// Background, border and text color of the status banner.
pub fn banner_colors(kind: NotificationKind) -> (Color32, Color32, Color32) {
    match kind {
        NotificationKind::Success => (
            Color32::from_rgb(209, 231, 221),
            Color32::from_rgb(163, 207, 187),
            Color32::from_rgb(10, 54, 34),
        ),
        NotificationKind::Danger => (
            Color32::from_rgb(248, 215, 218),
            Color32::from_rgb(241, 174, 181),
            Color32::from_rgb(88, 21, 28),
        ),
    }
}
