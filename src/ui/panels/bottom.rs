use crate::style::banner_colors;
use crate::ui::state::CategoryManager;
use eframe::egui;

/// Render the status banner. Nothing is drawn while no notification is visible.
pub fn show(ctx: &egui::Context, manager: &CategoryManager) {
    let Some(notification) = manager.notification() else {
        return;
    };
    let (fill, border, text) = banner_colors(notification.kind);

    egui::TopBottomPanel::bottom("status_banner")
        .resizable(false)
        .show_separator_line(false)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            egui::Frame::new()
                .fill(fill)
                .stroke(egui::Stroke::new(1.0, border))
                .corner_radius(4.0)
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(egui::RichText::new(&notification.message).color(text));
                });
            ui.add_space(6.0);
        });
}
