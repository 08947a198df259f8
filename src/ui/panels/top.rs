use eframe::egui;

/// Render the top header panel.
pub fn show(ctx: &egui::Context, api_base_url: &str) {
    let scale = ctx.pixels_per_point();
    egui::TopBottomPanel::top("top").show(ctx, |ui| {
        ui.add_space(6.0 * scale);
        ui.horizontal(|ui| {
            ui.heading(format!("🗂 Category Manager v{}", env!("CARGO_PKG_VERSION")));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(api_base_url).monospace().weak());
            });
        });
        ui.add_space(4.0 * scale);
    });
}
