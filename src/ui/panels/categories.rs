use crate::types::StateColors;
use crate::ui::list;
use crate::ui::state::CategoryManager;
use eframe::egui;
use egui::Color32;

/// Render the central panel with the category list.
pub fn show(ctx: &egui::Context, manager: &mut CategoryManager) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.set_height(28.0);
            ui.label(egui::RichText::new("Listado de categorías").strong().size(20.0));
            if manager.is_loading() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.spinner();
                });
            }
        });
        ui.separator();

        if manager.categories().is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(if manager.is_loading() {
                    "Cargando categorías…"
                } else {
                    "No hay categorías."
                });
            });
            return;
        }

        let colors = StateColors {
            default: Color32::from_rgb(247, 248, 250),
            hover: Color32::from_rgb(233, 236, 239),
            selected: Some(Color32::from_rgb(13, 110, 253)),
        };
        let selected = manager.selected();
        let mut to_edit = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for category in manager.categories() {
                    let is_selected = selected == Some(category.id);
                    if list::category_row(ui, category, is_selected, &colors) {
                        to_edit = Some(category.clone());
                    }
                }
            });

        if let Some(category) = to_edit {
            manager.select_for_edit(&category);
        }
    });
}
