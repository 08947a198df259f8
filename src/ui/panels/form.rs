use crate::style::{filled_button, DANGER, PRIMARY, SECONDARY};
use crate::types::{FormField, TaskKind};
use crate::ui::state::CategoryManager;
use eframe::egui;

/// Render the left side panel with the category form and its actions.
pub fn show(ctx: &egui::Context, manager: &mut CategoryManager) {
    egui::SidePanel::left("form")
        .resizable(false)
        .exact_width(320.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Crear categoría").strong().size(20.0));
            ui.separator();
            ui.add_space(4.0);

            // fields are edited on copies so every change goes through edit_field
            let mut name = manager.form().name.clone();
            ui.label("Nombre:");
            if ui
                .add(egui::TextEdit::singleline(&mut name).desired_width(f32::INFINITY))
                .changed()
            {
                manager.edit_field(FormField::Name, name);
            }

            let mut image = manager.form().image.clone();
            ui.label("URL de la imagen:");
            let image_resp = ui.add(
                egui::TextEdit::singleline(&mut image)
                    .hint_text("https://…")
                    .desired_width(f32::INFINITY),
            );
            if image_resp.changed() {
                manager.edit_field(FormField::Image, image);
            }

            ui.add_space(10.0);

            let busy = manager.is_busy();
            let submit_on_enter =
                image_resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            ui.horizontal_wrapped(|ui| {
                let submit = ui.add_enabled(!busy, filled_button(manager.submit_label(), PRIMARY));
                if submit.clicked() || (submit_on_enter && !busy) {
                    manager.submit();
                }

                if manager.is_editing()
                    && ui
                        .add_enabled(!busy, filled_button("Eliminar categoría", DANGER))
                        .clicked()
                {
                    manager.delete_selected();
                }

                if ui.add(filled_button("Limpiar", SECONDARY)).clicked() {
                    manager.clear();
                }
            });

            if let Some(pending) = manager.pending_mutation() {
                let text = match pending {
                    TaskKind::Create => "Creando categoría…".to_string(),
                    TaskKind::Update(id) => format!("Actualizando categoría #{}…", id),
                    TaskKind::Delete(id) => format!("Eliminando categoría #{}…", id),
                };
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(text);
                });
            }
        });
}
