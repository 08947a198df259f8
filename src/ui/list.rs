use crate::types::{Category, StateColors};
use eframe::emath::{Align2, Vec2};
use eframe::epaint::{FontId, StrokeKind};
use egui::{Response, Sense, Ui};

pub const THUMBNAIL_WIDTH: f32 = 200.0;

/// URI handed to the image loaders; blank URLs get no fetch.
pub fn thumbnail_uri(category: &Category) -> Option<&str> {
    let uri = category.image.trim();
    (!uri.is_empty()).then_some(uri)
}

/// Render one list entry: a selectable name header, the image reference and
/// an "Editar" action. Returns true when the user asked to edit this entry.
pub fn category_row(ui: &mut Ui, category: &Category, selected: bool, colors: &StateColors) -> bool {
    let width = ui.available_width();
    let header = name_header(ui, &category.name, Vec2::new(width, 30.0), selected, colors);

    let mut edit = false;
    ui.horizontal(|ui| {
        match thumbnail_uri(category) {
            Some(uri) => {
                ui.add(egui::Image::new(uri).max_width(THUMBNAIL_WIDTH))
                    .on_hover_text(category.name.as_str());
            }
            None => {
                ui.label(egui::RichText::new("Sin imagen").weak());
            }
        }
        ui.vertical(|ui| {
            ui.hyperlink_to(category.image.as_str(), &category.image)
                .on_hover_text(category.name.as_str());
            edit = ui.button("Editar").clicked();
        });
    });
    ui.add_space(6.0);

    edit || header.clicked()
}

fn name_header(ui: &mut Ui, name: &str, size: Vec2, selected: bool, colors: &StateColors) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let mut visuals = ui.style().interact_selectable(&response, selected);

        visuals.bg_fill = if selected {
            colors.selected.unwrap_or(visuals.bg_fill)
        } else if response.hovered() {
            colors.hover
        } else {
            colors.default
        };

        let border_radius = 3.0;
        ui.painter().rect_filled(rect, border_radius, visuals.bg_fill);
        ui.painter()
            .rect_stroke(rect, border_radius, visuals.bg_stroke, StrokeKind::Middle);

        // server may hand back blank names; keep the row clickable anyway
        let text = if name.is_empty() { "(sin nombre)" } else { name };
        let text_color = if selected { egui::Color32::WHITE } else { visuals.text_color() };
        ui.painter().text(
            rect.left_center() + Vec2::new(10.0, 0.0),
            Align2::LEFT_CENTER,
            text,
            FontId::proportional(16.0),
            text_color,
        );
    }

    response
}
