use egui::{self, Color32, RichText};

// Common color constants used across dialogs
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(200, 200, 200);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(140, 140, 140);

/// Label on the left, value right-aligned
pub fn info_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{}:", label))
                .size(11.0)
                .color(TEXT_SECONDARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(value).size(11.0).color(TEXT_PRIMARY).monospace());
        });
    });
}
