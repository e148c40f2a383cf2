// Reusable UI components
// Provides common UI elements for the application

use crate::state::{EditMode, Message, MessageRole};
use eframe::egui;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(147, 51, 234); // Purple
const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 60, 60);
const SUCCESS: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);

/// Render a primary action button
pub fn primary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    ui.add(egui::Button::new(egui::RichText::new(text).strong().color(egui::Color32::WHITE)).fill(ACCENT))
}

/// Render the full-width save button of the edit form
pub fn save_button(ui: &mut egui::Ui) -> egui::Response {
    ui.add_sized(
        [ui.available_width(), 36.0],
        egui::Button::new(egui::RichText::new("💾 Kaydet").strong().color(egui::Color32::WHITE)).fill(SUCCESS),
    )
}

/// Render a small delete button
pub fn delete_button(ui: &mut egui::Ui) -> egui::Response {
    ui.small_button(egui::RichText::new("🗑").color(DANGER))
        .on_hover_text("Sil")
}

/// Label of the edit toggle for the current mode
pub fn edit_toggle_label(mode: EditMode) -> &'static str {
    match mode {
        EditMode::Editing => "▶ Test Et",
        EditMode::Viewing => "✏ Düzenle",
    }
}

/// Render one transcript entry as a chat bubble
/// User messages are right-aligned, assistant messages left-aligned
pub fn message_bubble(ui: &mut egui::Ui, message: &Message) {
    let (align, fill, text_color) = match message.role {
        MessageRole::User => (egui::Align::Max, ACCENT, egui::Color32::WHITE),
        MessageRole::Assistant => (
            egui::Align::Min,
            ui.visuals().faint_bg_color,
            ui.visuals().text_color(),
        ),
    };

    let max_width = ui.available_width() * 0.7;
    ui.with_layout(egui::Layout::top_down(align), |ui| {
        egui::Frame::none()
            .fill(fill)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.label(egui::RichText::new(&message.content).color(text_color))
                    .on_hover_text(message.role.as_str());
            });
    });
}

/// Render a centered placeholder with a title and hint
pub fn empty_state(ui: &mut egui::Ui, icon: &str, title: &str, hint: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.label(egui::RichText::new(icon).size(48.0).color(ACCENT));
        ui.add_space(12.0);
        ui.heading(egui::RichText::new(title).size(20.0));
        ui.add_space(8.0);
        ui.label(egui::RichText::new(hint).weak().size(14.0));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_toggle_label() {
        assert!(edit_toggle_label(EditMode::Viewing).contains("Düzenle"));
        assert!(edit_toggle_label(EditMode::Editing).contains("Test Et"));
    }
}
