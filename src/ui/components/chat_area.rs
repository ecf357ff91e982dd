use eframe::egui;

use crate::common::ChatMessage;

use super::bubble;

pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage], scroll_to_bottom: bool) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in messages {
                bubble::render(ui, message);
                ui.add_space(15.0);
            }

            if scroll_to_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}
