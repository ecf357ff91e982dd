use eframe::egui;

const INDICATOR_HEIGHT: f32 = 18.0;

pub fn render(ui: &mut egui::Ui, peer_name: &str, typing: bool) {
    ui.horizontal(|ui| {
        ui.set_min_height(INDICATOR_HEIGHT);
        if typing {
            ui.spinner();
            ui.label(egui::RichText::new(format!("{peer_name} schreibt...")).weak());
        }
    });
}
