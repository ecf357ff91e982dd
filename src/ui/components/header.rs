use eframe::egui;

pub fn render(ui: &mut egui::Ui, peer_name: &str, typing: bool) {
    ui.horizontal(|ui| {
        ui.heading(peer_name);
        let status = if typing { "schreibt..." } else { "online" };
        ui.label(egui::RichText::new(status).weak());
    });
}
