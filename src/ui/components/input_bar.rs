use eframe::egui;

const INPUT_ID: &str = "message_input";

/// Draw the message box and Send button. Returns true when the user asked to
/// send; Enter sends, Shift+Enter inserts a newline.
pub fn render(ui: &mut egui::Ui, input_text: &mut String) -> bool {
    let input_id = egui::Id::new(INPUT_ID);
    let mut send = false;

    // Enter has to be consumed before the text edit sees it.
    let focused = ui.memory(|memory| memory.has_focus(input_id));
    if focused && ui.input_mut(take_plain_enter) {
        send = true;
    }

    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        if ui.button("Senden").clicked() {
            send = true;
        }

        ui.add(
            egui::TextEdit::multiline(input_text)
                .id(input_id)
                .desired_rows(1)
                .desired_width(ui.available_width())
                .hint_text("Nachricht schreiben..."),
        );
    });

    send
}

/// Remove unmodified Enter presses from this frame's input. Enter with any
/// modifier is left for the text edit.
fn take_plain_enter(input: &mut egui::InputState) -> bool {
    let before = input.events.len();
    input.events.retain(|event| {
        !matches!(
            event,
            egui::Event::Key {
                key: egui::Key::Enter,
                pressed: true,
                modifiers,
                ..
            } if modifiers.is_none()
        )
    });
    input.events.len() != before
}
