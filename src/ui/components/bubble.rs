use eframe::egui::{self, Align, Color32, CornerRadius, RichText, Stroke, Visuals};

use crate::common::{Author, ChatMessage};

const MAX_BUBBLE_WIDTH: f32 = 400.0;

/// Everything that differs between an own bubble and a peer bubble.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleStyle {
    pub align: Align,
    pub fill: Color32,
    pub stroke: Stroke,
    pub text_color: Color32,
    pub meta_color: Color32,
    pub corner_radius: CornerRadius,
    pub show_sender: bool,
    pub show_check: bool,
}

impl BubbleStyle {
    pub fn for_message(message: &ChatMessage, visuals: &Visuals) -> Self {
        match message.author {
            Author::Me => Self {
                align: Align::Max,
                fill: visuals.selection.bg_fill,
                stroke: Stroke::NONE,
                text_color: Color32::WHITE,
                meta_color: Color32::from_white_alpha(204),
                // Pointed corner towards the sender side.
                corner_radius: CornerRadius {
                    nw: 18,
                    ne: 18,
                    sw: 18,
                    se: 4,
                },
                show_sender: false,
                show_check: message.delivered,
            },
            Author::Peer => Self {
                align: Align::Min,
                fill: visuals.faint_bg_color,
                stroke: visuals.widgets.noninteractive.bg_stroke,
                text_color: visuals.text_color(),
                meta_color: visuals.weak_text_color(),
                corner_radius: CornerRadius {
                    nw: 18,
                    ne: 18,
                    sw: 4,
                    se: 18,
                },
                show_sender: true,
                show_check: false,
            },
        }
    }
}

pub fn render(ui: &mut egui::Ui, message: &ChatMessage) {
    let style = BubbleStyle::for_message(message, ui.visuals());

    ui.with_layout(egui::Layout::top_down(style.align), |ui| {
        egui::Frame::new()
            .fill(style.fill)
            .stroke(style.stroke)
            .corner_radius(style.corner_radius)
            .inner_margin(egui::Margin::symmetric(15, 10))
            .show(ui, |ui| {
                ui.set_max_width(MAX_BUBBLE_WIDTH);

                if style.show_sender {
                    ui.label(
                        RichText::new(&message.sender_name)
                            .size(11.0)
                            .strong()
                            .color(style.meta_color),
                    );
                }

                ui.add(
                    egui::Label::new(RichText::new(&message.text).size(14.0).color(style.text_color))
                        .wrap(),
                );

                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(message.time_label())
                            .size(11.0)
                            .color(style.meta_color),
                    );
                    if style.show_check {
                        ui.label(RichText::new("✓").size(11.0).color(style.meta_color));
                    }
                });
            });
    });
}
