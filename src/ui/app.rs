use std::time::Duration;

use eframe::egui;

use crate::chat::ChatSession;

use super::components::{chat_area, header, input_bar, typing_indicator};
use super::state::AppState;

/// Replies arrive from a background task, so keep polling while idle.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct ChatApp {
    session: ChatSession,
    state: AppState,
}

impl ChatApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, mut session: ChatSession) -> Self {
        let timeline_updates = session.subscribe();
        Self {
            session,
            state: AppState::new(timeline_updates),
        }
    }

    fn handle_session_events(&mut self) {
        self.session.pump();
        self.state.take_timeline_updates();
    }

    fn submit_input(&mut self) {
        if self.session.submit(&self.state.input_text).is_some() {
            self.state.input_text.clear();
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_session_events();
        let typing = self.session.is_typing();

        egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
            header::render(ui, self.session.peer_name(), typing);
        });

        egui::TopBottomPanel::bottom("chat_input").show(ctx, |ui| {
            typing_indicator::render(ui, self.session.peer_name(), typing);
            if input_bar::render(ui, &mut self.state.input_text) {
                self.submit_input();
                ctx.request_repaint();
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(ui, self.session.messages(), self.state.scroll_to_bottom);
        });
        self.state.scroll_to_bottom = false;

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}
