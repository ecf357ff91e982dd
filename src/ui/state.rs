use tokio::sync::mpsc;

/// View-local state that is not part of the conversation itself.
pub struct AppState {
    pub input_text: String,
    /// Set when the timeline grew; cleared after the next frame scrolls.
    pub scroll_to_bottom: bool,
    timeline_updates: mpsc::UnboundedReceiver<usize>,
}

impl AppState {
    pub fn new(timeline_updates: mpsc::UnboundedReceiver<usize>) -> Self {
        Self {
            input_text: String::new(),
            // Show the newest seeded message on the first frame.
            scroll_to_bottom: true,
            timeline_updates,
        }
    }

    /// Drain append notifications and request a scroll if there were any.
    pub fn take_timeline_updates(&mut self) {
        while let Ok(index) = self.timeline_updates.try_recv() {
            log::trace!("Timeline grew to index {index}");
            self.scroll_to_bottom = true;
        }
    }
}
