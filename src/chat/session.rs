use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::common::{ChatMessage, SimulatorEvent};
use crate::config::AppConfig;

use super::picker::ReplyPicker;
use super::script::seed_conversation;
use super::simulator::{ResponseSimulator, SimulatorHandle, SimulatorSettings};
use super::timeline::Timeline;

/// One open conversation: the timeline plus the simulator answering into it.
/// Dropping the session stops the simulator task.
pub struct ChatSession {
    timeline: Timeline,
    simulator: SimulatorHandle,
    event_receiver: mpsc::Receiver<SimulatorEvent>,
    peer_name: String,
    task: JoinHandle<()>,
}

impl ChatSession {
    pub fn start(config: &AppConfig, picker: Box<dyn ReplyPicker>, runtime: &Handle) -> Self {
        // Session -> simulator
        let (cmd_tx, cmd_rx) = mpsc::channel(100);
        // Simulator -> session
        let (event_tx, event_rx) = mpsc::channel(100);
        let (typing_tx, _) = watch::channel(false);
        let typing = Arc::new(typing_tx);

        let settings = SimulatorSettings {
            peer_name: config.peer_name.clone(),
            replies: config.replies.clone(),
            delay: Duration::from_millis(config.reply_delay_ms),
        };
        let simulator = ResponseSimulator::new(settings, picker, cmd_rx, event_tx, typing.clone());
        let task = runtime.spawn(simulator.run());

        let timeline = if config.seed_history {
            Timeline::with_history(seed_conversation(&config.self_name, &config.peer_name))
        } else {
            Timeline::new()
        };

        log::info!(
            "Chat session with {} started ({} messages, {} canned replies)",
            config.peer_name,
            timeline.len(),
            config.replies.len()
        );

        Self {
            timeline,
            simulator: SimulatorHandle::new(config.self_name.clone(), cmd_tx, typing),
            event_receiver: event_rx,
            peer_name: config.peer_name.clone(),
            task,
        }
    }

    /// Echo `text` into the timeline and schedule a reply. Returns the new
    /// message's position, or `None` for blank input.
    pub fn submit(&mut self, text: &str) -> Option<usize> {
        let index = self.simulator.handle_user_message(text, &mut self.timeline)?;
        log::debug!("Appended own message at {index}");
        Some(index)
    }

    /// Move every reply that arrived since the last call into the timeline.
    /// Typing stops only once the reply to the latest send is appended.
    pub fn pump(&mut self) -> usize {
        let mut appended = 0;
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                SimulatorEvent::ReplyReady { send_id, message } => {
                    let index = self.timeline.append(message);
                    log::debug!("Appended reply to send {send_id} at {index}");
                    self.simulator.reply_appended(send_id);
                    appended += 1;
                }
            }
        }
        appended
    }

    pub fn cancel_pending(&self) {
        self.simulator.cancel_pending();
    }

    pub fn is_typing(&self) -> bool {
        self.simulator.is_typing()
    }

    pub fn typing_updates(&self) -> watch::Receiver<bool> {
        self.simulator.typing_updates()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.timeline.all()
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<usize> {
        self.timeline.subscribe()
    }

    pub fn peer_name(&self) -> &str {
        &self.peer_name
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.task.abort();
    }
}
