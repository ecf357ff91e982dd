use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Sleep, sleep};

use crate::common::{ChatMessage, SimulatorCommand, SimulatorEvent};

use super::picker::ReplyPicker;
use super::timeline::Timeline;

/// Fixed parameters of the simulated chat partner.
#[derive(Debug, Clone)]
pub struct SimulatorSettings {
    pub peer_name: String,
    pub replies: Vec<String>,
    pub delay: Duration,
}

struct PendingReply {
    send_id: u64,
    deadline: Pin<Box<Sleep>>,
}

/// Background task that answers every user message with a canned reply
/// after a fixed delay. It raises the typing flag when a delay starts; the
/// flag is lowered by whoever appends the reply.
pub struct ResponseSimulator {
    settings: SimulatorSettings,
    picker: Box<dyn ReplyPicker>,
    command_receiver: mpsc::Receiver<SimulatorCommand>,
    event_sender: mpsc::Sender<SimulatorEvent>,
    typing: Arc<watch::Sender<bool>>,
}

impl ResponseSimulator {
    pub fn new(
        settings: SimulatorSettings,
        picker: Box<dyn ReplyPicker>,
        command_receiver: mpsc::Receiver<SimulatorCommand>,
        event_sender: mpsc::Sender<SimulatorEvent>,
        typing: Arc<watch::Sender<bool>>,
    ) -> Self {
        Self {
            settings,
            picker,
            command_receiver,
            event_sender,
            typing,
        }
    }

    pub async fn run(mut self) {
        let mut pending: Option<PendingReply> = None;

        loop {
            tokio::select! {
                command = self.command_receiver.recv() => match command {
                    Some(command) => self.handle_command(command, &mut pending),
                    None => {
                        log::debug!("Simulator command channel closed; stopping");
                        break;
                    }
                },
                send_id = wait_for_deadline(&mut pending), if pending.is_some() => {
                    pending = None;
                    if !self.emit_reply(send_id).await {
                        break;
                    }
                }
            }
        }

        set_typing(&self.typing, false);
    }

    fn handle_command(&mut self, command: SimulatorCommand, pending: &mut Option<PendingReply>) {
        match command {
            SimulatorCommand::UserMessage { send_id, text } => {
                if let Some(previous) = pending.as_ref() {
                    log::debug!(
                        "Send {send_id} supersedes pending reply for send {}",
                        previous.send_id
                    );
                }
                log::debug!(
                    "Scheduling reply to send {send_id} ({} chars) in {:?}",
                    text.chars().count(),
                    self.settings.delay
                );

                *pending = Some(PendingReply {
                    send_id,
                    deadline: Box::pin(sleep(self.settings.delay)),
                });
                set_typing(&self.typing, true);
            }
            SimulatorCommand::CancelPending => {
                if let Some(cancelled) = pending.take() {
                    log::debug!("Cancelled pending reply for send {}", cancelled.send_id);
                }
                set_typing(&self.typing, false);
            }
        }
    }

    /// Returns false once nobody is listening for replies any more.
    async fn emit_reply(&mut self, send_id: u64) -> bool {
        let index = self.picker.pick(self.settings.replies.len().max(1));
        let Some(text) = self.settings.replies.get(index) else {
            log::warn!(
                "No canned reply #{index} (have {}); send {send_id} goes unanswered",
                self.settings.replies.len()
            );
            set_typing(&self.typing, false);
            return true;
        };
        log::debug!("Replying to send {send_id} with canned reply #{index}");

        let message = ChatMessage::incoming(&self.settings.peer_name, text);
        let delivered = self
            .event_sender
            .send(SimulatorEvent::ReplyReady { send_id, message })
            .await
            .is_ok();
        if !delivered {
            log::warn!("Reply for send {send_id} dropped: session is gone");
        }
        delivered
    }
}

fn set_typing(typing: &watch::Sender<bool>, value: bool) {
    typing.send_if_modified(|current| {
        let changed = *current != value;
        *current = value;
        changed
    });
}

async fn wait_for_deadline(pending: &mut Option<PendingReply>) -> u64 {
    match pending {
        Some(reply) => {
            reply.deadline.as_mut().await;
            reply.send_id
        }
        None => std::future::pending().await,
    }
}

/// View-side end of the simulator: validates and echoes user input, then
/// asks the background task for a reply.
pub struct SimulatorHandle {
    self_name: String,
    last_send_id: u64,
    command_sender: mpsc::Sender<SimulatorCommand>,
    typing: Arc<watch::Sender<bool>>,
}

impl SimulatorHandle {
    pub fn new(
        self_name: impl Into<String>,
        command_sender: mpsc::Sender<SimulatorCommand>,
        typing: Arc<watch::Sender<bool>>,
    ) -> Self {
        Self {
            self_name: self_name.into(),
            last_send_id: 0,
            command_sender,
            typing,
        }
    }

    /// Append the self-authored message for `text` to `timeline` and only
    /// then schedule the reply. Blank input is declined with `None`.
    pub fn handle_user_message(&mut self, text: &str, timeline: &mut Timeline) -> Option<usize> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.last_send_id += 1;
        let send_id = self.last_send_id;
        let index = timeline.append(ChatMessage::outgoing(&self.self_name, text));

        if let Err(err) = self.command_sender.try_send(SimulatorCommand::UserMessage {
            send_id,
            text: text.to_string(),
        }) {
            log::warn!("Failed to schedule reply for send {send_id}: {err}");
        }

        Some(index)
    }

    /// Called after the reply for `send_id` is in the timeline. Typing stops
    /// unless a newer send is still waiting for its own reply.
    pub fn reply_appended(&self, send_id: u64) {
        if send_id == self.last_send_id {
            set_typing(&self.typing, false);
        }
    }

    pub fn cancel_pending(&self) {
        if let Err(err) = self.command_sender.try_send(SimulatorCommand::CancelPending) {
            log::warn!("Failed to cancel pending reply: {err}");
        }
    }

    pub fn is_typing(&self) -> bool {
        *self.typing.borrow()
    }

    pub fn typing_updates(&self) -> watch::Receiver<bool> {
        self.typing.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::picker::testing::ScriptedPicker;

    fn handle_pair() -> (SimulatorHandle, mpsc::Receiver<SimulatorCommand>) {
        let (command_tx, command_rx) = mpsc::channel(8);
        let (typing_tx, _typing_rx) = watch::channel(false);
        (SimulatorHandle::new("Du", command_tx, Arc::new(typing_tx)), command_rx)
    }

    fn spawn_simulator(
        replies: &[&str],
        picks: impl IntoIterator<Item = usize>,
    ) -> (
        mpsc::Sender<SimulatorCommand>,
        mpsc::Receiver<SimulatorEvent>,
        Arc<watch::Sender<bool>>,
        tokio::task::JoinHandle<()>,
    ) {
        let (command_tx, command_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(8);
        let (typing_tx, _) = watch::channel(false);
        let typing = Arc::new(typing_tx);
        let settings = SimulatorSettings {
            peer_name: "Anna Schmidt".into(),
            replies: replies.iter().map(|r| r.to_string()).collect(),
            delay: Duration::from_millis(2000),
        };
        let simulator = ResponseSimulator::new(
            settings,
            Box::new(ScriptedPicker::new(picks)),
            command_rx,
            event_tx,
            typing.clone(),
        );
        let task = tokio::spawn(simulator.run());
        (command_tx, event_rx, typing, task)
    }

    #[test]
    fn blank_input_is_declined_without_a_command() {
        let (mut handle, mut commands) = handle_pair();
        let mut timeline = Timeline::new();

        for input in ["", "   ", "\n\t "] {
            assert!(handle.handle_user_message(input, &mut timeline).is_none());
        }
        assert!(timeline.is_empty());
        assert!(commands.try_recv().is_err());
    }

    #[test]
    fn echo_is_appended_before_the_reply_is_scheduled() {
        let (mut handle, mut commands) = handle_pair();
        let mut timeline = Timeline::new();
        let mut appends = timeline.subscribe();

        assert_eq!(handle.handle_user_message("  Hallo \n", &mut timeline), Some(0));
        assert_eq!(appends.try_recv().ok(), Some(0));

        let message = &timeline.all()[0];
        assert_eq!(message.text, "Hallo");
        assert!(message.is_from_me());
        assert!(message.delivered);
        assert_eq!(message.sender_name, "Du");

        match commands.try_recv() {
            Ok(SimulatorCommand::UserMessage { send_id, text }) => {
                assert_eq!(send_id, 1);
                assert_eq!(text, "Hallo");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn send_ids_increase() {
        let (mut handle, mut commands) = handle_pair();
        let mut timeline = Timeline::new();
        handle.handle_user_message("a", &mut timeline);
        handle.handle_user_message("b", &mut timeline);

        let ids: Vec<u64> = std::iter::from_fn(|| commands.try_recv().ok())
            .filter_map(|command| match command {
                SimulatorCommand::UserMessage { send_id, .. } => Some(send_id),
                SimulatorCommand::CancelPending => None,
            })
            .collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn only_the_latest_reply_stops_typing() {
        let (mut handle, _commands) = handle_pair();
        let mut timeline = Timeline::new();
        handle.handle_user_message("a", &mut timeline);
        handle.handle_user_message("b", &mut timeline);
        set_typing(&handle.typing, true);

        handle.reply_appended(1);
        assert!(handle.is_typing());

        handle.reply_appended(2);
        assert!(!handle.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_the_delay_while_still_typing() {
        let (command_tx, mut event_rx, typing, _task) = spawn_simulator(&["eins", "zwei"], [1]);
        let mut typing_rx = typing.subscribe();

        let started = tokio::time::Instant::now();
        command_tx
            .send(SimulatorCommand::UserMessage {
                send_id: 7,
                text: "Hallo".into(),
            })
            .await
            .unwrap();

        typing_rx.changed().await.unwrap();
        assert!(*typing_rx.borrow_and_update());

        let event = event_rx.recv().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2000));
        let SimulatorEvent::ReplyReady { send_id, message } = event;
        assert_eq!(send_id, 7);
        assert_eq!(message.text, "zwei");
        assert_eq!(message.sender_name, "Anna Schmidt");
        assert!(!message.is_from_me());
        assert!(!message.delivered);

        // Lowering the flag is left to whoever appends the reply.
        tokio::task::yield_now().await;
        assert!(*typing_rx.borrow());
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_pick_goes_unanswered() {
        let (command_tx, mut event_rx, typing, _task) = spawn_simulator(&[], []);
        let mut typing_rx = typing.subscribe();

        command_tx
            .send(SimulatorCommand::UserMessage {
                send_id: 1,
                text: "Hallo".into(),
            })
            .await
            .unwrap();
        typing_rx.changed().await.unwrap();
        assert!(*typing_rx.borrow_and_update());

        typing_rx.changed().await.unwrap();
        assert!(!*typing_rx.borrow_and_update());
        assert!(event_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_the_command_channel_closes() {
        let (command_tx, _event_rx, typing, task) = spawn_simulator(&["ok"], []);

        drop(command_tx);
        task.await.unwrap();
        assert!(!*typing.borrow());
    }
}
