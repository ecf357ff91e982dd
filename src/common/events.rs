use super::types::ChatMessage;

/// Events sent from the response simulator back to the session.
#[derive(Debug, Clone)]
pub enum SimulatorEvent {
    /// The delay for `send_id` elapsed and a peer reply was produced.
    ReplyReady { send_id: u64, message: ChatMessage },
}
