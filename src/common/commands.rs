/// Commands the session sends down to the response simulator task.
#[derive(Debug, Clone)]
pub enum SimulatorCommand {
    /// A user message was accepted; schedule a reply for it.
    /// Supersedes any reply still pending for an earlier send.
    UserMessage { send_id: u64, text: String },
    /// Drop the pending reply, if any, and go idle.
    CancelPending,
}
