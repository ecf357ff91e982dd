pub mod commands;
pub mod events;
pub mod types;

pub use commands::SimulatorCommand;
pub use events::SimulatorEvent;
pub use types::{Author, ChatMessage};
