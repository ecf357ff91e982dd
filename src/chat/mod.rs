pub mod picker;
pub mod script;
pub mod session;
pub mod simulator;
pub mod timeline;

pub use picker::RandomPicker;
pub use session::ChatSession;
