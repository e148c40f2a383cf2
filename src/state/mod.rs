// State management module
// Handles agents, selection, the conversation session, and UI state

pub mod agent;
pub mod app_state;
pub mod session;

pub use agent::{Agent, AgentId, AgentModel};
pub use app_state::AppState;
pub use session::{EditMode, Message, MessageRole};
