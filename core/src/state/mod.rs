// State management module
// Agent registry, conversation store, and the session controller that owns both

pub mod agents;
pub mod conversation;
pub mod session;

pub use agents::{Agent, AgentId, AgentRegistry};
pub use conversation::{ConversationStore, ConversationTurn, SearchMetadataItem, Sender, TurnId};
pub use session::SessionState;
