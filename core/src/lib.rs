//! AI Search Core Library
//!
//! Conversation orchestration for the AI search chat client: agent selection,
//! the dispatch state machine, the backend HTTP client, and citation handling.
//! The desktop front end lives in the root crate; the `ask` binary is in `src/bin/`.

pub mod api;
pub mod citations;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod error;
/// Session state management
///
/// Handles the agent registry, the conversation store, and the transient flags
/// that drive dispatch.
pub mod state;

pub use citations::{extract_citations, Citation, CitationViewer};
pub use config::Config;
pub use dispatch::{DispatchRequest, QueryDispatcher};
pub use error::ChatError;
pub use state::{Agent, AgentId, ConversationTurn, SearchMetadataItem, Sender, SessionState, TurnId};
