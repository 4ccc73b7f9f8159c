//! Backend API module
//!
//! Wire types for the two backend endpoints and the HTTP client that calls them.

pub mod client;
pub mod types;

pub use client::{ChatBackend, HttpBackend};
pub use types::{AgentRecord, AgentsListResponse, ChatRequest, ChatResponse, PriorMessage};
