//! Query dispatcher
//!
//! Turns a [`DispatchRequest`] produced by [`SessionState`] into a backend call
//! and folds the outcome back into the state. The state machine itself lives
//! in `SessionState`; this module only performs I/O.

use crate::api::{ChatBackend, ChatRequest, ChatResponse};
use crate::error::ChatError;
use crate::state::{AgentId, ConversationTurn, SearchMetadataItem, SessionState, TurnId};

/// A query that must be sent now
///
/// Only `SessionState::append_user_turn` hands these out, and only once per
/// user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRequest {
    /// The user turn being answered
    pub turn_id: TurnId,
    /// Agent the query is addressed to
    pub agent_id: AgentId,
    /// Text of the user turn
    pub query: String,
    /// Every turn at dispatch time, including the triggering one
    pub prior_turns: Vec<ConversationTurn>,
}

/// A parsed agent answer
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    /// Answer text
    pub text: String,
    /// Supporting sources, in the order the backend returned them
    pub citations: Vec<SearchMetadataItem>,
}

impl From<ChatResponse> for ChatReply {
    fn from(response: ChatResponse) -> Self {
        Self {
            text: response.text_content,
            citations: response
                .search_metadata
                .unwrap_or_default()
                .into_iter()
                .map(SearchMetadataItem::from)
                .collect(),
        }
    }
}

/// Sends queries and agent fetches through a [`ChatBackend`]
#[derive(Debug, Clone)]
pub struct QueryDispatcher<B> {
    backend: B,
}

impl<B: ChatBackend> QueryDispatcher<B> {
    /// Create a dispatcher over the given backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The backend requests go through
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Send one query to the backend
    ///
    /// No timeout, cancellation, or retry is applied.
    pub async fn send_query(&self, request: &DispatchRequest) -> Result<ChatReply, ChatError> {
        let body = ChatRequest::from(request);
        let response = self.backend.chat(request.agent_id, &body).await?;
        Ok(ChatReply::from(response))
    }

    /// Send a dispatch request and reconcile the outcome into `state`
    ///
    /// Returns true if a bot turn was appended.
    pub async fn run(&self, state: &mut SessionState, request: DispatchRequest) -> bool {
        match self.send_query(&request).await {
            Ok(reply) => state.complete_query(request.turn_id, reply),
            Err(e) => {
                state.fail_query(request.turn_id, &e);
                false
            }
        }
    }

    /// Append `text` as a user turn and, if that dispatches, wait for the answer
    ///
    /// Returns true if a bot turn was appended.
    ///
    /// # Errors
    /// * `ChatError::NoAgentSelected` if no agent is selected. Request failures
    ///   are not returned; they set the session's error flag.
    pub async fn submit(&self, state: &mut SessionState, text: &str) -> Result<bool, ChatError> {
        match state.append_user_turn(text)? {
            Some(request) => Ok(self.run(state, request).await),
            None => Ok(false),
        }
    }

    /// Fetch the agent list and apply it to `state`
    ///
    /// Returns the number of agents loaded, or 0 if the fetch failed.
    pub async fn load_agents(&self, state: &mut SessionState) -> usize {
        match self.backend.list_agents().await {
            Ok(agents) => state.agents_loaded(agents),
            Err(e) => {
                state.agents_failed(&e);
                0
            }
        }
    }
}
