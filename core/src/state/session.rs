//! Session controller
//!
//! `SessionState` owns the agent registry, the conversation, and the transient
//! flags. Every mutation goes through one of its named operations so the
//! dispatch invariants are checked in one place:
//!
//! * appending a user turn and deciding whether it dispatches happen in the
//!   same call, so a turn can never be dispatched twice;
//! * at most one request is in flight, and `loading` is true exactly while it is;
//! * completions are matched to the in-flight turn by identity, so a late
//!   answer can never land on the wrong turn.

use crate::dispatch::{ChatReply, DispatchRequest};
use crate::error::ChatError;
use crate::state::agents::{Agent, AgentId, AgentRegistry};
use crate::state::conversation::{ConversationStore, ConversationTurn, TurnId};
use tracing::{debug, info, warn};

/// The single owned state of a chat session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    registry: AgentRegistry,
    conversation: ConversationStore,
    /// Turn whose request is currently outstanding
    in_flight: Option<TurnId>,
    /// Newest turn that has ever been dispatched
    last_dispatched: Option<TurnId>,
    error: bool,
    pending_input: String,
}

impl SessionState {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    // ----- Agent registry -----

    /// Apply a successfully fetched agent list
    ///
    /// Clears the error flag left by an earlier failed fetch. Returns the
    /// number of agents now available.
    pub fn agents_loaded(&mut self, agents: Vec<Agent>) -> usize {
        let count = self.registry.replace(agents);
        self.error = false;
        info!(
            count = count,
            selected = ?self.registry.selected().map(|a| a.id),
            "Agents loaded"
        );
        count
    }

    /// Record a failed agent fetch
    ///
    /// The current list stays as it was; no retry is scheduled.
    pub fn agents_failed(&mut self, err: &ChatError) {
        warn!(error = %err, "Failed to fetch agents from backend");
        self.error = true;
    }

    /// Select an agent by ID
    ///
    /// Unknown IDs leave the selection unchanged. Returns true if the agent was
    /// found and selected.
    pub fn select_agent(&mut self, id: AgentId) -> bool {
        let selected = self.registry.select(id);
        if !selected {
            debug!(agent_id = id, "Ignoring selection of unknown agent");
        }
        selected
    }

    /// All loaded agents
    pub fn agents(&self) -> &[Agent] {
        self.registry.agents()
    }

    /// The selected agent, if any
    pub fn selected_agent(&self) -> Option<&Agent> {
        self.registry.selected()
    }

    // ----- Conversation -----

    /// Replace the text being typed
    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    /// Submit the text being typed as a user turn
    ///
    /// See [`SessionState::append_user_turn`].
    pub fn submit_pending(&mut self) -> Result<Option<DispatchRequest>, ChatError> {
        let text = self.pending_input.clone();
        self.append_user_turn(&text)
    }

    /// Append a user turn and evaluate the dispatch transition
    ///
    /// # Returns
    /// * `Ok(Some(request))` - the turn was appended and must be sent now
    /// * `Ok(None)` - blank text (nothing appended), or a request is already in
    ///   flight (turn appended, not sent)
    ///
    /// # Errors
    /// * `ChatError::NoAgentSelected` - nothing is appended and the pending
    ///   input is kept.
    pub fn append_user_turn(&mut self, text: &str) -> Result<Option<DispatchRequest>, ChatError> {
        if text.trim().is_empty() {
            debug!("Ignoring empty query");
            return Ok(None);
        }
        let agent_id = self
            .registry
            .selected()
            .map(|a| a.id)
            .ok_or(ChatError::NoAgentSelected)?;

        let turn_id = self.conversation.push_user(text);
        self.pending_input.clear();
        Ok(self.begin_dispatch(turn_id, agent_id))
    }

    fn begin_dispatch(&mut self, turn_id: TurnId, agent_id: AgentId) -> Option<DispatchRequest> {
        if let Some(busy) = self.in_flight {
            debug!(turn_id, in_flight = busy, "Request already in flight, not dispatching");
            return None;
        }
        if self.last_dispatched.is_some_and(|last| last >= turn_id) {
            return None;
        }
        let turn = self.conversation.get(turn_id)?;
        let query = turn.text.clone();

        self.in_flight = Some(turn_id);
        self.last_dispatched = Some(turn_id);
        self.error = false;

        debug!(turn_id, agent_id, "Dispatching query");
        Some(DispatchRequest {
            turn_id,
            agent_id,
            query,
            prior_turns: self.conversation.turns().to_vec(),
        })
    }

    /// Reconcile a successful response
    ///
    /// Appends the bot turn unless the conversation was cleared while the
    /// request was out. Returns true if a bot turn was appended.
    pub fn complete_query(&mut self, turn_id: TurnId, reply: ChatReply) -> bool {
        if !self.finish(turn_id) {
            return false;
        }
        if self.conversation.get(turn_id).is_none() {
            debug!(turn_id, "Dropping reply for a cleared conversation");
            return false;
        }
        self.conversation.push_bot(reply.text, reply.citations);
        true
    }

    /// Reconcile a failed request
    ///
    /// No turn is appended; the user turn stays unanswered. A failure for a
    /// conversation that was cleared meanwhile only ends the request. Returns
    /// true if the error flag was raised.
    pub fn fail_query(&mut self, turn_id: TurnId, err: &ChatError) -> bool {
        if !self.finish(turn_id) {
            return false;
        }
        if self.conversation.get(turn_id).is_none() {
            debug!(turn_id, error = %err, "Dropping failure for a cleared conversation");
            return false;
        }
        warn!(turn_id, error = %err, "Error fetching response from backend chat server");
        self.error = true;
        true
    }

    fn finish(&mut self, turn_id: TurnId) -> bool {
        if self.in_flight != Some(turn_id) {
            warn!(turn_id, in_flight = ?self.in_flight, "Ignoring stale completion");
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Discard every turn and reset the pending input and error flag
    ///
    /// Agents and the selection are untouched. An in-flight request is not
    /// cancelled; its answer is dropped when it arrives.
    pub fn clear(&mut self) {
        self.conversation.clear();
        self.pending_input.clear();
        self.error = false;
    }

    /// Turns in the order they happened
    pub fn conversation(&self) -> &[ConversationTurn] {
        self.conversation.turns()
    }

    /// Whether a request is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the last agent fetch or chat request failed
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// Text currently being typed
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }
}
