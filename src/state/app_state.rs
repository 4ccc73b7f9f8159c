// Application state management
// Chat session, citation view flags, and UI preferences

use crate::state::bridge::BackendEvent;
use ai_search_core::{ChatError, CitationViewer, DispatchRequest, SessionState};

/// Main application state
/// Everything the widget renders, mutated only on the UI thread
#[derive(Debug, Default)]
pub struct AppState {
    /// Agents, conversation, and dispatch flags
    pub session: SessionState,
    /// Expand/collapse flags for citation panels
    pub viewer: CitationViewer,
    /// UI state preferences
    pub ui_state: UiState,
}

/// UI-specific state
#[derive(Debug, Clone)]
pub struct UiState {
    /// Whether the "verify before acting" notice is shown
    pub notice_visible: bool,
    /// Set when a submission was refused because no agent is selected
    pub needs_agent: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            notice_visible: true,
            needs_agent: false,
        }
    }
}

impl AppState {
    /// Create a new application state with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished backend call into the session
    pub fn apply(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::AgentsLoaded(Ok(agents)) => {
                self.session.agents_loaded(agents);
                self.ui_state.needs_agent = false;
            }
            BackendEvent::AgentsLoaded(Err(e)) => self.session.agents_failed(&e),
            BackendEvent::QueryFinished { turn_id, result } => match result {
                Ok(reply) => {
                    self.session.complete_query(turn_id, reply);
                }
                Err(e) => {
                    self.session.fail_query(turn_id, &e);
                }
            },
        }
    }

    /// Submit the typed text
    /// Returns the request to send, if the submission dispatched
    pub fn submit(&mut self) -> Option<DispatchRequest> {
        match self.session.submit_pending() {
            Ok(request) => {
                self.ui_state.needs_agent = false;
                request
            }
            Err(ChatError::NoAgentSelected) => {
                tracing::warn!("Submission refused: no agent selected");
                self.ui_state.needs_agent = true;
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "Submission failed");
                None
            }
        }
    }

    /// Clear the conversation and forget citation flags of removed turns
    pub fn clear_conversation(&mut self) {
        self.session.clear();
        self.viewer.retain_turns(self.session.conversation());
    }
}
