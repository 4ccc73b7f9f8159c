// Agent registry
// Holds the agents fetched from the backend and the current selection

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique identifier for an agent, as assigned by the backend
pub type AgentId = i64;

/// A selectable backend agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier for the agent
    pub id: AgentId,
    /// Display name of the agent
    pub name: String,
}

impl Agent {
    /// Create a new agent with the given ID and name
    pub fn new(id: AgentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Registry of the agents offered by the backend
///
/// Agents keep the order the backend returned them in. Once a list has been
/// loaded, the selection always points at a member of it, or is empty when the
/// list itself is empty.
#[derive(Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
    selected_agent_id: Option<AgentId>,
}

impl AgentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the agent list with a freshly fetched one
    ///
    /// Duplicate ids keep their first occurrence. A previous selection that is
    /// still present survives; otherwise the first agent becomes selected.
    /// Returns the number of agents kept.
    pub fn replace(&mut self, agents: Vec<Agent>) -> usize {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(agents.len());
        for agent in agents {
            if seen.insert(agent.id) {
                unique.push(agent);
            } else {
                tracing::warn!(agent_id = agent.id, "Dropping duplicate agent id");
            }
        }
        self.agents = unique;

        let keep_selection = self
            .selected_agent_id
            .is_some_and(|id| self.agents.iter().any(|a| a.id == id));
        if !keep_selection {
            self.selected_agent_id = self.agents.first().map(|a| a.id);
        }
        self.agents.len()
    }

    /// Select an agent by ID
    /// Returns true if the agent was found and selected
    pub fn select(&mut self, id: AgentId) -> bool {
        if self.get(id).is_some() {
            self.selected_agent_id = Some(id);
            true
        } else {
            false
        }
    }

    /// Get a reference to the selected agent, if any
    pub fn selected(&self) -> Option<&Agent> {
        self.selected_agent_id.and_then(|id| self.get(id))
    }

    /// Look up an agent by ID
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// All agents, in the order the backend returned them
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Get the number of agents in the registry
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agents are loaded
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
