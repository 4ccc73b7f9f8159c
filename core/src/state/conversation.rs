//! Conversation data models
//!
//! Defines turns, their senders, the search metadata attached to bot answers,
//! and the append-only store that allocates turn identities.

use serde::{Deserialize, Serialize};

/// Session-unique identity of a turn
///
/// Allocated by [`ConversationStore`] and never reused, including after a clear.
pub type TurnId = u64;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sender {
    /// Message typed by the user
    #[serde(rename = "human")]
    User,
    /// Answer from the agent
    #[serde(rename = "ai")]
    Bot,
}

impl Sender {
    /// Convert the sender to its wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "human",
            Sender::Bot => "ai",
        }
    }
}

/// A source document fragment returned alongside an answer
///
/// Fields the client does not interpret are kept so the item can be sent back
/// to the backend exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchMetadataItem {
    /// Name of the source document
    pub filename: String,
    /// Matched fragment of the document
    pub content: String,
    /// Opaque value the backend attached to the fragment
    pub raw_value: serde_json::Value,
    /// Other document metadata fields (page, source, ...)
    pub metadata_extra: serde_json::Map<String, serde_json::Value>,
    /// Other fields of the item itself
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A single turn in the conversation
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    /// Identity of the turn within the session
    pub id: TurnId,
    /// Who produced the turn
    pub sender: Sender,
    /// Message text
    pub text: String,
    /// Supporting sources; always empty for user turns
    pub citations: Vec<SearchMetadataItem>,
}

impl ConversationTurn {
    /// Whether this turn was typed by the user
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Ordered, append-only list of turns
///
/// Turns are only ever pushed or dropped all at once, never edited or reordered.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    turns: Vec<ConversationTurn>,
    next_id: TurnId,
}

impl ConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn and return its identity
    pub fn push_user(&mut self, text: impl Into<String>) -> TurnId {
        self.push(Sender::User, text.into(), Vec::new())
    }

    /// Append a bot turn with its citations and return its identity
    pub fn push_bot(
        &mut self,
        text: impl Into<String>,
        citations: Vec<SearchMetadataItem>,
    ) -> TurnId {
        self.push(Sender::Bot, text.into(), citations)
    }

    fn push(&mut self, sender: Sender, text: String, citations: Vec<SearchMetadataItem>) -> TurnId {
        let id = self.next_id;
        self.next_id += 1;
        self.turns.push(ConversationTurn {
            id,
            sender,
            text,
            citations,
        });
        id
    }

    /// Drop every turn; identities keep counting up
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// All turns in the order they happened
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Look up a turn by identity
    pub fn get(&self, id: TurnId) -> Option<&ConversationTurn> {
        self.turns.iter().find(|t| t.id == id)
    }

    /// The most recent turn, if any
    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the conversation has no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
