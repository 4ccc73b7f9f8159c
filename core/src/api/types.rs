//! Backend wire types
//!
//! Serde structs mirroring the JSON the backend proxy sends and accepts.

use crate::constants::STREAM_RESPONSES;
use crate::dispatch::DispatchRequest;
use crate::state::{Agent, AgentId, ConversationTurn, SearchMetadataItem, Sender};
use serde::{Deserialize, Serialize};

/// Response of `GET /agents`
#[derive(Debug, Deserialize)]
pub struct AgentsListResponse {
    /// Agents offered by the backend
    pub data: Vec<AgentRecord>,
}

/// One agent as the backend describes it; unknown fields are ignored
#[derive(Debug, Deserialize)]
pub struct AgentRecord {
    /// Backend-assigned identifier
    pub id: AgentId,
    /// Display name
    pub agent_name: String,
}

impl From<AgentRecord> for Agent {
    fn from(record: AgentRecord) -> Self {
        Agent::new(record.id, record.agent_name)
    }
}

/// Body of `POST /agents/{id}/chat`
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// The user's question
    pub query: String,
    /// Always false; the client expects a single JSON response
    pub stream: bool,
    /// Every turn of the conversation at dispatch time
    #[serde(rename = "prvMsgs")]
    pub prv_msgs: Vec<PriorMessage>,
}

impl From<&DispatchRequest> for ChatRequest {
    fn from(request: &DispatchRequest) -> Self {
        Self {
            query: request.query.clone(),
            stream: STREAM_RESPONSES,
            prv_msgs: request.prior_turns.iter().map(PriorMessage::from).collect(),
        }
    }
}

/// A previous turn as sent back to the backend
#[derive(Debug, Serialize)]
pub struct PriorMessage {
    /// Message text
    pub text: String,
    /// `"human"` or `"ai"`
    pub sender: Sender,
    /// Sources of a bot answer; omitted for user turns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_metadata: Option<Vec<SearchMetadataRecord>>,
}

impl From<&ConversationTurn> for PriorMessage {
    fn from(turn: &ConversationTurn) -> Self {
        let search_metadata = match turn.sender {
            Sender::User => None,
            Sender::Bot => Some(turn.citations.iter().map(SearchMetadataRecord::from).collect()),
        };
        Self {
            text: turn.text.clone(),
            sender: turn.sender,
            search_metadata,
        }
    }
}

/// Response of `POST /agents/{id}/chat`
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// The agent's answer
    pub text_content: String,
    /// Sources backing the answer; may be absent or null
    #[serde(default)]
    pub search_metadata: Option<Vec<SearchMetadataRecord>>,
}

/// One source fragment on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadataRecord {
    /// Document metadata
    pub metadata: DocumentMetadata,
    /// Matched fragment of the document
    #[serde(default)]
    pub page_content: String,
    /// Opaque value attached by the backend
    #[serde(default)]
    pub value: serde_json::Value,
    /// Fields not interpreted by the client
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Metadata of a source document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Name of the source document
    pub filename: String,
    /// Fields not interpreted by the client
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl From<SearchMetadataRecord> for SearchMetadataItem {
    fn from(record: SearchMetadataRecord) -> Self {
        Self {
            filename: record.metadata.filename,
            content: record.page_content,
            raw_value: record.value,
            metadata_extra: record.metadata.extra,
            extra: record.extra,
        }
    }
}

impl From<&SearchMetadataItem> for SearchMetadataRecord {
    fn from(item: &SearchMetadataItem) -> Self {
        Self {
            metadata: DocumentMetadata {
                filename: item.filename.clone(),
                extra: item.metadata_extra.clone(),
            },
            page_content: item.content.clone(),
            value: item.raw_value.clone(),
            extra: item.extra.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agents_list_ignores_extra_fields() {
        let json = r#"{"data":[{"id":4,"agent_name":"Docs","description":"x","model":"m"}]}"#;
        let parsed: AgentsListResponse = serde_json::from_str(json).unwrap();
        let agent = Agent::from(parsed.data.into_iter().next().unwrap());
        assert_eq!(agent, Agent::new(4, "Docs"));
    }

    #[test]
    fn test_chat_response_metadata_absent_or_null() {
        let absent: ChatResponse = serde_json::from_str(r#"{"text_content":"hi"}"#).unwrap();
        assert!(absent.search_metadata.is_none());

        let null: ChatResponse =
            serde_json::from_str(r#"{"text_content":"hi","search_metadata":null}"#).unwrap();
        assert!(null.search_metadata.is_none());
    }

    #[test]
    fn test_metadata_without_filename_is_malformed() {
        let json = r#"{"text_content":"hi","search_metadata":[{"metadata":{},"page_content":"p"}]}"#;
        assert!(serde_json::from_str::<ChatResponse>(json).is_err());
    }
}
