//! Backend HTTP client
//!
//! `ChatBackend` is the seam between the dispatcher and the network.
//! `HttpBackend` implements it with a shared `reqwest::Client`.

use crate::api::types::{AgentsListResponse, ChatRequest, ChatResponse};
use crate::config::Config;
use crate::error::ChatError;
use crate::state::{Agent, AgentId};
use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use serde::de::DeserializeOwned;

/// Operations the chat client needs from the backend
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Fetch the agents the user can talk to
    async fn list_agents(&self) -> Result<Vec<Agent>, ChatError>;

    /// Send one chat request to an agent
    async fn chat(&self, agent_id: AgentId, request: &ChatRequest)
        -> Result<ChatResponse, ChatError>;
}

/// HTTP implementation of [`ChatBackend`]
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: Config,
}

impl HttpBackend {
    /// Create a backend client with a fresh connection pool
    pub fn new(config: Config) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a backend client sharing an existing connection pool
    pub fn with_client(client: reqwest::Client, config: Config) -> Self {
        Self { client, config }
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn list_agents(&self) -> Result<Vec<Agent>, ChatError> {
        let url = self.config.agents_url();
        tracing::debug!(url = %url, "Fetching agents");

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let parsed: AgentsListResponse = read_json(response).await?;
        Ok(parsed.data.into_iter().map(Agent::from).collect())
    }

    async fn chat(
        &self,
        agent_id: AgentId,
        request: &ChatRequest,
    ) -> Result<ChatResponse, ChatError> {
        let url = self.config.chat_url(agent_id);
        tracing::debug!(
            url = %url,
            agent_id = agent_id,
            query_len = request.query.len(),
            prior_turns = request.prv_msgs.len(),
            "Sending chat request"
        );

        let response = self
            .client
            .post(&url)
            .header(CACHE_CONTROL, "no-cache")
            .json(request)
            .send()
            .await?;

        let parsed: ChatResponse = read_json(response).await?;
        tracing::debug!(
            response_len = parsed.text_content.len(),
            sources = parsed.search_metadata.as_ref().map_or(0, Vec::len),
            "Received chat response"
        );
        Ok(parsed)
    }
}

/// Check the status and decode a JSON body
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ChatError> {
    let status = response.status();
    if !status.is_success() {
        let status_code = status.as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());

        tracing::error!(
            status_code = status_code,
            error_body = %body,
            "Backend returned error status"
        );
        return Err(ChatError::Status {
            status: status_code,
            body,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        ChatError::MalformedBody(format!("{} - Response body: {}", e, body))
    })
}
