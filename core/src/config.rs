//! Client configuration
//!
//! The core needs exactly one value: the backend base URL. It is read from the
//! environment, like the rest of the stack's configuration.

use crate::constants::{AGENTS_PATH, BACKEND_URL_ENV, CHAT_SUFFIX, PROXY_PREFIX};
use crate::error::ChatError;
use crate::state::AgentId;
use std::env;

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend configuration
    pub backend: BackendConfig,
}

/// Backend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:7007`
    pub base_url: String,
}

impl Config {
    /// Build a configuration for the given base URL
    ///
    /// Trailing slashes are trimmed so endpoint paths can be appended directly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            backend: BackendConfig {
                base_url: base_url.trim().trim_end_matches('/').to_string(),
            },
        }
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    /// * Returns `ChatError::Config` if `BACKEND_BASE_URL` is unset or is not an
    ///   http(s) URL.
    pub fn from_env() -> Result<Self, ChatError> {
        let raw = env::var(BACKEND_URL_ENV)
            .map_err(|_| ChatError::Config(format!("{} is not set", BACKEND_URL_ENV)))?;
        let config = Self::new(raw);
        config.validate()?;
        Ok(config)
    }

    /// Check that the base URL is usable
    pub fn validate(&self) -> Result<(), ChatError> {
        let url = &self.backend.base_url;
        if url.is_empty() {
            return Err(ChatError::Config("backend base URL is empty".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ChatError::Config(format!(
                "backend base URL must start with http:// or https://, got {}",
                url
            )));
        }
        Ok(())
    }

    /// URL of the agent listing endpoint
    pub fn agents_url(&self) -> String {
        format!("{}{}{}", self.backend.base_url, PROXY_PREFIX, AGENTS_PATH)
    }

    /// URL of the chat endpoint for one agent
    pub fn chat_url(&self, agent_id: AgentId) -> String {
        format!(
            "{}{}{}/{}{}",
            self.backend.base_url, PROXY_PREFIX, AGENTS_PATH, agent_id, CHAT_SUFFIX
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let config = Config::new("http://localhost:7007/");
        assert_eq!(config.backend.base_url, "http://localhost:7007");
        assert_eq!(
            config.agents_url(),
            "http://localhost:7007/api/proxy/backend/api/agents"
        );
        assert_eq!(
            config.chat_url(3),
            "http://localhost:7007/api/proxy/backend/api/agents/3/chat"
        );
    }

    #[test]
    fn test_validate() {
        assert!(Config::new("https://search.example.com").validate().is_ok());
        assert!(Config::new("").validate().is_err());
        assert!(Config::new("localhost:7007").validate().is_err());
    }
}
