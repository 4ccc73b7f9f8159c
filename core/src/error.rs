//! Error types for the chat client
//!
//! Every failure the core can hit is typed here so it can be logged where it is
//! folded into the session's single `error` flag.

use thiserror::Error;

/// Chat client error types
///
/// The session state does not discriminate between these: any of them raised by
/// an agent fetch or a chat request surfaces to the user as the same error flag.
#[derive(Error, Debug)]
pub enum ChatError {
    /// The HTTP request could not be sent or the body could not be read
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Backend answered with a non-success status code
    #[error("Backend returned error status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// Response body did not match the expected JSON shape
    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    /// A query was submitted while no agent is selected
    #[error("No agent selected")]
    NoAgentSelected,

    /// Configuration is missing or invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Catch-all for unexpected errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        ChatError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(err: serde_json::Error) -> Self {
        ChatError::MalformedBody(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChatError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Backend returned error status 502: bad gateway"
        );

        assert_eq!(ChatError::NoAgentSelected.to_string(), "No agent selected");
        assert_eq!(
            ChatError::Config("BACKEND_BASE_URL is not set".to_string()).to_string(),
            "Invalid configuration: BACKEND_BASE_URL is not set"
        );
    }

    #[test]
    fn test_from_serde_error_is_malformed_body() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ChatError = parse_err.into();
        assert!(matches!(err, ChatError::MalformedBody(_)));
    }

    #[test]
    fn test_from_anyhow_is_internal() {
        let err: ChatError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, ChatError::Internal(_)));
        assert!(err.to_string().contains("boom"));
    }
}
