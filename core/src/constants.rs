//! Backend protocol constants
//!
//! Endpoint paths and fixed request values shared by the client and its tests.

/// Path prefix of the backend proxy, relative to the configured base URL
pub const PROXY_PREFIX: &str = "/api/proxy/backend/api";

/// Agent listing endpoint, relative to [`PROXY_PREFIX`]
pub const AGENTS_PATH: &str = "/agents";

/// Chat endpoint suffix, appended to `/agents/{id}`
pub const CHAT_SUFFIX: &str = "/chat";

/// Streaming is never requested; the backend answers with one JSON document
pub const STREAM_RESPONSES: bool = false;

/// Environment variable holding the backend base URL
pub const BACKEND_URL_ENV: &str = "BACKEND_BASE_URL";
