// State management module
// Widget state (session + citation view) and the bridge to the async backend

pub mod app_state;
pub mod bridge;

pub use app_state::AppState;
pub use bridge::BackendBridge;
