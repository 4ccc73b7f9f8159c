// Backend bridge
// Runs backend requests on a tokio runtime and hands the results back to the UI thread

use ai_search_core::api::{ChatBackend, HttpBackend};
use ai_search_core::dispatch::ChatReply;
use ai_search_core::{Agent, ChatError, Config, DispatchRequest, QueryDispatcher, TurnId};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Result of a backend call, delivered to the UI thread
#[derive(Debug)]
pub enum BackendEvent {
    /// Agent list fetch finished
    AgentsLoaded(Result<Vec<Agent>, ChatError>),
    /// Chat request for a user turn finished
    QueryFinished {
        /// Turn the request answered
        turn_id: TurnId,
        /// Parsed answer or the failure
        result: Result<ChatReply, ChatError>,
    },
}

/// Owns the async runtime and the channel results come back on
///
/// The UI thread never awaits: it spawns requests here and drains finished
/// events at the start of each frame, so state is only touched from one thread.
pub struct BackendBridge {
    runtime: tokio::runtime::Runtime,
    dispatcher: Arc<QueryDispatcher<HttpBackend>>,
    tx: Sender<BackendEvent>,
    rx: Receiver<BackendEvent>,
}

impl BackendBridge {
    /// Create a bridge talking to the configured backend
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (tx, rx) = channel();
        Ok(Self {
            runtime,
            dispatcher: Arc::new(QueryDispatcher::new(HttpBackend::new(config))),
            tx,
            rx,
        })
    }

    /// Fetch the agent list in the background
    pub fn load_agents(&self, ctx: &egui::Context) {
        let dispatcher = self.dispatcher.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = dispatcher.backend().list_agents().await;
            // Receiver is gone only when the app is shutting down
            let _ = tx.send(BackendEvent::AgentsLoaded(result));
            ctx.request_repaint();
        });
    }

    /// Send a dispatch request in the background
    pub fn dispatch(&self, request: DispatchRequest, ctx: &egui::Context) {
        tracing::debug!(turn_id = request.turn_id, agent_id = request.agent_id, "Spawning chat request");
        let dispatcher = self.dispatcher.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let result = dispatcher.send_query(&request).await;
            let _ = tx.send(BackendEvent::QueryFinished {
                turn_id: request.turn_id,
                result,
            });
            ctx.request_repaint();
        });
    }

    /// Take every event that has arrived since the last call
    pub fn drain(&self) -> Vec<BackendEvent> {
        self.rx.try_iter().collect()
    }
}
