// AI Search GUI - Main Entry Point
// Native desktop chat widget for asking questions of backend search agents

mod state;
mod ui;

use ai_search_core::Config;
use eframe::egui;
use state::{AppState, BackendBridge};
use ui::render_app_layout;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);
    let bridge = BackendBridge::new(config)?;

    // Configure window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("inScope AI Search")
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "inScope AI Search",
        options,
        Box::new(|cc| Box::new(AiSearchApp::new(bridge, &cc.egui_ctx))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run UI: {}", e))
}

/// Main application struct
/// Owns the widget state and the bridge that runs backend calls
struct AiSearchApp {
    /// Session, citation view flags, and UI preferences
    state: AppState,
    /// Async backend access
    bridge: BackendBridge,
}

impl AiSearchApp {
    /// Create the app and start fetching agents
    fn new(bridge: BackendBridge, ctx: &egui::Context) -> Self {
        bridge.load_agents(ctx);
        Self {
            state: AppState::new(),
            bridge,
        }
    }
}

impl eframe::App for AiSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.bridge.drain() {
            self.state.apply(event);
        }

        let actions = render_app_layout(ctx, &mut self.state);

        if actions.reload_agents {
            self.bridge.load_agents(ctx);
        }
        if actions.submit {
            if let Some(request) = self.state.submit() {
                self.bridge.dispatch(request, ctx);
            }
        }
    }
}
