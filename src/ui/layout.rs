// Main application layout
// Menu bar, agent selector, conversation, and the message composer

use crate::state::AppState;
use crate::ui::components::*;
use ai_search_core::Sender;
use eframe::egui;

/// What the user asked for during this frame
/// Actions that need the backend are carried out by the caller
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiActions {
    /// The typed message should be submitted
    pub submit: bool,
    /// The agent list should be fetched again
    pub reload_agents: bool,
}

/// Render the main application layout
/// Includes menu bar, composer, and the conversation area
pub fn render_app_layout(ctx: &egui::Context, state: &mut AppState) -> UiActions {
    let mut actions = UiActions::default();

    render_menu_bar(ctx, state, &mut actions);

    // Composer pinned to the bottom
    egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
        ui.add_space(8.0);
        actions.submit = render_composer(ui, state);
        ui.add_space(8.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(8.0);
        render_agent_selector(ui, state);
        ui.add_space(8.0);

        if state.ui_state.notice_visible {
            notice_banner(ui);
            ui.add_space(8.0);
        }
        ui.separator();

        render_conversation(ui, state);
    });

    actions
}

/// Render the top menu bar
fn render_menu_bar(ctx: &egui::Context, state: &mut AppState, actions: &mut UiActions) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            // File menu
            ui.menu_button("File", |ui| {
                if ui.button("Reload Agents").clicked() {
                    actions.reload_agents = true;
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            // Conversation menu
            ui.menu_button("Conversation", |ui| {
                if ui.button("🗑 Clear Conversation").clicked() {
                    state.clear_conversation();
                    ui.close_menu();
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                let mut dark_mode = ctx.style().visuals.dark_mode;
                if ui.checkbox(&mut dark_mode, "Dark Mode").changed() {
                    let visuals = if dark_mode {
                        egui::Visuals::dark()
                    } else {
                        egui::Visuals::light()
                    };
                    ctx.set_visuals(visuals);
                }
                ui.checkbox(&mut state.ui_state.notice_visible, "Show Notice");
            });
        });
    });
}

/// Render the agent drop-down
fn render_agent_selector(ui: &mut egui::Ui, state: &mut AppState) {
    let selected_id = state.session.selected_agent().map(|a| a.id);
    let selected_text = state
        .session
        .selected_agent()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| "No agent selected".to_string());

    let mut choice = None;
    ui.horizontal(|ui| {
        egui::ComboBox::from_label("Select an agent to chat with")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for agent in state.session.agents() {
                    let is_selected = selected_id == Some(agent.id);
                    if ui.selectable_label(is_selected, &agent.name).clicked() {
                        choice = Some(agent.id);
                    }
                }
            });
    });
    if let Some(id) = choice {
        state.session.select_agent(id);
    }

    if state.session.agents().is_empty() {
        ui.label(
            egui::RichText::new("No agents loaded. Use File > Reload Agents to try again.")
                .weak()
                .italics(),
        );
    } else if state.ui_state.needs_agent {
        ui.label(egui::RichText::new("Select an agent before asking a question.").weak());
    }
}

/// Render the scrollable conversation
fn render_conversation(ui: &mut egui::Ui, state: &mut AppState) {
    // Split borrows: turns are read while citation flags are toggled
    let AppState {
        session, viewer, ..
    } = state;

    egui::ScrollArea::vertical()
        .id_source("conversation_scroll")
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for turn in session.conversation() {
                ui.add_space(6.0);
                match turn.sender {
                    Sender::User => user_message(ui, &turn.text),
                    Sender::Bot => {
                        assistant_message(ui, &turn.text);
                        citations_panel(ui, viewer, turn);
                    }
                }
            }

            ui.add_space(6.0);
            if session.is_loading() {
                loading_message(ui);
            }
            if session.has_error() {
                error_message(ui);
            }
        });
}

/// Render the input line and send button
/// Returns true if the user submitted
fn render_composer(ui: &mut egui::Ui, state: &mut AppState) -> bool {
    let loading = state.session.is_loading();
    let mut input = state.session.pending_input().to_string();
    let mut submitted = false;

    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        let send = ui.add_enabled(!loading, egui::Button::new("Send"));
        let edit = ui.add(
            egui::TextEdit::singleline(&mut input)
                .hint_text("Ask a question")
                .desired_width(ui.available_width()),
        );
        let enter = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        submitted = !loading && (send.clicked() || enter);
        if enter {
            edit.request_focus();
        }
    });

    if input != state.session.pending_input() {
        state.session.set_pending_input(input);
    }
    submitted
}
