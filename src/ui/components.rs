// Reusable UI components
// Message bubbles, status lines, and the citations panel

use ai_search_core::{CitationViewer, ConversationTurn};
use eframe::egui;

const USER_BUBBLE: egui::Color32 = egui::Color32::from_rgb(0, 102, 204);
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(220, 0, 0);

/// Render a user message, right-aligned
pub fn user_message(ui: &mut egui::Ui, text: &str) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
        egui::Frame::none()
            .fill(USER_BUBBLE)
            .rounding(egui::Rounding::same(8.0))
            .inner_margin(egui::Margin::same(8.0))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
            });
    });
}

/// Render an assistant message, left-aligned
pub fn assistant_message(ui: &mut egui::Ui, text: &str) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.label(text);
        });
}

/// Render the "Citations" panel under a bot answer
/// Does nothing for turns without citations
pub fn citations_panel(ui: &mut egui::Ui, viewer: &mut CitationViewer, turn: &ConversationTurn) {
    let Some(panel) = viewer.panel(turn) else {
        return;
    };

    let mut toggled_rows = Vec::new();
    let response = egui::CollapsingHeader::new("Citations")
        .id_source(("citations", turn.id))
        .open(Some(panel.expanded))
        .show(ui, |ui| {
            for entry in &panel.entries {
                let row = egui::CollapsingHeader::new(entry.citation.title.as_str())
                    .id_source(("citation", turn.id, entry.index))
                    .open(Some(entry.content.is_some()))
                    .show(ui, |ui| {
                        if let Some(content) = entry.content {
                            ui.label(egui::RichText::new(content).size(12.0));
                        }
                    });
                if row.header_response.clicked() {
                    toggled_rows.push(entry.index);
                }
            }
        });

    if response.header_response.clicked() {
        viewer.toggle_group(turn.id);
    }
    for index in toggled_rows {
        viewer.toggle_citation(turn.id, index);
    }
}

/// Render the loading indicator shown while a request is in flight
pub fn loading_message(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(egui::RichText::new("Searching...").weak().italics());
    });
}

/// Render the generic error line
pub fn error_message(ui: &mut egui::Ui) {
    ui.colored_label(
        ERROR_TEXT,
        "Error fetching response from backend chat bot server",
    );
}

/// Render the notice shown above the conversation
pub fn notice_banner(ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.label(
            egui::RichText::new(
                "AI will search documentation and then summarize and synthesize an answer.",
            )
            .strong(),
        );
        ui.label(egui::RichText::new("Verify any information before taking action.").weak());
    });
}
