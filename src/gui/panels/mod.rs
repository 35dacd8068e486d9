mod choice;
mod list;

pub use choice::{choice_panel, ChoiceAction};
pub use list::{list_panel, ListAction};

use eframe::egui;

use super::state::{AppState, Operation, Status, StatusResult, Tab};

/// Bottom bar with tab selection and status
pub fn bottom_bar(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.selectable_value(&mut state.runtime.tab, Tab::Choice, "Choice");
        ui.selectable_value(&mut state.runtime.tab, Tab::List, "List");

        ui.separator();

        if state.is_busy() {
            ui.spinner();
        }

        // Status text
        let status_text = match &state.runtime.status {
            Status::Idle => match &state.photos {
                Some(list) => format!("{} ({} photos)", list.folder.display(), list.len()),
                None => "Open a photo folder".to_string(),
            },
            Status::Working { operation, .. } => match operation {
                Operation::Opening => "Reading photos...".to_string(),
                Operation::Saving => "Saving...".to_string(),
            },
            Status::Done { result, .. } => match result {
                StatusResult::Success(msg) => msg.clone(),
                StatusResult::Error(err) => format!("Error: {}", err),
            },
        };

        // Color status text based on result
        let text_color = match &state.runtime.status {
            Status::Done {
                result: StatusResult::Error(_),
                ..
            } => Some(egui::Color32::from_rgb(255, 100, 100)),
            Status::Done {
                result: StatusResult::Success(_),
                ..
            } => Some(egui::Color32::from_rgb(100, 200, 100)),
            _ => None,
        };

        if let Some(color) = text_color {
            ui.colored_label(color, status_text);
        } else {
            ui.label(status_text);
        }
    });
}

/// Placeholder shown where there is nothing to display
pub(crate) fn show_empty_state(ui: &mut egui::Ui, text: &str) {
    let available = ui.available_size();
    let rect = ui.allocate_space(available).1;

    // Draw placeholder background
    ui.painter()
        .rect_filled(rect, 4.0, egui::Color32::from_gray(30));

    // Center text
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::default(),
        egui::Color32::from_gray(100),
    );
}
