use eframe::egui;
use egui_extras::{Column, TableBuilder};

use super::show_empty_state;
use crate::gui::state::AppState;
use crate::output::TABLE_TITLES;
use crate::photo::DateChoice;

const ROW_HEIGHT: f32 = 20.0;

/// Actions requested from the list tab toolbar
#[derive(Default)]
pub struct ListAction {
    pub open_requested: bool,
    pub save_requested: bool,
    pub about_requested: bool,
}

/// List tab: toolbar and a table of every photo with its date candidates
pub fn list_panel(ui: &mut egui::Ui, state: &mut AppState) -> ListAction {
    let mut action = ListAction::default();
    let busy = state.is_busy();

    ui.horizontal(|ui| {
        if ui
            .add_enabled(!busy, egui::Button::new("Open Folder"))
            .clicked()
        {
            action.open_requested = true;
        }

        let can_save = !busy && state.photos.as_ref().is_some_and(|l| l.has_changes());
        if ui
            .add_enabled(can_save, egui::Button::new("Save"))
            .on_hover_text("Move dropped photos and write chosen dates")
            .clicked()
        {
            action.save_requested = true;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("About").clicked() {
                action.about_requested = true;
            }
        });
    });

    ui.separator();

    let Some(list) = state.photos.as_ref().filter(|l| !l.is_empty()) else {
        show_empty_state(ui, "No photos to list");
        return action;
    };

    let date_cell = |ui: &mut egui::Ui, text: &str, chosen: bool| {
        if chosen {
            ui.label(egui::RichText::new(text).strong());
        } else {
            ui.label(text);
        }
    };

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(160.0).resizable(true))
        .columns(Column::auto().at_least(150.0), 3)
        .column(Column::remainder())
        .header(ROW_HEIGHT, |mut header| {
            for title in TABLE_TITLES {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, list.len(), |mut row| {
                let photo = &list.photos[row.index()];
                let choice = photo.choice();
                row.col(|ui| {
                    ui.label(photo.file_name());
                });
                for candidate in DateChoice::ALL {
                    row.col(|ui| {
                        date_cell(ui, photo.dates.get(candidate), candidate == choice);
                    });
                }
                row.col(|ui| {
                    if photo.drop {
                        ui.label(egui::RichText::new("Yes").strong());
                    }
                });
            });
        });

    action
}
