use eframe::egui;
use std::path::{Path, PathBuf};

/// Modal windows of the application
pub enum Dialog {
    /// "Ready to save changes" confirmation
    ConfirmSave,
    /// Error message with optional details, one per line
    Error { message: String, details: Vec<String> },
    About,
}

/// What the user did with a dialog this frame
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Confirmed,
    Closed,
}

impl Dialog {
    /// Returns Some(outcome) once the user answered, None while still open
    pub fn show(&self, ctx: &egui::Context) -> Option<DialogOutcome> {
        let mut outcome = None;

        let title = match self {
            Dialog::ConfirmSave => "Ready to save changes",
            Dialog::Error { .. } => "Error",
            Dialog::About => "About",
        };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| match self {
                Dialog::ConfirmSave => {
                    ui.label("Dropped photos move to the \"dropped\" folder.");
                    ui.label("Re-dated photos are backed up to the \"original\" folder.");
                    ui.add_space(8.0);
                    ui.label("Proceed?");
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Yes").clicked() {
                            outcome = Some(DialogOutcome::Confirmed);
                        }
                        if ui.button("No").clicked() {
                            outcome = Some(DialogOutcome::Closed);
                        }
                    });
                }
                Dialog::Error { message, details } => {
                    ui.colored_label(egui::Color32::from_rgb(255, 100, 100), message);
                    if !details.is_empty() {
                        ui.add_space(4.0);
                        egui::ScrollArea::vertical()
                            .max_height(240.0)
                            .show(ui, |ui| {
                                for line in details {
                                    ui.label(line);
                                }
                            });
                    }
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        outcome = Some(DialogOutcome::Closed);
                    }
                }
                Dialog::About => {
                    ui.heading("Photofine");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(4.0);
                    ui.label("Drop unwanted photos and fix photo dates.");
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        outcome = Some(DialogOutcome::Closed);
                    }
                }
            });

        outcome
    }
}

/// Ask the user for a photo folder, starting at `start` when given
pub fn pick_folder(start: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new().set_title("Open photo folder");
    if let Some(dir) = start {
        dialog = dialog.set_directory(dir);
    }
    dialog.pick_folder()
}
