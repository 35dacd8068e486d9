mod app;
mod dialogs;
mod panels;
mod state;
mod thumbnail;

use anyhow::Result;
use eframe::egui;

use crate::config::LoadedSettings;
use crate::photo::PhotoList;
use app::PhotofineApp;
use state::AppState;

const WINDOW_SIZE: [f32; 2] = [1344.0, 756.0];

/// Open the photo window. Without a photo list the user picks a folder first.
pub fn run(photos: Option<PhotoList>, settings: LoadedSettings) -> Result<()> {
    let title = match &photos {
        Some(list) => format!("Photofine - {}", list.folder.display()),
        None => "Photofine".to_string(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let state = AppState::new(settings, photos);
    eframe::run_native(
        "Photofine",
        options,
        Box::new(move |cc| Ok(Box::new(PhotofineApp::new(cc, state)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run GUI: {}", e))
}
