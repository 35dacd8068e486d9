use eframe::egui;
use log::{error, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use super::dialogs::{pick_folder, Dialog, DialogOutcome};
use super::panels;
use super::state::{AppState, BackgroundTask, Operation, Status, Tab, ThumbnailState};
use super::thumbnail::ThumbnailLoader;
use crate::config::{save_settings, LoadedSettings};
use crate::photo::{FrameChange, PhotoList, SaveReport, Scroll};

/// Main GUI application
pub struct PhotofineApp {
    state: AppState,
}

impl PhotofineApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, mut state: AppState) -> Self {
        if let Some(folder) = state.photos.as_ref().map(|l| l.folder.clone()) {
            remember_folder(&mut state, &folder);
        }
        let mut app = Self { state };
        app.load_visible_thumbnails();
        app
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.state.is_busy() {
            return;
        }
        let folder = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.as_ref())
                .find_map(|path| {
                    if path.is_dir() {
                        Some(path.clone())
                    } else {
                        path.parent().map(Path::to_path_buf)
                    }
                })
        });
        if let Some(folder) = folder {
            self.start_open(folder);
        }
    }

    fn render_drop_overlay(&self, ctx: &egui::Context) {
        let is_hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        if is_hovering {
            let screen_rect = ctx.screen_rect();
            let painter = ctx.layer_painter(egui::LayerId::new(
                egui::Order::Foreground,
                egui::Id::new("drop_overlay"),
            ));
            painter.rect_filled(
                screen_rect,
                0.0,
                egui::Color32::from_rgba_unmultiplied(100, 150, 255, 40),
            );
            painter.rect_stroke(
                screen_rect,
                0.0,
                egui::Stroke::new(3.0, egui::Color32::from_rgb(100, 150, 255)),
            );
        }
    }

    /// Ask for a folder before anything else when none was given
    fn handle_startup_folder(&mut self, ctx: &egui::Context) {
        if !self.state.runtime.pick_folder_on_start {
            return;
        }
        self.state.runtime.pick_folder_on_start = false;

        let start = std::env::current_dir().ok();
        match pick_folder(start.as_deref()) {
            Some(folder) => self.start_open(folder),
            None => {
                info!("No folder chosen, closing");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn open_folder_dialog(&mut self) {
        let start = self
            .state
            .photos
            .as_ref()
            .map(|l| l.folder.clone())
            .or_else(|| self.state.settings.settings.existing_folder().cloned());
        if let Some(folder) = pick_folder(start.as_deref()) {
            self.start_open(folder);
        }
    }

    /// Start reading a folder in a background thread
    pub fn start_open(&mut self, folder: PathBuf) {
        let columns = self
            .state
            .photos
            .as_ref()
            .map(|l| l.viewport.size())
            .filter(|&size| size > 0)
            .unwrap_or_else(|| self.state.settings.settings.clamped_columns());

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = PhotoList::open_with_columns(&folder, columns).map_err(|e| e.to_string());
            let _ = tx.send(result);
        });

        self.state.runtime.open_task = Some(BackgroundTask::new(rx));
        self.state.runtime.status = Status::working(Operation::Opening);
    }

    /// Poll background open task for completion
    fn poll_open_task(&mut self, ctx: &egui::Context) {
        let Some(result) = self.state.runtime.open_task.as_ref().and_then(|t| t.poll()) else {
            return;
        };
        self.state.runtime.open_task = None;

        match result {
            Ok(list) => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                    "Photofine - {}",
                    list.folder.display()
                )));
                let folder = list.folder.clone();
                let summary = self.state.runtime.save_summary.take();
                self.state.runtime.status = Status::success(open_message(list.len(), summary));
                self.replace_photos(list);
                remember_folder(&mut self.state, &folder);
            }
            Err(err) => {
                // A folder that can't be read ends the program
                error!("{}", err);
                std::process::exit(1);
            }
        }
    }

    /// Install a freshly read photo list and drop every old thumbnail
    fn replace_photos(&mut self, list: PhotoList) {
        let runtime = &mut self.state.runtime;
        runtime.generation += 1;
        runtime.thumbnails.clear();
        runtime.thumbnail_loader = None;
        self.state.photos = Some(list);
        self.load_visible_thumbnails();
    }

    fn load_visible_thumbnails(&mut self) {
        let Some(list) = &self.state.photos else {
            return;
        };
        let change = FrameChange {
            load: list.viewport.range().collect(),
            unload: Vec::new(),
        };
        self.apply_frame_change(change);
    }

    /// Release thumbnails that left the frame and request the new ones.
    ///
    /// The previous loader is replaced, so photos it had not reached yet
    /// are requested again and photos that left the frame are never decoded.
    fn apply_frame_change(&mut self, change: FrameChange) {
        let Some(list) = &self.state.photos else {
            return;
        };
        let runtime = &mut self.state.runtime;

        for index in &change.unload {
            runtime.thumbnails.remove(index);
        }

        let columns = list.viewport.size();
        let indices = frame_requests(change.load, &runtime.thumbnails, columns);

        if indices.is_empty() {
            return;
        }

        let requests: Vec<(usize, PathBuf)> = indices
            .into_iter()
            .map(|index| {
                // A thumbnail at the old scale stays visible until replaced
                runtime
                    .thumbnails
                    .entry(index)
                    .or_insert(ThumbnailState::Loading);
                (index, list.photos[index].path.clone())
            })
            .collect();

        runtime.thumbnail_loader = Some(ThumbnailLoader::spawn(
            requests,
            columns,
            runtime.generation,
        ));
    }

    /// Upload decoded thumbnails that still belong to the frame
    fn poll_thumbnails(&mut self, ctx: &egui::Context) {
        let Some(list) = &self.state.photos else {
            return;
        };
        let runtime = &mut self.state.runtime;
        let range = list.viewport.range();
        let columns = list.viewport.size();

        let Some(loader) = &runtime.thumbnail_loader else {
            return;
        };
        let (results, running) = loader.drain();
        if !running {
            runtime.thumbnail_loader = None;
        }

        for result in results {
            if result.generation != runtime.generation
                || result.columns != columns
                || !range.contains(&result.index)
            {
                continue;
            }
            let thumbnail = match result.image {
                Some(image) => {
                    let size = [image.width() as usize, image.height() as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image);
                    ThumbnailState::Loaded {
                        texture: ctx.load_texture(
                            format!("photo_{}", result.index),
                            color_image,
                            egui::TextureOptions::LINEAR,
                        ),
                        columns,
                    }
                }
                None => ThumbnailState::Failed,
            };
            runtime.thumbnails.insert(result.index, thumbnail);
        }
    }

    fn scroll(&mut self, step: Scroll) {
        if let Some(list) = self.state.photos.as_mut() {
            let change = list.scroll(step);
            self.apply_frame_change(change);
        }
    }

    fn resize_frame(&mut self, add: bool) {
        let Some(list) = self.state.photos.as_mut() else {
            return;
        };
        let change = if add {
            list.add_column()
        } else {
            list.remove_column()
        };
        if let Some(change) = change {
            self.state.settings.settings.columns = list.viewport.size();
            persist_settings(&self.state.settings);
            self.apply_frame_change(change);
        }
    }

    /// Arrow, page and home/end keys move the frame unless typing a date
    fn handle_keys(&mut self, ctx: &egui::Context) {
        if self.state.runtime.tab != Tab::Choice
            || self.state.is_busy()
            || self.state.runtime.dialog.is_some()
            || ctx.memory(|m| m.focused().is_some())
        {
            return;
        }
        let step = ctx.input(|i| {
            [
                (egui::Key::Home, Scroll::First),
                (egui::Key::PageUp, Scroll::PrevPage),
                (egui::Key::ArrowLeft, Scroll::Prev),
                (egui::Key::ArrowRight, Scroll::Next),
                (egui::Key::PageDown, Scroll::NextPage),
                (egui::Key::End, Scroll::Last),
            ]
            .into_iter()
            .find(|(key, _)| i.key_pressed(*key))
            .map(|(_, step)| step)
        });
        if let Some(step) = step {
            self.scroll(step);
        }
    }

    /// Start saving in a background thread
    pub fn start_save(&mut self) {
        let Some(list) = self.state.photos.clone() else {
            return;
        };

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = list.save().map_err(|e| e.to_string());
            let _ = tx.send(result);
        });

        self.state.runtime.save_task = Some(BackgroundTask::new(rx));
        self.state.runtime.status = Status::working(Operation::Saving);
    }

    /// Poll background save task for completion
    fn poll_save_task(&mut self) {
        let Some(result) = self.state.runtime.save_task.as_ref().and_then(|t| t.poll()) else {
            return;
        };
        self.state.runtime.save_task = None;

        match result {
            Ok(report) => {
                let summary = save_summary(&report);
                self.state.runtime.status = Status::success(summary.clone());
                if !report.is_success() {
                    self.state.runtime.dialog = Some(Dialog::Error {
                        message: format!("{} photo(s) could not be saved", report.failures.len()),
                        details: report.failures.iter().map(ToString::to_string).collect(),
                    });
                }
                // Files moved or changed: read the folder again
                if let Some(folder) = self.state.photos.as_ref().map(|l| l.folder.clone()) {
                    self.state.runtime.save_summary = Some(summary);
                    self.start_open(folder);
                }
            }
            Err(err) => {
                self.state.runtime.status = Status::error(err.clone());
                self.state.runtime.dialog = Some(Dialog::Error {
                    message: err,
                    details: Vec::new(),
                });
            }
        }
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.state.runtime.dialog else {
            return;
        };
        let Some(outcome) = dialog.show(ctx) else {
            return;
        };

        let confirmed_save =
            matches!(dialog, Dialog::ConfirmSave) && outcome == DialogOutcome::Confirmed;
        self.state.runtime.dialog = None;
        if confirmed_save {
            self.start_save();
        }
    }
}

/// Indices to decode: the newly visible ones plus any visible thumbnail
/// still loading or made for another column count
fn frame_requests(
    load: Vec<usize>,
    thumbnails: &HashMap<usize, ThumbnailState>,
    columns: usize,
) -> Vec<usize> {
    let mut indices = load;
    for (&index, thumbnail) in thumbnails {
        let outdated = match thumbnail {
            ThumbnailState::Loading => true,
            ThumbnailState::Loaded { columns: scale, .. } => *scale != columns,
            ThumbnailState::Failed => false,
        };
        if outdated && !indices.contains(&index) {
            indices.push(index);
        }
    }
    indices.sort_unstable();
    indices
}

/// Status after a folder is read. A rescan after saving reports the save.
fn open_message(count: usize, save_summary: Option<String>) -> String {
    save_summary.unwrap_or_else(|| format!("Opened {} photos", count))
}

fn save_summary(report: &SaveReport) -> String {
    let mut summary = format!(
        "Saved: {} dropped, {} re-dated",
        report.dropped, report.redated
    );
    if !report.is_success() {
        summary.push_str(&format!(", {} failed", report.failures.len()));
    }
    summary
}

/// Record the opened folder so the next start reopens it
fn remember_folder(state: &mut AppState, folder: &Path) {
    state.settings.settings.folder = Some(folder.to_path_buf());
    persist_settings(&state.settings);
}

fn persist_settings(loaded: &LoadedSettings) {
    let Some(path) = &loaded.path else {
        return;
    };
    if let Err(e) = save_settings(&loaded.settings, path) {
        warn!("Could not save settings: {:#}", e);
    }
}

impl eframe::App for PhotofineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_startup_folder(ctx);

        // Handle dropped folders
        self.handle_dropped_files(ctx);

        // Poll background tasks
        self.poll_open_task(ctx);
        self.poll_save_task();
        self.poll_thumbnails(ctx);

        // Request repaint while background work is pending
        if self.state.is_busy() || self.state.runtime.thumbnail_loader.is_some() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        // Auto-clear old success messages
        self.state
            .runtime
            .status
            .maybe_clear(Duration::from_secs(5));

        self.handle_keys(ctx);

        // Bottom panel with tabs and status
        egui::TopBottomPanel::bottom("bottom_bar")
            .show(ctx, |ui| panels::bottom_bar(ui, &mut self.state));

        let tab = self.state.runtime.tab;
        let (choice_action, list_action) = egui::CentralPanel::default()
            .show(ctx, |ui| match tab {
                Tab::Choice => (Some(panels::choice_panel(ui, &mut self.state)), None),
                Tab::List => (None, Some(panels::list_panel(ui, &mut self.state))),
            })
            .inner;

        if let Some(action) = choice_action {
            if let Some(step) = action.scroll {
                self.scroll(step);
            }
            if action.add_column {
                self.resize_frame(true);
            }
            if action.remove_column {
                self.resize_frame(false);
            }
        }

        if let Some(action) = list_action {
            if action.open_requested {
                self.open_folder_dialog();
            }
            if action.save_requested {
                self.state.runtime.dialog = Some(Dialog::ConfirmSave);
            }
            if action.about_requested {
                self.state.runtime.dialog = Some(Dialog::About);
            }
        }

        self.show_dialog(ctx);

        // Render drag-drop overlay on top of everything
        self.render_drop_overlay(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhotoError;

    fn loaded(ctx: &egui::Context, columns: usize) -> ThumbnailState {
        ThumbnailState::Loaded {
            texture: ctx.load_texture(
                "test",
                egui::ColorImage::new([1, 1], egui::Color32::WHITE),
                egui::TextureOptions::LINEAR,
            ),
            columns,
        }
    }

    #[test]
    fn test_frame_requests_include_unfinished_and_rescaled() {
        let ctx = egui::Context::default();
        let mut thumbnails = HashMap::new();
        thumbnails.insert(1, ThumbnailState::Loading);
        thumbnails.insert(2, loaded(&ctx, 3));
        thumbnails.insert(3, loaded(&ctx, 2));
        thumbnails.insert(4, ThumbnailState::Failed);

        assert_eq!(frame_requests(vec![5], &thumbnails, 3), vec![1, 3, 5]);
        assert_eq!(frame_requests(vec![1, 5], &thumbnails, 3), vec![1, 3, 5]);
    }

    #[test]
    fn test_frame_requests_empty_when_frame_is_current() {
        let ctx = egui::Context::default();
        let mut thumbnails = HashMap::new();
        thumbnails.insert(0, loaded(&ctx, 2));

        assert!(frame_requests(Vec::new(), &thumbnails, 2).is_empty());
    }

    #[test]
    fn test_rescan_after_save_keeps_save_summary() {
        assert_eq!(open_message(4, None), "Opened 4 photos");
        let report = SaveReport {
            dropped: 1,
            redated: 0,
            failures: Vec::new(),
        };
        assert_eq!(
            open_message(3, Some(save_summary(&report))),
            "Saved: 1 dropped, 0 re-dated"
        );
    }

    #[test]
    fn test_persist_settings_writes_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut loaded = LoadedSettings {
            settings: Default::default(),
            path: Some(path.clone()),
        };
        loaded.settings.columns = 5;

        persist_settings(&loaded);

        assert_eq!(LoadedSettings::load(&path).unwrap().settings.columns, 5);
    }

    #[test]
    fn test_save_summary() {
        let mut report = SaveReport {
            dropped: 2,
            redated: 1,
            failures: Vec::new(),
        };
        assert_eq!(save_summary(&report), "Saved: 2 dropped, 1 re-dated");

        report.failures.push(PhotoError::InvalidDate("x".to_string()));
        assert_eq!(save_summary(&report), "Saved: 2 dropped, 1 re-dated, 1 failed");
    }
}
