use eframe::egui;
use std::collections::HashMap;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use super::dialogs::Dialog;
use super::thumbnail::ThumbnailLoader;
use crate::config::LoadedSettings;
use crate::photo::{PhotoList, SaveReport};

// ─────────────────────────────────────────────────────────────────────────────
// GUI-specific enums
// ─────────────────────────────────────────────────────────────────────────────

/// Tabs of the main window
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Choice,
    List,
}

/// State of the rendered thumbnail of a visible photo
pub enum ThumbnailState {
    /// Thumbnail is being decoded in background
    Loading,
    /// Thumbnail decoded and uploaded at the scale of `columns` columns
    Loaded {
        texture: egui::TextureHandle,
        columns: usize,
    },
    /// Failed to decode (corrupt file, etc.)
    Failed,
}

// ─────────────────────────────────────────────────────────────────────────────
// Background Task Abstraction
// ─────────────────────────────────────────────────────────────────────────────

/// Generic handle for background operations (opening, saving)
pub struct BackgroundTask<T> {
    receiver: mpsc::Receiver<Result<T, String>>,
}

impl<T> BackgroundTask<T> {
    pub fn new(receiver: mpsc::Receiver<Result<T, String>>) -> Self {
        Self { receiver }
    }

    /// Non-blocking poll for result
    pub fn poll(&self) -> Option<Result<T, String>> {
        self.receiver.try_recv().ok()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// State: persisted settings, the photo list, and transient runtime state
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level application state
pub struct AppState {
    pub settings: LoadedSettings,
    pub photos: Option<PhotoList>,
    pub runtime: RuntimeState,
}

impl AppState {
    pub fn new(settings: LoadedSettings, photos: Option<PhotoList>) -> Self {
        let runtime = RuntimeState {
            pick_folder_on_start: photos.is_none(),
            ..RuntimeState::default()
        };
        Self {
            settings,
            photos,
            runtime,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.runtime.status, Status::Working { .. })
    }
}

/// Transient runtime state
pub struct RuntimeState {
    pub tab: Tab,

    // Thumbnails of the photos inside the viewport, keyed by list index
    pub thumbnails: HashMap<usize, ThumbnailState>,
    // Decodes the photos of the current frame; replaced on every frame change
    pub thumbnail_loader: Option<ThumbnailLoader>,
    // Bumped whenever a folder is (re)opened so late thumbnails are ignored
    pub generation: u64,

    // Status and tasks
    pub status: Status,
    pub open_task: Option<BackgroundTask<PhotoList>>,
    pub save_task: Option<BackgroundTask<SaveReport>>,
    // Outcome of the last save, shown once the rescan that follows it ends
    pub save_summary: Option<String>,

    pub dialog: Option<Dialog>,
    pub pick_folder_on_start: bool,
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self {
            tab: Tab::default(),

            thumbnails: HashMap::new(),
            thumbnail_loader: None,
            generation: 0,

            status: Status::Idle,
            open_task: None,
            save_task: None,
            save_summary: None,

            dialog: None,
            pick_folder_on_start: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Status with timing support
// ─────────────────────────────────────────────────────────────────────────────

pub enum Status {
    Idle,
    Working {
        operation: Operation,
        started_at: Instant,
    },
    Done {
        result: StatusResult,
        at: Instant,
    },
}

#[derive(Clone, Copy)]
pub enum Operation {
    Opening,
    Saving,
}

pub enum StatusResult {
    Success(String),
    Error(String),
}

impl Status {
    pub fn success(message: impl Into<String>) -> Self {
        Status::Done {
            result: StatusResult::Success(message.into()),
            at: Instant::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Status::Done {
            result: StatusResult::Error(message.into()),
            at: Instant::now(),
        }
    }

    pub fn working(operation: Operation) -> Self {
        Status::Working {
            operation,
            started_at: Instant::now(),
        }
    }

    /// Auto-clear old success messages, keep errors visible
    pub fn maybe_clear(&mut self, max_age: Duration) {
        if let Status::Done {
            result: StatusResult::Success(_),
            at,
        } = self
            && at.elapsed() > max_age
        {
            *self = Status::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_clears_old_success_only() {
        let mut status = Status::Done {
            result: StatusResult::Success("saved".to_string()),
            at: Instant::now() - Duration::from_secs(10),
        };
        status.maybe_clear(Duration::from_secs(5));
        assert!(matches!(status, Status::Idle));

        let mut status = Status::Done {
            result: StatusResult::Error("failed".to_string()),
            at: Instant::now() - Duration::from_secs(10),
        };
        status.maybe_clear(Duration::from_secs(5));
        assert!(matches!(status, Status::Done { .. }));
    }

    #[test]
    fn test_background_task_poll() {
        let (tx, rx) = mpsc::channel();
        let task: BackgroundTask<u32> = BackgroundTask::new(rx);
        assert!(task.poll().is_none());
        tx.send(Ok(7)).unwrap();
        assert_eq!(task.poll(), Some(Ok(7)));
    }

    #[test]
    fn test_new_state_without_folder_asks_for_one() {
        let settings = LoadedSettings {
            settings: Default::default(),
            path: None,
        };
        let state = AppState::new(settings, None);
        assert!(state.runtime.pick_folder_on_start);
        assert!(!state.is_busy());
    }
}
