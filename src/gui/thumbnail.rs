use image::RgbaImage;
use log::warn;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use crate::photo::load_thumbnail;

/// Largest texture side uploaded to the GPU
pub const MAX_TEXTURE_SIDE: u32 = 4096;

/// A decoded thumbnail, tagged with what it was requested for
pub struct ThumbnailResult {
    pub generation: u64,
    pub index: usize,
    pub columns: usize,
    pub image: Option<RgbaImage>,
}

/// Handle to the background thread decoding the current frame.
///
/// Dropping the handle cancels the thread before its next decode.
pub struct ThumbnailLoader {
    receiver: mpsc::Receiver<ThumbnailResult>,
    cancelled: Arc<AtomicBool>,
}

impl ThumbnailLoader {
    /// Spawn a thread loading the given photos in order
    pub fn spawn(requests: Vec<(usize, PathBuf)>, columns: usize, generation: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        std::thread::spawn(move || {
            for (index, path) in requests {
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                let image = match load_thumbnail(&path, columns, MAX_TEXTURE_SIDE) {
                    Ok(image) => Some(image),
                    Err(e) => {
                        warn!("{}", e);
                        None
                    }
                };
                let result = ThumbnailResult {
                    generation,
                    index,
                    columns,
                    image,
                };
                if tx.send(result).is_err() {
                    // Receiver dropped: frame moved on or app exiting
                    break;
                }
            }
        });

        Self {
            receiver: rx,
            cancelled,
        }
    }

    /// Results received so far, and whether the thread is still running
    pub fn drain(&self) -> (Vec<ThumbnailResult>, bool) {
        let mut results = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(result) => results.push(result),
                Err(mpsc::TryRecvError::Empty) => return (results, true),
                Err(mpsc::TryRecvError::Disconnected) => return (results, false),
            }
        }
    }
}

impl Drop for ThumbnailLoader {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}
