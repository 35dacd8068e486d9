use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use super::dates::DateChoice;
use super::exif_writer::write_exif_date;
use super::viewport::{FrameChange, Scroll, Viewport, INIT_FRAME_SIZE};
use super::Photo;
use crate::error::PhotoError;

const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Folder receiving dropped photos on save
pub const DROPPED_DIR: &str = "dropped";
/// Folder receiving untouched copies of re-dated photos on save
pub const ORIGINAL_DIR: &str = "original";

/// Whether a file name looks like a JPEG photo
pub fn is_photo_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| PHOTO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Photos of one folder plus the window of columns currently on screen
#[derive(Debug, Clone)]
pub struct PhotoList {
    pub folder: PathBuf,
    pub photos: Vec<Photo>,
    pub viewport: Viewport,
}

/// One row of the photo table
#[derive(Debug, Clone, Serialize)]
pub struct PhotoRecord {
    pub file_name: String,
    pub exif_date: String,
    pub file_date: String,
    pub entry_date: String,
    pub choice: DateChoice,
    pub dropped: bool,
}

impl From<&Photo> for PhotoRecord {
    fn from(photo: &Photo) -> Self {
        Self {
            file_name: photo.file_name(),
            exif_date: photo.dates.get(DateChoice::Exif).to_string(),
            file_date: photo.dates.get(DateChoice::FileModified).to_string(),
            entry_date: photo.dates.get(DateChoice::Manual).to_string(),
            choice: photo.choice(),
            dropped: photo.drop,
        }
    }
}

/// Outcome of applying the user's choices to the folder
#[derive(Debug, Default)]
pub struct SaveReport {
    pub dropped: usize,
    pub redated: usize,
    pub failures: Vec<PhotoError>,
}

impl SaveReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl PhotoList {
    /// Scan `folder` for JPEG photos and read their date candidates
    pub fn open(folder: &Path) -> Result<Self, PhotoError> {
        Self::open_with_columns(folder, INIT_FRAME_SIZE)
    }

    pub fn open_with_columns(folder: &Path, columns: usize) -> Result<Self, PhotoError> {
        let folder = std::path::absolute(folder).map_err(|source| PhotoError::FolderRead {
            path: folder.to_path_buf(),
            source,
        })?;
        let read_error = |source| PhotoError::FolderRead {
            path: folder.clone(),
            source,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(&folder).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file() && is_photo_file(&path) {
                paths.push(path);
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let photos: Vec<Photo> = paths.into_par_iter().map(Photo::from_file).collect();
        info!("Found {} photos in {}", photos.len(), folder.display());

        let viewport = Viewport::with_size(photos.len(), columns);
        Ok(Self {
            folder,
            photos,
            viewport,
        })
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Photos currently inside the viewport, with their list indices
    pub fn visible(&self) -> impl Iterator<Item = (usize, &Photo)> {
        let range = self.viewport.range();
        self.photos[range.clone()].iter().zip(range).map(|(p, i)| (i, p))
    }

    pub fn scroll(&mut self, step: Scroll) -> FrameChange {
        self.viewport.scroll(step)
    }

    pub fn add_column(&mut self) -> Option<FrameChange> {
        self.viewport.add_column()
    }

    pub fn remove_column(&mut self) -> Option<FrameChange> {
        self.viewport.remove_column()
    }

    pub fn records(&self) -> Vec<PhotoRecord> {
        self.photos.iter().map(PhotoRecord::from).collect()
    }

    pub fn has_changes(&self) -> bool {
        self.photos.iter().any(|p| p.drop || p.needs_redate())
    }

    /// Apply drops and date choices to the files on disk.
    ///
    /// Dropped photos move into `dropped/`. Photos whose authoritative date
    /// is not the EXIF one are first copied into `original/`, then get the
    /// chosen date written into their EXIF block. A failure on one photo is
    /// recorded and the remaining photos are still processed; only failing
    /// to create one of the two folders aborts the save.
    pub fn save(&self) -> Result<SaveReport, PhotoError> {
        let mut report = SaveReport::default();
        let dropped_dir = self.folder.join(DROPPED_DIR);
        let original_dir = self.folder.join(ORIGINAL_DIR);
        let mut dropped_dir_ok = false;
        let mut original_dir_ok = false;

        for photo in &self.photos {
            if photo.drop {
                if !dropped_dir_ok {
                    ensure_dir(&dropped_dir)?;
                    dropped_dir_ok = true;
                }
                match move_into(photo.path(), &dropped_dir) {
                    Ok(()) => report.dropped += 1,
                    Err(e) => report.failures.push(e),
                }
                continue;
            }

            if photo.needs_redate() {
                if !original_dir_ok {
                    ensure_dir(&original_dir)?;
                    original_dir_ok = true;
                }
                match redate(photo, &original_dir) {
                    Ok(()) => report.redated += 1,
                    Err(e) => report.failures.push(e),
                }
            }
        }

        for failure in &report.failures {
            warn!("{}", failure);
        }
        info!(
            "Saved {}: {} dropped, {} re-dated, {} failed",
            self.folder.display(),
            report.dropped,
            report.redated,
            report.failures.len()
        );

        Ok(report)
    }
}

/// Create a directory, tolerating one that already exists
fn ensure_dir(dir: &Path) -> Result<(), PhotoError> {
    match fs::create_dir(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(PhotoError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

fn target_in(path: &Path, dir: &Path) -> PathBuf {
    dir.join(path.file_name().unwrap_or(path.as_os_str()))
}

/// Target in `dir` that no existing file occupies: `name.jpg`, then
/// `name-1.jpg`, `name-2.jpg` and so on
fn free_target_in(path: &Path, dir: &Path) -> PathBuf {
    let target = target_in(path, dir);
    if !target.exists() {
        return target;
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (1..)
        .map(|n| dir.join(format!("{stem}-{n}{ext}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(target)
}

fn move_into(path: &Path, dir: &Path) -> Result<(), PhotoError> {
    // Photos dropped in an earlier session stay in place
    let to = free_target_in(path, dir);
    debug!("Moving {} to {}", path.display(), to.display());
    fs::rename(path, &to).map_err(|source| PhotoError::Move {
        from: path.to_path_buf(),
        to,
        source,
    })
}

fn redate(photo: &Photo, original_dir: &Path) -> Result<(), PhotoError> {
    let date = photo.chosen_date();
    super::dates::parse_date(date)?;

    // The first backup is the untouched file, later saves keep it
    let backup = target_in(photo.path(), original_dir);
    if backup.exists() {
        debug!("Keeping existing backup {}", backup.display());
    } else {
        debug!("Backing up {} to {}", photo.path().display(), backup.display());
        fs::copy(photo.path(), &backup).map_err(|source| PhotoError::Backup {
            path: photo.path().to_path_buf(),
            backup,
            source,
        })?;
    }

    write_exif_date(photo.path(), date)
}
