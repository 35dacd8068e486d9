use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoError {
    #[error("Can't list photo files from folder '{path}': {source}")]
    FolderRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load image '{path}': {source}")]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Failed to create folder '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to move '{from}' to '{to}': {source}")]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to back up '{path}' to '{backup}': {source}")]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write EXIF date to '{path}': {message}")]
    ExifWrite { path: PathBuf, message: String },

    #[error("Invalid date '{0}', expected YYYY:MM:DD HH:MM:SS")]
    InvalidDate(String),
}
