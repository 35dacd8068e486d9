pub mod cli;
pub mod config;
pub mod error;
#[cfg(feature = "gui")]
pub mod gui;
pub mod output;
pub mod photo;

pub use cli::{CliArgs, Command};
pub use error::PhotoError;
pub use photo::{DateChoice, Photo, PhotoList, Viewport};
