mod load;
mod save;
mod types;

pub use load::{default_settings_path, LoadedSettings};
pub use save::save_settings;
pub use types::Settings;
