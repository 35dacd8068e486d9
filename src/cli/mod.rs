mod args;

pub use args::{CliArgs, Command, GuiArgs, ListArgs};
