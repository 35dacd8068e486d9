use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use photofine::cli::{CliArgs, Command, GuiArgs, ListArgs};
use photofine::config::LoadedSettings;
use photofine::output::{format_table, write_json};
use photofine::photo::PhotoList;

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    // Initialize logging
    env_logger::Builder::new()
        .filter_level(if cli.verbose() {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Photofine v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Some(Command::List(args)) => list(args),
        None => launch(&cli.gui),
    }
}

#[allow(clippy::print_stdout)]
fn list(args: &ListArgs) -> Result<()> {
    let photos = PhotoList::open(&args.folder)
        .with_context(|| format!("failed to open photo folder: {}", args.folder.display()))?;
    let records = photos.records();

    if args.json {
        let mut stdout = io::stdout().lock();
        write_json(&mut stdout, &photos.folder, &records)?;
    } else {
        print!("{}", format_table(&records));
    }
    Ok(())
}

/// Folder and column count to start the window with.
/// CLI arguments always take precedence over saved settings.
struct StartupChoice {
    folder: Option<PathBuf>,
    columns: usize,
}

fn startup_choice(args: &GuiArgs, settings: &LoadedSettings) -> StartupChoice {
    let folder = args
        .folder
        .clone()
        .or_else(|| settings.settings.existing_folder().cloned());
    let columns = args
        .columns
        .map(usize::from)
        .unwrap_or_else(|| settings.settings.clamped_columns());
    StartupChoice { folder, columns }
}

fn load_settings(args: &GuiArgs) -> Result<LoadedSettings> {
    if args.config.is_some() {
        return LoadedSettings::load_or_default(args.config.as_deref());
    }
    // A broken settings file in the config directory should not block startup
    LoadedSettings::load_or_default(None).or_else(|e| {
        warn!("{:#}, using default settings", e);
        Ok(LoadedSettings {
            settings: Default::default(),
            path: photofine::config::default_settings_path(),
        })
    })
}

#[cfg(feature = "gui")]
fn launch(args: &GuiArgs) -> Result<()> {
    let mut settings = load_settings(args)?;
    let choice = startup_choice(args, &settings);
    settings.settings.columns = choice.columns;

    let photos = match &choice.folder {
        Some(folder) => Some(
            PhotoList::open_with_columns(folder, choice.columns)
                .with_context(|| format!("failed to open photo folder: {}", folder.display()))?,
        ),
        None => None,
    };

    photofine::gui::run(photos, settings)
}

#[cfg(not(feature = "gui"))]
fn launch(args: &GuiArgs) -> Result<()> {
    let settings = load_settings(args)?;
    let choice = startup_choice(args, &settings);
    anyhow::bail!(
        "built without the gui feature, use `photofine list {}` instead",
        choice
            .folder
            .as_deref()
            .unwrap_or(std::path::Path::new("FOLDER"))
            .display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use photofine::config::Settings;

    fn loaded(settings: Settings) -> LoadedSettings {
        LoadedSettings {
            settings,
            path: None,
        }
    }

    #[test]
    fn test_cli_overrides_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = loaded(Settings {
            folder: Some(dir.path().to_path_buf()),
            columns: 5,
            ..Settings::default()
        });
        let args = GuiArgs {
            folder: Some(PathBuf::from("/photos")),
            columns: Some(2),
            ..GuiArgs::default()
        };

        let choice = startup_choice(&args, &settings);
        assert_eq!(choice.folder, Some(PathBuf::from("/photos")));
        assert_eq!(choice.columns, 2);
    }

    #[test]
    fn test_settings_fill_missing_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let settings = loaded(Settings {
            folder: Some(dir.path().to_path_buf()),
            columns: 5,
            ..Settings::default()
        });

        let choice = startup_choice(&GuiArgs::default(), &settings);
        assert_eq!(choice.folder, Some(dir.path().to_path_buf()));
        assert_eq!(choice.columns, 5);
    }

    #[test]
    fn test_missing_saved_folder_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let settings = loaded(Settings {
            folder: Some(dir.path().join("moved")),
            ..Settings::default()
        });

        let choice = startup_choice(&GuiArgs::default(), &settings);
        assert!(choice.folder.is_none());
        assert_eq!(choice.columns, 3);
    }
}
