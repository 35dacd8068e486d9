use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "photofine")]
#[command(version, about = "Browse a photo folder, drop photos and fix their dates", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub gui: GuiArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the photos of a folder with their date candidates
    List(ListArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct GuiArgs {
    /// Photo folder to open [default: last opened folder]
    pub folder: Option<PathBuf>,

    /// Load settings from this file instead of the user config directory
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of photo columns shown at start (1-6) [default: 3]
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=6))]
    pub columns: Option<u8>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Photo folder to list
    pub folder: PathBuf,

    /// Output JSON instead of a text table
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::List(args)) => args.verbose,
            None => self.gui.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_folder_argument() {
        let cli = CliArgs::try_parse_from(["photofine", "/photos", "--columns", "4"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.gui.folder, Some(PathBuf::from("/photos")));
        assert_eq!(cli.gui.columns, Some(4));
    }

    #[test]
    fn test_parse_no_arguments() {
        let cli = CliArgs::try_parse_from(["photofine"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.gui.folder.is_none());
        assert!(!cli.verbose());
    }

    #[test]
    fn test_parse_list_command() {
        let cli = CliArgs::try_parse_from(["photofine", "list", "/photos", "--json", "-v"]).unwrap();
        match cli.command {
            Some(Command::List(ref args)) => {
                assert_eq!(args.folder, PathBuf::from("/photos"));
                assert!(args.json);
            }
            None => panic!("expected list command"),
        }
        assert!(cli.verbose());
    }

    #[test]
    fn test_columns_out_of_range() {
        assert!(CliArgs::try_parse_from(["photofine", "--columns", "7"]).is_err());
        assert!(CliArgs::try_parse_from(["photofine", "--columns", "0"]).is_err());
    }
}
