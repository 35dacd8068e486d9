use std::path::{Path, PathBuf};

use super::dates::{self, DateCandidates, DateChoice};

/// A photo in the browsed folder with its drop flag and date candidates
#[derive(Debug, Clone)]
pub struct Photo {
    pub path: PathBuf,
    pub drop: bool,
    pub dates: DateCandidates,
    choice: DateChoice,
}

impl Photo {
    /// Build a photo from already known date candidates.
    ///
    /// The EXIF date is authoritative when it is a valid date, otherwise the
    /// file modification date is.
    pub fn new(path: PathBuf, exif_date: String, modify_date: String) -> Self {
        let choice = if dates::is_valid_date(&exif_date) {
            DateChoice::Exif
        } else {
            DateChoice::FileModified
        };
        Self {
            path,
            drop: false,
            dates: DateCandidates::new(exif_date, modify_date),
            choice,
        }
    }

    /// Read date candidates from the file itself
    pub fn from_file(path: PathBuf) -> Self {
        let exif = dates::exif_date(&path);
        let modified = dates::modify_date(&path);
        Self::new(path, exif, modified)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn choice(&self) -> DateChoice {
        self.choice
    }

    pub fn toggle_drop(&mut self) {
        self.drop = !self.drop;
    }

    /// Select the authoritative date.
    ///
    /// Choosing EXIF or file date discards a manual entry. Choosing manual
    /// input seeds an empty entry with the EXIF date (or the file date when
    /// there is no EXIF date) so the user edits from a sensible start.
    pub fn set_choice(&mut self, choice: DateChoice) {
        match choice {
            DateChoice::Exif | DateChoice::FileModified => {
                self.dates.get_mut(DateChoice::Manual).clear();
            }
            DateChoice::Manual => {
                if self.dates.get(DateChoice::Manual).is_empty() {
                    let seed = match self.dates.get(DateChoice::Exif) {
                        "" => self.dates.get(DateChoice::FileModified),
                        exif => exif,
                    }
                    .to_string();
                    *self.dates.get_mut(DateChoice::Manual) = seed;
                }
            }
        }
        self.choice = choice;
    }

    pub fn set_manual_date(&mut self, text: impl Into<String>) {
        *self.dates.get_mut(DateChoice::Manual) = text.into();
    }

    pub fn manual_date_mut(&mut self) -> &mut String {
        self.dates.get_mut(DateChoice::Manual)
    }

    pub fn chosen_date(&self) -> &str {
        self.dates.get(self.choice)
    }

    /// Whether saving has to rewrite this photo's EXIF date
    pub fn needs_redate(&self) -> bool {
        !self.drop && self.choice != DateChoice::Exif
    }
}
