use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};
use log::debug;

use crate::error::PhotoError;

/// EXIF date-time layout, used for every date candidate
pub const DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Which date candidate is authoritative for a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateChoice {
    #[default]
    Exif,
    FileModified,
    Manual,
}

impl DateChoice {
    pub const ALL: [DateChoice; 3] = [
        DateChoice::Exif,
        DateChoice::FileModified,
        DateChoice::Manual,
    ];

    /// Short label shown next to the radio button
    pub fn label(self) -> &'static str {
        match self {
            DateChoice::Exif => "EXIF",
            DateChoice::FileModified => "File",
            DateChoice::Manual => "Input",
        }
    }

    fn index(self) -> usize {
        match self {
            DateChoice::Exif => 0,
            DateChoice::FileModified => 1,
            DateChoice::Manual => 2,
        }
    }
}

/// The three date candidates of a photo, as EXIF formatted strings.
/// An empty string means the candidate is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateCandidates([String; 3]);

impl DateCandidates {
    pub fn new(exif: String, file_modified: String) -> Self {
        Self([exif, file_modified, String::new()])
    }

    pub fn get(&self, choice: DateChoice) -> &str {
        &self.0[choice.index()]
    }

    pub fn get_mut(&mut self, choice: DateChoice) -> &mut String {
        &mut self.0[choice.index()]
    }
}

/// Parse a date in EXIF layout
pub fn parse_date(text: &str) -> Result<NaiveDateTime, PhotoError> {
    NaiveDateTime::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| PhotoError::InvalidDate(text.to_string()))
}

pub fn is_valid_date(text: &str) -> bool {
    parse_date(text).is_ok()
}

/// Format a filesystem timestamp in local time
pub fn format_system_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(DATE_FORMAT).to_string()
}

/// File modification date, or an empty string if unavailable
pub fn modify_date(path: &Path) -> String {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(format_system_time)
        .unwrap_or_default()
}

/// Original capture date from EXIF.
///
/// Reads `DateTimeOriginal`, falling back to `DateTimeDigitized`. Any failure
/// yields an empty string so the caller falls back to the file date.
pub fn exif_date(path: &Path) -> String {
    match read_exif_date(path) {
        Some(date) if is_valid_date(&date) => date,
        Some(date) => {
            debug!("Ignoring malformed EXIF date '{}' in {}", date, path.display());
            String::new()
        }
        None => String::new(),
    }
}

fn read_exif_date(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(e) => {
            debug!("No EXIF in {}: {}", path.display(), e);
            return None;
        }
    };

    [exif::Tag::DateTimeOriginal, exif::Tag::DateTimeDigitized]
        .into_iter()
        .filter_map(|tag| exif.get_field(tag, exif::In::PRIMARY))
        .find_map(|field| match &field.value {
            exif::Value::Ascii(values) => values.first().map(|raw| {
                String::from_utf8_lossy(raw)
                    .trim_matches(char::from(0))
                    .trim()
                    .to_string()
            }),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_date() {
        let date = parse_date("2021:07:14 18:05:09").unwrap();
        assert_eq!(date.year(), 2021);
        assert_eq!(date.month(), 7);
        assert_eq!(date.day(), 14);
        assert_eq!(date.hour(), 18);
        assert_eq!(date.second(), 9);
    }

    #[test]
    fn test_parse_date_rejects_other_layouts() {
        assert!(parse_date("2021-07-14 18:05:09").is_err());
        assert!(parse_date("2021:07:14").is_err());
        assert!(parse_date("").is_err());
        assert!(parse_date("2021:13:01 00:00:00").is_err());
    }

    #[test]
    fn test_format_system_time_roundtrips_through_parse() {
        let text = format_system_time(SystemTime::now());
        assert_eq!(text.len(), 19);
        assert!(is_valid_date(&text));
    }

    #[test]
    fn test_candidates_indexing() {
        let mut dates = DateCandidates::new("a".into(), "b".into());
        assert_eq!(dates.get(DateChoice::Exif), "a");
        assert_eq!(dates.get(DateChoice::FileModified), "b");
        assert_eq!(dates.get(DateChoice::Manual), "");

        dates.get_mut(DateChoice::Manual).push('c');
        assert_eq!(dates.get(DateChoice::Manual), "c");
    }

    #[test]
    fn test_exif_date_missing_file() {
        assert_eq!(exif_date(Path::new("/nonexistent/photo.jpg")), "");
        assert_eq!(modify_date(Path::new("/nonexistent/photo.jpg")), "");
    }

    #[test]
    fn test_exif_date_falls_back_to_digitized() {
        use little_exif::exif_tag::ExifTag;
        use little_exif::metadata::Metadata;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.jpg");
        image::RgbImage::new(8, 8).save(&path).unwrap();
        let mut metadata = Metadata::new();
        metadata.set_tag(ExifTag::CreateDate("2004:05:06 07:08:09".to_string()));
        crate::photo::exif_writer::store_metadata(&path, &metadata).unwrap();

        assert_eq!(exif_date(&path), "2004:05:06 07:08:09");
    }

    #[test]
    fn test_exif_date_without_exif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jpg");
        image::RgbImage::new(8, 8).save(&path).unwrap();

        assert_eq!(exif_date(&path), "");
        assert!(is_valid_date(&modify_date(&path)));
    }
}
