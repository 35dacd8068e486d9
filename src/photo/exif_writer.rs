//! Rewriting the capture date stored in a JPEG's EXIF block.
//!
//! Existing tags are read with `little_exif` and re-encoded with the new
//! date. The APP1 segment is then spliced into the file with `img-parts`,
//! which also works for JPEGs that had no EXIF block before.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use img_parts::jpeg::Jpeg;
use img_parts::ImageEXIF;
use little_exif::exif_tag::ExifTag;
use little_exif::filetype::FileExtension;
use little_exif::metadata::Metadata;
use log::debug;

use super::dates::parse_date;
use crate::error::PhotoError;

/// FF E1 marker (2) + segment length (2) + "Exif\0\0" (6)
const APP1_HEADER_SIZE: usize = 10;

fn exif_error(path: &Path, message: impl Into<String>) -> PhotoError {
    PhotoError::ExifWrite {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Store `date` as the capture date (`DateTimeOriginal` and `CreateDate`)
pub fn write_exif_date(path: &Path, date: &str) -> Result<(), PhotoError> {
    parse_date(date)?;
    let date = date.trim().to_string();

    // little_exif can panic on unusual files
    let read = panic::catch_unwind(AssertUnwindSafe(|| Metadata::new_from_path(path)));
    let mut metadata = match read {
        Ok(Ok(metadata)) => metadata,
        Ok(Err(e)) => {
            debug!("No readable EXIF in {}: {}", path.display(), e);
            Metadata::new()
        }
        Err(_) => {
            debug!("EXIF reader panicked on {}", path.display());
            Metadata::new()
        }
    };

    metadata.set_tag(ExifTag::DateTimeOriginal(date.clone()));
    metadata.set_tag(ExifTag::CreateDate(date));

    store_metadata(path, &metadata)
}

/// Replace the EXIF block of a JPEG with `metadata`
pub(super) fn store_metadata(path: &Path, metadata: &Metadata) -> Result<(), PhotoError> {
    let encoded = panic::catch_unwind(AssertUnwindSafe(|| {
        metadata.as_u8_vec(FileExtension::JPEG)
    }));
    let app1 = match encoded {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => return Err(exif_error(path, format!("failed to encode EXIF: {e:?}"))),
        Err(_) => return Err(exif_error(path, "EXIF encoder panicked")),
    };
    if app1.len() <= APP1_HEADER_SIZE {
        return Err(exif_error(path, "encoded EXIF is too short"));
    }

    let bytes = fs::read(path).map_err(|e| exif_error(path, e.to_string()))?;
    let mut jpeg =
        Jpeg::from_bytes(bytes.into()).map_err(|e| exif_error(path, e.to_string()))?;
    jpeg.set_exif(Some(app1[APP1_HEADER_SIZE..].to_vec().into()));

    let mut output = Vec::new();
    jpeg.encoder()
        .write_to(&mut output)
        .map_err(|e| exif_error(path, e.to_string()))?;
    fs::write(path, output).map_err(|e| exif_error(path, e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::photo::dates::exif_date;

    #[test]
    fn test_write_date_into_jpeg_without_exif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        image::RgbImage::new(16, 16).save(&path).unwrap();
        assert_eq!(exif_date(&path), "");

        write_exif_date(&path, "2001:02:03 04:05:06").unwrap();

        assert_eq!(exif_date(&path), "2001:02:03 04:05:06");
        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn test_rewrite_existing_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        image::RgbImage::new(16, 16).save(&path).unwrap();

        write_exif_date(&path, "2001:02:03 04:05:06").unwrap();
        write_exif_date(&path, "2010:11:12 13:14:15").unwrap();

        assert_eq!(exif_date(&path), "2010:11:12 13:14:15");
    }

    #[test]
    fn test_rewrite_keeps_other_tags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        image::RgbImage::new(16, 16).save(&path).unwrap();
        let mut metadata = Metadata::new();
        metadata.set_tag(ExifTag::Make("TestCam".to_string()));
        store_metadata(&path, &metadata).unwrap();

        write_exif_date(&path, "2011:11:11 11:11:11").unwrap();

        let file = fs::File::open(&path).unwrap();
        let exif = exif::Reader::new()
            .read_from_container(&mut std::io::BufReader::new(file))
            .unwrap();
        let make = exif.get_field(exif::Tag::Make, exif::In::PRIMARY).unwrap();
        assert!(make.display_value().to_string().contains("TestCam"));
        assert_eq!(exif_date(&path), "2011:11:11 11:11:11");
    }

    #[test]
    fn test_invalid_date_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        image::RgbImage::new(16, 16).save(&path).unwrap();
        let before = fs::read(&path).unwrap();

        let result = write_exif_date(&path, "yesterday");

        assert!(matches!(result, Err(PhotoError::InvalidDate(_))));
        assert_eq!(fs::read(&path).unwrap(), before);
    }
}
