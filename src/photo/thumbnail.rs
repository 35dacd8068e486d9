use image::{imageops::FilterType, DynamicImage, ImageDecoder, ImageReader, RgbaImage};
use std::path::Path;

use crate::error::PhotoError;

fn load_error(path: &Path, source: image::ImageError) -> PhotoError {
    PhotoError::ImageLoad {
        path: path.to_path_buf(),
        source,
    }
}

/// Decode a photo upright, honouring its EXIF orientation
pub fn load_oriented(path: &Path) -> Result<DynamicImage, PhotoError> {
    let mut decoder = ImageReader::open(path)
        .map_err(|e| load_error(path, e.into()))?
        .with_guessed_format()
        .map_err(|e| load_error(path, e.into()))?
        .into_decoder()
        .map_err(|e| load_error(path, e))?;

    let orientation = decoder.orientation().map_err(|e| load_error(path, e))?;
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| load_error(path, e))?;
    img.apply_orientation(orientation);

    Ok(img)
}

/// Shrink an image for a frame of `columns` columns.
///
/// Width is divided by the column count, height follows the aspect ratio.
/// A single column keeps the full resolution.
pub fn scale_for_columns(img: DynamicImage, columns: usize) -> RgbaImage {
    let columns = u32::try_from(columns).unwrap_or(u32::MAX);
    if columns <= 1 {
        return img.into_rgba8();
    }

    let (w, h) = (img.width(), img.height());
    let new_width = (w / columns).max(1);
    let new_height = ((u64::from(h) * u64::from(new_width) / u64::from(w.max(1))) as u32).max(1);

    image::imageops::resize(&img.into_rgba8(), new_width, new_height, FilterType::Lanczos3)
}

/// Load a photo thumbnail scaled for the given column count.
///
/// The decoded image is first bounded to `max_side` pixels per side.
pub fn load_thumbnail(path: &Path, columns: usize, max_side: u32) -> Result<RgbaImage, PhotoError> {
    let img = load_oriented(path)?;
    let img = if img.width() > max_side || img.height() > max_side {
        img.resize(max_side, max_side, FilterType::Triangle)
    } else {
        img
    };
    Ok(scale_for_columns(img, columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_column_keeps_size() {
        let img = DynamicImage::new_rgb8(120, 80);
        let scaled = scale_for_columns(img, 1);
        assert_eq!(scaled.dimensions(), (120, 80));
    }

    #[test]
    fn test_scale_divides_width_and_keeps_aspect() {
        let img = DynamicImage::new_rgb8(120, 80);
        let scaled = scale_for_columns(img, 3);
        assert_eq!(scaled.dimensions(), (40, 26));
    }

    #[test]
    fn test_scale_never_collapses_to_zero() {
        let img = DynamicImage::new_rgb8(2, 2);
        let scaled = scale_for_columns(img, 6);
        assert_eq!(scaled.dimensions(), (1, 1));
    }

    #[test]
    fn test_load_thumbnail_from_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        image::RgbImage::new(60, 30).save(&path).unwrap();

        let thumb = load_thumbnail(&path, 2, 4096).unwrap();
        assert_eq!(thumb.dimensions(), (30, 15));
    }

    #[test]
    fn test_load_thumbnail_bounds_large_photo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.jpg");
        image::RgbImage::new(200, 100).save(&path).unwrap();

        let thumb = load_thumbnail(&path, 1, 50).unwrap();
        assert_eq!(thumb.dimensions(), (50, 25));
    }

    #[test]
    fn test_load_thumbnail_missing_file() {
        let result = load_thumbnail(Path::new("/nonexistent/photo.jpg"), 3, 4096);
        assert!(matches!(result, Err(PhotoError::ImageLoad { .. })));
    }
}
