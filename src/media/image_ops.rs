use std::path::Path;

use image::GenericImageView;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

/// Dimension ceiling for stored uploads. Anything larger is downscaled to
/// fit, preserving aspect ratio.
pub const MAX_WIDTH: u32 = 1920;
pub const MAX_HEIGHT: u32 = 1080;

const JPEG_QUALITY: u8 = 85;

/// Rewrites the file in place when it exceeds the dimension ceiling.
/// The caller treats any error as non-fatal and keeps the original file.
pub fn normalize_in_place(path: &Path) -> image::ImageResult<()> {
    let img = image::open(path)?;
    let (width, height) = img.dimensions();

    if width <= MAX_WIDTH && height <= MAX_HEIGHT {
        return Ok(());
    }

    let resized = img.resize(MAX_WIDTH, MAX_HEIGHT, FilterType::Lanczos3);

    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| matches!(e.to_ascii_lowercase().as_str(), "jpg" | "jpeg"));

    if is_jpeg {
        let file = std::fs::File::create(path)?;
        let encoder = JpegEncoder::new_with_quality(file, JPEG_QUALITY);
        resized.write_with_encoder(encoder)?;
    } else {
        resized.save(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use tempfile::TempDir;

    fn write_image(path: &Path, width: u32, height: u32) {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([90, 110, 130]),
        ));
        img.save(path).unwrap();
    }

    #[test]
    fn test_small_image_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("small.png");
        write_image(&path, 640, 480);
        let before = std::fs::metadata(&path).unwrap().len();

        normalize_in_place(&path).unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), before);
        let img = image::open(&path).unwrap();
        assert_eq!(img.dimensions(), (640, 480));
    }

    #[test]
    fn test_oversized_image_downscaled_within_ceiling() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("large.jpg");
        write_image(&path, 2400, 1400);

        normalize_in_place(&path).unwrap();

        let (width, height) = image::open(&path).unwrap().dimensions();
        assert!(width <= MAX_WIDTH);
        assert!(height <= MAX_HEIGHT);
        // Aspect ratio preserved to within rounding
        let ratio = width as f64 / height as f64;
        assert!((ratio - 2400.0 / 1400.0).abs() < 0.01);
    }

    #[test]
    fn test_wide_image_bounded_by_width() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wide.png");
        write_image(&path, 4000, 500);

        normalize_in_place(&path).unwrap();

        let (width, height) = image::open(&path).unwrap().dimensions();
        assert_eq!(width, MAX_WIDTH);
        assert!(height <= MAX_HEIGHT);
    }

    #[test]
    fn test_garbage_bytes_error_out() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("garbage.jpg");
        std::fs::write(&path, b"not an image at all").unwrap();

        assert!(normalize_in_place(&path).is_err());
    }
}
