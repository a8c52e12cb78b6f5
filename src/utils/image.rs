//! Utility functions for image loading and conversion.

use crate::core::ClassifierError;
use image::{DynamicImage, RgbImage};

/// Converts a DynamicImage to an RgbImage, discarding any alpha channel.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads an image from a file path and converts it to RgbImage.
///
/// # Errors
///
/// Returns `ClassifierError::ImageLoad` if the image cannot be read or
/// decoded from the specified path.
pub fn load_image(path: &std::path::Path) -> Result<RgbImage, ClassifierError> {
    let img = image::open(path).map_err(ClassifierError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

/// Decodes an image from an encoded byte stream and converts it to RgbImage.
///
/// # Errors
///
/// Returns `ClassifierError::ImageLoad` if the stream is empty, truncated,
/// or not a supported image format.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, ClassifierError> {
    let img = image::load_from_memory(bytes).map_err(ClassifierError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_image_rejects_empty_stream() {
        let result = decode_image(&[]);
        assert!(matches!(result, Err(ClassifierError::ImageLoad(_))));
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        let result = decode_image(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_image_roundtrip_png() {
        let img = RgbImage::from_pixel(8, 8, image::Rgb([200, 10, 30]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img.clone())
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_load_image_missing_path() {
        let result = load_image(std::path::Path::new("no_such_image.jpg"));
        assert!(result.is_err());
    }
}
