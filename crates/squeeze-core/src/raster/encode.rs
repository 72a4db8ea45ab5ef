//! JPEG encoding at a given quality.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};

use crate::error::{Result, SqueezeError};
use crate::search::Encoded;

/// Encode an RGB image to JPEG bytes.
///
/// `quality` is clamped to `1..=100`.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(SqueezeError::input(format!(
            "cannot encode an empty {width}x{height} image"
        )));
    }

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100)).write_image(
        image.as_raw(),
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;

    Ok(buffer.into_inner())
}

/// Encode for a quality search: the payload is the JPEG bytes.
pub fn encode_jpeg_attempt(image: &RgbImage, quality: u8) -> Result<Encoded<Vec<u8>>> {
    encode_jpeg(image, quality).map(Encoded::bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x ^ y) % 256) as u8])
        })
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_jpeg(&gradient(64, 48), 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn test_lower_quality_is_smaller() {
        let image = gradient(128, 128);
        let high = encode_jpeg(&image, 95).unwrap();
        let low = encode_jpeg(&image, 10).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_attempt_reports_byte_length() {
        let attempt = encode_jpeg_attempt(&gradient(16, 16), 50).unwrap();
        assert_eq!(attempt.size, attempt.output.len() as u64);
    }

    #[test]
    fn test_empty_image_rejected() {
        assert!(matches!(
            encode_jpeg(&RgbImage::new(0, 0), 80),
            Err(SqueezeError::InvalidInput(_))
        ));
    }
}
