//! Image codec selection
//!
//! Maps an entry name to an encoder and handles the byte-level encode and
//! decode through the `image` crate.

use image::{DynamicImage, ImageOutputFormat};
use std::io::Cursor;
use std::path::Path;

use crate::error::StorageError;

pub const DEFAULT_JPEG_QUALITY: u8 = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    /// Lossless
    Png,
    /// Lossy, with quality in 1..=100
    Jpeg { quality: u8 },
}

impl ImageEncoding {
    /// Pick the encoder from the lowercased extension of `name`.
    ///
    /// Only `png` and `jpg` are recognised.
    pub fn for_name(name: &str, jpeg_quality: u8) -> Result<Self, StorageError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("png") => Ok(ImageEncoding::Png),
            Some("jpg") => Ok(ImageEncoding::Jpeg {
                quality: jpeg_quality.clamp(1, 100),
            }),
            _ => Err(StorageError::UnsupportedFormat(name.to_string())),
        }
    }

    fn output_format(self) -> ImageOutputFormat {
        match self {
            ImageEncoding::Png => ImageOutputFormat::Png,
            ImageEncoding::Jpeg { quality } => ImageOutputFormat::Jpeg(quality),
        }
    }
}

/// Encode `image` into an in-memory buffer
pub fn encode(image: &DynamicImage, encoding: ImageEncoding) -> Result<Vec<u8>, StorageError> {
    let mut buffer = Cursor::new(Vec::new());
    match encoding {
        // JPEG has no alpha channel
        ImageEncoding::Jpeg { .. } => DynamicImage::ImageRgb8(image.to_rgb8())
            .write_to(&mut buffer, encoding.output_format())?,
        ImageEncoding::Png => image.write_to(&mut buffer, encoding.output_format())?,
    }
    Ok(buffer.into_inner())
}

/// Decode image bytes, guessing the format from their content
pub fn decode(data: &[u8]) -> Result<DynamicImage, StorageError> {
    image::load_from_memory(data).map_err(StorageError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(12, 7, Rgba([10, 200, 30, 255])))
    }

    #[test]
    fn test_encoding_from_extension() {
        assert_eq!(ImageEncoding::for_name("a.png", 80).unwrap(), ImageEncoding::Png);
        assert_eq!(ImageEncoding::for_name("A.PNG", 80).unwrap(), ImageEncoding::Png);
        assert_eq!(
            ImageEncoding::for_name("photo.JPG", 80).unwrap(),
            ImageEncoding::Jpeg { quality: 80 }
        );
    }

    #[test]
    fn test_unknown_extensions_are_unsupported() {
        for name in ["a.gif", "a.jpeg", "a.webp", "noextension"] {
            let err = ImageEncoding::for_name(name, 80).unwrap_err();
            assert!(matches!(err, StorageError::UnsupportedFormat(_)), "{}", name);
        }
    }

    #[test]
    fn test_png_keeps_pixels() {
        let image = sample();
        let bytes = encode(&image, ImageEncoding::Png).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.to_rgba8(), image.to_rgba8());
    }

    #[test]
    fn test_jpeg_keeps_dimensions() {
        let bytes = encode(&sample(), ImageEncoding::Jpeg { quality: 80 }).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]));

        let decoded = decode(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, StorageError::Decode(_)));
    }
}
