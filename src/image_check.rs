// Uploaded-image decodability check. Images are never interpreted beyond
// "does this decode to something bigger than a thumbnail glitch".
use tracing::debug;

const MIN_DIMENSION: u32 = 10;

/// True when the bytes decode as an image with both sides above the minimum.
pub fn validate_image(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }
    match image::load_from_memory(bytes) {
        Ok(img) => img.width() > MIN_DIMENSION && img.height() > MIN_DIMENSION,
        Err(e) => {
            debug!("Rejected upload: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::new(width, height);
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodable_image_passes() {
        assert!(validate_image(&png_bytes(64, 64)));
    }

    #[test]
    fn tiny_image_is_rejected() {
        assert!(!validate_image(&png_bytes(8, 8)));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(!validate_image(b"not an image"));
        assert!(!validate_image(&[]));
    }
}
