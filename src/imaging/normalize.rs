use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, ColorType, DynamicImage};

use crate::{config::ImageConfig, error::Result, models::ImageAsset};

/// Target size for a `width` x `height` image: at most `max_width` wide,
/// aspect ratio kept, never enlarged.
pub fn fit_width(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || width == 0 {
        return (width, height);
    }
    let scaled = (height as u64 * max_width as u64 + width as u64 / 2) / width as u64;
    (max_width, scaled.max(1) as u32)
}

/// Decodes `bytes`, shrinks the picture to the configured width, re-encodes
/// it as JPEG and wraps it in a data URI.
pub fn normalize_bytes(bytes: &[u8], config: &ImageConfig) -> Result<ImageAsset> {
    let decoded = image::load_from_memory(bytes)?;
    normalize_image(&decoded, config)
}

pub fn normalize_image(image: &DynamicImage, config: &ImageConfig) -> Result<ImageAsset> {
    let (width, height) = fit_width(image.width(), image.height(), config.max_width.max(1));
    let rgb = if (width, height) == (image.width(), image.height()) {
        image.to_rgb8()
    } else {
        image
            .resize_exact(width, height, FilterType::Lanczos3)
            .to_rgb8()
    };

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, config.jpeg_quality).encode(
        rgb.as_raw(),
        width,
        height,
        ColorType::Rgb8,
    )?;

    log::debug!(
        "Normalized {}x{} image to {}x{} JPEG ({} bytes)",
        image.width(),
        image.height(),
        width,
        height,
        jpeg.len()
    );

    Ok(ImageAsset::from_jpeg_base64(&STANDARD.encode(&jpeg)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::StudyError;
    use crate::models::DATA_URI_PREFIX;
    use image::{ImageOutputFormat, Rgb, RgbImage};
    use std::io::Cursor;

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageOutputFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn decode(asset: &ImageAsset) -> DynamicImage {
        let jpeg = STANDARD.decode(asset.base64_payload()).unwrap();
        image::load_from_memory(&jpeg).unwrap()
    }

    #[test]
    fn fit_width_keeps_aspect() {
        assert_eq!(fit_width(1600, 1200, 800), (800, 600));
        assert_eq!(fit_width(1000, 333, 800), (800, 266));
        assert_eq!(fit_width(640, 480, 800), (640, 480));
        assert_eq!(fit_width(8000, 1, 800), (800, 1));
    }

    #[test]
    fn wide_images_are_scaled_down() {
        let asset = normalize_bytes(&png_bytes(1600, 1200), &ImageConfig::default()).unwrap();
        assert!(asset.as_data_uri().starts_with(DATA_URI_PREFIX));

        let decoded = decode(&asset);
        assert_eq!((decoded.width(), decoded.height()), (800, 600));
    }

    #[test]
    fn narrow_images_keep_their_size() {
        let asset = normalize_bytes(&png_bytes(320, 240), &ImageConfig::default()).unwrap();
        let decoded = decode(&asset);
        assert_eq!((decoded.width(), decoded.height()), (320, 240));
    }

    #[test]
    fn zero_max_width_still_yields_a_visible_image() {
        let config = ImageConfig {
            max_width: 0,
            ..ImageConfig::default()
        };
        let decoded = decode(&normalize_bytes(&png_bytes(40, 30), &config).unwrap());
        assert_eq!(decoded.width(), 1);
        assert!(decoded.height() >= 1);
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let err = normalize_bytes(b"definitely not an image", &ImageConfig::default()).unwrap_err();
        assert!(matches!(err, StudyError::Image(_)));
    }
}
