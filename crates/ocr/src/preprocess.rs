use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use std::io::Cursor;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Unsupported or corrupt image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Decode a roster photo or screenshot and return grayscale, contrast-stretched
/// PNG bytes no larger than `max_dimension` on either side.
pub fn prepare_for_ocr(data: &[u8], max_dimension: u32) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    let gray = stretch_contrast(downscale(img, max_dimension).to_luma8());
    encode_png(DynamicImage::ImageLuma8(gray))
}

fn downscale(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    if max_dimension > 0 && (img.width() > max_dimension || img.height() > max_dimension) {
        img.resize(max_dimension, max_dimension, FilterType::Lanczos3)
    } else {
        img
    }
}

/// Map the darkest pixel to 0 and the lightest to 255. Flat images pass through.
fn stretch_contrast(mut gray: GrayImage) -> GrayImage {
    let (lo, hi) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), p| (lo.min(p[0]), hi.max(p[0])));
    if hi <= lo {
        return gray;
    }
    let range = u32::from(hi - lo);
    for p in gray.pixels_mut() {
        p[0] = (u32::from(p[0] - lo) * 255 / range) as u8;
    }
    gray
}

fn encode_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgb, RgbImage};

    fn png(img: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png).unwrap();
        buf
    }

    #[test]
    fn output_is_png() {
        let img: RgbImage = ImageBuffer::from_pixel(6, 3, Rgb([10, 200, 30]));
        let out = prepare_for_ocr(&png(DynamicImage::ImageRgb8(img)), 2800).unwrap();
        assert_eq!(&out[..4], b"\x89PNG");
    }

    #[test]
    fn stretches_narrow_range_to_full() {
        let gray: GrayImage = ImageBuffer::from_fn(4, 1, |x, _| Luma([100 + x as u8 * 10]));
        let out = stretch_contrast(gray);
        let values: Vec<u8> = out.pixels().map(|p| p[0]).collect();
        assert_eq!(values.first(), Some(&0));
        assert_eq!(values.last(), Some(&255));
    }

    #[test]
    fn flat_image_is_untouched() {
        let gray: GrayImage = ImageBuffer::from_pixel(3, 3, Luma([77]));
        assert!(stretch_contrast(gray).pixels().all(|p| p[0] == 77));
    }

    #[test]
    fn oversized_image_is_downscaled() {
        let gray: GrayImage = ImageBuffer::from_pixel(400, 100, Luma([50]));
        let out = downscale(DynamicImage::ImageLuma8(gray), 200);
        assert_eq!((out.width(), out.height()), (200, 50));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(matches!(prepare_for_ocr(b"not an image", 2800), Err(PreprocessError::Load(_))));
    }
}
