//! Image preprocessing for OCR.

use image::{DynamicImage, GenericImageView, GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::filter::median_filter;
use tracing::debug;

use super::NormalizedImage;

/// Turns a rasterized page into a black/white image for tesseract.
///
/// Grayscale, then a 3x3 median filter against scanner speckle, then a
/// global Otsu threshold computed per image.
pub struct ImageNormalizer {
    /// Median filter radius; 1 gives a 3x3 window.
    median_radius: u32,
}

impl ImageNormalizer {
    /// Create a normalizer with default settings.
    pub fn new() -> Self {
        Self { median_radius: 1 }
    }

    /// Normalize a page image.
    pub fn normalize(&self, image: &DynamicImage) -> NormalizedImage {
        let (width, height) = image.dimensions();

        let gray = image.to_luma8();
        let denoised = median_filter(&gray, self.median_radius, self.median_radius);
        let level = otsu_level(&denoised);
        debug!("Normalizing {}x{} page, Otsu level {}", width, height, level);

        NormalizedImage::from_binary(binarize(&denoised, level))
    }
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn binarize(image: &GrayImage, level: u8) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut result = GrayImage::new(width, height);

    for (x, y, pixel) in image.enumerate_pixels() {
        let output = if pixel[0] > level { 255 } else { 0 };
        result.put_pixel(x, y, Luma([output]));
    }

    result
}
