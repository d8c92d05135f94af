//! OCR pipeline: image normalization and text recognition.

mod preprocessing;
mod tesseract;

pub use preprocessing::ImageNormalizer;
pub use tesseract::TesseractRecognizer;

use image::GrayImage;

use crate::error::OcrError;

/// A binarized single-channel page, ready for recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedImage(GrayImage);

impl NormalizedImage {
    /// Wrap an image that is already binarized.
    pub fn from_binary(image: GrayImage) -> Self {
        Self(image)
    }

    pub fn as_gray(&self) -> &GrayImage {
        &self.0
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }
}

/// Recognized text, one entry per non-blank line, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawText {
    lines: Vec<String>,
}

impl RawText {
    /// Split engine output into trimmed, non-blank lines.
    pub fn new(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> Vec<&str> {
        self.lines.iter().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Converts a normalized page image into text.
///
/// Implementations may return empty or garbled text for poor scans; callers
/// must not assume any field is present.
pub trait TextRecognizer: Send + Sync {
    /// Recognize the text on a page.
    fn recognize(&self, image: &NormalizedImage) -> Result<RawText, OcrError>;
}
