//! Text recognition through the tesseract command-line engine.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{NormalizedImage, RawText, TextRecognizer};

/// Recognizer that shells out to a tesseract executable.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    command: PathBuf,
    language: String,
}

impl TesseractRecognizer {
    /// Create a recognizer for the given executable and language.
    pub fn new(command: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            language: language.into(),
        }
    }

    /// Create a recognizer from OCR settings.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::new(&config.tesseract_cmd, &config.language)
    }

    pub fn command(&self) -> &Path {
        &self.command
    }

    fn run(&self, input: &Path) -> Result<String, OcrError> {
        let output = Command::new(&self.command)
            .arg(input)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    OcrError::EngineUnavailable(self.command.display().to_string())
                }
                _ => OcrError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, image: &NormalizedImage) -> Result<RawText, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();

        // tesseract reads from a file; the temp file is removed on drop
        let input = tempfile::Builder::new()
            .prefix("aadhaar-page-")
            .suffix(".png")
            .tempfile()?;
        image
            .as_gray()
            .save_with_format(input.path(), image::ImageFormat::Png)?;

        debug!(
            "Running {} on {}x{} page (lang={})",
            self.command.display(),
            width,
            height,
            self.language
        );

        let text = RawText::new(&self.run(input.path())?);

        info!(
            "OCR complete: {} lines in {}ms",
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn test_missing_engine() {
        let recognizer = TesseractRecognizer::new("/nonexistent/bin/tesseract", "eng");
        let image = NormalizedImage::from_binary(GrayImage::from_pixel(8, 8, image::Luma([255])));

        let err = recognizer.recognize(&image).unwrap_err();
        assert!(matches!(err, OcrError::EngineUnavailable(_)));
    }

    #[test]
    fn test_from_config() {
        let recognizer = TesseractRecognizer::from_config(&OcrConfig::default());
        assert_eq!(recognizer.command(), Path::new("tesseract"));
        assert_eq!(recognizer.language, "eng");
    }
}
