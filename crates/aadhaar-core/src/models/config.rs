//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable overriding the tesseract executable.
pub const TESSERACT_PATH_ENV: &str = "TESSERACT_PATH";

/// Environment variable overriding the pdftoppm executable.
pub const PDFTOPPM_PATH_ENV: &str = "PDFTOPPM_PATH";

/// Main configuration for the aadhaar pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AadhaarConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// PDF rasterization configuration.
    pub pdf: PdfConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Remote document download configuration.
    pub download: DownloadConfig,

    /// HTTP service configuration.
    pub server: ServerConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Path to the tesseract executable.
    pub tesseract_cmd: PathBuf,

    /// Tesseract language code.
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: PathBuf::from("tesseract"),
            language: "eng".to_string(),
        }
    }
}

/// PDF rasterization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// DPI for rendering PDF pages to images.
    pub render_dpi: u32,

    /// Path to the pdftoppm executable (poppler-utils).
    pub pdftoppm_cmd: PathBuf,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            render_dpi: 300,
            pdftoppm_cmd: PathBuf::from("pdftoppm"),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of leading OCR lines searched for the card holder's name.
    pub max_name_lines: usize,

    /// Fuzzy score (0-100) a gender keyword must exceed.
    pub gender_threshold: u8,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_name_lines: 10,
            gender_threshold: 80,
        }
    }
}

/// Remote document download configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Retry once without certificate verification when TLS verification fails.
    pub insecure_fallback: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            insecure_fallback: true,
        }
    }
}

/// HTTP service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the service listens on.
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

impl AadhaarConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides using `lookup` to resolve environment variables.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(TESSERACT_PATH_ENV).filter(|v| !v.is_empty()) {
            self.ocr.tesseract_cmd = PathBuf::from(path);
        }
        if let Some(path) = lookup(PDFTOPPM_PATH_ENV).filter(|v| !v.is_empty()) {
            self.pdf.pdftoppm_cmd = PathBuf::from(path);
        }
        self
    }
}
