//! Error types for the aadhaar-core library.

use thiserror::Error;

/// Main error type for the aadhaar library.
#[derive(Error, Debug)]
pub enum AadhaarError {
    /// Fetching a remote document failed.
    #[error("download error: {0}")]
    Download(#[from] DownloadError),

    /// PDF rasterization error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),
}

impl AadhaarError {
    /// Short name of the failure kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AadhaarError::Download(_) => "download",
            AadhaarError::Pdf(_) => "rasterization",
            AadhaarError::Ocr(_) => "recognition",
        }
    }
}

/// Errors raised while resolving a remote document reference.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// The server answered with a non-2xx status.
    #[error("failed to download file from URL: HTTP {0}")]
    Status(u16),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The server certificate could not be verified.
    #[error("TLS certificate verification failed: {0}")]
    TlsVerification(String),

    /// Any other transport failure (DNS, connection refused, reset).
    #[error("secure download failed: {0}")]
    Request(String),

    /// The fetched bytes could not be written to a temporary file.
    #[error("failed to persist download: {0}")]
    Persist(#[from] std::io::Error),
}

/// Errors related to turning a document into a page image.
#[derive(Error, Debug)]
pub enum PdfError {
    /// The document does not exist on disk.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The external renderer could not be started.
    #[error("renderer unavailable at {0}")]
    RendererUnavailable(String),

    /// The rasterizer failed to render the page.
    #[error("failed to render page: {0}")]
    Render(String),

    /// No decodable page image was found in the PDF.
    #[error("no page image found in PDF")]
    NoImages,

    /// The page image could not be decoded.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error while reading the document or rendered page.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The OCR executable could not be started.
    #[error("OCR engine unavailable at {0}")]
    EngineUnavailable(String),

    /// The OCR engine ran but reported a failure.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Failed to hand the normalized image to the engine.
    #[error("failed to write OCR input: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error talking to the engine.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to loading and saving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid JSON for this schema.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Result type for the aadhaar library.
pub type Result<T> = std::result::Result<T, AadhaarError>;
