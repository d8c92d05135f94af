//! Document rasterization: turning a PDF (or image) into one page image.

mod extractor;
mod render;

pub use extractor::EmbeddedImageExtractor;
pub use render::PdftoppmRenderer;

use std::path::Path;

use image::DynamicImage;
use tracing::{debug, warn};

use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Extensions decoded directly instead of being rendered.
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

/// Trait for producing the first page of a document as an image.
pub trait PageRasterizer: Send + Sync {
    /// Rasterize the first page of the document at `path`.
    fn rasterize(&self, path: &Path) -> Result<DynamicImage>;
}

/// Default rasterizer.
///
/// PDFs are rendered with pdftoppm; when pdftoppm is not installed the first
/// embedded page image is extracted instead. Image files are decoded as-is.
pub struct DocumentRasterizer {
    renderer: PdftoppmRenderer,
}

impl DocumentRasterizer {
    pub fn new(renderer: PdftoppmRenderer) -> Self {
        Self { renderer }
    }

    /// Create a rasterizer from PDF settings.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new(PdftoppmRenderer::new(&config.pdftoppm_cmd, config.render_dpi))
    }

    fn rasterize_pdf(&self, path: &Path) -> Result<DynamicImage> {
        match self.renderer.render_first_page(path) {
            Err(PdfError::RendererUnavailable(command)) => {
                warn!(
                    "{} is not available, falling back to embedded page images",
                    command
                );
                let data = std::fs::read(path)?;
                EmbeddedImageExtractor::load(&data)?.first_page_image()
            }
            other => other,
        }
    }
}

impl Default for DocumentRasterizer {
    fn default() -> Self {
        Self::from_config(&PdfConfig::default())
    }
}

impl PageRasterizer for DocumentRasterizer {
    fn rasterize(&self, path: &Path) -> Result<DynamicImage> {
        if !path.is_file() {
            return Err(PdfError::NotFound(path.display().to_string()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            debug!("Decoding image document {}", path.display());
            return Ok(image::open(path)?);
        }

        self.rasterize_pdf(path)
    }
}
