//! Page rendering with poppler's pdftoppm.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::DynamicImage;
use tracing::debug;

use super::Result;
use crate::error::PdfError;

/// Renders PDF pages to PNG by running `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdftoppmRenderer {
    command: PathBuf,
    dpi: u32,
}

impl PdftoppmRenderer {
    pub fn new(command: impl Into<PathBuf>, dpi: u32) -> Self {
        Self {
            command: command.into(),
            dpi,
        }
    }

    /// Render page 1 of `pdf` at the configured DPI.
    pub fn render_first_page(&self, pdf: &Path) -> Result<DynamicImage> {
        let out_dir = tempfile::tempdir()?;
        let prefix = out_dir.path().join("page");

        debug!("Rendering {} at {} dpi", pdf.display(), self.dpi);

        let output = Command::new(&self.command)
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .args(["-f", "1", "-l", "1", "-singlefile"])
            .arg(pdf)
            .arg(&prefix)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    PdfError::RendererUnavailable(self.command.display().to_string())
                }
                _ => PdfError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PdfError::Render(format!(
                "pdftoppm exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let page = prefix.with_extension("png");
        if !page.exists() {
            return Err(PdfError::Render("pdftoppm produced no page".to_string()));
        }

        Ok(image::open(&page)?)
    }
}
