//! Resolving a document reference to a readable local file.

mod download;

pub use download::{is_tls_verification_error, Downloader};

use std::path::{Path, PathBuf};

use tempfile::TempPath;
use tracing::debug;

use crate::error::DownloadError;
use crate::models::config::DownloadConfig;

/// Where a document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentReference {
    /// A path on the local filesystem, used as-is.
    Local(PathBuf),
    /// An `http://` or `https://` URL that must be fetched first.
    Remote(String),
}

impl DocumentReference {
    /// Classify a raw reference string. Only an `http://` or `https://`
    /// prefix makes a reference remote.
    pub fn parse(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            DocumentReference::Remote(reference.to_string())
        } else {
            DocumentReference::Local(PathBuf::from(reference))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DocumentReference::Remote(_))
    }
}

/// A local file ready for rasterization.
///
/// When the file was downloaded it is owned by this value and deleted when
/// the value is dropped. Local references are never deleted.
#[derive(Debug)]
pub struct ResolvedSource {
    path: PathBuf,
    temp: Option<TempPath>,
}

impl ResolvedSource {
    fn local(path: PathBuf) -> Self {
        Self { path, temp: None }
    }

    fn downloaded(temp: TempPath) -> Self {
        Self {
            path: temp.to_path_buf(),
            temp: Some(temp),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether dropping this value removes the file.
    pub fn owns_temp_file(&self) -> bool {
        self.temp.is_some()
    }
}

/// Turns references into local files, downloading remote ones.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    downloader: Downloader,
}

impl SourceResolver {
    pub fn new(downloader: Downloader) -> Self {
        Self { downloader }
    }

    pub fn from_config(config: &DownloadConfig) -> Self {
        Self::new(Downloader::from_config(config))
    }

    /// Resolve `reference` to a local file.
    ///
    /// Must not be called from inside an async runtime; the download uses a
    /// blocking HTTP client.
    pub fn resolve(&self, reference: &str) -> Result<ResolvedSource, DownloadError> {
        match DocumentReference::parse(reference) {
            DocumentReference::Local(path) => {
                debug!("Using local document {}", path.display());
                Ok(ResolvedSource::local(path))
            }
            DocumentReference::Remote(url) => {
                let temp = self.downloader.fetch(&url)?;
                Ok(ResolvedSource::downloaded(temp))
            }
        }
    }
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self::from_config(&DownloadConfig::default())
    }
}
