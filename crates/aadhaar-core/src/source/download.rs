//! Blocking HTTP download of remote documents into temporary files.

use std::error::Error as StdError;
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::Url;
use tempfile::TempPath;
use tracing::{debug, info, warn};

use crate::error::DownloadError;
use crate::models::config::DownloadConfig;

const DEFAULT_SUFFIX: &str = ".pdf";

/// Fetches a URL into a temporary file.
#[derive(Debug, Clone)]
pub struct Downloader {
    timeout: Duration,
    insecure_fallback: bool,
}

impl Downloader {
    pub fn new(timeout: Duration, insecure_fallback: bool) -> Self {
        Self {
            timeout,
            insecure_fallback,
        }
    }

    pub fn from_config(config: &DownloadConfig) -> Self {
        Self::new(
            Duration::from_secs(config.timeout_secs),
            config.insecure_fallback,
        )
    }

    /// Download `url` and persist the body to a fresh temporary file.
    ///
    /// A certificate verification failure is retried once without
    /// verification when the insecure fallback is enabled.
    pub fn fetch(&self, url: &str) -> Result<TempPath, DownloadError> {
        let start = Instant::now();

        let body = self.get_with_fallback(url, |insecure| self.get(url, insecure))?;

        let mut file = tempfile::Builder::new()
            .prefix("aadhaar-")
            .suffix(&suffix_for(url))
            .tempfile()?;
        file.write_all(&body)?;
        file.flush()?;
        let temp = file.into_temp_path();

        info!(
            "Downloaded {} bytes from {} in {}ms",
            body.len(),
            url,
            start.elapsed().as_millis()
        );
        debug!("Saved download to {}", temp.display());

        Ok(temp)
    }

    /// Call `get` with verification on, and at most once more with it off
    /// when the first attempt failed certificate verification.
    fn get_with_fallback<F>(&self, url: &str, mut get: F) -> Result<Vec<u8>, DownloadError>
    where
        F: FnMut(bool) -> Result<Vec<u8>, DownloadError>,
    {
        match get(false) {
            Err(DownloadError::TlsVerification(reason)) if self.insecure_fallback => {
                warn!(
                    "TLS verification failed for {}: {}; retrying without certificate verification",
                    url, reason
                );
                get(true)
            }
            other => other,
        }
    }

    fn get(&self, url: &str, accept_invalid_certs: bool) -> Result<Vec<u8>, DownloadError> {
        let client = Client::builder()
            .user_agent(concat!("aadhaar-core/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| DownloadError::Request(error_chain(&e)))?;

        let response = client.get(url).send().map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }

        let body = response.bytes().map_err(|e| self.classify(e))?;
        Ok(body.to_vec())
    }

    fn classify(&self, err: reqwest::Error) -> DownloadError {
        if err.is_timeout() {
            DownloadError::Timeout(self.timeout.as_secs())
        } else if is_tls_verification_error(&err) {
            DownloadError::TlsVerification(error_chain(&err))
        } else {
            DownloadError::Request(error_chain(&err))
        }
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::from_config(&DownloadConfig::default())
    }
}

/// Whether `err`, or anything in its source chain, is a certificate
/// verification failure.
pub fn is_tls_verification_error(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.to_string().to_lowercase().contains("certificate") {
            return true;
        }
        current = e.source();
    }
    false
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(e) = current {
        message.push_str(": ");
        message.push_str(&e.to_string());
        current = e.source();
    }
    message
}

/// Keep a recognizable extension so the rasterizer can tell images from PDFs.
fn suffix_for(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .and_then(|name| {
            Path::new(&name)
                .extension()
                .and_then(|e| e.to_str())
                .filter(|e| !e.is_empty() && e.len() <= 4 && e.chars().all(|c| c.is_ascii_alphanumeric()))
                .map(|e| format!(".{}", e.to_lowercase()))
        })
        .unwrap_or_else(|| DEFAULT_SUFFIX.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::fmt;
    use std::rc::Rc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn fetch_blocking(
        downloader: Downloader,
        url: String,
    ) -> Result<TempPath, DownloadError> {
        tokio::task::spawn_blocking(move || downloader.fetch(&url))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_persists_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cards/front.pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 card".to_vec()))
            .mount(&server)
            .await;

        let url = format!("{}/cards/front.pdf", server.uri());
        let temp = fetch_blocking(Downloader::default(), url).await.unwrap();

        assert_eq!(std::fs::read(&temp).unwrap(), b"%PDF-1.4 card");
        assert!(temp.to_string_lossy().ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing.pdf", server.uri());
        let err = fetch_blocking(Downloader::default(), url).await.unwrap_err();

        assert!(matches!(err, DownloadError::Status(404)));
        assert_eq!(
            err.to_string(),
            "failed to download file from URL: HTTP 404"
        );
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let url = format!("{}/slow.pdf", server.uri());
        let downloader = Downloader::new(Duration::from_secs(1), true);
        let err = fetch_blocking(downloader, url).await.unwrap_err();

        assert!(matches!(err, DownloadError::Timeout(1)));
    }

    #[test]
    fn test_fetch_unreachable_host() {
        let err = Downloader::new(Duration::from_secs(2), true)
            .fetch("http://127.0.0.1:9/card.pdf")
            .unwrap_err();
        assert!(matches!(err, DownloadError::Request(_)));
    }

    #[tokio::test]
    async fn test_temp_file_removed_on_drop() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()))
            .mount(&server)
            .await;

        let url = format!("{}/card.pdf", server.uri());
        let temp = fetch_blocking(Downloader::default(), url).await.unwrap();
        let saved = temp.to_path_buf();
        assert!(saved.exists());

        drop(temp);
        assert!(!saved.exists());
    }

    /// Replays `responses` in order and records the `insecure` flag of each call.
    fn scripted(
        responses: Vec<Result<Vec<u8>, DownloadError>>,
    ) -> (
        Rc<RefCell<Vec<bool>>>,
        impl FnMut(bool) -> Result<Vec<u8>, DownloadError>,
    ) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let recorded = calls.clone();
        let mut responses = responses.into_iter();
        let get = move |insecure: bool| {
            recorded.borrow_mut().push(insecure);
            responses
                .next()
                .unwrap_or_else(|| Err(DownloadError::Request("unexpected call".to_string())))
        };
        (calls, get)
    }

    fn tls_failure() -> DownloadError {
        DownloadError::TlsVerification("invalid peer certificate: UnknownIssuer".to_string())
    }

    #[test]
    fn test_tls_failure_retried_without_verification() {
        let (calls, get) = scripted(vec![Err(tls_failure()), Ok(b"%PDF".to_vec())]);

        let body = Downloader::default()
            .get_with_fallback("https://example.com/card.pdf", get)
            .unwrap();

        assert_eq!(body, b"%PDF".to_vec());
        assert_eq!(*calls.borrow(), vec![false, true]);
    }

    #[test]
    fn test_tls_failure_surfaces_without_fallback() {
        let (calls, get) = scripted(vec![Err(tls_failure()), Ok(b"%PDF".to_vec())]);

        let err = Downloader::new(Duration::from_secs(10), false)
            .get_with_fallback("https://example.com/card.pdf", get)
            .unwrap_err();

        assert!(matches!(err, DownloadError::TlsVerification(_)));
        assert_eq!(*calls.borrow(), vec![false]);
    }

    #[test]
    fn test_tls_retry_happens_once() {
        let (calls, get) = scripted(vec![Err(tls_failure()), Err(tls_failure()), Ok(Vec::new())]);

        let err = Downloader::default()
            .get_with_fallback("https://example.com/card.pdf", get)
            .unwrap_err();

        assert!(matches!(err, DownloadError::TlsVerification(_)));
        assert_eq!(*calls.borrow(), vec![false, true]);
    }

    #[test]
    fn test_other_failures_not_retried() {
        let (calls, get) = scripted(vec![Err(DownloadError::Status(503)), Ok(Vec::new())]);

        let err = Downloader::default()
            .get_with_fallback("https://example.com/card.pdf", get)
            .unwrap_err();

        assert!(matches!(err, DownloadError::Status(503)));
        assert_eq!(*calls.borrow(), vec![false]);
    }

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.1.as_deref().map(|e| e as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_tls_error_detected_in_source_chain() {
        let err = Layer(
            "error sending request",
            Some(Box::new(Layer(
                "invalid peer certificate: UnknownIssuer",
                None,
            ))),
        );
        assert!(is_tls_verification_error(&err));
        assert_eq!(
            error_chain(&err),
            "error sending request: invalid peer certificate: UnknownIssuer"
        );

        let refused = Layer("error sending request", Some(Box::new(Layer("connection refused", None))));
        assert!(!is_tls_verification_error(&refused));
    }

    #[test]
    fn test_suffix_for() {
        assert_eq!(suffix_for("https://example.com/a/card.pdf"), ".pdf");
        assert_eq!(suffix_for("https://example.com/scan.JPG?x=1"), ".jpg");
        assert_eq!(suffix_for("https://example.com/download?id=7"), ".pdf");
        assert_eq!(suffix_for("https://example.com/"), ".pdf");
    }
}
