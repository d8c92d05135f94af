//! HTTP API for the extraction service.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use aadhaar_core::{AadhaarExtractor, IdentityFields, PageRasterizer, TextRecognizer};

const MISSING_URL: &str = "pdf_url is required in JSON body";

/// Build the service router around a shared extractor.
pub fn router<R, T>(extractor: Arc<AadhaarExtractor<R, T>>) -> Router
where
    R: PageRasterizer + 'static,
    T: TextRecognizer + 'static,
{
    Router::new()
        .route("/extract-aadhaar", post(extract_aadhaar::<R, T>))
        .layer(TraceLayer::new_for_http())
        .with_state(extractor)
}

/// Failures outside the extraction pipeline.
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => {
                error!("Request failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn extract_aadhaar<R, T>(
    State(extractor): State<Arc<AadhaarExtractor<R, T>>>,
    body: Bytes,
) -> Result<Json<IdentityFields>, ApiError>
where
    R: PageRasterizer + 'static,
    T: TextRecognizer + 'static,
{
    info!("API called /extract-aadhaar");

    let Some(url) = pdf_url(&body)? else {
        // a truthy value that is not a string can never be resolved
        error!("Error processing request: pdf_url is not a string");
        return Ok(Json(IdentityFields::empty()));
    };

    // Downloads and OCR block, so keep them off the async workers
    let fields = tokio::task::spawn_blocking(move || extractor.extract(&url))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(fields))
}

/// Pull `pdf_url` out of a JSON object body.
///
/// Falsy values (missing, null, false, zero, empty string/array/object) are a
/// bad request. Any other non-string yields `None`.
fn pdf_url(body: &[u8]) -> Result<Option<String>, ApiError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::Internal(e.to_string()))?;

    let Value::Object(object) = payload else {
        return Err(ApiError::Internal(
            "request body must be a JSON object".to_string(),
        ));
    };

    match object.get("pdf_url") {
        Some(value) if is_truthy(value) => Ok(value.as_str().map(str::to_string)),
        _ => Err(ApiError::BadRequest(MISSING_URL.to_string())),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aadhaar_core::error::{OcrError, PdfError};
    use aadhaar_core::{AadhaarConfig, NormalizedImage, RawText};
    use axum::body::Body;
    use axum::http::Request;
    use image::{DynamicImage, GrayImage, Luma};
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tower::ServiceExt;

    struct BlankRasterizer;

    impl PageRasterizer for BlankRasterizer {
        fn rasterize(&self, path: &Path) -> Result<DynamicImage, PdfError> {
            if !path.exists() {
                return Err(PdfError::NotFound(path.display().to_string()));
            }
            Ok(DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 8, Luma([255]))))
        }
    }

    struct FixedRecognizer;

    impl TextRecognizer for FixedRecognizer {
        fn recognize(&self, _image: &NormalizedImage) -> Result<RawText, OcrError> {
            Ok(RawText::new(
                "Government of India\nPriya Nair\nDOB: 01/01/1985\nFEMALE\n4321 8765 2109",
            ))
        }
    }

    fn app() -> Router {
        let extractor = AadhaarExtractor::from_config(&AadhaarConfig::default())
            .with_rasterizer(BlankRasterizer)
            .with_recognizer(FixedRecognizer);
        router(Arc::new(extractor))
    }

    async fn post_json(body: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/extract-aadhaar")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_pdf_url() {
        let (status, body) = post_json("{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": MISSING_URL }));
    }

    #[tokio::test]
    async fn test_falsy_pdf_url() {
        for payload in [
            r#"{"pdf_url": ""}"#,
            r#"{"pdf_url": null}"#,
            r#"{"pdf_url": false}"#,
            r#"{"pdf_url": 0}"#,
            r#"{"pdf_url": []}"#,
            r#"{"pdf_url": {}}"#,
        ] {
            let (status, body) = post_json(payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
            assert_eq!(body, json!({ "error": MISSING_URL }));
        }
    }

    #[tokio::test]
    async fn test_truthy_non_string_pdf_url_is_empty_success() {
        for payload in [
            r#"{"pdf_url": 42}"#,
            r#"{"pdf_url": true}"#,
            r#"{"pdf_url": ["x"]}"#,
        ] {
            let (status, body) = post_json(payload).await;
            assert_eq!(status, StatusCode::OK, "payload {}", payload);
            assert_eq!(
                body,
                json!({
                    "Name": "",
                    "Gender": "",
                    "DOB/Year of Birth": "",
                    "Aadhaar Number": "",
                })
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (status, body) = post_json("{not json").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());

        let (status, _) = post_json("[1, 2]").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_extracts_local_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let payload = json!({ "pdf_url": path.to_str().unwrap() }).to_string();
        let (status, body) = post_json(&payload).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "Name": "Priya Nair",
                "Gender": "Female",
                "DOB/Year of Birth": "01-Jan-1985",
                "Aadhaar Number": "432187652109",
            })
        );
    }

    #[tokio::test]
    async fn test_pipeline_failure_is_empty_success() {
        let payload = json!({ "pdf_url": "/nonexistent/card.pdf" }).to_string();
        let (status, body) = post_json(&payload).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "Name": "",
                "Gender": "",
                "DOB/Year of Birth": "",
                "Aadhaar Number": "",
            })
        );
    }
}
