//! Core library for Aadhaar card OCR processing.
//!
//! This crate provides:
//! - Document resolution (local paths and HTTP(S) downloads)
//! - Page rasterization (pdftoppm, with an embedded-image fallback)
//! - Image normalization and tesseract text recognition
//! - Identity field extraction (name, gender, date of birth, number)

pub mod error;
pub mod identity;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod source;

pub use error::{AadhaarError, Result};
pub use identity::IdentityParser;
pub use models::config::AadhaarConfig;
pub use models::identity::{BirthDate, Gender, IdentityFields};
pub use ocr::{ImageNormalizer, NormalizedImage, RawText, TesseractRecognizer, TextRecognizer};
pub use pdf::{DocumentRasterizer, PageRasterizer};
pub use pipeline::AadhaarExtractor;
pub use source::{DocumentReference, ResolvedSource, SourceResolver};
