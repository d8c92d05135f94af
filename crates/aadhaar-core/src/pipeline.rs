//! End-to-end extraction: resolve, rasterize, normalize, recognize, parse.

use std::time::Instant;

use tracing::{debug, error, info};

use crate::error::Result;
use crate::identity::IdentityParser;
use crate::models::config::AadhaarConfig;
use crate::models::identity::IdentityFields;
use crate::ocr::{ImageNormalizer, TesseractRecognizer, TextRecognizer};
use crate::pdf::{DocumentRasterizer, PageRasterizer};
use crate::source::SourceResolver;

/// Runs the whole pipeline for one document reference.
///
/// The rasterizer and recognizer are pluggable so the pipeline can be driven
/// without poppler or tesseract installed.
pub struct AadhaarExtractor<R = DocumentRasterizer, T = TesseractRecognizer> {
    resolver: SourceResolver,
    rasterizer: R,
    normalizer: ImageNormalizer,
    recognizer: T,
    parser: IdentityParser,
}

impl AadhaarExtractor {
    /// Build the default pipeline from configuration.
    pub fn from_config(config: &AadhaarConfig) -> Self {
        Self {
            resolver: SourceResolver::from_config(&config.download),
            rasterizer: DocumentRasterizer::from_config(&config.pdf),
            normalizer: ImageNormalizer::new(),
            recognizer: TesseractRecognizer::from_config(&config.ocr),
            parser: IdentityParser::from_config(&config.extraction),
        }
    }
}

impl Default for AadhaarExtractor {
    fn default() -> Self {
        Self::from_config(&AadhaarConfig::default())
    }
}

impl<R: PageRasterizer, T: TextRecognizer> AadhaarExtractor<R, T> {
    /// Replace the page rasterizer.
    pub fn with_rasterizer<R2: PageRasterizer>(self, rasterizer: R2) -> AadhaarExtractor<R2, T> {
        AadhaarExtractor {
            resolver: self.resolver,
            rasterizer,
            normalizer: self.normalizer,
            recognizer: self.recognizer,
            parser: self.parser,
        }
    }

    /// Replace the text recognizer.
    pub fn with_recognizer<T2: TextRecognizer>(self, recognizer: T2) -> AadhaarExtractor<R, T2> {
        AadhaarExtractor {
            resolver: self.resolver,
            rasterizer: self.rasterizer,
            normalizer: self.normalizer,
            recognizer,
            parser: self.parser,
        }
    }

    /// Run every stage, surfacing the first failure.
    ///
    /// A downloaded document is deleted before this returns, whatever the
    /// outcome. Blocks on network and subprocess I/O.
    pub fn try_extract(&self, reference: &str) -> Result<IdentityFields> {
        let start = Instant::now();

        let source = self.resolver.resolve(reference)?;
        debug!("Resolved {} to {}", reference, source.path().display());

        let page = self.rasterizer.rasterize(source.path())?;
        debug!("Rasterized page: {}x{}", page.width(), page.height());

        let normalized = self.normalizer.normalize(&page);
        debug!("Normalized page");

        let text = self.recognizer.recognize(&normalized)?;
        debug!("Recognized {} lines", text.len());

        let fields = self.parser.parse(&text);

        info!(
            "Extracted fields from {} in {}ms",
            reference,
            start.elapsed().as_millis()
        );

        Ok(fields)
    }

    /// Run the pipeline, reporting any failure as all-empty fields.
    pub fn extract(&self, reference: &str) -> IdentityFields {
        match self.try_extract(reference) {
            Ok(fields) => fields,
            Err(e) => {
                error!("Error processing {} ({} failed): {}", reference, e.kind(), e);
                IdentityFields::empty()
            }
        }
    }
}
