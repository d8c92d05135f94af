//! Heuristic parser turning OCR text into identity fields.

use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::identity::IdentityFields;
use crate::ocr::RawText;

use super::rules::{
    AadhaarNumberExtractor, BirthDateExtractor, FieldExtractor, GenderExtractor, NameExtractor,
};

/// Rule-based parser for Aadhaar card text.
pub struct IdentityParser {
    name: NameExtractor,
    gender: GenderExtractor,
    dob: BirthDateExtractor,
    number: AadhaarNumberExtractor,
}

impl IdentityParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            name: NameExtractor::new().with_max_lines(config.max_name_lines),
            gender: GenderExtractor::new().with_threshold(config.gender_threshold),
            dob: BirthDateExtractor::new(),
            number: AadhaarNumberExtractor::new(),
        }
    }

    /// Parse recognized text. Never fails; unmatched fields stay empty.
    pub fn parse(&self, text: &RawText) -> IdentityFields {
        let lines = text.lines();

        let name = self.name.extract(&lines);
        let gender = self.gender.extract(&lines);
        let dob = self.dob.extract(&lines);
        let number = self.number.extract(&lines);

        debug!(
            lines = lines.len(),
            name_line = ?name.as_ref().map(|m| m.line),
            gender_line = ?gender.as_ref().map(|m| m.line),
            dob_line = ?dob.as_ref().map(|m| m.line),
            number_line = ?number.as_ref().map(|m| m.line),
            "Parsed identity fields"
        );

        IdentityFields {
            name: name.map(|m| m.value).unwrap_or_default(),
            gender: gender.map(|m| m.value.to_string()).unwrap_or_default(),
            dob: dob.map(|m| m.value.to_string()).unwrap_or_default(),
            aadhaar_number: number.map(|m| m.value).unwrap_or_default(),
        }
    }

    /// Parse raw OCR output.
    pub fn parse_text(&self, text: &str) -> IdentityFields {
        self.parse(&RawText::new(text))
    }
}

impl Default for IdentityParser {
    fn default() -> Self {
        Self::new()
    }
}
