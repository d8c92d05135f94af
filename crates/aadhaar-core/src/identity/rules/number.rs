//! Aadhaar number extraction.
//!
//! The number is printed as three groups of four digits; OCR may merge,
//! split, or decorate the groups, so only the digit count of a line matters.
//! The checksum digit is not validated.

use super::patterns::NON_DIGIT;
use super::{FieldExtractor, LineMatch};

/// Number of digits in an Aadhaar number.
pub const AADHAAR_DIGITS: usize = 12;

/// Aadhaar number extractor. The first qualifying line wins.
pub struct AadhaarNumberExtractor;

impl AadhaarNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AadhaarNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AadhaarNumberExtractor {
    type Output = String;

    fn extract(&self, lines: &[&str]) -> Option<LineMatch<String>> {
        lines.iter().enumerate().find_map(|(index, line)| {
            let digits = NON_DIGIT.replace_all(line, "");
            (digits.chars().count() == AADHAAR_DIGITS)
                .then(|| LineMatch::new(digits.into_owned(), index))
        })
    }
}

/// Extract the Aadhaar number from OCR lines.
pub fn extract_aadhaar_number(lines: &[&str]) -> Option<String> {
    AadhaarNumberExtractor::new().extract(lines).map(|m| m.value)
}
