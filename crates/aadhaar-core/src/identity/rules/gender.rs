//! Gender extraction with fuzzy keyword matching.

use crate::models::identity::Gender;

use super::fuzzy::partial_ratio;
use super::{FieldExtractor, LineMatch};

/// Gender field extractor.
///
/// Every line is classified; a later classified line overwrites an earlier
/// one, so the last matching line wins.
pub struct GenderExtractor {
    threshold: u8,
}

impl GenderExtractor {
    pub fn new() -> Self {
        Self { threshold: 80 }
    }

    /// Set the score a keyword must exceed.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Classify a single OCR line.
    ///
    /// Keywords are tried in `Gender::ALL` order and the first one above the
    /// threshold wins, except that a later keyword containing the winner
    /// ("female" contains "male") takes over when it also clears the threshold.
    pub fn classify(&self, line: &str) -> Option<Gender> {
        let lowered = line.to_lowercase();
        let clears = |gender: Gender| partial_ratio(&lowered, gender.keyword()) > self.threshold;

        let first = Gender::ALL.iter().position(|g| clears(*g))?;
        let winner = Gender::ALL[first];

        let refined = Gender::ALL[first + 1..]
            .iter()
            .copied()
            .find(|g| g.keyword().contains(winner.keyword()) && clears(*g));

        Some(refined.unwrap_or(winner))
    }
}

impl Default for GenderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for GenderExtractor {
    type Output = Gender;

    fn extract(&self, lines: &[&str]) -> Option<LineMatch<Gender>> {
        let mut found = None;
        for (index, line) in lines.iter().enumerate() {
            if let Some(gender) = self.classify(line) {
                found = Some(LineMatch::new(gender, index));
            }
        }
        found
    }
}

/// Extract gender from OCR lines.
pub fn extract_gender(lines: &[&str]) -> Option<Gender> {
    GenderExtractor::new().extract(lines).map(|m| m.value)
}
