//! Card holder name extraction.

use super::patterns::{
    EMBLEM_ARTIFACT, HONORIFIC, LEADING_NON_LETTERS, LEADING_NON_WORD, LETTER_RUN,
    NAME_BOILERPLATE,
};
use super::{FieldExtractor, LineMatch};

/// Name extractor.
///
/// The name is the first line near the top of the card that has letters and
/// no boilerplate keyword.
pub struct NameExtractor {
    max_lines: usize,
}

impl NameExtractor {
    pub fn new() -> Self {
        Self { max_lines: 10 }
    }

    /// Set how many leading lines are searched.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for NameExtractor {
    type Output = String;

    fn extract(&self, lines: &[&str]) -> Option<LineMatch<String>> {
        lines
            .iter()
            .take(self.max_lines)
            .enumerate()
            .find_map(|(index, line)| {
                let candidate = strip_leading_non_letters(line);
                if is_boilerplate(&candidate) || !LETTER_RUN.is_match(&candidate) {
                    return None;
                }
                Some(LineMatch::new(clean_name(&candidate), index))
            })
    }
}

/// Extract the name from OCR lines.
pub fn extract_name(lines: &[&str]) -> Option<String> {
    NameExtractor::new().extract(lines).map(|m| m.value)
}

/// Remove OCR debris and honorifics from a name line.
pub fn clean_name(name: &str) -> String {
    let name = LEADING_NON_WORD.replace(name, "");
    let name = EMBLEM_ARTIFACT.replace(&name, "");
    let name = HONORIFIC.replace(&name, "");
    name.trim().to_string()
}

fn strip_leading_non_letters(line: &str) -> String {
    LEADING_NON_LETTERS.replace(line, "").trim().to_string()
}

fn is_boilerplate(line: &str) -> bool {
    let lowered = line.to_lowercase();
    NAME_BOILERPLATE.iter().any(|kw| lowered.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_skips_boilerplate() {
        let lines = ["GOVERNMENT OF INDIA", "Rahul Kumar", "DOB: 15/08/1990"];
        assert_eq!(extract_name(&lines), Some("Rahul Kumar".to_string()));
    }

    #[test]
    fn test_boilerplate_never_selected() {
        let lines = ["Government of India", "Unique Identification Authority of India"];
        assert_eq!(extract_name(&lines), None);
    }

    #[test]
    fn test_strips_leading_noise() {
        let lines = ["|| 12 ~Priya Sharma"];
        assert_eq!(extract_name(&lines), Some("Priya Sharma".to_string()));
    }

    #[test]
    fn test_requires_letter_run() {
        let lines = ["a 1 b 2", "Anil Mehta"];
        assert_eq!(extract_name(&lines), Some("Anil Mehta".to_string()));
    }

    #[test]
    fn test_respects_max_lines() {
        let lines = ["1234", "5678", "Sunita Devi"];
        let extractor = NameExtractor::new().with_max_lines(2);
        assert!(extractor.extract(&lines).is_none());

        let found = NameExtractor::new().extract(&lines).unwrap();
        assert_eq!(found.line, 2);
        assert_eq!(found.value, "Sunita Devi");
    }

    #[test]
    fn test_clean_name_honorifics() {
        assert_eq!(clean_name("Mr. Rahul Kumar"), "Rahul Kumar");
        assert_eq!(clean_name("MRS Sunita Devi"), "Sunita Devi");
        assert_eq!(clean_name("ms. Priya"), "Priya");
    }

    #[test]
    fn test_clean_name_emblem_artifact() {
        assert_eq!(clean_name("y. Rahul Kumar"), "Rahul Kumar");
        assert_eq!(clean_name("Y . Rahul"), "Rahul");
    }

    #[test]
    fn test_clean_name_keeps_plain_names() {
        assert_eq!(clean_name("Yash Patel"), "Yash Patel");
        assert_eq!(clean_name("Mrinal Sen"), "Mrinal Sen");
    }
}
