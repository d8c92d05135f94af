//! Date / year of birth extraction.

use chrono::NaiveDate;

use crate::models::identity::BirthDate;

use super::patterns::{DOB_PATTERN, FULL_DATE, PLAUSIBLE_BIRTH_YEAR};
use super::{FieldExtractor, LineMatch};

/// Date of birth extractor.
///
/// First pass: the first line with a `DD/MM/YYYY`, `DD-MM-YYYY` or bare
/// 4-digit group (optionally after a DOB label) wins. Second pass, only when
/// the first found nothing: the first standalone year starting with 19 or 20.
pub struct BirthDateExtractor;

impl BirthDateExtractor {
    pub fn new() -> Self {
        Self
    }

    fn labelled(&self, lines: &[&str]) -> Option<LineMatch<BirthDate>> {
        lines.iter().enumerate().find_map(|(index, line)| {
            let caps = DOB_PATTERN.captures(line)?;
            let raw = caps.get(1)?.as_str();
            Some(LineMatch::new(parse_birth_date(raw), index))
        })
    }

    fn standalone_year(&self, lines: &[&str]) -> Option<LineMatch<BirthDate>> {
        lines.iter().enumerate().find_map(|(index, line)| {
            let year = PLAUSIBLE_BIRTH_YEAR.find(line)?;
            Some(LineMatch::new(BirthDate::Year(year.as_str().to_string()), index))
        })
    }
}

impl Default for BirthDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BirthDateExtractor {
    type Output = BirthDate;

    fn extract(&self, lines: &[&str]) -> Option<LineMatch<BirthDate>> {
        self.labelled(lines)
            .or_else(|| self.standalone_year(lines))
    }
}

/// Extract the date or year of birth from OCR lines.
pub fn extract_birth_date(lines: &[&str]) -> Option<BirthDate> {
    BirthDateExtractor::new().extract(lines).map(|m| m.value)
}

/// Interpret a matched date fragment.
///
/// Full dates are parsed day-first; a fragment that is not a real calendar
/// date is kept verbatim.
pub fn parse_birth_date(raw: &str) -> BirthDate {
    if !FULL_DATE.is_match(raw) {
        return BirthDate::Year(raw.to_string());
    }

    match NaiveDate::parse_from_str(&raw.replace('/', "-"), "%d-%m-%Y") {
        Ok(date) => BirthDate::Date(date),
        Err(_) => BirthDate::Unparsed(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dob(lines: &[&str]) -> String {
        extract_birth_date(lines)
            .map(|d| d.to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_labelled_slash_date() {
        assert_eq!(dob(&["DOB: 15/08/1990"]), "15-Aug-1990");
    }

    #[test]
    fn test_dash_date_and_label_variants() {
        assert_eq!(dob(&["D0B : 01-01-1985"]), "01-Jan-1985");
        assert_eq!(dob(&["DoB 29/02/2000"]), "29-Feb-2000");
        assert_eq!(dob(&["जन्म तिथि/DOB: 05/11/1978"]), "05-Nov-1978");
    }

    #[test]
    fn test_year_of_birth() {
        assert_eq!(dob(&["Year of Birth 1990"]), "1990");
        assert_eq!(dob(&["Birth Year: 1975"]), "1975");
    }

    #[test]
    fn test_invalid_calendar_date_kept_raw() {
        assert_eq!(
            extract_birth_date(&["DOB: 31/02/1990"]),
            Some(BirthDate::Unparsed("31/02/1990".to_string()))
        );
    }

    #[test]
    fn test_no_date_content() {
        assert_eq!(dob(&["Rahul Kumar", "MALE", "Address: Sector 12"]), "");
    }

    #[test]
    fn test_first_line_wins() {
        let lines = ["Rahul Kumar", "DOB: 15/08/1990", "Issued 2015"];
        let found = BirthDateExtractor::new().extract(&lines).unwrap();
        assert_eq!(found.value.to_string(), "15-Aug-1990");
        assert_eq!(found.line, 1);
    }

    #[test]
    fn test_parse_birth_date() {
        assert_eq!(
            parse_birth_date("15/08/1990"),
            BirthDate::Date(NaiveDate::from_ymd_opt(1990, 8, 15).unwrap())
        );
        assert_eq!(parse_birth_date("1990"), BirthDate::Year("1990".to_string()));
    }

    #[test]
    fn test_standalone_year_pass() {
        let extractor = BirthDateExtractor::new();
        let found = extractor.standalone_year(&["Rahul", "born 1988 in Pune"]).unwrap();
        assert_eq!(found.value, BirthDate::Year("1988".to_string()));
        assert!(extractor.standalone_year(&["Sector 12", "21234"]).is_none());
    }
}
