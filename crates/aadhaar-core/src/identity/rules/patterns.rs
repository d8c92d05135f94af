//! Common regex patterns for Aadhaar card extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Lowercase fragments marking card boilerplate rather than a name.
pub const NAME_BOILERPLATE: [&str; 9] = [
    "dob",
    "birth",
    "male",
    "female",
    "year",
    "uidai",
    "issue",
    "government",
    "india",
];

lazy_static! {
    // Name lines
    pub static ref LEADING_NON_LETTERS: Regex = Regex::new(
        r"^[^A-Za-z]+"
    ).unwrap();

    pub static ref LETTER_RUN: Regex = Regex::new(
        r"[A-Za-z]{2,}"
    ).unwrap();

    pub static ref LEADING_NON_WORD: Regex = Regex::new(
        r"^[^\w]*"
    ).unwrap();

    // "y." is how OCR usually reads the emblem edge left of the name
    pub static ref EMBLEM_ARTIFACT: Regex = Regex::new(
        r"(?i)^(y\s*\.\s*)"
    ).unwrap();

    pub static ref HONORIFIC: Regex = Regex::new(
        r"(?i)^(mr\.?|ms\.?|mrs\.?)\s+"
    ).unwrap();

    // Date of birth, optionally labelled
    pub static ref DOB_PATTERN: Regex = Regex::new(
        r"(?i)(?:DOB|DoB|D0B|Year of Birth|Birth Year)?[^\d]*(\d{2}[/-]\d{2}[/-]\d{4}|\d{4})"
    ).unwrap();

    pub static ref FULL_DATE: Regex = Regex::new(
        r"^\d{2}[/-]\d{2}[/-]\d{4}"
    ).unwrap();

    pub static ref PLAUSIBLE_BIRTH_YEAR: Regex = Regex::new(
        r"\b(19|20)\d{2}\b"
    ).unwrap();

    // Identity number; \D is Unicode-aware like the date patterns
    pub static ref NON_DIGIT: Regex = Regex::new(
        r"\D"
    ).unwrap();
}
