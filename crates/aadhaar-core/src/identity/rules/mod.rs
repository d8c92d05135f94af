//! Rule-based field extractors for Aadhaar cards.
//!
//! Every extractor works on OCR lines in top-to-bottom order and treats the
//! text as untrusted: a missing field is `None`, never an error.

pub mod dates;
pub mod fuzzy;
pub mod gender;
pub mod name;
pub mod number;
pub mod patterns;

pub use dates::{extract_birth_date, BirthDateExtractor};
pub use gender::{extract_gender, GenderExtractor};
pub use name::{clean_name, extract_name, NameExtractor};
pub use number::{extract_aadhaar_number, AadhaarNumberExtractor};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from the ordered OCR lines.
    fn extract(&self, lines: &[&str]) -> Option<LineMatch<Self::Output>>;
}

/// An extracted value together with the index of the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Index of the source line.
    pub line: usize,
}

impl<T> LineMatch<T> {
    pub fn new(value: T, line: usize) -> Self {
        Self { value, line }
    }
}
