//! Identity fields extracted from an Aadhaar card.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The four fields read from a card.
///
/// Every field is a plain string; an empty string means the field was not
/// found. The serialized keys are part of the HTTP contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityFields {
    /// Card holder's name.
    #[serde(rename = "Name")]
    pub name: String,

    /// "Male", "Female" or "Transgender".
    #[serde(rename = "Gender")]
    pub gender: String,

    /// Date of birth as `DD-Mon-YYYY`, or a bare year.
    #[serde(rename = "DOB/Year of Birth")]
    pub dob: String,

    /// 12-digit identity number without separators.
    #[serde(rename = "Aadhaar Number")]
    pub aadhaar_number: String,
}

impl IdentityFields {
    /// Result reported when the pipeline fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no field was extracted.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.gender.is_empty()
            && self.dob.is_empty()
            && self.aadhaar_number.is_empty()
    }
}

/// Gender printed on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Transgender,
}

impl Gender {
    /// Candidates in evaluation order.
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Transgender];

    /// Lowercase keyword searched for in OCR lines.
    pub fn keyword(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Transgender => "transgender",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Transgender => "Transgender",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date or year of birth read from the card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BirthDate {
    /// A valid calendar date.
    Date(NaiveDate),
    /// A date-shaped match that is not a real date (e.g. `31/02/1990`).
    Unparsed(String),
    /// Only the year was printed (or matched).
    Year(String),
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BirthDate::Date(date) => write!(f, "{}", date.format("%d-%b-%Y")),
            BirthDate::Unparsed(raw) | BirthDate::Year(raw) => f.write_str(raw),
        }
    }
}
