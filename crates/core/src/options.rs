//! Option lists backing the select-style form inputs.
//!
//! Select fields are validated by membership against these lists, and
//! the grade band list is a pure lookup keyed by [`EducationLevel`]:
//! the wizard swaps the visible grade options whenever the education
//! level changes, falling back to [`FALLBACK_GRADES`] for levels that
//! have no dedicated banding.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Education level
// ---------------------------------------------------------------------------

/// The education level categories offered by the enquiry forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    Matriculation,
    IgcseALevel,
    Bachelor,
    Master,
    Other,
}

impl EducationLevel {
    /// All levels, in the order the forms present them.
    pub const ALL: [EducationLevel; 5] = [
        Self::Matriculation,
        Self::IgcseALevel,
        Self::Bachelor,
        Self::Master,
        Self::Other,
    ];

    /// The label shown in the form dropdown and recorded on the sheet.
    pub fn label(self) -> &'static str {
        match self {
            Self::Matriculation => "Matriculation",
            Self::IgcseALevel => "IGCSE / A-Level",
            Self::Bachelor => "Bachelor's Degree",
            Self::Master => "Master's Degree",
            Self::Other => "Other",
        }
    }

    /// Parse a submitted label back into a level.
    pub fn from_label(value: &str) -> Result<Self, CoreError> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.label() == trimmed)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid education level '{trimmed}'. Must be one of: {}",
                    Self::labels().join(", ")
                ))
            })
    }

    /// Labels of every level (the dropdown contents).
    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|level| level.label()).collect()
    }
}

// ---------------------------------------------------------------------------
// Grade bands (keyed by education level)
// ---------------------------------------------------------------------------

/// Grade bands offered when no dedicated banding exists for the level.
pub const FALLBACK_GRADES: &[&str] = &["Excellent", "Good", "Average", "Prefer not to say"];

const MATRICULATION_GRADES: &[&str] = &[
    "450+ marks",
    "400-449 marks",
    "350-399 marks",
    "Below 350 marks",
    "Awaiting results",
];

const IGCSE_A_LEVEL_GRADES: &[&str] = &[
    "A*-A average",
    "B-C average",
    "D-E average",
    "Awaiting results",
];

const DEGREE_GRADES: &[&str] = &[
    "First class / GPA 3.5+",
    "GPA 3.0-3.49",
    "GPA 2.5-2.99",
    "Below GPA 2.5",
];

/// The grade bands presented for a given education level.
pub fn grade_options(level: EducationLevel) -> &'static [&'static str] {
    match level {
        EducationLevel::Matriculation => MATRICULATION_GRADES,
        EducationLevel::IgcseALevel => IGCSE_A_LEVEL_GRADES,
        EducationLevel::Bachelor | EducationLevel::Master => DEGREE_GRADES,
        EducationLevel::Other => FALLBACK_GRADES,
    }
}

// ---------------------------------------------------------------------------
// Other select vocabularies
// ---------------------------------------------------------------------------

/// Destination countries the consultancy places students in.
pub const DESTINATIONS: &[&str] = &[
    "UK",
    "USA",
    "Canada",
    "Australia",
    "New Zealand",
    "Singapore",
    "Japan",
    "Other",
];

/// Intake terms offered by partner universities.
pub const INTAKES: &[&str] = &["January", "May", "September", "Undecided"];

/// Annual budget bands (tuition + living).
pub const BUDGET_BANDS: &[&str] = &[
    "Under $10k",
    "$10k-$20k",
    "$20k-$35k",
    "Over $35k",
    "Scholarship needed",
];

/// IELTS class schedule types.
pub const IELTS_CLASS_TYPES: &[&str] = &["Weekday", "Weekend", "Online"];

/// IELTS target band scores.
pub const IELTS_TARGET_BANDS: &[&str] = &["5.5", "6.0", "6.5", "7.0", "7.5+"];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_label_roundtrip() {
        for level in EducationLevel::ALL {
            assert_eq!(EducationLevel::from_label(level.label()).unwrap(), level);
        }
    }

    #[test]
    fn level_from_label_trims_whitespace() {
        assert_eq!(
            EducationLevel::from_label("  Matriculation  ").unwrap(),
            EducationLevel::Matriculation
        );
    }

    #[test]
    fn level_from_unknown_label_lists_options() {
        let err = EducationLevel::from_label("Doctorate").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Doctorate"));
        assert!(message.contains("Matriculation"));
    }

    #[test]
    fn every_level_has_grade_options() {
        for level in EducationLevel::ALL {
            assert!(!grade_options(level).is_empty());
        }
    }

    #[test]
    fn unrecognized_category_falls_back() {
        assert_eq!(grade_options(EducationLevel::Other), FALLBACK_GRADES);
    }

    #[test]
    fn degree_levels_share_banding() {
        assert_eq!(
            grade_options(EducationLevel::Bachelor),
            grade_options(EducationLevel::Master)
        );
    }

    #[test]
    fn vocabularies_are_nonempty_and_distinct() {
        for list in [DESTINATIONS, INTAKES, BUDGET_BANDS, IELTS_CLASS_TYPES, IELTS_TARGET_BANDS] {
            assert!(!list.is_empty());
            let mut seen = list.to_vec();
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), list.len(), "duplicate option in {list:?}");
        }
    }
}
