//! The four enquiry form payloads and their validation rules.
//!
//! Each payload implements [`StepForm`], so the wizard gates navigation
//! per step and the submission endpoint re-runs the same rules in the
//! same order server-side. Row builders turn a validated payload into
//! the cell list for its spreadsheet tab; a drift test pins every row
//! builder to its tab's header count.

use serde::{Deserialize, Serialize};

use crate::attachment::cv_status;
use crate::error::CoreError;
use crate::fields::{
    validate_email, validate_free_text, validate_link, validate_max_chars, validate_membership,
    validate_phone, validate_postal_code, validate_required, LANGUAGES_MAX_CHARS,
};
use crate::options::{
    grade_options, EducationLevel, BUDGET_BANDS, DESTINATIONS, IELTS_CLASS_TYPES,
    IELTS_TARGET_BANDS, INTAKES,
};
use crate::schema::{
    SheetSchema, AMBASSADOR_SHEET, CONSULTATION_SHEET, IELTS_SHEET, STATUS_NEW, SUBSCRIBER_SHEET,
};
use crate::wizard::StepForm;

// ---------------------------------------------------------------------------
// Form kinds
// ---------------------------------------------------------------------------

/// The four lead-capturing forms the site exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Ambassador,
    Consultation,
    Ielts,
    Subscriber,
}

impl FormKind {
    /// Human-readable form name, used in notification subjects.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ambassador => "Ambassador Application",
            Self::Consultation => "Consultation Request",
            Self::Ielts => "IELTS Registration",
            Self::Subscriber => "Newsletter Subscription",
        }
    }

    /// The spreadsheet tab this form's rows land in.
    pub fn schema(self) -> &'static SheetSchema {
        match self {
            Self::Ambassador => &AMBASSADOR_SHEET,
            Self::Consultation => &CONSULTATION_SHEET,
            Self::Ielts => &IELTS_SHEET,
            Self::Subscriber => &SUBSCRIBER_SHEET,
        }
    }
}

fn cell(value: &str) -> String {
    value.trim().to_string()
}

fn validate_consent(consent: bool) -> Result<(), CoreError> {
    if consent {
        Ok(())
    } else {
        Err(CoreError::Validation("Consent is required".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Ambassador application
// ---------------------------------------------------------------------------

/// Student-ambassador application. Collected over three steps; the CV
/// upload travels alongside this payload as a multipart file and is
/// validated separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AmbassadorForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub languages: String,
    pub postal_code: String,
    pub current_study: String,
    pub destination: String,
    pub motivation: String,
    pub social_link: String,
    pub consent: bool,
}

impl StepForm for AmbassadorForm {
    const STEP_COUNT: u8 = 3;

    fn step_complete(&self, step: u8) -> Result<(), CoreError> {
        match step {
            1 => {
                validate_required("Full name", &self.full_name)?;
                validate_email(&self.email)?;
                validate_phone(&self.phone)
            }
            2 => {
                validate_required("Languages", &self.languages)?;
                validate_max_chars("Languages", &self.languages, LANGUAGES_MAX_CHARS)?;
                validate_postal_code(&self.postal_code)?;
                EducationLevel::from_label(&self.current_study)?;
                validate_membership("destination", &self.destination, DESTINATIONS)
            }
            3 => {
                validate_required("Motivation", &self.motivation)?;
                validate_free_text("Motivation", &self.motivation)?;
                validate_link("Social link", &self.social_link)?;
                validate_consent(self.consent)
            }
            _ => Err(CoreError::Internal(format!("unknown step {step}"))),
        }
    }
}

impl AmbassadorForm {
    /// Cells for the "Ambassadors" tab, in header order.
    pub fn to_row(&self, stamp: &str, has_cv: bool) -> Vec<String> {
        vec![
            stamp.to_string(),
            STATUS_NEW.to_string(),
            cell(&self.full_name),
            cell(&self.email),
            cell(&self.phone),
            cell(&self.languages),
            cell(&self.postal_code),
            cell(&self.current_study),
            cell(&self.destination),
            cell(&self.motivation),
            cell(&self.social_link),
            cv_status(has_cv).to_string(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Consultation request
// ---------------------------------------------------------------------------

/// Free-consultation request. Collected over four steps. The grade
/// band list swaps with the chosen education level, so grades are
/// validated against the options for that level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsultationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub education_level: String,
    pub grades: String,
    pub destination: String,
    pub intake: String,
    pub course_interest: String,
    pub budget: String,
    pub message: String,
    pub consent: bool,
}

impl StepForm for ConsultationForm {
    const STEP_COUNT: u8 = 4;

    fn step_complete(&self, step: u8) -> Result<(), CoreError> {
        match step {
            1 => {
                validate_required("Full name", &self.full_name)?;
                validate_email(&self.email)?;
                validate_phone(&self.phone)
            }
            2 => {
                let level = EducationLevel::from_label(&self.education_level)?;
                validate_membership("grades", &self.grades, grade_options(level))
            }
            3 => {
                validate_membership("destination", &self.destination, DESTINATIONS)?;
                validate_membership("intake", &self.intake, INTAKES)?;
                validate_required("Course interest", &self.course_interest)?;
                validate_membership("budget", &self.budget, BUDGET_BANDS)
            }
            4 => {
                validate_free_text("Message", &self.message)?;
                validate_consent(self.consent)
            }
            _ => Err(CoreError::Internal(format!("unknown step {step}"))),
        }
    }
}

impl ConsultationForm {
    /// Cells for the "Consultations" tab, in header order.
    pub fn to_row(&self, stamp: &str) -> Vec<String> {
        vec![
            stamp.to_string(),
            STATUS_NEW.to_string(),
            cell(&self.full_name),
            cell(&self.email),
            cell(&self.phone),
            cell(&self.education_level),
            cell(&self.grades),
            cell(&self.destination),
            cell(&self.intake),
            cell(&self.course_interest),
            cell(&self.budget),
            cell(&self.message),
        ]
    }
}

// ---------------------------------------------------------------------------
// IELTS registration
// ---------------------------------------------------------------------------

/// IELTS class registration. Two steps: contact details, then class
/// preferences and consent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IeltsForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub class_type: String,
    pub target_band: String,
    pub consent: bool,
}

impl StepForm for IeltsForm {
    const STEP_COUNT: u8 = 2;

    fn step_complete(&self, step: u8) -> Result<(), CoreError> {
        match step {
            1 => {
                validate_required("Full name", &self.full_name)?;
                validate_email(&self.email)?;
                validate_phone(&self.phone)
            }
            2 => {
                validate_membership("class type", &self.class_type, IELTS_CLASS_TYPES)?;
                validate_membership("target band", &self.target_band, IELTS_TARGET_BANDS)?;
                validate_consent(self.consent)
            }
            _ => Err(CoreError::Internal(format!("unknown step {step}"))),
        }
    }
}

impl IeltsForm {
    /// Cells for the "IELTS Registrations" tab, in header order.
    pub fn to_row(&self, stamp: &str) -> Vec<String> {
        vec![
            stamp.to_string(),
            STATUS_NEW.to_string(),
            cell(&self.full_name),
            cell(&self.email),
            cell(&self.phone),
            cell(&self.class_type),
            cell(&self.target_band),
        ]
    }
}

// ---------------------------------------------------------------------------
// Newsletter subscription
// ---------------------------------------------------------------------------

/// Newsletter signup from the site footer. A single email field, so the
/// "wizard" is one step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriberForm {
    pub email: String,
}

impl StepForm for SubscriberForm {
    const STEP_COUNT: u8 = 1;

    fn step_complete(&self, step: u8) -> Result<(), CoreError> {
        match step {
            1 => validate_email(&self.email),
            _ => Err(CoreError::Internal(format!("unknown step {step}"))),
        }
    }
}

impl SubscriberForm {
    /// Cells for the "Subscribers" tab, in header order.
    pub fn to_row(&self, stamp: &str) -> Vec<String> {
        vec![stamp.to_string(), cell(&self.email)]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
