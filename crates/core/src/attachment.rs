//! CV upload handling for the ambassador form.
//!
//! The client runs [`validate_cv`] the moment a file is picked so the
//! wizard can reject it before submission; the server runs the same
//! check on the uploaded part. Type is checked before size so an
//! oversized file of the wrong type reports the type problem.

use crate::error::CoreError;

/// Upper bound on an uploaded CV, in bytes.
pub const MAX_CV_BYTES: usize = 4 * 1024 * 1024;

/// MIME types accepted for a CV upload: PDF plus the two Word formats.
pub const ALLOWED_CV_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// An uploaded CV as received from the multipart form.
#[derive(Debug, Clone)]
pub struct CvFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CvFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Check an uploaded CV against the type allow-list and the size cap.
pub fn validate_cv(cv: &CvFile) -> Result<(), CoreError> {
    if !ALLOWED_CV_TYPES.contains(&cv.content_type.as_str()) {
        return Err(CoreError::Validation(
            "CV must be a PDF or Word document".to_string(),
        ));
    }
    if cv.size() > MAX_CV_BYTES {
        return Err(CoreError::Validation(
            "CV is larger than 4MB".to_string(),
        ));
    }
    Ok(())
}

/// The value recorded in the sheet's "CV Status" column.
pub fn cv_status(has_cv: bool) -> &'static str {
    if has_cv {
        "CV Attached"
    } else {
        "No CV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cv(content_type: &str, size: usize) -> CvFile {
        CvFile {
            filename: "cv.bin".to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0u8; size],
        }
    }

    #[test]
    fn pdf_under_limit_is_accepted() {
        assert!(validate_cv(&cv("application/pdf", 3 * 1024 * 1024)).is_ok());
    }

    #[test]
    fn docx_at_limit_is_accepted() {
        let docx = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
        assert!(validate_cv(&cv(docx, MAX_CV_BYTES)).is_ok());
    }

    #[test]
    fn oversized_pdf_is_rejected_for_size() {
        let err = validate_cv(&cv("application/pdf", 5 * 1024 * 1024)).unwrap_err();
        assert!(err.to_string().contains("larger than 4MB"));
    }

    #[test]
    fn png_is_rejected_for_type_even_when_oversized() {
        let err = validate_cv(&cv("image/png", 5 * 1024 * 1024)).unwrap_err();
        assert!(err.to_string().contains("PDF or Word document"));
    }

    #[test]
    fn png_under_limit_is_still_rejected() {
        let err = validate_cv(&cv("image/png", 1024)).unwrap_err();
        assert!(err.to_string().contains("PDF or Word document"));
    }

    #[test]
    fn status_reflects_presence() {
        assert_eq!(cv_status(false), "No CV");
        assert_eq!(cv_status(true), "CV Attached");
    }
}
