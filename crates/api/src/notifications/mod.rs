//! Notification emails for recorded submissions.
//!
//! After a row is appended, the handler builds a [`SubmissionNotice`]
//! and hands it to [`dispatch`], which spawns the delivery on the
//! state's task tracker and returns immediately. The submitter's
//! response never waits on SMTP, and delivery failures are logged by
//! the sink rather than surfaced.

pub mod smtp;

use async_trait::async_trait;

use edulead_core::attachment::CvFile;
use edulead_core::forms::FormKind;

use crate::state::AppState;

pub use smtp::SmtpNotifier;

/// Everything the notification emails need about one recorded lead.
#[derive(Debug, Clone)]
pub struct SubmissionNotice {
    pub form: FormKind,
    /// Full name as submitted; empty for forms without a name field.
    pub submitter_name: String,
    pub submitter_email: String,
    /// `(column header, cell value)` pairs in sheet order.
    pub fields: Vec<(String, String)>,
    /// CV to attach to the admin alert, when one was uploaded.
    pub cv: Option<CvFile>,
}

impl SubmissionNotice {
    /// Build a notice from the row that was just appended, pairing each
    /// cell with its column header.
    pub fn from_row(form: FormKind, row: &[String]) -> Self {
        let schema = form.schema();
        let fields: Vec<(String, String)> = schema
            .headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header.to_string(), value.clone()))
            .collect();

        let lookup = |label: &str| {
            fields
                .iter()
                .find(|(header, _)| header == label)
                .map(|(_, value)| value.clone())
                .unwrap_or_default()
        };

        Self {
            form,
            submitter_name: lookup("Full Name"),
            submitter_email: lookup("Email"),
            fields,
            cv: None,
        }
    }

    pub fn with_cv(mut self, cv: Option<CvFile>) -> Self {
        self.cv = cv;
        self
    }
}

/// Delivers the notification emails for one submission.
///
/// Implementations own their failure handling: by the time a notice is
/// delivered the submitter has already been answered, so errors are
/// logged, never returned.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, notice: SubmissionNotice);
}

/// Spawn the notification delivery for a recorded submission and
/// return immediately. A no-op (with a debug line) when SMTP is not
/// configured.
pub fn dispatch(state: &AppState, notice: SubmissionNotice) {
    match &state.notifier {
        Some(notifier) => {
            let notifier = std::sync::Arc::clone(notifier);
            state.tracker.spawn(async move {
                notifier.deliver(notice).await;
            });
        }
        None => {
            tracing::debug!(
                form = notice.form.label(),
                "SMTP not configured; skipping notification emails"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edulead_core::forms::{AmbassadorForm, SubscriberForm};

    #[test]
    fn notice_pairs_cells_with_headers() {
        let form = AmbassadorForm {
            full_name: "Aye Aye".to_string(),
            email: "aye@example.com".to_string(),
            ..Default::default()
        };
        let row = form.to_row("2024-03-01 16:30:00", false);
        let notice = SubmissionNotice::from_row(FormKind::Ambassador, &row);

        assert_eq!(notice.submitter_name, "Aye Aye");
        assert_eq!(notice.submitter_email, "aye@example.com");
        assert_eq!(notice.fields[0].0, "Submitted At");
        assert_eq!(notice.fields[0].1, "2024-03-01 16:30:00");
        assert_eq!(notice.fields.len(), FormKind::Ambassador.schema().headers.len());
    }

    #[test]
    fn notice_tolerates_forms_without_a_name() {
        let form = SubscriberForm {
            email: "a@b.co".to_string(),
        };
        let row = form.to_row("stamp");
        let notice = SubmissionNotice::from_row(FormKind::Subscriber, &row);

        assert!(notice.submitter_name.is_empty());
        assert_eq!(notice.submitter_email, "a@b.co");
    }
}
