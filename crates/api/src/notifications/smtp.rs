//! SMTP delivery of the two notification emails.
//!
//! Every recorded submission produces an admin alert (full field
//! table, reply-to set to the submitter, CV attached when present) and
//! a confirmation to the submitter. Each send is capped at
//! [`SEND_TIMEOUT`] so a slow relay cannot pin a delivery task open
//! indefinitely.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use edulead_core::fields::first_name;
use edulead_core::forms::FormKind;

use crate::config::SmtpConfig;

use super::{NotificationSink, SubmissionNotice};

/// Upper bound on a single SMTP send.
const SEND_TIMEOUT: Duration = Duration::from_secs(20);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),

    /// The relay did not answer within [`SEND_TIMEOUT`].
    #[error("SMTP send timed out after {0:?}")]
    Timeout(Duration),
}

// ---------------------------------------------------------------------------
// SmtpNotifier
// ---------------------------------------------------------------------------

/// Sends the notification emails via an async SMTP transport.
pub struct SmtpNotifier {
    config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    /// Build the transport from configuration. Fails only when the
    /// relay host is unusable; credentials are checked at send time.
    pub fn new(config: SmtpConfig) -> Result<Self, EmailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);

        if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    async fn send_capped(&self, email: Message) -> Result<(), EmailError> {
        match tokio::time::timeout(SEND_TIMEOUT, self.transport.send(email)).await {
            Ok(sent) => {
                sent?;
                Ok(())
            }
            Err(_) => Err(EmailError::Timeout(SEND_TIMEOUT)),
        }
    }

    /// The new-lead alert to the consultancy inbox. Reply-to points at
    /// the submitter so staff can answer directly from their client.
    async fn send_admin_alert(&self, notice: &SubmissionNotice) -> Result<(), EmailError> {
        let display = if notice.submitter_name.is_empty() {
            notice.submitter_email.as_str()
        } else {
            notice.submitter_name.as_str()
        };
        let subject = format!("New {}: {}", notice.form.label(), display);
        let html = SinglePart::html(admin_html(notice));

        let builder = Message::builder()
            .from(self.config.from_address.parse()?)
            .reply_to(notice.submitter_email.parse()?)
            .to(self.config.admin_address.parse()?)
            .subject(subject);

        let email = match &notice.cv {
            Some(cv) => {
                let content_type = ContentType::parse(&cv.content_type)
                    .map_err(|e| EmailError::Build(format!("bad attachment type: {e}")))?;
                let attachment =
                    Attachment::new(cv.filename.clone()).body(cv.bytes.clone(), content_type);
                builder
                    .multipart(MultiPart::mixed().singlepart(html).singlepart(attachment))
                    .map_err(|e| EmailError::Build(e.to_string()))?
            }
            None => builder
                .singlepart(html)
                .map_err(|e| EmailError::Build(e.to_string()))?,
        };

        self.send_capped(email).await?;
        tracing::info!(form = notice.form.label(), "Admin alert sent");
        Ok(())
    }

    /// The thank-you confirmation to the submitter.
    async fn send_confirmation(&self, notice: &SubmissionNotice) -> Result<(), EmailError> {
        let greeting = first_name(&notice.submitter_name);
        let html = confirmation_html(greeting, notice.form, Utc::now().year());

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(notice.submitter_email.parse()?)
            .subject(confirmation_subject(notice.form))
            .singlepart(SinglePart::html(html))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        self.send_capped(email).await?;
        tracing::info!(form = notice.form.label(), "Confirmation email sent");
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for SmtpNotifier {
    async fn deliver(&self, notice: SubmissionNotice) {
        // The two emails are independent; one failing must not stop
        // the other, and neither failure reaches the submitter.
        if let Err(err) = self.send_admin_alert(&notice).await {
            tracing::error!(form = notice.form.label(), error = %err, "Admin alert failed");
        }
        if let Err(err) = self.send_confirmation(&notice).await {
            tracing::error!(form = notice.form.label(), error = %err, "Confirmation email failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn confirmation_subject(form: FormKind) -> &'static str {
    match form {
        FormKind::Ambassador => "We received your ambassador application",
        FormKind::Consultation => "We received your consultation request",
        FormKind::Ielts => "We received your IELTS registration",
        FormKind::Subscriber => "Welcome to the EduLead newsletter",
    }
}

fn admin_html(notice: &SubmissionNotice) -> String {
    let rows: String = notice
        .fields
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr><td style=\"padding:6px 12px;font-weight:bold;white-space:nowrap\">{}</td>\
                 <td style=\"padding:6px 12px\">{}</td></tr>",
                escape(label),
                escape(value).replace('\n', "<br>"),
            )
        })
        .collect();

    format!(
        "<html><body style=\"font-family:Arial,sans-serif;color:#1f2a44\">\
         <h2 style=\"color:#22345e\">New {}</h2>\
         <p>A new submission just landed in the spreadsheet.</p>\
         <table cellspacing=\"0\" style=\"border-collapse:collapse;background:#f6f8fb\">{rows}</table>\
         <p style=\"color:#66708a;font-size:12px\">Reply to this email to reach the applicant directly.</p>\
         </body></html>",
        escape(notice.form.label()),
    )
}

fn confirmation_html(name: &str, form: FormKind, year: i32) -> String {
    let line = match form {
        FormKind::Ambassador => {
            "We received your ambassador application and will review it shortly."
        }
        FormKind::Consultation => {
            "We received your consultation request. A counselor will contact you within two working days."
        }
        FormKind::Ielts => {
            "Your IELTS class registration is in. We will confirm your schedule soon."
        }
        FormKind::Subscriber => {
            "You are on the list. Expect study-abroad tips and intake deadlines in your inbox."
        }
    };

    format!(
        "<html><body style=\"font-family:Arial,sans-serif;color:#1f2a44\">\
         <h2 style=\"color:#22345e\">Hi {greeting},</h2>\
         <p>{line}</p>\
         <p>Warm regards,<br>The EduLead team</p>\
         <p style=\"color:#66708a;font-size:12px\">&copy; {year} EduLead. All rights reserved.</p>\
         </body></html>",
        greeting = escape(name),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
