//! Environment-driven configuration.
//!
//! Three groups: the HTTP server (defaults suitable for local
//! development), the spreadsheet backend (required, the service cannot
//! record leads without it) and SMTP (optional; without it submissions
//! still succeed and only the notification emails are skipped).

use edulead_sheets::ServiceAccount;

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for in-flight notification sends.
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
        }
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet backend
// ---------------------------------------------------------------------------

/// Credentials and target for the Google Sheets backend.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// ID of the spreadsheet that receives lead rows.
    pub spreadsheet_id: String,
    /// Service account the spreadsheet is shared with.
    pub account: ServiceAccount,
}

impl SheetsConfig {
    /// Load the spreadsheet backend configuration.
    ///
    /// All three variables are required; the service refuses to start
    /// without them since it would accept leads it cannot record.
    ///
    /// | Env Var                  | Notes                               |
    /// |--------------------------|-------------------------------------|
    /// | `SHEETS_SPREADSHEET_ID`  | from the spreadsheet URL            |
    /// | `SHEETS_CLIENT_EMAIL`    | service account email               |
    /// | `SHEETS_PRIVATE_KEY`     | PEM; `\n` escapes are unescaped     |
    pub fn from_env() -> Self {
        let spreadsheet_id =
            std::env::var("SHEETS_SPREADSHEET_ID").expect("SHEETS_SPREADSHEET_ID must be set");
        let client_email =
            std::env::var("SHEETS_CLIENT_EMAIL").expect("SHEETS_CLIENT_EMAIL must be set");
        // Deployment environments often store the key single-line with
        // literal "\n" sequences.
        let private_key = std::env::var("SHEETS_PRIVATE_KEY")
            .expect("SHEETS_PRIVATE_KEY must be set")
            .replace("\\n", "\n");

        Self {
            spreadsheet_id,
            account: ServiceAccount {
                client_email,
                private_key,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// SMTP
// ---------------------------------------------------------------------------

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@edulead.local";

/// Default inbox for new-lead alerts when `ADMIN_EMAIL` is not set.
const DEFAULT_ADMIN_ADDRESS: &str = "team@edulead.local";

/// Configuration for the SMTP notification mailer.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port (defaults to 587).
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    /// Inbox that receives the new-lead alert for every submission.
    pub admin_address: String,
    /// Optional SMTP username.
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    pub smtp_password: Option<String>,
}

impl SmtpConfig {
    /// Load SMTP configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// notifications are not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                 |
    /// |-----------------|----------|-------------------------|
    /// | `SMTP_HOST`     | yes      | (none)                  |
    /// | `SMTP_PORT`     | no       | `587`                   |
    /// | `SMTP_FROM`     | no       | `noreply@edulead.local` |
    /// | `ADMIN_EMAIL`   | no       | `team@edulead.local`    |
    /// | `SMTP_USER`     | no       | (none)                  |
    /// | `SMTP_PASSWORD` | no       | (none)                  |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            admin_address: std::env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| DEFAULT_ADMIN_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}
