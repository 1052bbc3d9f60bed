//! Error type for the Sheets persistence layer.

/// Errors from the Google Sheets REST layer.
#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The Sheets API returned a non-2xx status code.
    #[error("Sheets API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Service-account authentication failed (bad key, token exchange).
    #[error("Sheets authentication failed: {0}")]
    Auth(String),

    /// A 2xx response did not have the expected shape.
    #[error("Malformed Sheets API response: {0}")]
    MalformedResponse(String),
}
