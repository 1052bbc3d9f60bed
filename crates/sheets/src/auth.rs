//! Service-account authentication for the Sheets API.
//!
//! The service signs a short-lived RS256 assertion with the account's
//! private key and exchanges it for an OAuth access token (the
//! JWT-bearer grant). Tokens are cached until shortly before expiry so
//! a burst of submissions does not hammer the token endpoint.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::SheetsError;

/// OAuth scope granting spreadsheet read/write access.
const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Google's OAuth token endpoint; also the assertion audience.
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for each signed assertion.
const ASSERTION_TTL_SECS: i64 = 3600;

/// A cached token is refreshed this many seconds before it expires.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Credentials of the Google service account the spreadsheet is shared
/// with.
#[derive(Debug, Clone)]
pub struct ServiceAccount {
    /// The account's email, used as the assertion issuer.
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

/// Obtains and caches access tokens for a [`ServiceAccount`].
pub struct TokenProvider {
    http: reqwest::Client,
    account: ServiceAccount,
    token_uri: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(http: reqwest::Client, account: ServiceAccount) -> Self {
        Self {
            http,
            account,
            token_uri: TOKEN_URI.to_string(),
            cached: Mutex::new(None),
        }
    }

    /// A valid access token, reusing the cached one when it has more
    /// than [`EXPIRY_SKEW_SECS`] of life left.
    pub async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now().timestamp();
        if let Some(token) = cached.as_ref() {
            if now + EXPIRY_SKEW_SECS < token.expires_at {
                return Ok(token.token.clone());
            }
        }

        let fresh = self.exchange(now).await?;
        let token = fresh.access_token.clone();
        *cached = Some(CachedToken {
            token: fresh.access_token,
            expires_at: now + fresh.expires_in,
        });
        Ok(token)
    }

    async fn exchange(&self, now: i64) -> Result<TokenResponse, SheetsError> {
        let assertion = self.signed_assertion(now)?;
        let response = self
            .http
            .post(&self.token_uri)
            .form(&[
                ("grant_type", JWT_BEARER_GRANT),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SheetsError::Auth(format!(
                "token exchange failed ({}): {body}",
                status.as_u16()
            )));
        }
        Ok(response.json::<TokenResponse>().await?)
    }

    fn signed_assertion(&self, now: i64) -> Result<String, SheetsError> {
        let claims = Claims {
            iss: &self.account.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_TTL_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.account.private_key.as_bytes())
            .map_err(|e| SheetsError::Auth(format!("invalid service account key: {e}")))?;
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| SheetsError::Auth(format!("could not sign assertion: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_claims_request_the_spreadsheets_scope() {
        let claims = Claims {
            iss: "svc@project.iam.gserviceaccount.com",
            scope: SPREADSHEETS_SCOPE,
            aud: TOKEN_URI,
            iat: 1_000,
            exp: 1_000 + ASSERTION_TTL_SECS,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(
            value["scope"],
            "https://www.googleapis.com/auth/spreadsheets"
        );
        assert_eq!(value["aud"], TOKEN_URI);
        assert_eq!(value["exp"].as_i64().unwrap() - value["iat"].as_i64().unwrap(), 3600);
    }

    #[test]
    fn garbage_key_is_reported_as_auth_error() {
        let provider = TokenProvider::new(
            reqwest::Client::new(),
            ServiceAccount {
                client_email: "svc@project.iam.gserviceaccount.com".to_string(),
                private_key: "not a pem".to_string(),
            },
        );
        let err = provider.signed_assertion(0).unwrap_err();
        assert!(matches!(err, SheetsError::Auth(_)));
    }
}
