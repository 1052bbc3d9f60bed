//! [`SheetStore`] backed by the Google Sheets v4 REST API.
//!
//! Wraps the handful of endpoints the pipeline needs: spreadsheet
//! metadata, `batchUpdate` (tab creation and formatting) and the
//! `values` endpoints (header write, row append). Every call carries a
//! bearer token from [`TokenProvider`].

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use edulead_core::schema::{SheetSchema, STATUS_OPTIONS};

use crate::auth::{ServiceAccount, TokenProvider};
use crate::error::SheetsError;
use crate::store::{SheetStore, TabInfo};

const SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// REST client for one spreadsheet.
pub struct GoogleSheets {
    http: reqwest::Client,
    auth: TokenProvider,
    spreadsheet_id: String,
    base: Url,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: TabProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TabProperties {
    sheet_id: i64,
    title: String,
}

#[derive(Debug, Deserialize)]
struct BatchUpdateResponse {
    #[serde(default)]
    replies: Vec<BatchReply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchReply {
    #[serde(default)]
    add_sheet: Option<AddSheetReply>,
}

#[derive(Debug, Deserialize)]
struct AddSheetReply {
    properties: TabProperties,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

impl GoogleSheets {
    /// Client for the given spreadsheet, authenticating as `account`.
    pub fn new(spreadsheet_id: String, account: ServiceAccount) -> Self {
        let http = reqwest::Client::new();
        Self {
            auth: TokenProvider::new(http.clone(), account),
            http,
            spreadsheet_id,
            base: Url::parse(SHEETS_ENDPOINT).expect("valid endpoint URL"),
        }
    }

    /// Endpoint URL with `trailing` appended as percent-encoded path
    /// segments (tab titles contain spaces).
    fn url(&self, trailing: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("endpoint URL can be a base")
            .extend(trailing);
        url
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`SheetsError::Api`] with
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SheetsError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), SheetsError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// A1 range addressing the top-left of the named tab. Titles are
/// single-quoted (they may contain spaces) with embedded quotes
/// doubled.
fn quoted_range(title: &str) -> String {
    format!("'{}'!A1", title.replace('\'', "''"))
}

/// Wide column range for appends. Addressing the whole A:Z band by tab
/// title lets the API place the row below the existing table even when
/// another writer provisioned the tab moments ago.
fn append_range(title: &str) -> String {
    format!("'{}'!A:Z", title.replace('\'', "''"))
}

/// The `batchUpdate` requests that dress up a freshly created tab.
fn formatting_requests(sheet_id: i64, schema: &SheetSchema) -> Vec<serde_json::Value> {
    let mut requests = vec![
        json!({
            "updateSheetProperties": {
                "properties": {
                    "sheetId": sheet_id,
                    "gridProperties": { "frozenRowCount": 1 }
                },
                "fields": "gridProperties.frozenRowCount"
            }
        }),
        json!({
            "repeatCell": {
                "range": { "sheetId": sheet_id, "startRowIndex": 0, "endRowIndex": 1 },
                "cell": {
                    "userEnteredFormat": {
                        "backgroundColor": { "red": 0.13, "green": 0.19, "blue": 0.38 },
                        "textFormat": {
                            "bold": true,
                            "foregroundColor": { "red": 1.0, "green": 1.0, "blue": 1.0 }
                        }
                    }
                },
                "fields": "userEnteredFormat(backgroundColor,textFormat)"
            }
        }),
        json!({
            "repeatCell": {
                "range": { "sheetId": sheet_id, "startRowIndex": 1 },
                "cell": {
                    "userEnteredFormat": { "wrapStrategy": "WRAP", "verticalAlignment": "TOP" }
                },
                "fields": "userEnteredFormat(wrapStrategy,verticalAlignment)"
            }
        }),
    ];

    for (index, width) in schema.column_widths.iter().enumerate() {
        requests.push(json!({
            "updateDimensionProperties": {
                "range": {
                    "sheetId": sheet_id,
                    "dimension": "COLUMNS",
                    "startIndex": index,
                    "endIndex": index + 1
                },
                "properties": { "pixelSize": width },
                "fields": "pixelSize"
            }
        }));
    }

    if let Some(column) = schema.status_column {
        let values: Vec<_> = STATUS_OPTIONS
            .iter()
            .map(|option| json!({ "userEnteredValue": option }))
            .collect();
        requests.push(json!({
            "setDataValidation": {
                "range": {
                    "sheetId": sheet_id,
                    "startRowIndex": 1,
                    "startColumnIndex": column,
                    "endColumnIndex": column + 1
                },
                "rule": {
                    "condition": { "type": "ONE_OF_LIST", "values": values },
                    "showCustomUi": true,
                    "strict": false
                }
            }
        }));
    }

    requests
}

#[async_trait]
impl SheetStore for GoogleSheets {
    async fn list_tabs(&self) -> Result<Vec<TabInfo>, SheetsError> {
        let mut url = self.url(&[&self.spreadsheet_id]);
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties(sheetId,title)");

        let token = self.auth.access_token().await?;
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let spreadsheet: SpreadsheetResponse = Self::parse_response(response).await?;

        Ok(spreadsheet
            .sheets
            .into_iter()
            .map(|sheet| TabInfo {
                sheet_id: sheet.properties.sheet_id,
                title: sheet.properties.title,
            })
            .collect())
    }

    async fn add_tab(&self, title: &str) -> Result<i64, SheetsError> {
        let url = self.url(&[&format!("{}:batchUpdate", self.spreadsheet_id)]);
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }]
        });

        let token = self.auth.access_token().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        let reply: BatchUpdateResponse = Self::parse_response(response).await?;

        reply
            .replies
            .into_iter()
            .find_map(|r| r.add_sheet)
            .map(|r| r.properties.sheet_id)
            .ok_or_else(|| {
                SheetsError::MalformedResponse("addSheet reply missing sheet properties".to_string())
            })
    }

    async fn write_header(&self, title: &str, headers: &[&str]) -> Result<(), SheetsError> {
        let range = quoted_range(title);
        let mut url = self.url(&[&self.spreadsheet_id, "values", &range]);
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = json!({
            "range": range,
            "majorDimension": "ROWS",
            "values": [headers]
        });

        let token = self.auth.access_token().await?;
        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn apply_formatting(
        &self,
        sheet_id: i64,
        schema: &SheetSchema,
    ) -> Result<(), SheetsError> {
        let url = self.url(&[&format!("{}:batchUpdate", self.spreadsheet_id)]);
        let body = json!({ "requests": formatting_requests(sheet_id, schema) });

        let token = self.auth.access_token().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn append_row(&self, title: &str, row: &[String]) -> Result<(), SheetsError> {
        let range = append_range(title);
        let mut url = self.url(&[&self.spreadsheet_id, "values", &format!("{range}:append")]);
        // RAW keeps cells literal: phone numbers keep their leading `+`
        // and free text starting with `=` never becomes a formula.
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = json!({ "values": [row] });

        let token = self.auth.access_token().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
