//! In-memory [`SheetStore`] used by tests.
//!
//! Mirrors the observable behavior of the real API closely enough to
//! exercise provisioning: duplicate tab titles are rejected, appends to
//! unknown tabs fail, and creation/header-write counters let tests
//! assert that provisioning ran exactly once. Appends can be made to
//! fail to simulate an outage.

use async_trait::async_trait;
use tokio::sync::Mutex;

use edulead_core::schema::SheetSchema;

use crate::error::SheetsError;
use crate::store::{SheetStore, TabInfo};

#[derive(Debug)]
struct Tab {
    sheet_id: i64,
    title: String,
    header: Option<Vec<String>>,
    formatted: bool,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Default)]
struct Inner {
    tabs: Vec<Tab>,
    next_sheet_id: i64,
    tabs_created: usize,
    headers_written: usize,
    fail_appends: bool,
}

/// In-memory spreadsheet double.
#[derive(Debug, Default)]
pub struct MemorySheet {
    inner: Mutex<Inner>,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent append fail, simulating an outage.
    pub async fn fail_appends(&self, fail: bool) {
        self.inner.lock().await.fail_appends = fail;
    }

    /// How many tabs have been created so far.
    pub async fn tabs_created(&self) -> usize {
        self.inner.lock().await.tabs_created
    }

    /// How many header rows have been written so far.
    pub async fn headers_written(&self) -> usize {
        self.inner.lock().await.headers_written
    }

    /// Whether the named tab received its formatting pass.
    pub async fn formatted(&self, title: &str) -> bool {
        self.inner
            .lock()
            .await
            .tabs
            .iter()
            .any(|tab| tab.title == title && tab.formatted)
    }

    /// Data rows of the named tab (header excluded), in append order.
    pub async fn rows(&self, title: &str) -> Vec<Vec<String>> {
        self.inner
            .lock()
            .await
            .tabs
            .iter()
            .find(|tab| tab.title == title)
            .map(|tab| tab.rows.clone())
            .unwrap_or_default()
    }

    /// Header row of the named tab, if one was written.
    pub async fn header(&self, title: &str) -> Option<Vec<String>> {
        self.inner
            .lock()
            .await
            .tabs
            .iter()
            .find(|tab| tab.title == title)
            .and_then(|tab| tab.header.clone())
    }
}

#[async_trait]
impl SheetStore for MemorySheet {
    async fn list_tabs(&self) -> Result<Vec<TabInfo>, SheetsError> {
        Ok(self
            .inner
            .lock()
            .await
            .tabs
            .iter()
            .map(|tab| TabInfo {
                sheet_id: tab.sheet_id,
                title: tab.title.clone(),
            })
            .collect())
    }

    async fn add_tab(&self, title: &str) -> Result<i64, SheetsError> {
        let mut inner = self.inner.lock().await;
        if inner.tabs.iter().any(|tab| tab.title == title) {
            return Err(SheetsError::Api {
                status: 400,
                body: format!("A sheet with the name \"{title}\" already exists"),
            });
        }
        let sheet_id = inner.next_sheet_id;
        inner.next_sheet_id += 1;
        inner.tabs_created += 1;
        inner.tabs.push(Tab {
            sheet_id,
            title: title.to_string(),
            header: None,
            formatted: false,
            rows: Vec::new(),
        });
        Ok(sheet_id)
    }

    async fn write_header(&self, title: &str, headers: &[&str]) -> Result<(), SheetsError> {
        let mut inner = self.inner.lock().await;
        inner.headers_written += 1;
        let tab = inner
            .tabs
            .iter_mut()
            .find(|tab| tab.title == title)
            .ok_or_else(|| SheetsError::Api {
                status: 400,
                body: format!("Unable to parse range: {title}"),
            })?;
        tab.header = Some(headers.iter().map(|h| h.to_string()).collect());
        Ok(())
    }

    async fn apply_formatting(
        &self,
        sheet_id: i64,
        _schema: &SheetSchema,
    ) -> Result<(), SheetsError> {
        let mut inner = self.inner.lock().await;
        let tab = inner
            .tabs
            .iter_mut()
            .find(|tab| tab.sheet_id == sheet_id)
            .ok_or_else(|| SheetsError::Api {
                status: 400,
                body: format!("No sheet with ID {sheet_id}"),
            })?;
        tab.formatted = true;
        Ok(())
    }

    async fn append_row(&self, title: &str, row: &[String]) -> Result<(), SheetsError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_appends {
            return Err(SheetsError::Api {
                status: 503,
                body: "The service is currently unavailable".to_string(),
            });
        }
        let tab = inner
            .tabs
            .iter_mut()
            .find(|tab| tab.title == title)
            .ok_or_else(|| SheetsError::Api {
                status: 400,
                body: format!("Unable to parse range: {title}"),
            })?;
        tab.rows.push(row.to_vec());
        Ok(())
    }
}
