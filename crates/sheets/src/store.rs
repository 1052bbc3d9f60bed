//! The persistence seam between the API layer and the spreadsheet.

use async_trait::async_trait;
use edulead_core::schema::SheetSchema;

use crate::error::SheetsError;

/// Identity of one tab inside the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    /// Numeric sheet ID, needed for formatting requests.
    pub sheet_id: i64,
    /// Tab title; rows are appended by this name.
    pub title: String,
}

/// Operations the lead pipeline needs from a spreadsheet backend.
///
/// [`GoogleSheets`](crate::GoogleSheets) implements this against the
/// real API; [`MemorySheet`](crate::MemorySheet) implements it in
/// memory for tests. Handlers only ever see `Arc<dyn SheetStore>`.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Titles and IDs of every tab currently in the spreadsheet.
    async fn list_tabs(&self) -> Result<Vec<TabInfo>, SheetsError>;

    /// Create a new tab and return its numeric sheet ID. Fails if a
    /// tab with this title already exists.
    async fn add_tab(&self, title: &str) -> Result<i64, SheetsError>;

    /// Write the header row into the named tab.
    async fn write_header(&self, title: &str, headers: &[&str]) -> Result<(), SheetsError>;

    /// Apply the one-time cosmetic setup for a freshly created tab:
    /// frozen header, column widths, wrapping, status dropdown.
    async fn apply_formatting(&self, sheet_id: i64, schema: &SheetSchema)
        -> Result<(), SheetsError>;

    /// Append one row to the named tab, below existing content.
    async fn append_row(&self, title: &str, row: &[String]) -> Result<(), SheetsError>;
}
