//! Idempotent tab provisioning and row recording.
//!
//! Before a row is appended, the destination tab must exist with its
//! header and formatting. [`ensure_tab`] checks the spreadsheet's
//! current tabs by title and only creates what is missing, so calling
//! it on every submission is safe and the first submission of each
//! form variant pays the setup cost.

use edulead_core::schema::SheetSchema;

use crate::error::SheetsError;
use crate::store::SheetStore;

/// Make sure the schema's tab exists, creating it with header and
/// formatting when missing.
///
/// If the create fails because another writer provisioned the tab
/// between our listing and our create, the tab is re-checked and the
/// winner's header is left alone.
pub async fn ensure_tab(store: &dyn SheetStore, schema: &SheetSchema) -> Result<(), SheetsError> {
    let tabs = store.list_tabs().await?;
    if tabs.iter().any(|tab| tab.title == schema.tab_title) {
        return Ok(());
    }

    tracing::info!(tab = schema.tab_title, "provisioning spreadsheet tab");
    let sheet_id = match store.add_tab(schema.tab_title).await {
        Ok(id) => id,
        Err(err) => {
            let tabs = store.list_tabs().await?;
            if tabs.iter().any(|tab| tab.title == schema.tab_title) {
                tracing::debug!(tab = schema.tab_title, "tab appeared concurrently");
                return Ok(());
            }
            return Err(err);
        }
    };
    store.write_header(schema.tab_title, schema.headers).await?;
    store.apply_formatting(sheet_id, schema).await?;
    Ok(())
}

/// Record one submission row: provision the tab if needed, then append.
pub async fn record_submission(
    store: &dyn SheetStore,
    schema: &SheetSchema,
    row: &[String],
) -> Result<(), SheetsError> {
    ensure_tab(store, schema).await?;
    store.append_row(schema.tab_title, row).await
}
