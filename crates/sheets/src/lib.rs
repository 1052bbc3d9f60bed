//! Google Sheets persistence for recorded leads.
//!
//! The spreadsheet is the system of record: each form variant owns one
//! tab, provisioned on first use and appended to per submission.
//!
//! - [`SheetStore`]: the persistence seam the API layer talks to.
//! - [`GoogleSheets`]: [`SheetStore`] backed by the Sheets v4 REST API,
//!   authenticated as a service account.
//! - [`provision`]: idempotent tab provisioning and row recording.
//! - [`MemorySheet`]: in-memory [`SheetStore`] for tests.

pub mod auth;
pub mod client;
pub mod error;
pub mod memory;
pub mod provision;
pub mod store;

pub use auth::{ServiceAccount, TokenProvider};
pub use client::GoogleSheets;
pub use error::SheetsError;
pub use memory::MemorySheet;
pub use provision::{ensure_tab, record_submission};
pub use store::{SheetStore, TabInfo};
