//! Domain logic for the EduLead lead-submission pipeline.
//!
//! This crate holds everything that can be expressed without I/O: the
//! form payload types and their authoritative validation, the multi-step
//! wizard state machine, the destination sheet schemas (the column list
//! is the source of truth for what gets recorded), field sanitizers and
//! limits, the option lookup tables backing select-style inputs, and the
//! client-local persisted stores (consent banner, submit throttle).
//!
//! The HTTP service (`edulead-api`) and the spreadsheet client
//! (`edulead-sheets`) both build on these types; neither re-states a
//! validation rule or a column list of its own.

pub mod attachment;
pub mod client_store;
pub mod error;
pub mod fields;
pub mod forms;
pub mod options;
pub mod schema;
pub mod stamp;
pub mod wizard;

pub use error::CoreError;
