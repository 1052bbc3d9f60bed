//! HTTP handlers for the form submission endpoints.
//!
//! Every handler runs the same authoritative sequence: validate the
//! payload with the shared form rules, stamp and build the sheet row,
//! record it (provisioning the tab on first use), then dispatch the
//! notification emails detached from the response.

pub mod ambassador;
pub mod consultation;
pub mod ielts;
pub mod subscribe;
