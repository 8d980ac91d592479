//! Platform-neutral core of the lead pipeline client.
//!
//! The frontend renders and talks HTTP; everything it needs to decide *what*
//! to send lives here: the wire model, request payloads, the endpoint table,
//! the error type and the view-state machines behind each screen.

pub mod api;
pub mod draft;
pub mod error;
pub mod follow_ups;
pub mod csv_import;
pub mod leads;
pub mod model;
pub mod remote;
pub mod requests;
pub mod tasks;
