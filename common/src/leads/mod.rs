//! Lead lifecycle: list filtering, the kanban board, the detail panel and
//! the status transitions they share.

pub mod board;
pub mod detail;
pub mod filter;
pub mod form;
pub mod transition;

pub use board::{Board, Column};
pub use detail::{DetailPayload, LeadDetail};
pub use filter::LeadFilter;
pub use form::LeadForm;
pub use transition::{PendingStatusChange, StatusChange};
