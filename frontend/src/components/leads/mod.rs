pub mod board;
pub mod detail;
pub mod form;
pub mod list;
pub mod reason_dialog;
