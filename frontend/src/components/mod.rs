pub mod dashboard;
pub mod follow_ups;
pub mod import;
pub mod leads;
pub mod login;
pub mod tasks;
