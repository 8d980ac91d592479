use common::error::ApiError;
use common::model::activity::Activity;
use common::model::lead::{Lead, LeadStatus};

#[derive(Clone, Copy, PartialEq)]
pub enum FollowUpField {
    Title,
    Description,
    Date,
    Time,
    Priority,
    Type,
}

pub enum Msg {
    Load,
    Loaded(Result<(Lead, Vec<Activity>), ApiError>),
    ChangeStatus(LeadStatus),
    ReasonSubmitted(String),
    ReasonCancelled,
    AssignUser(String),
    AssignTeam(String),
    NoteInput(String),
    SubmitNote,
    FollowUpInput(FollowUpField, String),
    ScheduleFollowUp,
    Convert,
    Delete,
    MutationDone(Result<String, ApiError>),
    Deleted(Result<String, ApiError>),
}
