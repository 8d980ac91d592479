//! Endpoint table of the REST API.
//!
//! Reads are [`Query`] values, writes are [`Mutation`] values. The view-state
//! machines only ever *return* these; the frontend's HTTP layer is the single
//! place that turns them into requests. That keeps "which call is issued"
//! observable without a browser.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::model::follow_up::FollowUpTab;
use crate::requests::{
    AssignLead, CompleteFollowUp, ImportLeads, LeadDraft, NewFollowUp, NewNote,
    RescheduleFollowUp, StatusUpdate, SubtaskDraft,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
}

impl Endpoint {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into() }
    }

    /// Joins the path onto `base` without doubling the slash.
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path)
    }
}

/// Reads issued by the screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Leads,
    Lead(String),
    Activities(String),
    LeadStats,
    FollowUps(FollowUpTab),
    Inflow,
    SourceDistribution,
    TeamPerformance,
    Tasks,
    Subtasks(String),
    Users,
    Teams,
}

impl Query {
    pub fn endpoint(&self) -> Endpoint {
        let path = match self {
            Query::Leads => "/leads".to_string(),
            Query::Lead(id) => format!("/leads/{id}"),
            Query::Activities(id) => format!("/leads/{id}/activities"),
            Query::LeadStats => "/leads/stats".to_string(),
            Query::FollowUps(tab) => format!("/follow-ups/{}", tab.as_str()),
            Query::Inflow => "/analytics/inflow".to_string(),
            Query::SourceDistribution => "/analytics/source-distribution".to_string(),
            Query::TeamPerformance => "/analytics/team-performance".to_string(),
            Query::Tasks => "/tasks".to_string(),
            Query::Subtasks(task_id) => format!("/tasks/{task_id}/subtasks"),
            Query::Users => "/users".to_string(),
            Query::Teams => "/teams".to_string(),
        };
        Endpoint::new(Method::Get, path)
    }
}

/// Every write the client can issue. Each one is a single independent call.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateLead(LeadDraft),
    DeleteLead { lead_id: String },
    UpdateStatus { lead_id: String, body: StatusUpdate },
    Assign { lead_id: String, body: AssignLead },
    AddNote { lead_id: String, body: NewNote },
    Convert { lead_id: String },
    ImportLeads(ImportLeads),
    CreateFollowUp(NewFollowUp),
    CompleteFollowUp { follow_up_id: String, body: CompleteFollowUp },
    RescheduleFollowUp { follow_up_id: String, body: RescheduleFollowUp },
    CreateSubtask { task_id: String, body: SubtaskDraft },
    UpdateSubtask { subtask_id: String, body: SubtaskDraft },
    DeleteSubtask { subtask_id: String },
}

impl Mutation {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Mutation::CreateLead(_) => Endpoint::new(Method::Post, "/leads"),
            Mutation::DeleteLead { lead_id } => {
                Endpoint::new(Method::Delete, format!("/leads/{lead_id}"))
            }
            Mutation::UpdateStatus { lead_id, .. } => {
                Endpoint::new(Method::Patch, format!("/leads/{lead_id}/status"))
            }
            Mutation::Assign { lead_id, .. } => {
                Endpoint::new(Method::Patch, format!("/leads/{lead_id}/assign"))
            }
            Mutation::AddNote { lead_id, .. } => {
                Endpoint::new(Method::Post, format!("/leads/{lead_id}/notes"))
            }
            Mutation::Convert { lead_id } => {
                Endpoint::new(Method::Post, format!("/leads/{lead_id}/convert"))
            }
            Mutation::ImportLeads(_) => Endpoint::new(Method::Post, "/leads/import"),
            Mutation::CreateFollowUp(_) => Endpoint::new(Method::Post, "/follow-ups"),
            Mutation::CompleteFollowUp { follow_up_id, .. } => {
                Endpoint::new(Method::Patch, format!("/follow-ups/{follow_up_id}/complete"))
            }
            Mutation::RescheduleFollowUp { follow_up_id, .. } => {
                Endpoint::new(Method::Patch, format!("/follow-ups/{follow_up_id}/reschedule"))
            }
            Mutation::CreateSubtask { task_id, .. } => {
                Endpoint::new(Method::Post, format!("/tasks/{task_id}/subtasks"))
            }
            Mutation::UpdateSubtask { subtask_id, .. } => {
                Endpoint::new(Method::Put, format!("/subtasks/{subtask_id}"))
            }
            Mutation::DeleteSubtask { subtask_id } => {
                Endpoint::new(Method::Delete, format!("/subtasks/{subtask_id}"))
            }
        }
    }

    /// JSON body, or `None` for body-less calls.
    pub fn body(&self) -> Result<Option<serde_json::Value>, ApiError> {
        let value = match self {
            Mutation::CreateLead(draft) => to_json(draft)?,
            Mutation::UpdateStatus { body, .. } => to_json(body)?,
            Mutation::Assign { body, .. } => to_json(body)?,
            Mutation::AddNote { body, .. } => to_json(body)?,
            Mutation::ImportLeads(body) => to_json(body)?,
            Mutation::CreateFollowUp(body) => to_json(body)?,
            Mutation::CompleteFollowUp { body, .. } => to_json(body)?,
            Mutation::RescheduleFollowUp { body, .. } => to_json(body)?,
            Mutation::CreateSubtask { body, .. } => to_json(body)?,
            Mutation::UpdateSubtask { body, .. } => to_json(body)?,
            Mutation::DeleteLead { .. } | Mutation::Convert { .. } | Mutation::DeleteSubtask { .. } => {
                return Ok(None);
            }
        };
        Ok(Some(value))
    }

    /// Short name used in log lines.
    pub fn describe(&self) -> &'static str {
        match self {
            Mutation::CreateLead(_) => "create lead",
            Mutation::DeleteLead { .. } => "delete lead",
            Mutation::UpdateStatus { .. } => "update lead status",
            Mutation::Assign { .. } => "assign lead",
            Mutation::AddNote { .. } => "add note",
            Mutation::Convert { .. } => "convert lead",
            Mutation::ImportLeads(_) => "import leads",
            Mutation::CreateFollowUp(_) => "create follow-up",
            Mutation::CompleteFollowUp { .. } => "complete follow-up",
            Mutation::RescheduleFollowUp { .. } => "reschedule follow-up",
            Mutation::CreateSubtask { .. } => "create subtask",
            Mutation::UpdateSubtask { .. } => "update subtask",
            Mutation::DeleteSubtask { .. } => "delete subtask",
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    Ok(serde_json::to_value(value)?)
}

pub const CSV_PREVIEW_PATH: &str = "/leads/import/preview";
pub const LOGIN_PATH: &str = "/auth/login";

/// Decodes a success body that is either the bare payload or `{ "data": ... }`.
///
/// On failure the error names the offending field: the one from the `data`
/// envelope when the body has one, otherwise the one from the bare attempt.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))?;
    let wrapped = match value.get("data") {
        Some(data) => match T::deserialize(data) {
            Ok(payload) => return Ok(payload),
            Err(err) => Some(err),
        },
        None => None,
    };
    T::deserialize(&value).map_err(|bare| ApiError::Decode(wrapped.unwrap_or(bare).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lead::{Lead, LeadStatus};

    #[test]
    fn status_update_targets_lead_status_endpoint() {
        let mutation = Mutation::UpdateStatus {
            lead_id: "l1".into(),
            body: StatusUpdate { status: LeadStatus::Contacted, lost_reason: None },
        };
        let endpoint = mutation.endpoint();
        assert_eq!(endpoint.method, Method::Patch);
        assert_eq!(endpoint.url("/api/"), "/api/leads/l1/status");
        assert_eq!(
            mutation.body().unwrap(),
            Some(serde_json::json!({ "status": "contacted" }))
        );
    }

    #[test]
    fn body_less_mutations_send_nothing() {
        let mutation = Mutation::Convert { lead_id: "l1".into() };
        assert_eq!(mutation.body().unwrap(), None);
        assert_eq!(mutation.endpoint().method, Method::Post);
        assert_eq!(
            Mutation::DeleteSubtask { subtask_id: "s1".into() }.endpoint().path,
            "/subtasks/s1"
        );
    }

    #[test]
    fn follow_up_queries_follow_the_tab() {
        assert_eq!(Query::FollowUps(FollowUpTab::Overdue).endpoint().path, "/follow-ups/overdue");
        assert_eq!(Query::FollowUps(FollowUpTab::Upcoming).endpoint().path, "/follow-ups/upcoming");
    }

    #[test]
    fn decode_accepts_wrapped_and_bare_bodies() {
        let wrapped = r#"{"success":true,"data":[{"_id":"l1","clientName":"John Doe","status":"new"}]}"#;
        let bare = r#"[{"_id":"l1","clientName":"John Doe","status":"new"}]"#;
        let a: Vec<Lead> = decode(wrapped).unwrap();
        let b: Vec<Lead> = decode(bare).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].client_name, "John Doe");

        assert!(matches!(decode::<Vec<Lead>>("{}"), Err(ApiError::Decode(_))));
    }

    #[test]
    fn decode_errors_name_the_bad_field() {
        let wrapped = r#"{"success":true,"data":[{"_id":"l1","clientName":"John Doe","estimatedValue":"lots"}]}"#;
        let Err(ApiError::Decode(message)) = decode::<Vec<Lead>>(wrapped) else {
            panic!("expected a decode error");
        };
        assert!(message.contains("invalid type"), "{message}");
        assert!(message.contains("lots"), "{message}");

        let bare = r#"{"_id":"l1","clientName":"John Doe","estimatedValue":"lots"}"#;
        let Err(ApiError::Decode(message)) = decode::<Lead>(bare) else {
            panic!("expected a decode error");
        };
        assert!(message.contains("invalid type"), "{message}");

        assert!(matches!(decode::<Lead>("not json"), Err(ApiError::Decode(_))));
    }
}
