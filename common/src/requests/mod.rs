//! Request bodies sent to the REST API.
//!
//! Shapes are owned by the server; field names follow its camelCase JSON.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::model::follow_up::FollowUpType;
use crate::model::lead::{LeadCategory, LeadSource, LeadStatus, Priority};
use crate::model::null_as_default;
use crate::model::task::TaskStatus;
use crate::model::user::User;

/// Fields of a lead as entered in the create form or as returned by the CSV
/// preview for one row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadDraft {
    #[serde(deserialize_with = "null_as_default")]
    pub client_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: LeadCategory,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(deserialize_with = "null_as_default")]
    pub estimated_value: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub source: LeadSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inquiry_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<String>,
}

impl LeadDraft {
    /// Local required-field checks. The server stays the authority.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.client_name.trim().is_empty() {
            return Err(ApiError::Validation("Client name is required".into()));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ApiError::Validation("Email is required".into()));
        }
        if !email.contains('@') {
            return Err(ApiError::Validation(format!("'{email}' is not a valid email")));
        }
        if self.estimated_value < 0.0 {
            return Err(ApiError::Validation("Estimated value cannot be negative".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: LeadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lost_reason: Option<String>,
}

/// `None` clears the assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignLead {
    pub assigned_to: Option<String>,
    pub assigned_team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewNote {
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFollowUp {
    pub lead: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub scheduled_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub follow_up_type: FollowUpType,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CompleteFollowUp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleFollowUp {
    pub scheduled_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportLeads {
    pub leads: Vec<LeadDraft>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_update_omits_missing_reason() {
        let body = StatusUpdate { status: LeadStatus::Converted, lost_reason: None };
        assert_eq!(serde_json::to_value(body).unwrap(), json!({ "status": "converted" }));

        let body = StatusUpdate {
            status: LeadStatus::NotInterested,
            lost_reason: Some("Budget".into()),
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({ "status": "not_interested", "lostReason": "Budget" })
        );
    }

    #[test]
    fn draft_validation_checks_required_fields() {
        let mut draft = LeadDraft {
            client_name: "John Doe".into(),
            email: "john@example.com".into(),
            ..LeadDraft::default()
        };
        assert!(draft.validate().is_ok());

        draft.email = "john.example.com".into();
        assert!(matches!(draft.validate(), Err(ApiError::Validation(_))));

        draft.email = "john@example.com".into();
        draft.client_name = "   ".into();
        assert_eq!(
            draft.validate(),
            Err(ApiError::Validation("Client name is required".into()))
        );
    }
}
