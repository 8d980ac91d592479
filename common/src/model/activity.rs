use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::lead::LeadStatus;
use crate::model::null_as_default;
use crate::model::reference::Ref;
use crate::model::user::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Created,
    Updated,
    StatusChanged,
    Assigned,
    NoteAdded,
    FollowUpScheduled,
    FollowUpCompleted,
    Converted,
    Imported,
    #[default]
    #[serde(other)]
    Other,
}

impl ActivityAction {
    pub fn label(self) -> &'static str {
        match self {
            ActivityAction::Created => "Created",
            ActivityAction::Updated => "Updated",
            ActivityAction::StatusChanged => "Status changed",
            ActivityAction::Assigned => "Assigned",
            ActivityAction::NoteAdded => "Note",
            ActivityAction::FollowUpScheduled => "Follow-up scheduled",
            ActivityAction::FollowUpCompleted => "Follow-up completed",
            ActivityAction::Converted => "Converted",
            ActivityAction::Imported => "Imported",
            ActivityAction::Other => "Activity",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetadata {
    #[serde(default)]
    pub old_status: Option<LeadStatus>,
    #[serde(default)]
    pub new_status: Option<LeadStatus>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Append-only audit entry written by the server as a side effect of lead
/// mutations. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: ActivityAction,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: String,
    #[serde(default)]
    pub performed_by: Option<UserRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<ActivityMetadata>,
}

impl Activity {
    /// One-line description for the activity log.
    pub fn summary(&self) -> String {
        let transition = self
            .metadata
            .as_ref()
            .and_then(|m| Some((m.old_status?, m.new_status?)));
        match (self.action, transition) {
            (ActivityAction::StatusChanged, Some((from, to))) => {
                format!("Status changed from {} to {}", from.label(), to.label())
            }
            _ if self.details.is_empty() => self.action.label().to_string(),
            _ => self.details.clone(),
        }
    }

    pub fn actor(&self) -> &str {
        self.performed_by.as_ref().map(Ref::label).unwrap_or("System")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_change_summary_uses_metadata() {
        let activity: Activity = serde_json::from_value(json!({
            "_id": "a1",
            "action": "status_changed",
            "details": "moved",
            "performedBy": { "_id": "u1", "name": "Ana" },
            "metadata": { "oldStatus": "new", "newStatus": "won", "source": "board" }
        }))
        .unwrap();

        assert_eq!(activity.summary(), "Status changed from New to Converted");
        assert_eq!(activity.actor(), "Ana");
        let metadata = activity.metadata.unwrap();
        assert_eq!(metadata.extra.get("source"), Some(&json!("board")));
    }

    #[test]
    fn summary_falls_back_to_details_then_action() {
        let mut activity: Activity = serde_json::from_value(json!({
            "id": "a2",
            "action": "note_added",
            "details": "Called, no answer"
        }))
        .unwrap();
        assert_eq!(activity.summary(), "Called, no answer");
        assert_eq!(activity.actor(), "System");

        activity.details.clear();
        assert_eq!(activity.summary(), "Note");
    }
}
