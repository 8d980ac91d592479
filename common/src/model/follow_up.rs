use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::lead::{LeadRef, Priority};
use crate::model::null_as_default;
use crate::model::user::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpType {
    #[default]
    Call,
    Email,
    Meeting,
    Whatsapp,
    #[serde(other)]
    Other,
}

impl FollowUpType {
    pub const ALL: [FollowUpType; 5] = [
        FollowUpType::Call,
        FollowUpType::Email,
        FollowUpType::Meeting,
        FollowUpType::Whatsapp,
        FollowUpType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FollowUpType::Call => "call",
            FollowUpType::Email => "email",
            FollowUpType::Meeting => "meeting",
            FollowUpType::Whatsapp => "whatsapp",
            FollowUpType::Other => "other",
        }
    }
}

impl std::str::FromStr for FollowUpType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FollowUpType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown follow-up type '{s}'"))
    }
}

/// Which server-side query backs the follow-up list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FollowUpTab {
    #[default]
    Upcoming,
    Overdue,
}

impl FollowUpTab {
    pub fn as_str(self) -> &'static str {
        match self {
            FollowUpTab::Upcoming => "upcoming",
            FollowUpTab::Overdue => "overdue",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FollowUpTab::Upcoming => "Upcoming",
            FollowUpTab::Overdue => "Overdue",
        }
    }
}

/// A scheduled reminder tied to a lead and an assignee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub lead: Option<LeadRef>,
    #[serde(default)]
    pub assigned_to: Option<UserRef>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scheduled_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_time: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub follow_up_type: FollowUpType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub outcome: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::reference::Ref;
    use serde_json::json;

    #[test]
    fn decodes_follow_up_with_populated_lead() {
        let follow_up: FollowUp = serde_json::from_value(json!({
            "_id": "f1",
            "lead": { "_id": "l1", "clientName": "John Doe" },
            "title": "Call back",
            "scheduledDate": "2024-05-01T00:00:00.000Z",
            "scheduledTime": "14:30",
            "type": "meeting",
            "priority": "high"
        }))
        .unwrap();

        assert_eq!(follow_up.lead.as_ref().map(Ref::label), Some("John Doe"));
        assert_eq!(follow_up.follow_up_type, FollowUpType::Meeting);
        assert_eq!(follow_up.priority, Priority::High);
        assert!(!follow_up.completed);
    }
}
