use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::null_as_default;
use crate::model::reference::{Identified, Ref};
use crate::model::user::{TeamRef, UserRef};

/// Position of a lead in the sales pipeline.
///
/// Screens of the application historically used two vocabularies. The
/// canonical one is the six values below; the alternate one
/// (`qualified`, `proposal_sent`, `negotiation`, `won`, `lost`, `archived`)
/// is still accepted when decoding and folded into the closest canonical
/// value, so one lead never shows up in two different columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    #[serde(alias = "qualified", alias = "proposal_sent")]
    Interested,
    #[serde(alias = "negotiation")]
    FollowUp,
    #[serde(alias = "won")]
    Converted,
    #[serde(alias = "lost", alias = "archived")]
    NotInterested,
}

impl LeadStatus {
    /// Pipeline order, which is also the column order of the board.
    pub const ALL: [LeadStatus; 6] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Interested,
        LeadStatus::FollowUp,
        LeadStatus::Converted,
        LeadStatus::NotInterested,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Interested => "interested",
            LeadStatus::FollowUp => "follow_up",
            LeadStatus::Converted => "converted",
            LeadStatus::NotInterested => "not_interested",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Interested => "Interested",
            LeadStatus::FollowUp => "Follow-up",
            LeadStatus::Converted => "Converted",
            LeadStatus::NotInterested => "Not interested",
        }
    }

    /// The "lost" end of the pipeline. Moving a lead here needs a reason.
    pub fn is_lost(self) -> bool {
        self == LeadStatus::NotInterested
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LeadStatus::Converted | LeadStatus::NotInterested)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LeadStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| format!("unknown lead status '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown priority '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadCategory {
    Product,
    Service,
    Consultation,
    Partnership,
    Support,
    #[default]
    #[serde(other)]
    Other,
}

impl LeadCategory {
    pub const ALL: [LeadCategory; 6] = [
        LeadCategory::Product,
        LeadCategory::Service,
        LeadCategory::Consultation,
        LeadCategory::Partnership,
        LeadCategory::Support,
        LeadCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadCategory::Product => "product",
            LeadCategory::Service => "service",
            LeadCategory::Consultation => "consultation",
            LeadCategory::Partnership => "partnership",
            LeadCategory::Support => "support",
            LeadCategory::Other => "other",
        }
    }
}

impl FromStr for LeadCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Website,
    Referral,
    SocialMedia,
    Email,
    Phone,
    WalkIn,
    CsvImport,
    #[default]
    #[serde(other)]
    Other,
}

impl LeadSource {
    pub const ALL: [LeadSource; 8] = [
        LeadSource::Website,
        LeadSource::Referral,
        LeadSource::SocialMedia,
        LeadSource::Email,
        LeadSource::Phone,
        LeadSource::WalkIn,
        LeadSource::CsvImport,
        LeadSource::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadSource::Website => "website",
            LeadSource::Referral => "referral",
            LeadSource::SocialMedia => "social_media",
            LeadSource::Email => "email",
            LeadSource::Phone => "phone",
            LeadSource::WalkIn => "walk_in",
            LeadSource::CsvImport => "csv_import",
            LeadSource::Other => "other",
        }
    }
}

impl FromStr for LeadSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadSource::ALL
            .into_iter()
            .find(|src| src.as_str() == s)
            .ok_or_else(|| format!("unknown source '{s}'"))
    }
}

/// A prospective client record moving through the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: LeadCategory,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: LeadStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estimated_value: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: LeadSource,
    #[serde(default)]
    pub assigned_to: Option<UserRef>,
    #[serde(default)]
    pub assigned_team: Option<TeamRef>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub inquiry_message: Option<String>,
    #[serde(default)]
    pub expected_close_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub lost_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Lead {
    pub fn assignee_id(&self) -> Option<&str> {
        self.assigned_to.as_ref().map(Ref::id)
    }

    pub fn team_id(&self) -> Option<&str> {
        self.assigned_team.as_ref().map(Ref::id)
    }
}

/// Minimal lead shape embedded in other records (follow-ups, activities).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_name: String,
}

impl Identified for LeadSummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.client_name
    }
}

pub type LeadRef = Ref<LeadSummary>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_mongo_shaped_lead() {
        let lead: Lead = serde_json::from_value(json!({
            "_id": "65f0",
            "clientName": "John Doe",
            "email": "john@example.com",
            "status": "follow_up",
            "priority": "urgent",
            "estimatedValue": 1500.5,
            "source": "social_media",
            "assignedTo": { "_id": "u1", "name": "Ana" },
            "assignedTeam": "t9",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(lead.id, "65f0");
        assert_eq!(lead.status, LeadStatus::FollowUp);
        assert_eq!(lead.priority, Priority::Urgent);
        assert_eq!(lead.source, LeadSource::SocialMedia);
        assert_eq!(lead.assignee_id(), Some("u1"));
        assert_eq!(lead.assigned_to.as_ref().map(Ref::label), Some("Ana"));
        assert_eq!(lead.team_id(), Some("t9"));
        assert_eq!(lead.category, LeadCategory::Other);
    }

    #[test]
    fn explicit_nulls_fall_back_to_defaults() {
        let body = r#"[
            {"_id":"1","clientName":"John Doe","email":"john@acme.io","phone":"555-0100","status":"new"},
            {"_id":"2","clientName":"Mary Major","email":null,"phone":null,"category":null,
             "status":null,"priority":null,"estimatedValue":null,"source":null,"assignedTo":null}
        ]"#;
        let leads: Vec<Lead> = crate::api::decode(body).unwrap();

        assert_eq!(leads.len(), 2);
        let mary = &leads[1];
        assert_eq!(mary.phone, "");
        assert_eq!(mary.email, "");
        assert_eq!(mary.status, LeadStatus::New);
        assert_eq!(mary.priority, Priority::Medium);
        assert_eq!(mary.estimated_value, 0.0);
        assert_eq!(mary.category, LeadCategory::Other);
        assert_eq!(mary.source, LeadSource::Other);
        assert_eq!(mary.assignee_id(), None);
    }

    #[test]
    fn alternate_vocabulary_folds_into_canonical_statuses() {
        let cases = [
            ("qualified", LeadStatus::Interested),
            ("proposal_sent", LeadStatus::Interested),
            ("negotiation", LeadStatus::FollowUp),
            ("won", LeadStatus::Converted),
            ("lost", LeadStatus::NotInterested),
            ("archived", LeadStatus::NotInterested),
        ];
        for (raw, expected) in cases {
            assert_eq!(raw.parse::<LeadStatus>().unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn statuses_serialize_with_canonical_names() {
        for status in LeadStatus::ALL {
            let value = serde_json::to_value(status).unwrap();
            assert_eq!(value, json!(status.as_str()));
        }
        assert!("pending".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn only_not_interested_counts_as_lost() {
        let lost: Vec<_> = LeadStatus::ALL.into_iter().filter(|s| s.is_lost()).collect();
        assert_eq!(lost, vec![LeadStatus::NotInterested]);
        assert!(LeadStatus::Converted.is_terminal());
        assert!(!LeadStatus::Contacted.is_terminal());
    }
}
