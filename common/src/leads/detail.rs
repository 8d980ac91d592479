//! State behind the lead detail panel.
//!
//! The panel loads a lead and its activity log when opened. Every action
//! (status, assignment, note, follow-up, convert) produces one independent
//! [`Mutation`]; after it completes the caller refetches both queries from
//! [`LeadDetail::queries`] instead of patching the payload locally.

use crate::api::{Mutation, Query};
use crate::error::ApiError;
use crate::leads::transition::{PendingStatusChange, StatusChange, request_status_change};
use crate::model::activity::Activity;
use crate::model::lead::{Lead, LeadStatus};
use crate::remote::Remote;
use crate::requests::{AssignLead, NewFollowUp, NewNote};

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPayload {
    pub lead: Lead,
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeadDetail {
    lead_id: String,
    payload: Remote<DetailPayload>,
    pending: Option<PendingStatusChange>,
}

impl LeadDetail {
    pub fn open(lead_id: &str) -> Self {
        let mut payload = Remote::new();
        payload.start();
        Self { lead_id: lead_id.to_string(), payload, pending: None }
    }

    pub fn lead_id(&self) -> &str {
        &self.lead_id
    }

    /// The two reads that make up the panel. Issued on open and after every mutation.
    pub fn queries(&self) -> [Query; 2] {
        [Query::Lead(self.lead_id.clone()), Query::Activities(self.lead_id.clone())]
    }

    pub fn refreshing(&mut self) {
        self.payload.start();
    }

    /// Newest activity first.
    pub fn loaded(&mut self, lead: Lead, mut activities: Vec<Activity>) {
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.payload.succeed(DetailPayload { lead, activities });
    }

    pub fn failed(&mut self, err: &ApiError) {
        self.payload.fail(err);
    }

    pub fn payload(&self) -> &Remote<DetailPayload> {
        &self.payload
    }

    pub fn lead(&self) -> Option<&Lead> {
        self.payload.data().map(|p| &p.lead)
    }

    /// Status selector. Returns the call to issue, or `None` when nothing is
    /// sent: same status, lead not loaded yet, or the reason form was opened.
    pub fn change_status(&mut self, target: LeadStatus) -> Option<Mutation> {
        let lead = self.lead()?;
        match request_status_change(lead, target) {
            StatusChange::Unchanged => None,
            StatusChange::Ready(mutation) => {
                self.pending = None;
                Some(mutation)
            }
            StatusChange::NeedsReason(pending) => {
                self.pending = Some(pending);
                None
            }
        }
    }

    pub fn pending(&self) -> Option<&PendingStatusChange> {
        self.pending.as_ref()
    }

    /// Resubmission from the reason form. On a blank reason the form stays open.
    pub fn submit_reason(&mut self, reason: &str) -> Result<Mutation, ApiError> {
        let pending = self
            .pending
            .as_ref()
            .ok_or_else(|| ApiError::Validation("No status change is waiting for a reason".into()))?;
        let mutation = pending.with_reason(reason)?;
        self.pending = None;
        Ok(mutation)
    }

    pub fn cancel_reason(&mut self) {
        self.pending = None;
    }

    /// Empty ids clear the respective assignment. `None` when nothing changes.
    pub fn assign(&self, user_id: Option<&str>, team_id: Option<&str>) -> Option<Mutation> {
        let lead = self.lead()?;
        let user_id = user_id.filter(|id| !id.is_empty());
        let team_id = team_id.filter(|id| !id.is_empty());
        if lead.assignee_id() == user_id && lead.team_id() == team_id {
            return None;
        }
        Some(Mutation::Assign {
            lead_id: self.lead_id.clone(),
            body: AssignLead {
                assigned_to: user_id.map(str::to_string),
                assigned_team: team_id.map(str::to_string),
            },
        })
    }

    pub fn add_note(&self, text: &str) -> Result<Mutation, ApiError> {
        let note = text.trim();
        if note.is_empty() {
            return Err(ApiError::Validation("Note cannot be empty".into()));
        }
        Ok(Mutation::AddNote {
            lead_id: self.lead_id.clone(),
            body: NewNote { note: note.to_string() },
        })
    }

    pub fn convert(&self) -> Option<Mutation> {
        let lead = self.lead()?;
        (lead.status != LeadStatus::Converted)
            .then(|| Mutation::Convert { lead_id: self.lead_id.clone() })
    }

    pub fn delete(&self) -> Mutation {
        Mutation::DeleteLead { lead_id: self.lead_id.clone() }
    }

    /// Follow-up scheduled from the panel; bound to this lead and, unless
    /// the form picked someone, to the lead's assignee.
    pub fn schedule_follow_up(&self, mut draft: NewFollowUp) -> Result<Mutation, ApiError> {
        if draft.title.trim().is_empty() {
            return Err(ApiError::Validation("Follow-up title is required".into()));
        }
        if draft.scheduled_date.trim().is_empty() {
            return Err(ApiError::Validation("Pick a date for the follow-up".into()));
        }
        draft.lead = self.lead_id.clone();
        if draft.assigned_to.as_deref().is_none_or(str::is_empty) {
            draft.assigned_to = self.lead().and_then(Lead::assignee_id).map(str::to_string);
        }
        Ok(Mutation::CreateFollowUp(draft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::filter::tests::lead;
    use crate::requests::StatusUpdate;

    fn opened(status: LeadStatus) -> LeadDetail {
        let mut detail = LeadDetail::open("1");
        detail.loaded(lead("1", "John Doe", "john@acme.io", status), Vec::new());
        detail
    }

    #[test]
    fn nothing_is_sent_before_the_lead_loads() {
        let mut detail = LeadDetail::open("1");
        assert!(detail.payload().is_loading());
        assert_eq!(detail.change_status(LeadStatus::Contacted), None);
        assert_eq!(detail.convert(), None);
        assert_eq!(detail.queries(), [Query::Lead("1".into()), Query::Activities("1".into())]);
    }

    #[test]
    fn lost_without_reason_issues_no_call_until_resubmitted() {
        let mut detail = opened(LeadStatus::FollowUp);

        assert_eq!(detail.change_status(LeadStatus::NotInterested), None);
        assert!(detail.pending().is_some());

        assert!(detail.submit_reason("").is_err());
        assert!(detail.pending().is_some());

        let mutation = detail.submit_reason("No budget this year").unwrap();
        assert_eq!(
            mutation,
            Mutation::UpdateStatus {
                lead_id: "1".into(),
                body: StatusUpdate {
                    status: LeadStatus::NotInterested,
                    lost_reason: Some("No budget this year".into()),
                },
            }
        );
        assert!(detail.pending().is_none());
    }

    #[test]
    fn cancelling_the_reason_form_drops_the_change() {
        let mut detail = opened(LeadStatus::New);
        detail.change_status(LeadStatus::NotInterested);
        detail.cancel_reason();
        assert!(detail.submit_reason("late").is_err());
    }

    #[test]
    fn ordinary_status_change_is_immediate() {
        let mut detail = opened(LeadStatus::New);
        assert!(matches!(
            detail.change_status(LeadStatus::Interested),
            Some(Mutation::UpdateStatus { .. })
        ));
        assert_eq!(detail.change_status(LeadStatus::New), None);
    }

    #[test]
    fn failed_refetch_keeps_what_is_on_screen() {
        let mut detail = opened(LeadStatus::New);
        detail.refreshing();
        detail.failed(&ApiError::Network("offline".into()));
        assert_eq!(detail.lead().map(|l| l.status), Some(LeadStatus::New));
        assert!(detail.payload().error().is_some());
    }

    #[test]
    fn assignment_only_sends_real_changes() {
        let detail = opened(LeadStatus::New);
        assert_eq!(detail.assign(Some(""), None), None);
        assert_eq!(
            detail.assign(Some("u1"), Some("")),
            Some(Mutation::Assign {
                lead_id: "1".into(),
                body: AssignLead { assigned_to: Some("u1".into()), assigned_team: None },
            })
        );
    }

    #[test]
    fn blank_notes_are_rejected() {
        let detail = opened(LeadStatus::New);
        assert!(detail.add_note("   ").is_err());
        assert_eq!(
            detail.add_note(" Left a voicemail ").unwrap(),
            Mutation::AddNote { lead_id: "1".into(), body: NewNote { note: "Left a voicemail".into() } }
        );
    }

    #[test]
    fn converted_leads_cannot_be_converted_again() {
        assert!(opened(LeadStatus::Interested).convert().is_some());
        assert_eq!(opened(LeadStatus::Converted).convert(), None);
    }

    #[test]
    fn follow_up_is_bound_to_the_lead() {
        let detail = opened(LeadStatus::Contacted);
        let draft = NewFollowUp {
            title: "Send pricing".into(),
            scheduled_date: "2024-06-01".into(),
            ..NewFollowUp::default()
        };
        let Mutation::CreateFollowUp(body) = detail.schedule_follow_up(draft).unwrap() else {
            panic!("expected a follow-up");
        };
        assert_eq!(body.lead, "1");

        let undated = NewFollowUp { title: "Call".into(), ..NewFollowUp::default() };
        assert!(detail.schedule_follow_up(undated).is_err());
    }

    #[test]
    fn activities_are_shown_newest_first() {
        let activity = |id: &str, at: &str| -> Activity {
            serde_json::from_value(serde_json::json!({ "_id": id, "createdAt": at })).unwrap()
        };
        let mut detail = LeadDetail::open("1");
        detail.loaded(
            lead("1", "John Doe", "john@acme.io", LeadStatus::New),
            vec![activity("old", "2024-01-01T00:00:00Z"), activity("new", "2024-02-01T00:00:00Z")],
        );
        let ids: Vec<_> = detail
            .payload()
            .data()
            .unwrap()
            .activities
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "old"]);
    }
}
