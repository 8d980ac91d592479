//! Status changes shared by the board's drop handler and the detail panel's
//! status selector. Both issue the exact same call.

use crate::api::Mutation;
use crate::error::ApiError;
use crate::model::lead::{Lead, LeadStatus};
use crate::requests::StatusUpdate;

/// What asking for a new status resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusChange {
    /// Target equals the current status; nothing to send.
    Unchanged,
    Ready(Mutation),
    /// Target is the lost state and no reason was given yet.
    NeedsReason(PendingStatusChange),
}

/// A move to the lost state waiting for its reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingStatusChange {
    pub lead_id: String,
    pub from: LeadStatus,
    pub to: LeadStatus,
}

impl PendingStatusChange {
    /// Completes the change. A blank reason is rejected and no call is built.
    pub fn with_reason(&self, reason: &str) -> Result<Mutation, ApiError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ApiError::Validation(
                "Please give a reason before marking this lead as not interested".into(),
            ));
        }
        Ok(status_mutation(&self.lead_id, self.to, Some(reason.to_string())))
    }
}

pub fn request_status_change(lead: &Lead, target: LeadStatus) -> StatusChange {
    if lead.status == target {
        StatusChange::Unchanged
    } else if target.is_lost() {
        StatusChange::NeedsReason(PendingStatusChange {
            lead_id: lead.id.clone(),
            from: lead.status,
            to: target,
        })
    } else {
        StatusChange::Ready(status_mutation(&lead.id, target, None))
    }
}

fn status_mutation(lead_id: &str, status: LeadStatus, lost_reason: Option<String>) -> Mutation {
    Mutation::UpdateStatus {
        lead_id: lead_id.to_string(),
        body: StatusUpdate { status, lost_reason },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leads::filter::tests::lead;

    #[test]
    fn lost_state_waits_for_a_reason() {
        let john = lead("1", "John Doe", "john@acme.io", LeadStatus::Interested);
        let StatusChange::NeedsReason(pending) =
            request_status_change(&john, LeadStatus::NotInterested)
        else {
            panic!("expected the reason form");
        };

        assert!(pending.with_reason("  ").is_err());
        let mutation = pending.with_reason(" Went with a competitor ").unwrap();
        assert_eq!(
            mutation,
            Mutation::UpdateStatus {
                lead_id: "1".into(),
                body: StatusUpdate {
                    status: LeadStatus::NotInterested,
                    lost_reason: Some("Went with a competitor".into()),
                },
            }
        );
    }

    #[test]
    fn same_status_is_a_no_op() {
        let john = lead("1", "John Doe", "john@acme.io", LeadStatus::Contacted);
        assert_eq!(request_status_change(&john, LeadStatus::Contacted), StatusChange::Unchanged);
        assert!(matches!(
            request_status_change(&john, LeadStatus::Converted),
            StatusChange::Ready(Mutation::UpdateStatus { .. })
        ));
    }
}
