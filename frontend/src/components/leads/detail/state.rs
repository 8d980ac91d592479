//! Runtime state of the lead detail panel: the loaded lead and its activity
//! log (through `LeadDetail`), plus the in-progress note and follow-up forms.

use common::draft::Draft;
use common::leads::LeadDetail;
use common::requests::NewFollowUp;

pub struct LeadDetailPanel {
    /// Loaded payload, pending lost-reason change and the action builders.
    pub detail: LeadDetail,

    /// Text of the note being written.
    pub note: Draft<String>,

    /// Follow-up form contents. `lead` is filled in on submit.
    pub follow_up: Draft<NewFollowUp>,

    /// A mutation is in flight; action buttons are disabled.
    pub busy: bool,
}

impl LeadDetailPanel {
    pub fn new(lead_id: &str) -> Self {
        Self {
            detail: LeadDetail::open(lead_id),
            note: Draft::default(),
            follow_up: Draft::default(),
            busy: false,
        }
    }
}
