use crate::leads::transition::{StatusChange, request_status_change};
use crate::model::lead::{Lead, LeadStatus};

/// One status column of the kanban board.
#[derive(Debug, Clone, PartialEq)]
pub struct Column<'a> {
    pub status: LeadStatus,
    pub leads: Vec<&'a Lead>,
}

impl Column<'_> {
    pub fn total_value(&self) -> f64 {
        self.leads.iter().map(|l| l.estimated_value).sum()
    }
}

/// Drag state of the kanban board.
///
/// The board never moves cards itself: a drop yields the status change to
/// send, and the columns are rebuilt from whatever the refetch returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    dragging: Option<String>,
}

impl Board {
    /// Groups leads into the fixed columns, preserving list order within each.
    pub fn columns(leads: &[Lead]) -> Vec<Column<'_>> {
        LeadStatus::ALL
            .into_iter()
            .map(|status| Column {
                status,
                leads: leads.iter().filter(|l| l.status == status).collect(),
            })
            .collect()
    }

    pub fn drag_start(&mut self, lead_id: &str) {
        self.dragging = Some(lead_id.to_string());
    }

    pub fn drag_cancel(&mut self) {
        self.dragging = None;
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Resolves a drop on `target`. The drag marker is consumed either way.
    pub fn drop_on(&mut self, leads: &[Lead], target: LeadStatus) -> StatusChange {
        let Some(lead_id) = self.dragging.take() else {
            return StatusChange::Unchanged;
        };
        match leads.iter().find(|l| l.id == lead_id) {
            Some(lead) => request_status_change(lead, target),
            None => StatusChange::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Mutation;
    use crate::leads::filter::tests::lead;
    use crate::requests::StatusUpdate;

    fn column_ids(leads: &[Lead], status: LeadStatus) -> Vec<String> {
        Board::columns(leads)
            .into_iter()
            .find(|c| c.status == status)
            .map(|c| c.leads.iter().map(|l| l.id.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn columns_follow_pipeline_order() {
        let leads = vec![lead("1", "John Doe", "j@a.io", LeadStatus::Contacted)];
        let order: Vec<_> = Board::columns(&leads).iter().map(|c| c.status).collect();
        assert_eq!(order, LeadStatus::ALL.to_vec());
        assert_eq!(column_ids(&leads, LeadStatus::Contacted), vec!["1"]);
    }

    #[test]
    fn drop_on_another_column_issues_one_status_update() {
        let mut leads = vec![
            lead("1", "John Doe", "j@a.io", LeadStatus::New),
            lead("2", "Mary Major", "m@a.io", LeadStatus::New),
        ];
        let mut board = Board::default();

        board.drag_start("1");
        let change = board.drop_on(&leads, LeadStatus::Converted);
        assert_eq!(
            change,
            StatusChange::Ready(Mutation::UpdateStatus {
                lead_id: "1".into(),
                body: StatusUpdate { status: LeadStatus::Converted, lost_reason: None },
            })
        );
        assert_eq!(board.dragging(), None);
        assert_eq!(board.drop_on(&leads, LeadStatus::Converted), StatusChange::Unchanged);

        // Refetch after a successful call.
        leads[0].status = LeadStatus::Converted;
        assert_eq!(column_ids(&leads, LeadStatus::Converted), vec!["1"]);
        assert_eq!(column_ids(&leads, LeadStatus::New), vec!["2"]);
    }

    #[test]
    fn drop_on_own_column_does_nothing() {
        let leads = vec![lead("1", "John Doe", "j@a.io", LeadStatus::New)];
        let mut board = Board::default();
        board.drag_start("1");
        assert_eq!(board.drop_on(&leads, LeadStatus::New), StatusChange::Unchanged);
    }

    #[test]
    fn drop_on_lost_column_asks_for_reason() {
        let leads = vec![lead("1", "John Doe", "j@a.io", LeadStatus::Interested)];
        let mut board = Board::default();
        board.drag_start("1");
        assert!(matches!(
            board.drop_on(&leads, LeadStatus::NotInterested),
            StatusChange::NeedsReason(_)
        ));
    }

    #[test]
    fn failed_update_keeps_server_truth() {
        let leads = vec![lead("1", "John Doe", "j@a.io", LeadStatus::New)];
        let mut board = Board::default();
        board.drag_start("1");
        let _ = board.drop_on(&leads, LeadStatus::Contacted);

        // The call failed; the refetch returns the unchanged list.
        assert_eq!(column_ids(&leads, LeadStatus::New), vec!["1"]);
        assert!(column_ids(&leads, LeadStatus::Contacted).is_empty());
    }

    #[test]
    fn column_totals_sum_estimated_values() {
        let mut a = lead("1", "A", "a@a.io", LeadStatus::New);
        a.estimated_value = 100.0;
        let mut b = lead("2", "B", "b@a.io", LeadStatus::New);
        b.estimated_value = 250.5;
        let leads = vec![a, b];
        assert_eq!(Board::columns(&leads)[0].total_value(), 350.5);
    }
}
