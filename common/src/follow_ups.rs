//! Upcoming / overdue follow-up tabs.

use crate::api::{Mutation, Query};
use crate::error::ApiError;
use crate::model::follow_up::{FollowUp, FollowUpTab};
use crate::remote::Remote;
use crate::requests::{CompleteFollowUp, RescheduleFollowUp};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FollowUpBoard {
    tab: FollowUpTab,
    list: Remote<Vec<FollowUp>>,
}

impl FollowUpBoard {
    pub fn tab(&self) -> FollowUpTab {
        self.tab
    }

    pub fn list(&self) -> &Remote<Vec<FollowUp>> {
        &self.list
    }

    /// Read backing the active tab; also the refetch after every mutation.
    pub fn query(&self) -> Query {
        Query::FollowUps(self.tab)
    }

    /// Switches tabs. Returns the read to issue, `None` when the tab is already active.
    /// The previous tab's items are dropped so they never show under the new one.
    pub fn select_tab(&mut self, tab: FollowUpTab) -> Option<Query> {
        if tab == self.tab && self.list.data().is_some() {
            return None;
        }
        if tab != self.tab {
            self.list = Remote::new();
        }
        self.tab = tab;
        self.list.start();
        Some(self.query())
    }

    pub fn refreshing(&mut self) {
        self.list.start();
    }

    /// Results for `tab`. Responses for a tab no longer active are dropped.
    pub fn loaded(&mut self, tab: FollowUpTab, items: Vec<FollowUp>) {
        if tab == self.tab {
            self.list.succeed(items);
        }
    }

    pub fn failed(&mut self, err: &ApiError) {
        self.list.fail(err);
    }

    fn find(&self, id: &str) -> Result<&FollowUp, ApiError> {
        self.list
            .data()
            .and_then(|items| items.iter().find(|f| f.id == id))
            .ok_or_else(|| ApiError::Validation("Follow-up is no longer in this list".into()))
    }

    pub fn complete(&self, id: &str, outcome: &str) -> Result<Mutation, ApiError> {
        let follow_up = self.find(id)?;
        if follow_up.completed {
            return Err(ApiError::Validation("Follow-up is already completed".into()));
        }
        let outcome = outcome.trim();
        Ok(Mutation::CompleteFollowUp {
            follow_up_id: follow_up.id.clone(),
            body: CompleteFollowUp {
                outcome: (!outcome.is_empty()).then(|| outcome.to_string()),
            },
        })
    }

    pub fn reschedule(&self, id: &str, date: &str, time: &str) -> Result<Mutation, ApiError> {
        let follow_up = self.find(id)?;
        if date.trim().is_empty() {
            return Err(ApiError::Validation("Pick a new date".into()));
        }
        let time = time.trim();
        Ok(Mutation::RescheduleFollowUp {
            follow_up_id: follow_up.id.clone(),
            body: RescheduleFollowUp {
                scheduled_date: date.trim().to_string(),
                scheduled_time: (!time.is_empty()).then(|| time.to_string()),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follow_up(id: &str, completed: bool) -> FollowUp {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "title": "Call back",
            "completed": completed,
        }))
        .unwrap()
    }

    #[test]
    fn switching_tabs_fetches_that_tab() {
        let mut board = FollowUpBoard::default();
        assert_eq!(board.select_tab(FollowUpTab::Upcoming), Some(Query::FollowUps(FollowUpTab::Upcoming)));
        board.loaded(FollowUpTab::Upcoming, vec![follow_up("f1", false)]);
        assert_eq!(board.select_tab(FollowUpTab::Upcoming), None);

        assert_eq!(board.select_tab(FollowUpTab::Overdue), Some(Query::FollowUps(FollowUpTab::Overdue)));
        assert_eq!(board.list().data(), None);
        board.loaded(FollowUpTab::Upcoming, vec![follow_up("late", false)]);
        assert_eq!(board.list().data(), None);
        board.loaded(FollowUpTab::Overdue, vec![follow_up("f9", false), follow_up("f10", false)]);
        assert_eq!(board.list().data().map(Vec::len), Some(2));
    }

    #[test]
    fn failed_fetch_after_switch_shows_nothing_from_the_old_tab() {
        let mut board = FollowUpBoard::default();
        board.loaded(FollowUpTab::Upcoming, vec![follow_up("f1", false)]);

        board.select_tab(FollowUpTab::Overdue);
        board.failed(&ApiError::Network("offline".into()));

        assert_eq!(board.tab(), FollowUpTab::Overdue);
        assert_eq!(board.list().data(), None);
        assert!(board.list().error().is_some());
        assert!(board.complete("f1", "").is_err());
    }

    #[test]
    fn completing_targets_the_follow_up_and_refetches_the_active_tab() {
        let mut board = FollowUpBoard::default();
        board.select_tab(FollowUpTab::Overdue);
        board.loaded(FollowUpTab::Overdue, vec![follow_up("f1", false), follow_up("f2", true)]);

        assert_eq!(
            board.complete("f1", " Reached voicemail ").unwrap(),
            Mutation::CompleteFollowUp {
                follow_up_id: "f1".into(),
                body: CompleteFollowUp { outcome: Some("Reached voicemail".into()) },
            }
        );
        assert_eq!(board.query(), Query::FollowUps(FollowUpTab::Overdue));
        assert!(board.complete("f2", "").is_err());
        assert!(board.complete("missing", "").is_err());
    }

    #[test]
    fn reschedule_needs_a_date() {
        let mut board = FollowUpBoard::default();
        board.loaded(FollowUpTab::Upcoming, vec![follow_up("f1", false)]);
        assert!(board.reschedule("f1", "", "10:00").is_err());
        let Mutation::RescheduleFollowUp { body, .. } = board.reschedule("f1", "2024-07-01", "").unwrap()
        else {
            panic!("expected a reschedule");
        };
        assert_eq!(body.scheduled_time, None);
    }
}
