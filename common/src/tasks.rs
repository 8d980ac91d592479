//! Subtasks of a task, edited through their own endpoints.

use crate::api::{Mutation, Query};
use crate::error::ApiError;
use crate::model::task::{Subtask, TaskStatus};
use crate::remote::Remote;
use crate::requests::SubtaskDraft;

#[derive(Debug, Clone, PartialEq)]
pub struct SubtaskList {
    task_id: String,
    list: Remote<Vec<Subtask>>,
}

impl SubtaskList {
    pub fn new(task_id: &str) -> Self {
        Self { task_id: task_id.to_string(), list: Remote::new() }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn query(&self) -> Query {
        Query::Subtasks(self.task_id.clone())
    }

    pub fn list(&self) -> &Remote<Vec<Subtask>> {
        &self.list
    }

    pub fn refreshing(&mut self) {
        self.list.start();
    }

    pub fn loaded(&mut self, items: Vec<Subtask>) {
        self.list.succeed(items);
    }

    pub fn failed(&mut self, err: &ApiError) {
        self.list.fail(err);
    }

    pub fn create(&self, mut draft: SubtaskDraft) -> Result<Mutation, ApiError> {
        draft.title = draft.title.trim().to_string();
        if draft.title.is_empty() {
            return Err(ApiError::Validation("Subtask title is required".into()));
        }
        Ok(Mutation::CreateSubtask { task_id: self.task_id.clone(), body: draft })
    }

    /// Moves a subtask one step along not_started -> in_progress -> completed.
    pub fn advance(&self, subtask_id: &str) -> Option<Mutation> {
        let subtask = self.list.data()?.iter().find(|s| s.id == subtask_id)?;
        Some(Mutation::UpdateSubtask {
            subtask_id: subtask.id.clone(),
            body: SubtaskDraft {
                title: subtask.title.clone(),
                description: subtask.description.clone(),
                assigned_to: subtask.assigned_to.as_ref().map(|r| r.id().to_string()),
                deadline: subtask.deadline.map(|d| d.to_rfc3339()),
                status: subtask.status.next(),
            },
        })
    }

    pub fn delete(&self, subtask_id: &str) -> Mutation {
        Mutation::DeleteSubtask { subtask_id: subtask_id.to_string() }
    }

    pub fn progress(&self) -> (usize, usize) {
        self.list.data().map_or((0, 0), |items| {
            let done = items.iter().filter(|s| s.status == TaskStatus::Completed).count();
            (done, items.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list() -> SubtaskList {
        let mut list = SubtaskList::new("t1");
        list.loaded(
            serde_json::from_value(json!([
                { "_id": "s1", "title": "Draft", "status": "not_started", "assignedTo": "u1" },
                { "_id": "s2", "title": "Review", "status": "completed" }
            ]))
            .unwrap(),
        );
        list
    }

    #[test]
    fn advance_cycles_the_status() {
        let list = list();
        let Some(Mutation::UpdateSubtask { subtask_id, body }) = list.advance("s1") else {
            panic!("expected an update");
        };
        assert_eq!(subtask_id, "s1");
        assert_eq!(body.status, TaskStatus::InProgress);
        assert_eq!(body.assigned_to.as_deref(), Some("u1"));
        assert_eq!(list.advance("missing"), None);
        assert_eq!(list.progress(), (1, 2));
    }

    #[test]
    fn create_requires_a_title() {
        let list = list();
        assert!(list.create(SubtaskDraft::default()).is_err());
        let mutation = list
            .create(SubtaskDraft { title: " Ship it ".into(), ..SubtaskDraft::default() })
            .unwrap();
        assert_eq!(mutation.endpoint().path, "/tasks/t1/subtasks");
    }
}
