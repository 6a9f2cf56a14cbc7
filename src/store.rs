//! An in-memory task list with the semantics of the `/tasks` REST resource.
//!
//! This is a plain last-write-wins list with no version tokens: two concurrent edits to
//! the same task race, and the later request's merge wins. The race is a documented
//! property of the resource, not something this store tries to arbitrate.

use async_trait::async_trait;

use crate::error::Error;
use crate::filter::TaskFilter;
use crate::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::traits::TaskSource;

/// A [`TaskSource`] that keeps every task in memory
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look a task up by id
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }
}

#[async_trait]
impl TaskSource for TaskStore {
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, Error> {
        Ok(self.tasks.iter()
            .filter(|task| filter.matches_query(task))
            .cloned()
            .collect())
    }

    async fn create_task(&mut self, draft: TaskDraft) -> Result<Task, Error> {
        let task = Task::create(draft)?;
        log::debug!("Created task {} ({})", task.title(), task.id());
        self.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&mut self, patch: TaskPatch) -> Result<Task, Error> {
        let index = match self.position(&patch.id) {
            Some(index) => index,
            None => return Err(Error::NotFound(patch.id)),
        };
        let task = &mut self.tasks[index];
        task.apply(&patch)?;
        log::debug!("Updated task {}, range is now {}", task.id(), task.range());
        Ok(task.clone())
    }

    async fn delete_task(&mut self, id: &TaskId) -> Result<(), Error> {
        match self.position(id) {
            Some(index) => {
                self.tasks.remove(index);
                log::debug!("Deleted task {}", id);
                Ok(())
            },
            None => Err(Error::NotFound(id.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    use crate::task::{Category, Priority};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn create_fills_the_documented_defaults() {
        let mut store = TaskStore::new();
        let task = store.create_task(TaskDraft::new("Plan".to_string(), day(2024, 2, 1))).await.unwrap();

        assert_eq!(task.range().start(), day(2024, 2, 1));
        assert_eq!(task.range().end(), day(2024, 2, 1));
        assert_eq!(task.date(), day(2024, 2, 1));
        assert_eq!(task.time(), Some(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
        assert_eq!(task.priority(), Priority::Medium);
        assert_eq!(task.category(), &Category::General);
        assert!(!task.completed());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn create_refuses_an_empty_title() {
        let mut store = TaskStore::new();
        let result = store.create_task(TaskDraft::new("  ".to_string(), day(2024, 2, 1))).await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn update_merges_only_the_given_fields() {
        let mut store = TaskStore::new();
        let mut draft = TaskDraft::new("Review".to_string(), day(2024, 1, 17));
        draft.priority = Some(Priority::High);
        let task = store.create_task(draft).await.unwrap();

        let updated = store.update_task(TaskPatch::completion(task.id().clone(), true)).await.unwrap();
        assert!(updated.completed());
        assert_eq!(updated.priority(), Priority::High);
        assert_eq!(updated.title(), "Review");
    }

    #[tokio::test]
    async fn update_and_delete_signal_unknown_ids() {
        let mut store = TaskStore::new();
        let unknown = TaskId::from("missing");

        let result = store.update_task(TaskPatch::completion(unknown.clone(), true)).await;
        assert!(matches!(result, Err(Error::NotFound(_))));

        let result = store.delete_task(&unknown).await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn update_rejects_a_merge_that_would_invert_the_range() {
        let mut store = TaskStore::new();
        let mut draft = TaskDraft::new("Planning".to_string(), day(2024, 1, 15));
        draft.end_date = Some(day(2024, 1, 17));
        let task = store.create_task(draft).await.unwrap();

        let mut patch = TaskPatch::new(task.id().clone());
        patch.start_date = Some(day(2024, 1, 20));
        let result = store.update_task(patch).await;
        assert!(matches!(result, Err(Error::InvalidRequest(_))));

        // the stored task kept its confirmed range
        let stored = store.get(task.id()).unwrap();
        assert_eq!(stored.range(), task.range());
    }

    #[tokio::test]
    async fn delete_removes_the_task_for_good() {
        let mut store = TaskStore::new();
        let task = store.create_task(TaskDraft::new("Gone".to_string(), day(2024, 1, 15))).await.unwrap();

        store.delete_task(task.id()).await.unwrap();
        assert!(store.is_empty());
        assert!(store.get(task.id()).is_none());
    }

    #[tokio::test]
    async fn listing_applies_the_query_criteria_but_not_completion() {
        let mut store = TaskStore::new();
        let mut draft = TaskDraft::new("Standup".to_string(), day(2024, 1, 16));
        draft.category = Some(Category::Meeting);
        let meeting = store.create_task(draft).await.unwrap();
        store.create_task(TaskDraft::new("Chores".to_string(), day(2024, 1, 16))).await.unwrap();
        store.update_task(TaskPatch::completion(meeting.id().clone(), true)).await.unwrap();

        let mut filter = TaskFilter::new();
        filter.category = Some(Category::Meeting);
        filter.completed = Some(false);

        // completion is the client's concern: the store returns the completed meeting anyway
        let listed = store.list_tasks(&filter).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), meeting.id());
    }
}
