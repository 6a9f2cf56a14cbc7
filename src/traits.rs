use async_trait::async_trait;

use crate::error::Error;
use crate::filter::TaskFilter;
use crate::task::{Task, TaskDraft, TaskId, TaskPatch};

/// A task storage collaborator.
///
/// The planner does not care where tasks actually live: behind this seam sits either a
/// remote REST resource ([`RestClient`](crate::client::RestClient)) or an in-memory list
/// ([`TaskStore`](crate::store::TaskStore)). Both speak the same semantics, so the
/// in-memory store can stand in for the remote end in tests.
#[async_trait]
pub trait TaskSource {
    /// Returns the tasks matching `filter` (its criteria are AND-combined).
    /// Completion filtering is not part of this query, see
    /// [`TaskFilter::to_query`](crate::filter::TaskFilter::to_query).
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, Error>;

    /// Create a task from a draft, filling defaults for the missing optional fields.
    /// The store assigns the task's id and creation date.
    async fn create_task(&mut self, draft: TaskDraft) -> Result<Task, Error>;

    /// Merge a partial update onto the stored task and return the updated task
    async fn update_task(&mut self, patch: TaskPatch) -> Result<Task, Error>;

    /// Remove a task by id. Deletion is immediate and irreversible.
    async fn delete_task(&mut self, id: &TaskId) -> Result<(), Error>;
}
