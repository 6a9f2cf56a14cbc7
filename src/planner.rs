//! The interactive planning session: month navigation, drag/resize gestures, and the
//! commit path (reconcile, persist, refresh) behind them.
//!
//! Everything here runs synchronously in response to discrete gestures. A drop resolves
//! fully (reconciliation, persistence call, refreshed projection) before the session
//! accepts the next gesture, and drag-tracking state is cleared unconditionally when a
//! gesture ends, so a stale drag can never straddle two operations.

use std::mem;

use chrono::{NaiveDate, Utc};

use crate::calendar::{day_cell, DayCell, MonthGrid};
use crate::error::Error;
use crate::filter::TaskFilter;
use crate::range::{DateRange, Edge};
use crate::task::{Task, TaskDraft, TaskId, TaskPatch};
use crate::traits::TaskSource;

/// Transient per-gesture drag state. This is not domain state: it never survives a drop
/// or a cancellation.
#[derive(Clone, Debug, PartialEq)]
pub enum DragState {
    /// No gesture in progress
    Idle,
    /// A whole task is being dragged towards another day
    Moving {
        task: TaskId,
    },
    /// One edge of a task is being dragged
    Resizing {
        task: TaskId,
        edge: Edge,
        /// The tentative range while hovering over a day cell, for preview rendering
        preview: Option<DateRange>,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragState::Idle)
    }
}

/// A planning session over a task source.
///
/// The session holds the last confirmed task list, the visible month, the active filter
/// and the drag state machine. Persistence failures are non-fatal: they are reported to
/// the caller and the session keeps displaying the last confirmed list.
pub struct Planner<S: TaskSource> {
    source: S,
    tasks: Vec<Task>,
    filter: TaskFilter,
    grid: MonthGrid,
    drag: DragState,
}

impl<S: TaskSource> Planner<S> {
    /// Create a session showing the current month. The task list is empty until the
    /// first [`refresh`](Planner::refresh).
    pub fn new(source: S) -> Self {
        Self {
            source,
            tasks: Vec::new(),
            filter: TaskFilter::new(),
            grid: MonthGrid::containing(Utc::now().date_naive()),
            drag: DragState::Idle,
        }
    }

    pub fn tasks(&self) -> &[Task]      { &self.tasks  }
    pub fn filter(&self) -> &TaskFilter { &self.filter }
    pub fn grid(&self) -> MonthGrid     { self.grid    }
    pub fn drag(&self) -> &DragState    { &self.drag   }

    /// Returns the underlying task source
    pub fn source(&self) -> &S {
        &self.source
    }
    /// Returns the underlying task source. Mostly useful to seed it, or to access it in tests.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Re-fetch the task list through the active filter.
    ///
    /// Completion filtering happens here on the client: the query string never carries it.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        let mut tasks = self.source.list_tasks(&self.filter).await?;
        let filter = &self.filter;
        tasks.retain(|task| filter.matches_completion(task));
        self.tasks = tasks;
        Ok(())
    }

    /// Replace the filter criteria and re-fetch
    pub async fn set_filter(&mut self, filter: TaskFilter) -> Result<(), Error> {
        self.filter = filter;
        self.refresh().await
    }

    pub fn next_month(&mut self) {
        self.grid = self.grid.succ();
    }

    pub fn previous_month(&mut self) {
        self.grid = self.grid.pred();
    }

    /// Jump to the month containing `day`
    pub fn show_month_of(&mut self, day: NaiveDate) {
        self.grid = MonthGrid::containing(day);
    }

    /// What the given day cell of the visible month displays, or `None` for a day number
    /// outside the month
    pub fn day_cell(&self, day: u32) -> Option<DayCell<'_>> {
        self.grid.date_of(day).map(|date| day_cell(&self.tasks, date))
    }

    /// Create a task and re-fetch
    pub async fn create_task(&mut self, draft: TaskDraft) -> Result<Task, Error> {
        let task = self.source.create_task(draft).await?;
        self.refresh().await?;
        Ok(task)
    }

    /// Delete a task and re-fetch
    pub async fn delete_task(&mut self, id: &TaskId) -> Result<(), Error> {
        self.source.delete_task(id).await?;
        self.refresh().await
    }

    /// Set a task's completion and re-fetch
    pub async fn set_completed(&mut self, task: TaskId, completed: bool) -> Result<(), Error> {
        self.commit(TaskPatch::completion(task, completed)).await
    }

    /// Start dragging a whole task
    pub fn begin_move(&mut self, task: TaskId) {
        self.drag = DragState::Moving { task };
    }

    /// Start dragging one edge of a task
    pub fn begin_resize(&mut self, task: TaskId, edge: Edge) {
        self.drag = DragState::Resizing { task, edge, preview: None };
    }

    /// Update the resize preview while hovering over a day cell.
    ///
    /// Pure bookkeeping: the preview is recomputed from the stored range, and nothing is
    /// persisted until the drop.
    pub fn hover(&mut self, day: u32) {
        let (task_id, edge) = match &self.drag {
            DragState::Resizing { task, edge, .. } => (task.clone(), *edge),
            _ => return,
        };
        let new_preview = self.grid.date_of(day)
            .and_then(|date| self.find_task(&task_id).map(|task| task.range().resize(edge, date)));
        if let DragState::Resizing { preview, .. } = &mut self.drag {
            *preview = new_preview;
        }
    }

    /// Abandon the gesture. No persistence call is issued, the stored range is untouched.
    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Drop the dragged task (or task edge) on the given day cell and commit the result.
    ///
    /// The drag state is taken out before anything else, so it is cleared whether the
    /// commit succeeds or fails. Dropping with no gesture in progress, or outside a valid
    /// day cell, issues no persistence call.
    pub async fn drop_on(&mut self, day: u32) -> Result<(), Error> {
        let gesture = mem::replace(&mut self.drag, DragState::Idle);

        let date = match self.grid.date_of(day) {
            Some(date) => date,
            None => {
                log::warn!("Drop outside any valid day cell (day {} of {}-{:02}), ignoring the gesture",
                           day, self.grid.year(), self.grid.month());
                return Ok(());
            },
        };

        match gesture {
            DragState::Idle => Ok(()),
            DragState::Moving { task } => {
                log::debug!("Moving task {} to {}", task, date);
                self.commit(TaskPatch::move_to(task, date)).await
            },
            DragState::Resizing { task, edge, .. } => {
                let range = match self.find_task(&task) {
                    Some(found) => found.range(),
                    None => {
                        log::warn!("Task {} vanished during the drag, ignoring the gesture", task);
                        return Ok(());
                    },
                };
                let new_range = range.resize(edge, date);
                log::debug!("Resizing task {}: {} edge to {}, range {} becomes {}",
                            task, edge, date, range, new_range);
                self.commit(TaskPatch::resize_to(task, new_range)).await
            },
        }
    }

    fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Push a partial update, then re-fetch. In case the update fails, the displayed
    /// task list stays at its last confirmed state.
    async fn commit(&mut self, patch: TaskPatch) -> Result<(), Error> {
        self.source.update_task(patch).await?;
        self.refresh().await
    }
}
