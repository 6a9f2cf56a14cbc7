//! This crate provides the core of a drag-and-drop task planner.
//!
//! Tasks are date-ranged to-do items that live in a storage collaborator behind the
//! [`TaskSource`](traits::TaskSource) trait: either a remote REST resource (the
//! [`client`] module) or a plain in-memory list (the [`store`] module). Because both
//! speak the same semantics, the in-memory store can stand in for the remote end in
//! tests and demos.
//!
//! A [`Planner`] drives the month view on top of a source. It projects the task
//! collection onto a [`MonthGrid`](calendar::MonthGrid) (which tasks occupy each day,
//! and which segment of a multi-day bar to draw), and it turns drag/resize gestures into
//! date-range reconciliation followed by partial updates: dragging one edge of a task
//! across the opposite edge collapses the range instead of ever storing an inverted one.

pub mod calendar;
pub use calendar::MonthGrid;
mod error;
pub use error::Error;
pub mod filter;
pub use filter::{TaskFilter, TimeOfDay, TimeRange};
pub mod planner;
pub use planner::{DragState, Planner};
pub mod range;
pub use range::{DateRange, Edge, SegmentRole};
mod task;
pub use task::{Category, Priority, Task, TaskDraft, TaskId, TaskPatch};
pub mod traits;

pub mod client;
pub mod store;

pub mod config;
