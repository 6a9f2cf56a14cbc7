//! Errors returned by storage collaborators and the planning session

use thiserror::Error;

use crate::task::TaskId;

/// The error taxonomy shared by every [`TaskSource`](crate::traits::TaskSource).
///
/// None of these are fatal to a planning session: the planner logs the failure and keeps
/// displaying the last confirmed task list.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced task does not exist (anymore) in the store. Nothing was mutated.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// The request was malformed (empty title, inverted date range...). Nothing was mutated.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The storage collaborator could not be reached, or answered garbage
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
