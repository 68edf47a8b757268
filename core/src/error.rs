//! Error types for the graph engine and the falsification history.
//!
//! None of these are retried internally; every variant is surfaced to the caller.

use thiserror::Error;

use crate::history::WorkerId;

/// Error type for graph queries.
///
/// Returned from: `Graph::component`, `distance`, `path`; `Wrap::from_edges`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex argument is not a member of the graph, or an edge is malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The graph cannot answer the query in its current shape
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Both vertices are members but no path connects them
    #[error("not found: {0}")]
    NotFound(String),
}

/// Error type for recording solving steps in the causal history.
///
/// Returned from: `Falsification::compute`, `FalsifiedTime::new`, `Falsification::commit_fresh`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CausalError {
    /// Every candidate fact was already falsified by an ancestor step
    #[error("no unaccounted facts among {candidates} candidates")]
    NoUnaccountedFacts { candidates: usize },

    /// A racing sibling retired every fact of this step before it could commit
    #[error("stale step from {worker}: all {facts} facts already falsified")]
    Stale { worker: WorkerId, facts: usize },
}

/// Error type for the message-passing history recorder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecorderError {
    #[error("recorder closed")]
    Closed,

    #[error("unknown parent thread event: {0}")]
    UnknownParent(String),
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for RecorderError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self { RecorderError::Closed }
}

impl From<tokio::sync::oneshot::error::RecvError> for RecorderError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self { RecorderError::Closed }
}
