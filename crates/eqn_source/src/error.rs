//! Error types for eqn_source crate.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read one physical line from a [`crate::LineSource`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("cannot open {}: {reason}", path.display())]
    NotFound { path: PathBuf, reason: String },

    #[error("{} has no line {requested}", path.display())]
    OutOfRange { path: PathBuf, requested: usize },

    #[error("history entry {requested} requested but only {available} recorded")]
    NoHistory { requested: usize, available: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("start line unavailable: {0}")]
    StartLineUnavailable(#[from] FetchError),

    #[error("nothing precedes the call: the command history is empty")]
    NoPrecedingContext,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocateError {
    #[error("cannot determine the calling context: {0}")]
    NoCallerContext(String),
}
