//! Error types for gloc.

use thiserror::Error;

/// Errors that end a run.
///
/// None of these are retried. The decoder's per-entry tolerance is handled
/// locally in [`crate::decode`] and never surfaces here.
#[derive(Error, Debug)]
pub enum GlocError {
    #[error("{tool} is not installed (not found in PATH)")]
    MissingDependency { tool: String },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("failed to clone repository: {0}")]
    FetchFailure(String),
    #[error("failed to run analyzer: {0}")]
    AnalysisFailure(String),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The analyzer output could not be read as a JSON object.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("failed to parse analyzer output: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("failed to parse analyzer output: expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}
