//! Error types for lookup.
//!
//! Every error here is recoverable: the surfaces turn each variant into a
//! message shown in place of results.

use crate::types::DatasetKind;
use thiserror::Error;

/// Dataset load failures. Variants carry strings so a failure can be stored
/// in [`LoadState::Failed`](crate::dataset::LoadState) and cloned freely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// Local file could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// Payload is not valid JSON, or an element does not fit the record shape.
    #[error("invalid JSON: {0}")]
    Json(String),

    /// Payload is valid JSON but not an array.
    #[error("invalid data format: expected array")]
    NotArray,
}

/// Query normalisation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Blank or whitespace-only input.
    #[error("query is empty")]
    Empty,
}

/// Reasons a search produced no result set at all. "Zero matches" is not an
/// error; it is an empty outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The dataset has not finished loading, or its load failed.
    #[error("{dataset} data is not loaded")]
    NotReady { dataset: DatasetKind },

    /// The user submitted a blank query.
    #[error("please enter a search term")]
    EmptyQuery,

    /// The dataset loaded but holds no records. Only the timetable reports
    /// this; an empty searchable dataset just yields zero matches.
    #[error("{dataset} data is empty")]
    NoRecords { dataset: DatasetKind },
}

impl From<QueryError> for SearchError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Empty => SearchError::EmptyQuery,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err.to_string())
    }
}
