//! Dataset — a read-only collection of records and its load lifecycle.
//!
//! A dataset is created wholesale by one successful load and replaced only by
//! another full load. It is never partially updated.

use crate::error::LoadError;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Parse a JSON payload into records.
///
/// The payload must be a JSON array; an object or scalar at the top level is
/// [`LoadError::NotArray`] even when it is otherwise valid JSON.
pub fn parse_dataset<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>, LoadError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    let serde_json::Value::Array(items) = value else {
        return Err(LoadError::NotArray);
    };
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(LoadError::from))
        .collect()
}

/// Where a dataset is in its (single) load.
#[derive(Debug, Clone)]
pub enum LoadState<T> {
    /// Fetch still in flight; the dataset is treated as empty.
    Pending,
    /// Loaded and immutable for the rest of the session.
    Ready(Arc<[T]>),
    /// The load failed. Only a fresh load can recover.
    Failed(LoadError),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Pending
    }
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<Vec<T>, LoadError>) -> Self {
        match result {
            Ok(records) => LoadState::Ready(records.into()),
            Err(err) => LoadState::Failed(err),
        }
    }

    /// The records, if loaded.
    pub fn records(&self) -> Option<&Arc<[T]>> {
        match self {
            LoadState::Ready(records) => Some(records),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }

    pub fn error(&self) -> Option<&LoadError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Number of loaded records; zero while pending or failed.
    pub fn len(&self) -> usize {
        self.records().map_or(0, |r| r.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
