//! lookup-sources — dataset source adapters for lookup.
//!
//! Each source fetches the raw bytes of one JSON dataset. [`load`] turns those
//! bytes into records, and [`spawn_all`] starts one background load per
//! dataset, delivering each result to the session owner as a
//! [`LoadEvent`] on an async channel.
//!
//! There is no retry and no timeout: a dataset is fetched exactly once per
//! run and a failure stays a failure until the next run.

pub mod file;
pub mod http;

use lookup_core::config::DatasetsConfig;
use lookup_core::dataset::parse_dataset;
use lookup_core::{DatasetKind, LoadError, LoadEvent};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub use file::FileSource;
pub use http::HttpSource;

/// Trait implemented by each dataset source.
pub trait DatasetSource: Send + Sync {
    /// Fetch the raw payload.
    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;

    /// Human-readable location, for logs and messages.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Where a dataset lives, after resolving the configured string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Http(reqwest::Url),
    File(PathBuf),
}

impl Location {
    /// Resolve a configured location.
    ///
    /// - `http://…` / `https://…` are fetched as-is.
    /// - Anything else is joined onto `base` with browser semantics when a
    ///   base URL is configured (`students.json` against
    ///   `https://host/app/` → `https://host/app/students.json`).
    /// - Without a base URL it is a local file path.
    pub fn resolve(raw: &str, base: Option<&str>) -> Result<Self, LoadError> {
        let raw = raw.trim();
        if is_absolute_url(raw) {
            return parse_url(raw).map(Location::Http);
        }
        match base {
            Some(base) => parse_url(base)?
                .join(raw)
                .map(Location::Http)
                .map_err(|e| LoadError::Http(format!("invalid dataset location '{raw}': {e}"))),
            None => Ok(Location::File(PathBuf::from(raw))),
        }
    }

    pub fn into_source(self) -> Source {
        match self {
            Location::Http(url) => Source::Http(HttpSource::new(url)),
            Location::File(path) => Source::File(FileSource::new(path)),
        }
    }
}

fn is_absolute_url(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn parse_url(raw: &str) -> Result<reqwest::Url, LoadError> {
    reqwest::Url::parse(raw).map_err(|e| LoadError::Http(format!("invalid URL '{raw}': {e}")))
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Any supported source.
#[derive(Debug, Clone)]
pub enum Source {
    Http(HttpSource),
    File(FileSource),
}

impl DatasetSource for Source {
    async fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        match self {
            Source::Http(s) => s.fetch().await,
            Source::File(s) => s.fetch().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Source::Http(s) => s.describe(),
            Source::File(s) => s.describe(),
        }
    }
}

/// Fetch and parse one dataset.
pub async fn load<T, S>(source: &S) -> Result<Vec<T>, LoadError>
where
    T: DeserializeOwned,
    S: DatasetSource,
{
    let bytes = source.fetch().await?;
    let records = parse_dataset(&bytes)?;
    tracing::info!(source = %source.describe(), records = records.len(), "dataset fetched");
    Ok(records)
}

/// Resolve, fetch, and parse the dataset of `kind` as configured.
pub async fn load_kind(config: &DatasetsConfig, kind: DatasetKind) -> LoadEvent {
    let raw = match kind {
        DatasetKind::Credentials => &config.credentials,
        DatasetKind::Roster => &config.roster,
        DatasetKind::Schedule => &config.schedule,
    };
    let source = Location::resolve(raw, config.base()).map(Location::into_source);
    match kind {
        DatasetKind::Credentials => LoadEvent::Credentials(load_from(source).await),
        DatasetKind::Roster => LoadEvent::Roster(load_from(source).await),
        DatasetKind::Schedule => LoadEvent::Schedule(load_from(source).await),
    }
}

async fn load_from<T: DeserializeOwned>(source: Result<Source, LoadError>) -> Result<Vec<T>, LoadError> {
    let source = source?;
    load(&source).await.inspect_err(|err| {
        tracing::warn!(source = %source.describe(), error = %err, "dataset load failed");
    })
}

/// Start one background load per dataset. Each result is sent on `tx` as it
/// completes; a closed receiver is ignored.
pub fn spawn_all(config: &DatasetsConfig, tx: mpsc::UnboundedSender<LoadEvent>) {
    for kind in [DatasetKind::Credentials, DatasetKind::Roster, DatasetKind::Schedule] {
        let config = config.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = load_kind(&config, kind).await;
            let _ = tx.send(event);
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
