//! lookup-core — records, search engine, and session state for lookup.
//!
//! This crate holds everything with real behaviour; the TUI and the one-shot
//! CLI are thin drivers over [`session::Session`].
//!
//! # Architecture
//!
//! ```text
//! Source ──► Session (LoadState + QueryCache) ──► Search ──► Group ──► UI / CLI
//! ```
//!
//! Loader tasks hand results to the session over a `tokio` channel. The
//! session itself is owned by one thread and never locked.

pub mod cache;
pub mod collate;
pub mod config;
pub mod dataset;
pub mod debounce;
pub mod error;
pub mod group;
pub mod notice;
pub mod query;
pub mod schedule;
pub mod search;
pub mod session;
pub mod types;

pub use error::{LoadError, QueryError, SearchError};
pub use group::{BrandGroup, BrandKey, UNKNOWN_BRAND};
pub use notice::Notice;
pub use session::{CredentialOutcome, CredentialResults, LoadEvent, RosterOutcome, Session};
pub use types::{
    CredentialEntry, DatasetKind, Parity, Period, RosterEntry, ScheduleEntry, Weekday,
};
