//! Session — the single owner of loaded datasets and the query cache.
//!
//! One [`Session`] is created at startup and handed to whichever surface
//! drives it (TUI event loop or one-shot CLI). Datasets arrive through
//! [`Session::apply`] exactly once per load; until then every search on that
//! dataset reports [`SearchError::NotReady`].

use crate::cache::QueryCache;
use crate::dataset::LoadState;
use crate::error::{LoadError, SearchError};
use crate::group::{group_by_brand, BrandGroup};
use crate::query::{QueryText, RosterQuery, Terms};
use crate::schedule::ScheduleGrid;
use crate::search;
use crate::types::{CredentialEntry, DatasetKind, Parity, RosterEntry, ScheduleEntry};
use serde::Serialize;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Load events
// ---------------------------------------------------------------------------

/// The result of one dataset load, as sent from a loader task to the owner
/// of the session.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    Credentials(Result<Vec<CredentialEntry>, LoadError>),
    Roster(Result<Vec<RosterEntry>, LoadError>),
    Schedule(Result<Vec<ScheduleEntry>, LoadError>),
}

impl LoadEvent {
    pub fn kind(&self) -> DatasetKind {
        match self {
            LoadEvent::Credentials(_) => DatasetKind::Credentials,
            LoadEvent::Roster(_) => DatasetKind::Roster,
            LoadEvent::Schedule(_) => DatasetKind::Schedule,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Grouped credential matches, as memoised by the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialResults {
    pub total: usize,
    pub groups: Vec<BrandGroup>,
}

/// A completed credential search. `results.total == 0` means "nothing found"
/// and the caller echoes `query` back.
#[derive(Debug, Clone)]
pub struct CredentialOutcome {
    pub query: QueryText,
    pub results: Arc<CredentialResults>,
}

impl CredentialOutcome {
    pub fn is_empty(&self) -> bool {
        self.results.total == 0
    }
}

/// A completed roster search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterOutcome {
    pub query: RosterQuery,
    pub matches: Vec<RosterEntry>,
}

impl RosterOutcome {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct Session {
    credentials: LoadState<CredentialEntry>,
    roster: LoadState<RosterEntry>,
    schedule: LoadState<ScheduleEntry>,
    cache: QueryCache<CredentialResults>,
    parity: Parity,
    scans: u64,
}

impl Session {
    pub fn new(parity: Parity) -> Self {
        Self { parity, ..Self::default() }
    }

    /// Install the result of a dataset load, replacing whatever was there.
    pub fn apply(&mut self, event: LoadEvent) {
        let kind = event.kind();
        match event {
            LoadEvent::Credentials(result) => {
                self.credentials = LoadState::from_result(result);
                self.cache.clear();
                log_install(kind, self.credentials.len(), self.credentials.error());
            }
            LoadEvent::Roster(result) => {
                self.roster = LoadState::from_result(result);
                log_install(kind, self.roster.len(), self.roster.error());
            }
            LoadEvent::Schedule(result) => {
                self.schedule = LoadState::from_result(result);
                log_install(kind, self.schedule.len(), self.schedule.error());
            }
        }
    }

    pub fn credentials(&self) -> &LoadState<CredentialEntry> {
        &self.credentials
    }

    pub fn roster(&self) -> &LoadState<RosterEntry> {
        &self.roster
    }

    pub fn schedule(&self) -> &LoadState<ScheduleEntry> {
        &self.schedule
    }

    /// Search default credentials. Identical normalised queries are served
    /// from the cache without rescanning the dataset.
    pub fn search_credentials(&mut self, raw: &str) -> Result<CredentialOutcome, SearchError> {
        let records = ready(&self.credentials, DatasetKind::Credentials)?.clone();
        let terms = Terms::parse(raw)?;
        let scans = &mut self.scans;
        let results = self.cache.get_or_insert_with(&terms.cache_key(), || {
            *scans += 1;
            let matches = search::search_credentials(&records, &terms);
            CredentialResults { total: matches.len(), groups: group_by_brand(&matches) }
        });
        Ok(CredentialOutcome { query: terms.text().clone(), results })
    }

    /// Look up students by name, or by duty weekday when the query is one of
    /// the seven weekday labels.
    pub fn search_roster(&mut self, raw: &str) -> Result<RosterOutcome, SearchError> {
        let records = ready(&self.roster, DatasetKind::Roster)?;
        let query = RosterQuery::parse(raw)?;
        let matches = search::search_roster(records, &query);
        self.scans += 1;
        Ok(RosterOutcome { query, matches })
    }

    /// Timetable for the currently selected parity. A schedule that loaded
    /// with no records at all is reported rather than drawn as a blank grid.
    pub fn schedule_grid(&self) -> Result<ScheduleGrid, SearchError> {
        let records = ready(&self.schedule, DatasetKind::Schedule)?;
        if records.is_empty() {
            return Err(SearchError::NoRecords { dataset: DatasetKind::Schedule });
        }
        Ok(ScheduleGrid::build(records, self.parity))
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    pub fn set_parity(&mut self, parity: Parity) {
        tracing::debug!(from = %self.parity, to = %parity, "parity changed");
        self.parity = parity;
    }

    pub fn toggle_parity(&mut self) -> Parity {
        self.set_parity(self.parity.toggled());
        self.parity
    }

    /// Number of full dataset scans performed so far. Cache hits do not scan.
    pub fn scan_count(&self) -> u64 {
        self.scans
    }

    pub fn cache(&self) -> &QueryCache<CredentialResults> {
        &self.cache
    }

    /// Drop memoised credential results; the next search rescans.
    pub fn clear_cache(&mut self) {
        tracing::debug!(entries = self.cache.len(), "query cache cleared");
        self.cache.clear();
    }
}

fn ready<T>(state: &LoadState<T>, dataset: DatasetKind) -> Result<&Arc<[T]>, SearchError> {
    state.records().ok_or(SearchError::NotReady { dataset })
}

fn log_install(kind: DatasetKind, len: usize, error: Option<&LoadError>) {
    match error {
        None => tracing::info!(dataset = %kind, records = len, "dataset loaded"),
        Some(err) => tracing::warn!(dataset = %kind, error = %err, "dataset failed to load"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
