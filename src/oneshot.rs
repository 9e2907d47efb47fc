//! One-shot searches: load one dataset, run one query, report.
//!
//! Each function fetches only the dataset it needs, installs it into a fresh
//! [`Session`], and goes through the same search path as the TUI, so error
//! precedence is identical: a dataset that failed to load wins over an empty
//! query.

use lookup_core::config::DatasetsConfig;
use lookup_core::notice::Notice;
use lookup_core::schedule::ScheduleGrid;
use lookup_core::{CredentialOutcome, DatasetKind, Parity, RosterOutcome, SearchError, Session};
use lookup_sources::load_kind;

/// What a one-shot search produced.
#[derive(Debug, Clone)]
pub enum Report {
    Credentials(CredentialOutcome),
    Roster(RosterOutcome),
    Schedule(ScheduleGrid),
    /// No result list: nothing matched, the query was blank, or the dataset
    /// did not load.
    Notice(Notice),
}

/// How the process should exit after printing a [`Report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Results, or a search that matched nothing.
    Found,
    LoadFailed,
    EmptyQuery,
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Found => 0,
            Outcome::LoadFailed => 1,
            Outcome::EmptyQuery => 2,
        }
    }
}

impl Report {
    pub fn outcome(&self) -> Outcome {
        match self {
            Report::Notice(Notice::LoadFailed { .. } | Notice::Loading(_) | Notice::NoData(_)) => {
                Outcome::LoadFailed
            }
            Report::Notice(Notice::EmptyQuery(_)) => Outcome::EmptyQuery,
            _ => Outcome::Found,
        }
    }
}

async fn loaded(config: &DatasetsConfig, kind: DatasetKind, parity: Parity) -> Session {
    let mut session = Session::new(parity);
    session.apply(load_kind(config, kind).await);
    session
}

fn failure(err: &SearchError, kind: DatasetKind, session: &Session) -> Report {
    Report::Notice(Notice::from_error(err, kind, session))
}

/// Search default credentials. Several words must all match.
pub async fn credentials(config: &DatasetsConfig, query: &str) -> Report {
    let mut session = loaded(config, DatasetKind::Credentials, Parity::default()).await;
    match session.search_credentials(query) {
        Ok(outcome) if outcome.is_empty() => Report::Notice(Notice::NoCredentials {
            query: outcome.query.to_string(),
        }),
        Ok(outcome) => Report::Credentials(outcome),
        Err(err) => failure(&err, DatasetKind::Credentials, &session),
    }
}

/// Look up a student by exact name, or everyone on duty on a weekday.
pub async fn roster(config: &DatasetsConfig, query: &str) -> Report {
    let mut session = loaded(config, DatasetKind::Roster, Parity::default()).await;
    match session.search_roster(query) {
        Ok(outcome) if outcome.is_empty() => Report::Notice(Notice::roster_miss(&outcome.query)),
        Ok(outcome) => Report::Roster(outcome),
        Err(err) => failure(&err, DatasetKind::Roster, &session),
    }
}

/// The timetable for one week parity.
pub async fn schedule(config: &DatasetsConfig, parity: Parity) -> Report {
    let session = loaded(config, DatasetKind::Schedule, parity).await;
    match session.schedule_grid() {
        Ok(grid) => Report::Schedule(grid),
        Err(err) => failure(&err, DatasetKind::Schedule, &session),
    }
}
