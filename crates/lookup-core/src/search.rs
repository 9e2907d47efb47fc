//! Search layer — linear filters over a loaded dataset.
//!
//! Every function here is a single pass that preserves collection order. None
//! of them rank, score, or fuzzy-match.

use crate::query::{RosterQuery, Terms};
use crate::types::{CredentialEntry, RosterEntry};

/// Credential entries whose searchable text contains every term.
pub fn search_credentials(records: &[CredentialEntry], terms: &Terms) -> Vec<CredentialEntry> {
    let matches: Vec<CredentialEntry> = records
        .iter()
        .filter(|entry| terms.matches(&entry.searchable_text()))
        .cloned()
        .collect();
    tracing::debug!(
        terms = ?terms.terms(),
        scanned = records.len(),
        matched = matches.len(),
        "credential scan"
    );
    matches
}

/// Roster entries selected by name (exact) or by duty weekday (substring of
/// `duty_time`).
pub fn search_roster(records: &[RosterEntry], query: &RosterQuery) -> Vec<RosterEntry> {
    let matches: Vec<RosterEntry> = records
        .iter()
        .filter(|entry| match query {
            RosterQuery::Name(name) => entry.name == name.as_str(),
            RosterQuery::Weekday(day) => entry.duty_time.contains(day.label()),
        })
        .cloned()
        .collect();
    tracing::debug!(query = ?query, matched = matches.len(), "roster scan");
    matches
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
