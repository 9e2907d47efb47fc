//! User-facing messages and field formatting shared by the TUI and the CLI.
//!
//! A [`Notice`] is what the surfaces show in place of results: the welcome
//! text, the three recoverable error kinds, and the "nothing found" echoes.

use crate::error::SearchError;
use crate::query::RosterQuery;
use crate::session::Session;
use crate::types::{CredentialEntry, DatasetKind, RosterEntry, Weekday};

/// Shown instead of a result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Nothing typed yet.
    Welcome(DatasetKind),
    /// Submitted a blank query.
    EmptyQuery(DatasetKind),
    /// Dataset fetch still in flight.
    Loading(DatasetKind),
    /// Dataset fetch failed; only a restart recovers.
    LoadFailed { dataset: DatasetKind, reason: String },
    /// Dataset loaded with no records.
    NoData(DatasetKind),
    /// Credential search with zero matches.
    NoCredentials { query: String },
    /// Roster name lookup with zero matches.
    NoStudent { name: String },
    /// Roster weekday lookup with zero matches.
    NoDuty { day: Weekday },
}

impl Notice {
    /// Translate a search error on `dataset`, using the session to tell
    /// "still loading" apart from "failed to load".
    pub fn from_error(err: &SearchError, dataset: DatasetKind, session: &Session) -> Self {
        match err {
            SearchError::EmptyQuery => Notice::EmptyQuery(dataset),
            SearchError::NotReady { dataset } => {
                let failure = match dataset {
                    DatasetKind::Credentials => session.credentials().error(),
                    DatasetKind::Roster => session.roster().error(),
                    DatasetKind::Schedule => session.schedule().error(),
                };
                match failure {
                    Some(reason) => Notice::LoadFailed {
                        dataset: *dataset,
                        reason: reason.to_string(),
                    },
                    None => Notice::Loading(*dataset),
                }
            }
            SearchError::NoRecords { dataset } => Notice::NoData(*dataset),
        }
    }

    /// The "nothing found" notice for a roster query, which depends on mode.
    pub fn roster_miss(query: &RosterQuery) -> Self {
        match query {
            RosterQuery::Name(name) => Notice::NoStudent { name: name.to_string() },
            RosterQuery::Weekday(day) => Notice::NoDuty { day: *day },
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Notice::Welcome(DatasetKind::Credentials) => "Default credential lookup",
            Notice::Welcome(DatasetKind::Roster) => "Duty roster lookup",
            Notice::Welcome(DatasetKind::Schedule) => "Class schedule",
            Notice::EmptyQuery(_) => "Please enter a search term",
            Notice::Loading(_) => "Data not loaded",
            Notice::LoadFailed { .. } => "Data failed to load",
            Notice::NoData(_) => "Data not loaded",
            Notice::NoCredentials { .. } => "No matching results",
            Notice::NoStudent { .. } => "Student not found",
            Notice::NoDuty { .. } => "Nobody on duty",
        }
    }

    pub fn body(&self) -> String {
        match self {
            Notice::Welcome(DatasetKind::Credentials) => {
                "Type a brand, model or device type, e.g. TP-Link, WR841N, 路由器, 华为. \
                 Matching ignores case; several keywords must all match."
                    .to_string()
            }
            Notice::Welcome(DatasetKind::Roster) => {
                "Type a student's full name, or a weekday (星期一 … 星期日) to list who is on duty."
                    .to_string()
            }
            Notice::Welcome(DatasetKind::Schedule) => {
                "Timetable for the selected week parity.".to_string()
            }
            Notice::EmptyQuery(DatasetKind::Credentials) => {
                "Enter a brand, model or device type to search.".to_string()
            }
            Notice::EmptyQuery(_) => "Enter a student name or a weekday to search.".to_string(),
            Notice::Loading(dataset) => {
                format!("The {dataset} dataset is still loading, please wait…")
            }
            Notice::LoadFailed { dataset, reason } => {
                format!("Could not load the {dataset} dataset ({reason}). Restart to try again.")
            }
            Notice::NoData(DatasetKind::Schedule) => "课程表数据未加载。".to_string(),
            Notice::NoData(dataset) => format!("The {dataset} dataset is empty."),
            Notice::NoCredentials { query } => format!(
                "Nothing matched \"{query}\". Check the spelling, try a more general keyword, \
                 or search by brand or device type."
            ),
            Notice::NoStudent { name } => {
                format!("No student named \"{name}\". Check that the name is spelled correctly.")
            }
            Notice::NoDuty { day } => format!("{day}没有值日学生。"),
        }
    }
}

// ---------------------------------------------------------------------------
// Field formatting
// ---------------------------------------------------------------------------

const UNKNOWN_MODEL: &str = "未知型号";
const DEFAULT_USERNAME: &str = "admin";
const EMPTY_PASSWORD: &str = "(空)";

fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// `model - username/password`, with the display fallbacks for blank fields.
pub fn credential_summary(entry: &CredentialEntry) -> String {
    format!(
        "{} - {}/{}",
        or(&entry.model, UNKNOWN_MODEL),
        or(&entry.username, DEFAULT_USERNAME),
        or(&entry.password, EMPTY_PASSWORD),
    )
}

/// The secondary detail line: type and description.
pub fn credential_detail(entry: &CredentialEntry) -> String {
    format!("类型: {} | 备注: {}", or(&entry.kind, "-"), or(&entry.description, "-"))
}

/// Labelled fields of a student, in display order.
pub fn roster_fields(entry: &RosterEntry) -> [(&'static str, &str); 4] {
    [
        ("姓名", entry.name.as_str()),
        ("学号", entry.id.as_str()),
        ("值日时间", entry.duty_time.as_str()),
        ("值日任务", entry.duty_task.as_str()),
    ]
}

/// One-line tag for weekday listings.
pub fn roster_duty_tag(entry: &RosterEntry) -> String {
    format!("姓名: {}  值日任务: {}", entry.name, entry.duty_task)
}

/// Terminal column width, counting CJK ideographs and full-width forms as two.
pub fn display_width(s: &str) -> usize {
    s.chars()
        .map(|c| match c as u32 {
            0x1100..=0x115F
            | 0x2E80..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6 => 2,
            _ => 1,
        })
        .sum()
}
