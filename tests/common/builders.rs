//! Test builders — ergonomic constructors for dataset records and sessions.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use lookup_core::{
    CredentialEntry, LoadEvent, Parity, RosterEntry, ScheduleEntry, Session,
};

// ---------------------------------------------------------------------------
// CredentialBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`CredentialEntry`] fixtures.
///
/// ```rust
/// let entry = CredentialBuilder::new("TP-Link", "WR841N")
///     .kind("路由器")
///     .login("admin", "admin")
///     .build();
/// ```
pub struct CredentialBuilder {
    entry: CredentialEntry,
}

impl CredentialBuilder {
    pub fn new(brand: &str, model: &str) -> Self {
        Self {
            entry: CredentialEntry {
                brand: brand.to_string(),
                model: model.to_string(),
                ..CredentialEntry::default()
            },
        }
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.entry.kind = kind.to_string();
        self
    }

    pub fn login(mut self, username: &str, password: &str) -> Self {
        self.entry.username = username.to_string();
        self.entry.password = password.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.entry.description = description.to_string();
        self
    }

    pub fn build(self) -> CredentialEntry {
        self.entry
    }
}

/// Shorthand for a credential with only brand and model set.
pub fn cred(brand: &str, model: &str) -> CredentialEntry {
    CredentialBuilder::new(brand, model).build()
}

// ---------------------------------------------------------------------------
// Roster / schedule
// ---------------------------------------------------------------------------

pub fn student(name: &str, id: &str, duty_time: &str, duty_task: &str) -> RosterEntry {
    RosterEntry {
        name: name.to_string(),
        id: id.to_string(),
        duty_time: duty_time.to_string(),
        duty_task: duty_task.to_string(),
    }
}

pub fn lesson(weekday: &str, period: &str, course: &str, parity: Parity) -> ScheduleEntry {
    ScheduleEntry {
        weekday: weekday.to_string(),
        period: period.to_string(),
        course: course.to_string(),
        week_parity: Some(parity),
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// A session with all three datasets installed.
pub fn loaded_session(
    credentials: Vec<CredentialEntry>,
    roster: Vec<RosterEntry>,
    schedule: Vec<ScheduleEntry>,
) -> Session {
    let mut session = Session::new(Parity::Odd);
    session.apply(LoadEvent::Credentials(Ok(credentials)));
    session.apply(LoadEvent::Roster(Ok(roster)));
    session.apply(LoadEvent::Schedule(Ok(schedule)));
    session
}

/// A session loaded from the fixture JSON datasets.
pub fn fixture_session() -> Session {
    loaded_session(
        serde_json::from_str(super::fixtures::CREDENTIALS_JSON).expect("credential fixture"),
        serde_json::from_str(super::fixtures::ROSTER_JSON).expect("roster fixture"),
        serde_json::from_str(super::fixtures::SCHEDULE_JSON).expect("schedule fixture"),
    )
}
