//! Core record types for lookup-core.
//!
//! This module defines the three record shapes loaded from the static JSON
//! datasets ([`RosterEntry`], [`CredentialEntry`], [`ScheduleEntry`]) and the
//! closed label sets they refer to ([`Weekday`], [`Period`], [`Parity`]).
//!
//! Records are flat and read-only after load. Field values in the datasets may
//! be strings, numbers, or `null`; every field is read as a string so numeric
//! ids and empty passwords need no special casing downstream.

use phf::phf_map;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One student on the duty roster.
///
/// The published datasets key these fields in Chinese; both spellings load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(default, alias = "姓名", deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, alias = "学号", deserialize_with = "lenient_string")]
    pub id: String,
    /// Weekday labels joined by commas or free text, e.g. `星期一,星期三`.
    #[serde(default, alias = "值日时间", deserialize_with = "lenient_string")]
    pub duty_time: String,
    #[serde(default, alias = "值日任务", deserialize_with = "lenient_string")]
    pub duty_task: String,
}

/// One default-credential row for a network device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub brand: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub model: String,
    /// Device type (router, camera, …). Serialised as `type`.
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    /// May legitimately be empty.
    #[serde(default, deserialize_with = "lenient_string")]
    pub password: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
}

impl CredentialEntry {
    /// The lower-cased text every query term is matched against:
    /// `brand model type username description`, joined by single spaces.
    pub fn searchable_text(&self) -> String {
        [
            self.brand.as_str(),
            self.model.as_str(),
            self.kind.as_str(),
            self.username.as_str(),
            self.description.as_str(),
        ]
        .join(" ")
        .to_lowercase()
    }
}

/// One cell of the class timetable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(default, alias = "星期", deserialize_with = "lenient_string")]
    pub weekday: String,
    #[serde(default, alias = "节次", deserialize_with = "lenient_string")]
    pub period: String,
    #[serde(default, alias = "课程", deserialize_with = "lenient_string")]
    pub course: String,
    /// `None` when the dataset carries a parity label we do not recognise;
    /// such rows never appear in either grid.
    #[serde(default, alias = "单双周", deserialize_with = "lenient_parity")]
    pub week_parity: Option<Parity>,
}

// ---------------------------------------------------------------------------
// Closed label sets
// ---------------------------------------------------------------------------

/// Day of the week, identified by its Chinese label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

static WEEKDAY_LABELS: phf::Map<&'static str, Weekday> = phf_map! {
    "星期一" => Weekday::Monday,
    "星期二" => Weekday::Tuesday,
    "星期三" => Weekday::Wednesday,
    "星期四" => Weekday::Thursday,
    "星期五" => Weekday::Friday,
    "星期六" => Weekday::Saturday,
    "星期日" => Weekday::Sunday,
};

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The five school days shown as timetable columns.
    pub const SCHOOL_DAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Exact label match; `" 星期一"` or `"周一"` are not weekdays.
    pub fn from_label(label: &str) -> Option<Self> {
        WEEKDAY_LABELS.get(label).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "星期一",
            Weekday::Tuesday => "星期二",
            Weekday::Wednesday => "星期三",
            Weekday::Thursday => "星期四",
            Weekday::Friday => "星期五",
            Weekday::Saturday => "星期六",
            Weekday::Sunday => "星期日",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lesson slot within a school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Period {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

static PERIOD_LABELS: phf::Map<&'static str, Period> = phf_map! {
    "第一节" => Period::First,
    "第二节" => Period::Second,
    "第三节" => Period::Third,
    "第四节" => Period::Fourth,
    "第五节" => Period::Fifth,
    "第六节" => Period::Sixth,
    "第七节" => Period::Seventh,
    "第八节" => Period::Eighth,
};

impl Period {
    pub const ALL: [Period; 8] = [
        Period::First,
        Period::Second,
        Period::Third,
        Period::Fourth,
        Period::Fifth,
        Period::Sixth,
        Period::Seventh,
        Period::Eighth,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        PERIOD_LABELS.get(label).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Period::First => "第一节",
            Period::Second => "第二节",
            Period::Third => "第三节",
            Period::Fourth => "第四节",
            Period::Fifth => "第五节",
            Period::Sixth => "第六节",
            Period::Seventh => "第七节",
            Period::Eighth => "第八节",
        }
    }

    /// Zero-based row index in the timetable grid.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Odd / even instructional week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Parity {
    #[default]
    #[serde(rename = "单周")]
    Odd,
    #[serde(rename = "双周")]
    Even,
}

impl Parity {
    /// Accepts the dataset labels (`单周` / `双周`) as well as `odd` / `even`
    /// in any case.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim() {
            "单周" => Some(Parity::Odd),
            "双周" => Some(Parity::Even),
            other if other.eq_ignore_ascii_case("odd") => Some(Parity::Odd),
            other if other.eq_ignore_ascii_case("even") => Some(Parity::Even),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Parity::Odd => "单周",
            Parity::Even => "双周",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Parity::Odd => Parity::Even,
            Parity::Even => Parity::Odd,
        }
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which dataset a record, source, or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Credentials,
    Roster,
    Schedule,
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Credentials => write!(f, "credentials"),
            DatasetKind::Roster => write!(f, "roster"),
            DatasetKind::Schedule => write!(f, "schedule"),
        }
    }
}

// ---------------------------------------------------------------------------
// Lenient field readers
// ---------------------------------------------------------------------------

fn lenient_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(de)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

fn lenient_parity<'de, D>(de: D) -> Result<Option<Parity>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Parity::parse(&lenient_string(de)?))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn roster_entry_reads_chinese_keys() {
        let entry: RosterEntry = serde_json::from_str(
            r#"{"姓名":"张三","学号":20230101,"值日时间":"星期一,星期三","值日任务":"扫地"}"#,
        )
        .unwrap();
        assert_eq!(
            entry,
            RosterEntry {
                name: "张三".into(),
                id: "20230101".into(),
                duty_time: "星期一,星期三".into(),
                duty_task: "扫地".into(),
            }
        );
    }

    #[test]
    fn roster_entry_missing_fields_are_empty() {
        let entry: RosterEntry =
            serde_json::from_str(r#"{"name":"张三","duty_time":"星期一,星期三"}"#).unwrap();
        assert_eq!(entry.id, "");
        assert_eq!(entry.duty_task, "");
    }

    #[test]
    fn credential_null_password_is_empty() {
        let entry: CredentialEntry = serde_json::from_str(
            r#"{"brand":"TP-Link","model":"WR841N","type":"Router","username":"admin","password":null}"#,
        )
        .unwrap();
        assert_eq!(entry.kind, "Router");
        assert_eq!(entry.password, "");
    }

    #[test]
    fn searchable_text_excludes_password() {
        let entry = CredentialEntry {
            brand: "TP-Link".into(),
            model: "WR841N".into(),
            kind: "Router".into(),
            username: "Admin".into(),
            password: "secret".into(),
            description: "Default".into(),
        };
        assert_eq!(entry.searchable_text(), "tp-link wr841n router admin default");
    }

    #[test]
    fn schedule_entry_parity_labels() {
        let entry: ScheduleEntry = serde_json::from_str(
            r#"{"星期":"星期一","节次":"第一节","课程":"语文","单双周":"双周"}"#,
        )
        .unwrap();
        assert_eq!(entry.week_parity, Some(Parity::Even));

        let odd: ScheduleEntry =
            serde_json::from_str(r#"{"weekday":"星期二","week_parity":"ODD"}"#).unwrap();
        assert_eq!(odd.week_parity, Some(Parity::Odd));

        let unknown: ScheduleEntry =
            serde_json::from_str(r#"{"weekday":"星期二","week_parity":"每周"}"#).unwrap();
        assert_eq!(unknown.week_parity, None);
    }

    #[test]
    fn weekday_labels_are_exact() {
        assert_eq!(Weekday::from_label("星期五"), Some(Weekday::Friday));
        assert_eq!(Weekday::from_label("星期天"), None);
        assert_eq!(Weekday::from_label(" 星期五"), None);
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_label(day.label()), Some(day));
        }
    }

    #[test]
    fn period_index_matches_order() {
        for (i, period) in Period::ALL.iter().enumerate() {
            assert_eq!(period.index(), i);
            assert_eq!(Period::from_label(period.label()), Some(*period));
        }
    }

    #[test]
    fn parity_toggles() {
        assert_eq!(Parity::Odd.toggled(), Parity::Even);
        assert_eq!(Parity::Even.toggled().toggled(), Parity::Even);
    }
}
