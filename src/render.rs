//! Plain-text and JSON rendering of one-shot reports.

use crate::oneshot::Report;
use lookup_core::notice::{
    credential_detail, credential_summary, display_width, roster_duty_tag, roster_fields, Notice,
};
use lookup_core::query::RosterQuery;
use lookup_core::schedule::ScheduleGrid;
use lookup_core::{BrandKey, CredentialOutcome, RosterOutcome, Weekday};
use serde_json::{json, Value};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn render(report: &Report, format: Format) -> String {
    match format {
        Format::Text => text(report),
        Format::Json => {
            // Serialising a `Value` cannot fail.
            serde_json::to_string_pretty(&to_json(report)).unwrap_or_default() + "\n"
        }
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

pub fn text(report: &Report) -> String {
    match report {
        Report::Credentials(outcome) => credentials_text(outcome),
        Report::Roster(outcome) => roster_text(outcome),
        Report::Schedule(grid) => schedule_text(grid),
        Report::Notice(notice) => format!("{}\n{}\n", notice.title(), notice.body()),
    }
}

fn credentials_text(outcome: &CredentialOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} result(s) for \"{}\"", outcome.results.total, outcome.query);
    for group in &outcome.results.groups {
        let _ = writeln!(out, "\n{} ({})", group.brand, group.entries.len());
        for entry in &group.entries {
            let _ = writeln!(out, "  {}", credential_summary(entry));
            let _ = writeln!(out, "    {}", credential_detail(entry));
        }
    }
    out
}

fn roster_text(outcome: &RosterOutcome) -> String {
    let mut out = String::new();
    match &outcome.query {
        RosterQuery::Name(_) => {
            for (i, entry) in outcome.matches.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                for (label, value) in roster_fields(entry) {
                    let _ = writeln!(out, "{label}: {value}");
                }
            }
        }
        RosterQuery::Weekday(day) => {
            let _ = writeln!(out, "{day}值日学生 ({})", outcome.matches.len());
            for entry in &outcome.matches {
                let _ = writeln!(out, "  {}", roster_duty_tag(entry));
            }
        }
    }
    out
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(cell));
    format!("{cell}{}", " ".repeat(fill))
}

fn schedule_text(grid: &ScheduleGrid) -> String {
    let header: Vec<&str> = std::iter::once("节次")
        .chain(Weekday::SCHOOL_DAYS.iter().map(|d| d.label()))
        .collect();
    let rows: Vec<Vec<&str>> = grid
        .rows()
        .map(|(period, cells)| std::iter::once(period.label()).chain(cells).collect())
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(&rows)
                .map(|row| display_width(row[col]))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "课程表 ({})", grid.parity());
    for row in std::iter::once(&header).chain(&rows) {
        let line: Vec<String> = row.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

pub fn to_json(report: &Report) -> Value {
    match report {
        Report::Credentials(outcome) => json!({
            "query": outcome.query.as_str(),
            "total": outcome.results.total,
            "groups": outcome.results.groups.iter().map(|g| json!({
                "brand": g.brand.label(),
                "unknown_brand": g.brand == BrandKey::Unknown,
                "entries": g.entries,
            })).collect::<Vec<_>>(),
        }),
        Report::Roster(outcome) => json!({
            "query": outcome.query.echo(),
            "mode": match outcome.query {
                RosterQuery::Name(_) => "name",
                RosterQuery::Weekday(_) => "weekday",
            },
            "matches": outcome.matches,
        }),
        Report::Schedule(grid) => json!({
            "parity": grid.parity(),
            "days": Weekday::SCHOOL_DAYS.iter().map(|d| d.label()).collect::<Vec<_>>(),
            "rows": grid.rows().map(|(period, cells)| json!({
                "period": period.label(),
                "courses": cells,
            })).collect::<Vec<_>>(),
        }),
        Report::Notice(notice) => json!({
            "notice": notice_kind(notice),
            "title": notice.title(),
            "message": notice.body(),
        }),
    }
}

fn notice_kind(notice: &Notice) -> &'static str {
    match notice {
        Notice::Welcome(_) => "welcome",
        Notice::EmptyQuery(_) => "empty_query",
        Notice::Loading(_) | Notice::LoadFailed { .. } | Notice::NoData(_) => "load_failed",
        Notice::NoCredentials { .. } | Notice::NoStudent { .. } | Notice::NoDuty { .. } => {
            "no_matches"
        }
    }
}
