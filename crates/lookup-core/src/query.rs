//! Query normalisation.
//!
//! Raw input is validated once, here, and turned into a typed query. Callers
//! never re-inspect the raw string to decide how to search.

use crate::error::QueryError;
use crate::types::Weekday;

/// A trimmed, non-empty query as typed by the user. Used for echoing back in
/// "nothing found" messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryText(String);

impl QueryText {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueryText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Credential terms
// ---------------------------------------------------------------------------

/// Lower-cased, whitespace-separated terms of a credential query. A record
/// matches only if it contains every term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terms {
    text: QueryText,
    terms: Vec<String>,
}

impl Terms {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let text = QueryText::parse(raw)?;
        let terms = text
            .as_str()
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Ok(Self { text, terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn text(&self) -> &QueryText {
        &self.text
    }

    /// Memoisation key. Matching is order- and repetition-insensitive, so the
    /// key is the sorted, de-duplicated term list: `"b a a"` and `"a b"` share
    /// one cache slot.
    pub fn cache_key(&self) -> String {
        let mut terms: Vec<&str> = self.terms.iter().map(String::as_str).collect();
        terms.sort_unstable();
        terms.dedup();
        terms.join(" ")
    }

    /// True when `haystack` (already lower-cased) contains every term.
    pub fn matches(&self, haystack: &str) -> bool {
        self.terms.iter().all(|term| haystack.contains(term.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Roster query
// ---------------------------------------------------------------------------

/// The two roster lookup modes, decided once from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterQuery {
    /// Exact match on the student's name.
    Name(QueryText),
    /// Every student on duty that day.
    Weekday(Weekday),
}

impl RosterQuery {
    /// The trimmed input selects weekday mode only when it is literally one of
    /// the seven weekday labels.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let text = QueryText::parse(raw)?;
        Ok(match Weekday::from_label(text.as_str()) {
            Some(day) => RosterQuery::Weekday(day),
            None => RosterQuery::Name(text),
        })
    }

    /// The query as the user typed it (trimmed).
    pub fn echo(&self) -> &str {
        match self {
            RosterQuery::Name(text) => text.as_str(),
            RosterQuery::Weekday(day) => day.label(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    #[case("\u{3000}")]
    fn blank_input_is_empty(#[case] raw: &str) {
        assert_eq!(QueryText::parse(raw), Err(QueryError::Empty));
        assert_eq!(Terms::parse(raw), Err(QueryError::Empty));
        assert_eq!(RosterQuery::parse(raw), Err(QueryError::Empty));
    }

    #[test]
    fn terms_are_lowercased_and_split() {
        let terms = Terms::parse("  TP-Link   WR841N ").unwrap();
        assert_eq!(terms.terms(), ["tp-link", "wr841n"]);
        assert_eq!(terms.text().as_str(), "TP-Link   WR841N");
    }

    #[test]
    fn cache_key_ignores_order_and_repeats() {
        let a = Terms::parse("b a").unwrap();
        let b = Terms::parse("A  B a").unwrap();
        assert_eq!(a.cache_key(), "a b");
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn matches_is_conjunctive() {
        let terms = Terms::parse("tp wr").unwrap();
        assert!(terms.matches("tp-link wr841n router"));
        assert!(!terms.matches("tp-link ax1800 router"));
    }

    #[rstest]
    #[case("星期一", RosterQuery::Weekday(Weekday::Monday))]
    #[case(" 星期日 ", RosterQuery::Weekday(Weekday::Sunday))]
    #[case("张三", RosterQuery::Name(QueryText::parse("张三").unwrap()))]
    #[case("星期", RosterQuery::Name(QueryText::parse("星期").unwrap()))]
    #[case("星期一,星期二", RosterQuery::Name(QueryText::parse("星期一,星期二").unwrap()))]
    fn roster_mode_selection(#[case] raw: &str, #[case] expected: RosterQuery) {
        assert_eq!(RosterQuery::parse(raw).unwrap(), expected);
    }
}
