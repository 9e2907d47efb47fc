//! Grouping of credential matches by brand.
//!
//! Groups are ordered by [`collate::compare`](crate::collate::compare) on the
//! brand name with the [`BrandKey::Unknown`] sentinel always last. Entries
//! inside a group are ordered by model with the same comparator; the sort is
//! stable so equal models keep collection order.

use crate::collate;
use crate::types::CredentialEntry;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Display label of the sentinel group.
pub const UNKNOWN_BRAND: &str = "未知品牌";

/// Grouping key. Records with a missing or empty `brand` share
/// [`BrandKey::Unknown`]; a real brand spelled like the label stays distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum BrandKey {
    Named(String),
    Unknown,
}

impl BrandKey {
    pub fn of(entry: &CredentialEntry) -> Self {
        if entry.brand.is_empty() {
            BrandKey::Unknown
        } else {
            BrandKey::Named(entry.brand.clone())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BrandKey::Named(name) => name,
            BrandKey::Unknown => UNKNOWN_BRAND,
        }
    }
}

impl Ord for BrandKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (BrandKey::Named(a), BrandKey::Named(b)) => collate::compare(a, b),
            (BrandKey::Named(_), BrandKey::Unknown) => Ordering::Less,
            (BrandKey::Unknown, BrandKey::Named(_)) => Ordering::Greater,
            (BrandKey::Unknown, BrandKey::Unknown) => Ordering::Equal,
        }
    }
}

impl PartialOrd for BrandKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for BrandKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One brand bucket of matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandGroup {
    pub brand: BrandKey,
    pub entries: Vec<CredentialEntry>,
}

/// Partition matches into brand groups, sorted at both levels.
pub fn group_by_brand(matches: &[CredentialEntry]) -> Vec<BrandGroup> {
    let mut index: HashMap<BrandKey, usize> = HashMap::new();
    let mut groups: Vec<BrandGroup> = Vec::new();

    for entry in matches {
        let key = BrandKey::of(entry);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(BrandGroup { brand: key, entries: Vec::new() });
            groups.len() - 1
        });
        groups[slot].entries.push(entry.clone());
    }

    groups.sort_by(|a, b| a.brand.cmp(&b.brand));
    for group in &mut groups {
        group
            .entries
            .sort_by(|a, b| collate::compare(&a.model, &b.model));
    }
    groups
}

/// Concatenate groups back into a flat list, in display order.
pub fn flatten(groups: &[BrandGroup]) -> Vec<CredentialEntry> {
    groups.iter().flat_map(|g| g.entries.iter().cloned()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
