//! Domain-specific assertion macros for lookup harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that say which
//! result invariant was violated.

/// Assert that every entry of a credential outcome contains every term of
/// the query in its searchable text.
#[macro_export]
macro_rules! assert_all_terms_match {
    ($outcome:expr) => {{
        let outcome: &lookup_core::CredentialOutcome = &$outcome;
        let terms = lookup_core::query::Terms::parse(outcome.query.as_str())
            .expect("outcome query is never blank");
        for group in &outcome.results.groups {
            for entry in &group.entries {
                let text = entry.searchable_text();
                for term in terms.terms() {
                    if !text.contains(term.as_str()) {
                        panic!(
                            "assert_all_terms_match! failed:\n  term {:?} missing from {:?}\n  entry: {:?}",
                            term, text, entry
                        );
                    }
                }
            }
        }
    }};
}

/// Assert that groups are in collation order with the unknown-brand group
/// last, and that each group only holds entries of its own brand.
#[macro_export]
macro_rules! assert_grouping_consistent {
    ($groups:expr) => {{
        let groups: &[lookup_core::BrandGroup] = &$groups;
        for pair in groups.windows(2) {
            if pair[0].brand >= pair[1].brand {
                panic!(
                    "assert_grouping_consistent! failed: group {:?} sorted before {:?}",
                    pair[0].brand, pair[1].brand
                );
            }
        }
        for group in groups {
            if group.entries.is_empty() {
                panic!("assert_grouping_consistent! failed: empty group {:?}", group.brand);
            }
            for entry in &group.entries {
                let key = lookup_core::BrandKey::of(entry);
                if key != group.brand {
                    panic!(
                        "assert_grouping_consistent! failed: {:?} filed under {:?}",
                        entry, group.brand
                    );
                }
            }
        }
    }};
}

/// Brand labels of a group list, in display order.
pub fn brand_labels(groups: &[lookup_core::BrandGroup]) -> Vec<String> {
    groups.iter().map(|g| g.brand.label().to_string()).collect()
}

/// Models of a group list, flattened in display order.
pub fn models(groups: &[lookup_core::BrandGroup]) -> Vec<String> {
    groups
        .iter()
        .flat_map(|g| g.entries.iter().map(|e| e.model.clone()))
        .collect()
}
