#![allow(unused)]
//! Credential search integration harness.
//!
//! # What this covers
//!
//! - **Multi-term AND**: every whitespace-separated term must occur in the
//!   entry's `brand model type username description`, case-insensitively.
//! - **Excluded fields**: passwords are never searched.
//! - **Grouping**: brand groups in zh-CN order with the unknown-brand group
//!   last, models in zh-CN order inside each group.
//! - **Caching**: equivalent queries are served without rescanning, and a
//!   dataset reload invalidates the cache.
//! - **Error precedence**: an unloaded dataset is reported before a blank
//!   query; zero matches is not an error.
//! - **Properties** (proptest): results are exactly the brute-force filter,
//!   grouping is consistent for any corpus, and term order never changes the
//!   result.
//!
//! # Running
//!
//! ```sh
//! cargo test --test search_harness
//! ```

mod common;
use common::*;

use lookup_core::collate::compare;
use lookup_core::{
    BrandKey, CredentialEntry, DatasetKind, LoadEvent, SearchError, Session, UNKNOWN_BRAND,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use std::cmp::Ordering;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

#[test]
fn every_term_must_match() {
    let mut session = fixture_session();
    let outcome = session.search_credentials("admin 路由器").unwrap();

    assert_eq!(outcome.results.total, 3);
    assert_eq!(brand_labels(&outcome.results.groups), vec!["TP-Link", "华为"]);
    assert_eq!(models(&outcome.results.groups), vec!["Archer C7", "WR841N", "AR1220"]);
    assert_all_terms_match!(outcome);
}

#[test]
fn model_order_inside_a_brand() {
    let mut session = loaded_session(
        vec![
            CredentialBuilder::new("TP-Link", "WR841N").kind("Router").login("admin", "admin").build(),
            CredentialBuilder::new("TP-Link", "AX1800").kind("Router").login("admin", "").build(),
        ],
        vec![],
        vec![],
    );
    let outcome = session.search_credentials("link").unwrap();
    assert_eq!(brand_labels(&outcome.results.groups), vec!["TP-Link"]);
    assert_eq!(models(&outcome.results.groups), vec!["AX1800", "WR841N"]);

    assert!(session.search_credentials("zzz").unwrap().is_empty());
}

#[rstest]
#[case::upper("CISCO", 1)]
#[case::mixed("tP-lInK", 2)]
#[case::han("华为", 2)]
#[case::description("企业", 1)]
#[case::kind("交换机", 2)]
#[case::username("root", 1)]
fn matching_ignores_case_and_spans_fields(#[case] query: &str, #[case] expected: usize) {
    let mut session = fixture_session();
    let outcome = session.search_credentials(query).unwrap();
    assert_eq!(outcome.results.total, expected, "query {query:?}");
    assert_all_terms_match!(outcome);
}

#[test]
fn passwords_are_not_searched() {
    let mut session = fixture_session();
    let outcome = session.search_credentials("Admin@huawei").unwrap();
    assert!(outcome.is_empty());
    assert_eq!(outcome.query.as_str(), "Admin@huawei");
}

#[test]
fn surrounding_whitespace_is_ignored_but_echoed_trimmed() {
    let mut session = fixture_session();
    let outcome = session.search_credentials("   zzz   ").unwrap();
    assert!(outcome.is_empty());
    assert_eq!(outcome.query.as_str(), "zzz");
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

#[test]
fn groups_follow_zh_cn_order() {
    let mut session = fixture_session();
    let outcome = session.search_credentials("admin").unwrap();
    assert_eq!(
        brand_labels(&outcome.results.groups),
        vec!["TP-Link", "海康威视", "华为"]
    );
    assert_eq!(
        models(&outcome.results.groups),
        vec!["Archer C7", "WR841N", "DS-2CD2T47", "AR1220", "S5700"]
    );
    assert_grouping_consistent!(outcome.results.groups);
}

#[test]
fn missing_and_empty_brands_share_the_unknown_group_last() {
    let mut session = fixture_session();
    let outcome = session.search_credentials("路由器").unwrap();
    let groups = &outcome.results.groups;

    assert_eq!(brand_labels(groups), vec!["TP-Link", "华为", UNKNOWN_BRAND]);
    assert_eq!(groups.last().unwrap().brand, BrandKey::Unknown);

    let cameras = session.search_credentials("摄像头").unwrap();
    assert_eq!(brand_labels(&cameras.results.groups), vec!["海康威视", UNKNOWN_BRAND]);
    assert_eq!(cameras.results.groups[1].entries[0].model, "Generic IPC");
}

#[test]
fn a_brand_spelled_like_the_sentinel_is_a_real_brand() {
    let mut session = loaded_session(
        vec![cred("", "X1"), cred(UNKNOWN_BRAND, "X2")],
        vec![],
        vec![],
    );
    let outcome = session.search_credentials("x").unwrap();
    let groups = &outcome.results.groups;
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].brand, BrandKey::Named(UNKNOWN_BRAND.to_string()));
    assert_eq!(groups[1].brand, BrandKey::Unknown);
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

#[test]
fn equivalent_queries_share_one_scan() {
    let mut session = fixture_session();
    let first = session.search_credentials("admin 路由器").unwrap();
    let second = session.search_credentials("  路由器   ADMIN admin ").unwrap();

    assert_eq!(session.scan_count(), 1);
    assert!(Arc::ptr_eq(&first.results, &second.results));
    assert_eq!(second.query.as_str(), "路由器   ADMIN admin");
    assert_eq!(session.cache().hits(), 1);
}

#[test]
fn reload_invalidates_cached_results() {
    let mut session = fixture_session();
    let before = session.search_credentials("cisco").unwrap();
    assert_eq!(before.results.total, 1);

    session.apply(LoadEvent::Credentials(Ok(vec![
        cred("Cisco", "ASA 5505"),
        cred("Cisco", "RV340"),
    ])));
    let after = session.search_credentials("cisco").unwrap();

    assert_eq!(after.results.total, 2);
    assert_eq!(session.scan_count(), 2);
}

#[test]
fn clearing_the_cache_forces_a_rescan() {
    let mut session = fixture_session();
    session.search_credentials("admin").unwrap();
    session.clear_cache();
    session.search_credentials("admin").unwrap();
    assert_eq!(session.scan_count(), 2);
    assert!(session.cache().len() == 1);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[rstest]
#[case::blank("")]
#[case::spaces("   ")]
#[case::text("admin")]
fn unloaded_dataset_is_reported_first(#[case] query: &str) {
    let mut session = Session::default();
    assert_eq!(
        session.search_credentials(query).unwrap_err(),
        SearchError::NotReady { dataset: DatasetKind::Credentials }
    );
}

#[rstest]
#[case::empty("")]
#[case::spaces("   ")]
#[case::tabs("\t\n")]
fn blank_query_on_loaded_dataset(#[case] query: &str) {
    let mut session = fixture_session();
    assert_eq!(session.search_credentials(query).unwrap_err(), SearchError::EmptyQuery);
    assert_eq!(session.scan_count(), 0);
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

fn corpus() -> impl Strategy<Value = Vec<CredentialEntry>> {
    let brand = prop::sample::select(vec!["TP-Link", "tp-link", "华为", "Cisco", "海康威视", ""]);
    let kind = prop::sample::select(vec!["路由器", "交换机", "camera"]);
    prop::collection::vec((brand, "[a-cA-C0-2]{1,3}", kind, "[a-c]{0,2}"), 0..40).prop_map(
        |rows| {
            rows.into_iter()
                .map(|(brand, model, kind, user)| {
                    CredentialBuilder::new(brand, &model).kind(kind).login(&user, "pw").build()
                })
                .collect()
        },
    )
}

fn query_terms() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-c0-2]{1,2}|路由器|tp", 1..4)
}

fn session_with(records: Vec<CredentialEntry>) -> Session {
    loaded_session(records, vec![], vec![])
}

proptest! {
    /// Results are exactly the records containing every term, no more and
    /// no fewer.
    #[test]
    fn prop_results_equal_brute_force_filter(records in corpus(), terms in query_terms()) {
        let query = terms.join(" ");
        let expected = records
            .iter()
            .filter(|r| {
                let text = r.searchable_text();
                terms.iter().all(|t| text.contains(&t.to_lowercase()))
            })
            .count();

        let mut session = session_with(records);
        let outcome = session.search_credentials(&query).unwrap();
        prop_assert_eq!(outcome.results.total, expected);
        prop_assert_eq!(
            outcome.results.groups.iter().map(|g| g.entries.len()).sum::<usize>(),
            expected
        );
        assert_all_terms_match!(outcome);
    }

    /// Groups are sorted, unique, non-empty, and models are non-decreasing
    /// within each group.
    #[test]
    fn prop_grouping_is_consistent(records in corpus(), terms in query_terms()) {
        let mut session = session_with(records);
        let outcome = session.search_credentials(&terms.join(" ")).unwrap();
        assert_grouping_consistent!(outcome.results.groups);
        for group in &outcome.results.groups {
            for pair in group.entries.windows(2) {
                prop_assert_ne!(compare(&pair[0].model, &pair[1].model), Ordering::Greater);
            }
        }
    }

    /// Term order and repetition never change the result.
    #[test]
    fn prop_term_order_is_irrelevant(records in corpus(), terms in query_terms()) {
        let mut session = session_with(records);
        let forward = session.search_credentials(&terms.join(" ")).unwrap();

        let mut reversed = terms.clone();
        reversed.reverse();
        reversed.push(terms[0].clone());
        let backward = session.search_credentials(&reversed.join(" ")).unwrap();

        prop_assert_eq!(&*forward.results, &*backward.results);
        prop_assert_eq!(session.scan_count(), 1);
    }
}
