#![allow(unused)]
//! Live filter integration harness.
//!
//! # What this covers
//!
//! - **Matching laws** (proptest): every entry gets exactly one decision;
//!   the empty (or, when trimming, blank) query shows everything; case never
//!   matters; applying the same query twice changes nothing; an entry is
//!   shown iff its lowercased key contains the normalized query. Laws run
//!   under both normalizations and over arbitrary unicode queries.
//! - **Scenarios** (rstest): the end-to-end cases a user types into the
//!   search box, run against a real [`Page`] acting as the sink.
//! - **Guards**: missing input, empty selection and a page still loading.
//! - **Profiles**: the strict and generic presets select and match
//!   different things over the same document.
//!
//! # What this does NOT cover
//!
//! - TUI rendering (see the `livefilter-tui` unit tests)
//! - CLI flags and exit codes (see headless_harness)
//!
//! # Running
//!
//! ```sh
//! cargo test --test filter_harness
//! ```

mod common;
use common::*;

use livefilter_core::{
    compute_visibility, Attach, Entry, EntryId, FilterProfile, InactiveReason, LiveFilter,
    Normalization, Page, Query, ReadyState, Visibility,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use std::collections::BTreeMap;

fn attach(page: &Page, profile: &FilterProfile) -> LiveFilter {
    match LiveFilter::attach(page, "userSearch", profile) {
        Attach::Active(filter) => filter,
        other => panic!("expected an active filter, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Matching laws
// ---------------------------------------------------------------------------

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .*?()]{0,16}"
}

/// Anything a user could paste into the search box: unicode, control
/// characters, tabs, newlines.
fn raw_query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![key_strategy(), any::<String>(), "[ \t\n]{0,4}[a-zé ]{0,4}[ \t\n]{0,4}"]
}

fn normalization_strategy() -> impl Strategy<Value = Normalization> {
    prop_oneof![Just(Normalization::Lowercase), Just(Normalization::LowercaseTrim)]
}

proptest! {
    /// One decision per entry, keyed by that entry's id, for any query.
    #[test]
    fn every_entry_gets_one_decision(
        keys in prop::collection::vec(any::<String>(), 0..24),
        raw in raw_query_strategy(),
        norm in normalization_strategy(),
    ) {
        let entries = entries(&keys);
        let decisions = compute_visibility(&Query::normalize(&raw, norm), &entries);
        prop_assert_eq!(decisions.len(), entries.len());
        for entry in &entries {
            prop_assert!(decisions.contains_key(&entry.id));
        }
    }

    /// Shown iff the lowercased key contains the normalized query.
    #[test]
    fn shown_iff_key_contains_query(
        keys in prop::collection::vec(prop_oneof![key_strategy(), any::<String>()], 1..24),
        raw in raw_query_strategy(),
        norm in normalization_strategy(),
    ) {
        let entries = entries(&keys);
        let query = Query::normalize(&raw, norm);
        let expected_query = (if norm.trims() { raw.trim() } else { raw.as_str() }).to_lowercase();
        prop_assert_eq!(query.as_str(), expected_query.as_str());

        let decisions = compute_visibility(&query, &entries);
        for entry in &entries {
            let expected = entry.search_key.to_lowercase().contains(&expected_query);
            prop_assert_eq!(
                decisions[&entry.id],
                expected,
                "key {:?} query {:?}",
                entry.search_key,
                raw
            );
        }
    }

    /// The empty query shows everything.
    #[test]
    fn empty_query_shows_all(
        keys in prop::collection::vec(any::<String>(), 0..24),
        norm in normalization_strategy(),
    ) {
        let entries = entries(&keys);
        let decisions = compute_visibility(&Query::normalize("", norm), &entries);
        prop_assert!(decisions.values().all(|shown| *shown));
    }

    /// Under trimming, a whitespace-only query is the empty query.
    #[test]
    fn blank_query_shows_all_when_trimming(
        keys in prop::collection::vec(any::<String>(), 0..24),
        raw in "[ \t\n]{0,8}",
    ) {
        let entries = entries(&keys);
        let query = Query::normalize(&raw, Normalization::LowercaseTrim);
        prop_assert!(query.is_empty());
        let decisions = compute_visibility(&query, &entries);
        prop_assert!(decisions.values().all(|shown| *shown));
    }

    /// Changing the case of the query never changes the outcome.
    ///
    /// Restricted to ASCII: full unicode case mapping is not an involution
    /// (`ß` uppercases to `SS`).
    #[test]
    fn query_case_is_irrelevant(
        keys in prop::collection::vec(key_strategy(), 0..24),
        raw in key_strategy(),
        norm in normalization_strategy(),
    ) {
        let entries = entries(&keys);
        let lower = compute_visibility(&Query::normalize(&raw.to_lowercase(), norm), &entries);
        let upper = compute_visibility(&Query::normalize(&raw.to_uppercase(), norm), &entries);
        prop_assert_eq!(lower, upper);
    }

    /// Delivering the same query twice leaves the sink as after the first.
    #[test]
    fn repeated_query_is_idempotent(
        keys in prop::collection::vec("[a-z][a-z ]{0,11}", 1..16),
        raw in raw_query_strategy(),
        norm in normalization_strategy(),
    ) {
        let mut page = Page::from_lines("userSearch", &keys);
        let profile = FilterProfile::generic().with_normalization(norm);
        let filter = attach(&page, &profile);
        filter.on_query_change(&raw, &mut page);
        let once = page.clone();
        filter.on_query_change(&raw, &mut page);
        prop_assert_eq!(page, once);
    }

    /// The filter only ever writes visibility for its own entries.
    #[test]
    fn sink_sees_only_candidate_ids(
        keys in prop::collection::vec("[a-z]{1,8}", 1..16),
        raw in raw_query_strategy(),
    ) {
        let page = Page::from_lines("userSearch", &keys);
        let filter = attach(&page, &FilterProfile::strict());
        let mut sink: BTreeMap<EntryId, Visibility> = BTreeMap::new();
        filter.on_query_change(&raw, &mut sink);
        let ids: Vec<EntryId> = filter.entries().iter().map(|e| e.id).collect();
        prop_assert_eq!(sink.keys().copied().collect::<Vec<_>>(), ids);
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

fn fruit_page() -> Page {
    PageBuilder::new()
        .input("userSearch")
        .item("Apple")
        .item("Banana")
        .item("Grape")
        .build()
}

#[rstest]
#[case::substring_in_middle("an", &["Banana"])]
#[case::case_insensitive("APP", &["Apple"])]
#[case::empty_shows_all("", &["Apple", "Banana", "Grape"])]
#[case::no_match("zzz", &[])]
#[case::shared_letter("a", &["Apple", "Banana", "Grape"])]
fn typing_filters_the_list(#[case] query: &str, #[case] expected: &[&str]) {
    let mut page = fruit_page();
    let profile = FilterProfile::generic();
    let filter = attach(&page, &profile);
    filter.on_query_change(query, &mut page);

    let shown: Vec<&str> = page
        .select(&profile.selection)
        .into_iter()
        .filter_map(|id| page.element(id))
        .filter(|e| e.display.is_shown())
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(shown, expected);
}

#[test]
fn clearing_the_query_restores_everything() {
    let mut page = fruit_page();
    let profile = FilterProfile::generic();
    let filter = attach(&page, &profile);

    filter.on_query_change("zzz", &mut page);
    assert_shown!(page, &profile.selection, []);
    filter.on_query_change("", &mut page);
    assert_all_shown!(page, &profile.selection);
}

#[test]
fn special_characters_are_literal() {
    let mut page = PageBuilder::new()
        .input("userSearch")
        .item("a.b")
        .item("axb")
        .item("(1+1)")
        .build();
    let profile = FilterProfile::generic();
    let filter = attach(&page, &profile);

    filter.on_query_change(".", &mut page);
    assert_shown!(page, &profile.selection, ["a.b"]);
    filter.on_query_change("(1+", &mut page);
    assert_shown!(page, &profile.selection, ["(1+1)"]);
}

#[rstest]
#[case::strict_trims(FilterProfile::strict(), "  friday  ", 2)]
#[case::generic_keeps_spaces(FilterProfile::generic(), "  retro  ", 0)]
#[case::generic_lowercases(FilterProfile::generic(), "RETRO", 1)]
fn normalization_follows_profile(
    #[case] profile: FilterProfile,
    #[case] query: &str,
    #[case] expected_shown: usize,
) {
    let page = Page::from_json_str(EVENTS_PAGE_JSON).unwrap();
    let filter = attach(&page, &profile);
    let shown = filter.visibility(query).values().filter(|v| **v).count();
    assert_eq!(shown, expected_shown);
}

#[test]
fn strict_and_generic_select_different_candidates() {
    let page = PageBuilder::new()
        .input("userSearch")
        .event("Retro", "retro friday")
        .item("Team Lunch")
        .element(
            livefilter_core::Element::new("div")
                .with_class("event-item")
                .with_text("Floating event")
                .with_annotation("search", "floating"),
        )
        .build();

    let strict = attach(&page, &FilterProfile::strict());
    let generic = attach(&page, &FilterProfile::generic());
    assert_eq!(strict.entries().len(), 2);
    assert_eq!(generic.entries().len(), 2);
    assert_eq!(strict.entries()[0].search_key, "retro friday");
    assert_eq!(generic.entries()[0].search_key, "Retro");
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

#[test]
fn missing_input_leaves_page_untouched() {
    let page = Page::from_json_str(NO_INPUT_PAGE_JSON).unwrap();
    let before = page.clone();
    match LiveFilter::attach(&page, "userSearch", &FilterProfile::generic()) {
        Attach::Inactive(InactiveReason::MissingInput { input_id }) => {
            assert_eq!(input_id, "userSearch")
        }
        other => panic!("expected missing input, got {other:?}"),
    }
    assert_eq!(page, before);
}

#[test]
fn empty_selection_is_inactive() {
    let page = PageBuilder::new().input("userSearch").item("Apple").build();
    assert!(matches!(
        LiveFilter::attach(&page, "userSearch", &FilterProfile::strict()),
        Attach::Inactive(InactiveReason::NoEntries)
    ));
}

#[test]
fn loading_page_attaches_once_ready() {
    let mut page = PageBuilder::new()
        .ready_state(ReadyState::Loading)
        .input("userSearch")
        .item("Apple")
        .item("Banana")
        .build();
    let profile = FilterProfile::generic();
    assert!(matches!(
        LiveFilter::attach(&page, "userSearch", &profile),
        Attach::Pending
    ));

    page.set_ready_state(ReadyState::Interactive);
    let filter = attach(&page, &profile);
    filter.on_query_change("ban", &mut page);
    assert_shown!(page, &profile.selection, ["Banana"]);
}

#[test]
fn entries_are_fixed_at_attach_time() {
    let page = fruit_page();
    let filter = attach(&page, &FilterProfile::generic());
    let ids: Vec<EntryId> = filter.entries().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![EntryId(1), EntryId(2), EntryId(3)]);
    assert_eq!(filter.input_id(), "userSearch");
}

#[test]
fn entry_keys_can_be_empty() {
    let entries = vec![Entry::new(EntryId(0), ""), Entry::new(EntryId(1), "x")];
    let decisions = compute_visibility(&Query::normalize("x", Normalization::Lowercase), &entries);
    assert_eq!(decisions[&EntryId(0)], false);
    assert_eq!(decisions[&EntryId(1)], true);
    let decisions = compute_visibility(&Query::default(), &entries);
    assert_eq!(decisions[&EntryId(0)], true);
}
