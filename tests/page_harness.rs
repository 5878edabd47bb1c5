#![allow(unused)]
//! Page model integration harness.
//!
//! # What this covers
//!
//! - **JSON documents**: parsing, defaults for omitted fields, rejection of
//!   malformed documents and duplicate element ids, loading from disk.
//! - **Text sources**: one list item per non-blank line.
//! - **Selection**: candidate order always follows page order, and elements
//!   outside the selection are never touched by the filter.
//!
//! # Running
//!
//! ```sh
//! cargo test --test page_harness
//! ```

mod common;
use common::*;

use livefilter_core::{
    Attach, EntryId, FilterProfile, LiveFilter, Page, PageError, ReadyState, Visibility,
};
use pretty_assertions::assert_eq;
use std::io::Write;

// ---------------------------------------------------------------------------
// JSON documents
// ---------------------------------------------------------------------------

#[test]
fn json_page_parses_with_defaults() {
    let page = Page::from_json_str(EVENTS_PAGE_JSON).unwrap();
    assert_eq!(page.ready_state(), ReadyState::Complete);
    assert_eq!(page.elements().len(), 6);

    let retro = page.element(EntryId(4)).unwrap();
    assert_eq!(retro.text, "Retro");
    assert_eq!(retro.annotation("search"), Some("retro friday"));
    assert_eq!(retro.display, Visibility::Shown);
    assert!(retro.has_class("event-item"));
}

#[test]
fn omitted_ready_state_means_complete() {
    let page = Page::from_json_str(NO_INPUT_PAGE_JSON).unwrap();
    assert!(page.ready_state().is_ready());
}

#[test]
fn loading_state_survives_parsing() {
    let page = Page::from_json_str(LOADING_PAGE_JSON).unwrap();
    assert_eq!(page.ready_state(), ReadyState::Loading);
    assert!(matches!(
        LiveFilter::attach(&page, "userSearch", &FilterProfile::generic()),
        Attach::Pending
    ));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = Page::from_json_str("{ \"elements\": [ { \"text\": \"no tag\" } ] }").unwrap_err();
    assert!(matches!(err, PageError::Parse(_)), "got {err:?}");
}

#[test]
fn duplicate_ids_are_rejected() {
    let src = r#"{ "elements": [
        { "tag": "input", "id": "userSearch" },
        { "tag": "input", "id": "userSearch" }
    ] }"#;
    match Page::from_json_str(src) {
        Err(PageError::DuplicateId(id)) => assert_eq!(id, "userSearch"),
        other => panic!("expected duplicate id error, got {other:?}"),
    }
}

#[test]
fn load_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{EVENTS_PAGE_JSON}").unwrap();
    let page = Page::load(file.path()).unwrap();
    assert!(page.element_by_id("userSearch").is_some());
}

#[test]
fn load_reports_the_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Page::load(&path).unwrap_err();
    assert!(matches!(err, PageError::Io { .. }));
    assert!(err.to_string().contains("absent.json"), "{err}");
}

// ---------------------------------------------------------------------------
// Text sources
// ---------------------------------------------------------------------------

#[test]
fn text_lines_render_an_input_and_items() {
    let page = Page::from_lines("userSearch", FRUIT_LINES.lines());
    assert!(page.element_by_id("userSearch").is_some());
    let texts: Vec<&str> = page
        .select(&FilterProfile::generic().selection)
        .into_iter()
        .filter_map(|id| page.element(id))
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(texts, vec!["Apple", "Banana", "Grape", "Pineapple"]);
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[test]
fn non_candidates_are_never_touched() {
    let mut page = Page::from_json_str(EVENTS_PAGE_JSON).unwrap();
    let profile = FilterProfile::generic();
    let filter = LiveFilter::attach(&page, "userSearch", &profile)
        .into_active()
        .unwrap();

    filter.on_query_change("zzz", &mut page);
    // The ordered-list item and the heading sit outside the selection.
    assert_eq!(page.display(EntryId(0)), Some(Visibility::Shown));
    assert_eq!(page.display(EntryId(5)), Some(Visibility::Shown));
    assert_shown!(page, &profile.selection, []);
}

#[test]
fn candidates_follow_page_order() {
    let page = PageBuilder::new()
        .item("c")
        .input("userSearch")
        .item("a")
        .item("b")
        .build();
    let ids = page.select(&FilterProfile::generic().selection);
    assert_eq!(ids, vec![EntryId(0), EntryId(2), EntryId(3)]);
}

#[test]
fn hidden_on_load_entries_are_shown_by_empty_query() {
    let mut page = PageBuilder::new()
        .input("userSearch")
        .element(
            livefilter_core::Element::new("li")
                .with_parent("ul")
                .with_text("Archived")
                .with_display(Visibility::Hidden),
        )
        .build();
    let profile = FilterProfile::generic();
    let filter = LiveFilter::attach(&page, "userSearch", &profile)
        .into_active()
        .unwrap();
    filter.on_query_change("", &mut page);
    assert_all_shown!(page, &profile.selection);
}
