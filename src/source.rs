//! Where the page the filter runs over comes from.

use anyhow::Context;
use livefilter_core::{
    profile::{DEFAULT_ANNOTATION, DEFAULT_MARKER_CLASS},
    Element, Page, ReadyState,
};
use std::{io::Read, path::Path};

/// Resolve the `PAGE` argument into a loaded [`Page`].
///
/// - absent → [`demo_page`]
/// - `-` → plain text lines from stdin
/// - `*.json` → a page document
/// - anything else → plain text lines from the file
///
/// Text sources render a search box with id `input_id` above one list item
/// per non-blank line.
pub fn load_page(source: Option<&Path>, input_id: &str) -> anyhow::Result<Page> {
    let Some(path) = source else {
        tracing::debug!("no page given, using demo page");
        return Ok(demo_page(input_id));
    };

    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read entries from stdin")?;
        return Ok(Page::from_lines(input_id, text.lines()));
    }

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        return Page::load(path).with_context(|| format!("failed to load page {}", path.display()));
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read entries from {}", path.display()))?;
    Ok(Page::from_lines(input_id, text.lines()))
}

/// A small events page rendered with both selection markers and search
/// annotations, so either profile has something to filter.
pub fn demo_page(input_id: &str) -> Page {
    // (category, title, search annotation)
    const EVENTS: &[(&str, &str, &str)] = &[
        ("meeting", "Daily Standup", "daily standup 09:00 team room"),
        ("meeting", "Sprint Review", "sprint review demo stakeholders friday"),
        ("ritual", "Retro", "retro retrospective friday"),
        ("planning", "Q1 Planning", "q1 planning roadmap okr"),
        ("planning", "Capacity Check", "capacity planning headcount"),
        ("social", "Team Lunch", "team lunch thursday pizza"),
        ("social", "Board Game Night", "board games evening"),
        ("review", "Design Review: Search Box", "design review search ux"),
        ("review", "Security Review", "security review threat model"),
        ("ritual", "Demo Day", "demo day showcase"),
        ("meeting", "1:1 with Manager", "one on one 1:1 career"),
        ("meeting", "All Hands", "all hands company update"),
    ];

    let mut elements = vec![
        Element::new("h1").with_text("Upcoming events"),
        Element::new("input").with_id(input_id),
    ];
    elements.extend(EVENTS.iter().map(|(category, title, search)| {
        Element::new("li")
            .with_parent("ul")
            .with_class(DEFAULT_MARKER_CLASS)
            .with_class(*category)
            .with_text(*title)
            .with_annotation(DEFAULT_ANNOTATION, *search)
    }));

    Page::new(ReadyState::Complete, elements).expect("demo page has a single input id")
}
