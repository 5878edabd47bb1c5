//! Canned page documents shared across harnesses.

/// Event listing carrying both selection markers and search annotations.
pub const EVENTS_PAGE_JSON: &str = r#"{
  "ready_state": "complete",
  "elements": [
    { "tag": "h1", "text": "Upcoming events" },
    { "tag": "input", "id": "userSearch" },
    { "tag": "li", "parent": "ul", "classes": ["event-item"],
      "text": "Daily Standup", "data": { "search": "daily standup 09:00" } },
    { "tag": "li", "parent": "ul", "classes": ["event-item"],
      "text": "Sprint Review", "data": { "search": "sprint review friday" } },
    { "tag": "li", "parent": "ul", "classes": ["event-item"],
      "text": "Retro", "data": { "search": "retro friday" } },
    { "tag": "li", "parent": "ol", "text": "Unrelated ordered item" }
  ]
}"#;

/// A page without any search input.
pub const NO_INPUT_PAGE_JSON: &str = r#"{
  "elements": [
    { "tag": "li", "parent": "ul", "text": "Apple" },
    { "tag": "li", "parent": "ul", "text": "Banana" }
  ]
}"#;

/// A page still loading when first observed.
pub const LOADING_PAGE_JSON: &str = r#"{
  "ready_state": "loading",
  "elements": [
    { "tag": "input", "id": "userSearch" },
    { "tag": "li", "parent": "ul", "text": "Apple" },
    { "tag": "li", "parent": "ul", "text": "Banana" }
  ]
}"#;

/// Fruit names, one per line, as fed to the text source.
pub const FRUIT_LINES: &str = "Apple\nBanana\n\nGrape\nPineapple\n";
