//! Test builders: ergonomic constructors for pages and entry sets.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use livefilter_core::{Element, Entry, EntryId, Page, ReadyState};

// ---------------------------------------------------------------------------
// PageBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Page`] test fixtures.
///
/// # Example
///
/// ```rust
/// let page = PageBuilder::new()
///     .input("userSearch")
///     .event("Retro", "retro friday")
///     .item("Team Lunch")
///     .build();
/// ```
pub struct PageBuilder {
    ready_state: ReadyState,
    elements: Vec<Element>,
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            ready_state: ReadyState::Complete,
            elements: Vec::new(),
        }
    }

    pub fn ready_state(mut self, state: ReadyState) -> Self {
        self.ready_state = state;
        self
    }

    /// A search input with element id `id`.
    pub fn input(mut self, id: &str) -> Self {
        self.elements.push(Element::new("input").with_id(id));
        self
    }

    /// A plain `ul > li` with rendered text only.
    pub fn item(mut self, text: &str) -> Self {
        self.elements
            .push(Element::new("li").with_parent("ul").with_text(text));
        self
    }

    /// A marked `ul > li` carrying a search annotation.
    pub fn event(mut self, text: &str, search: &str) -> Self {
        self.elements.push(
            Element::new("li")
                .with_parent("ul")
                .with_class("event-item")
                .with_text(text)
                .with_annotation("search", search),
        );
        self
    }

    /// Any other element.
    pub fn element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn build(self) -> Page {
        Page::new(self.ready_state, self.elements).expect("PageBuilder: duplicate element id")
    }
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Entries numbered from zero in the order given.
pub fn entries<S: AsRef<str>>(keys: &[S]) -> Vec<Entry> {
    keys.iter()
        .enumerate()
        .map(|(i, key)| Entry::new(EntryId(i), key.as_ref()))
        .collect()
}
