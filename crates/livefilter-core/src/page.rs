//! Page model: the document the live filter observes and mutates.
//!
//! A [`Page`] is an ordered list of [`Element`]s plus a [`ReadyState`]. The
//! filter never adds, removes, or reorders elements; the only thing it
//! writes is each element's `display` toggle.
//!
//! # Document format
//!
//! ```json
//! {
//!   "ready_state": "complete",
//!   "elements": [
//!     { "tag": "input", "id": "userSearch" },
//!     { "tag": "li", "parent": "ul", "classes": ["event-item"],
//!       "text": "Daily Standup", "data": { "search": "daily standup 09:00" } }
//!   ]
//! }
//! ```
//!
//! Every field except `tag` is optional. `ready_state` defaults to
//! `complete`; `display` defaults to `shown`.

use crate::{
    error::PageError,
    filter::VisibilitySink,
    profile::{
        SelectionPolicy, DEFAULT_ANNOTATION, DEFAULT_CHILD, DEFAULT_CONTAINER, DEFAULT_MARKER_CLASS,
    },
    types::{EntryId, Visibility},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// One node of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tag: String,
    /// Tag of the enclosing container, e.g. `ul` for a list item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Rendered text content.
    #[serde(default)]
    pub text: String,
    /// Annotations attached at render time (`data-*` attributes, without the
    /// `data-` prefix).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
    #[serde(default)]
    pub display: Visibility,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            id: None,
            tag: tag.into(),
            parent: None,
            classes: Vec::new(),
            text: String::new(),
            data: BTreeMap::new(),
            display: Visibility::Shown,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_annotation(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    pub fn with_display(mut self, display: Visibility) -> Self {
        self.display = display;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn annotation(&self, name: &str) -> Option<&str> {
        self.data.get(name).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// ReadyState
// ---------------------------------------------------------------------------

/// Loading progress of the document structure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadyState {
    Loading,
    Interactive,
    #[default]
    Complete,
}

impl ReadyState {
    /// Whether the element structure is fully parsed and can be queried.
    pub fn is_ready(self) -> bool {
        !matches!(self, ReadyState::Loading)
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    ready_state: ReadyState,
    #[serde(default)]
    elements: Vec<Element>,
}

/// An ordered, fixed collection of elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    ready_state: ReadyState,
    elements: Vec<Element>,
}

impl Page {
    /// Build a page from elements, rejecting duplicate element ids.
    pub fn new(ready_state: ReadyState, elements: Vec<Element>) -> Result<Self, PageError> {
        let mut seen = std::collections::HashSet::new();
        for id in elements.iter().filter_map(|e| e.id.as_deref()) {
            if !seen.insert(id) {
                return Err(PageError::DuplicateId(id.to_string()));
            }
        }
        Ok(Self {
            ready_state,
            elements,
        })
    }

    /// Parse a JSON page document.
    pub fn from_json_str(src: &str) -> Result<Self, PageError> {
        let raw: RawPage = serde_json::from_str(src)?;
        Self::new(raw.ready_state, raw.elements)
    }

    /// Read and parse a JSON page document from disk.
    pub fn load(path: &Path) -> Result<Self, PageError> {
        let src = std::fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&src)
    }

    /// Render plain text lines as a search box over a `ul` list.
    ///
    /// Each non-blank line becomes an `li` carrying the [`DEFAULT_MARKER_CLASS`]
    /// and the line as its [`DEFAULT_ANNOTATION`], so either profile selects
    /// and matches it.
    pub fn from_lines<I, S>(input_id: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut elements = vec![Element::new("input").with_id(input_id)];
        elements.extend(
            lines
                .into_iter()
                .filter(|l| !l.as_ref().trim().is_empty())
                .map(|l| {
                    let line = l.as_ref().trim_end();
                    Element::new(DEFAULT_CHILD)
                        .with_parent(DEFAULT_CONTAINER)
                        .with_class(DEFAULT_MARKER_CLASS)
                        .with_text(line)
                        .with_annotation(DEFAULT_ANNOTATION, line)
                }),
        );
        Self {
            ready_state: ReadyState::Complete,
            elements,
        }
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn set_ready_state(&mut self, state: ReadyState) {
        tracing::debug!(from = ?self.ready_state, to = ?state, "page: ready state");
        self.ready_state = state;
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, id: EntryId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id.as_deref() == Some(id))
    }

    /// Ids of every element matching `policy`, in document order.
    pub fn select(&self, policy: &SelectionPolicy) -> Vec<EntryId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| policy.matches(e))
            .map(|(i, _)| EntryId(i))
            .collect()
    }

    pub fn display(&self, id: EntryId) -> Option<Visibility> {
        self.element(id).map(|e| e.display)
    }
}

impl VisibilitySink for Page {
    fn set_visibility(&mut self, id: EntryId, visibility: Visibility) {
        if let Some(element) = self.elements.get_mut(id.0) {
            element.display = visibility;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
