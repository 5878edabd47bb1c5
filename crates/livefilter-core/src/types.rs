//! Core types for livefilter-core.
//!
//! This module defines the small vocabulary shared by every layer: the
//! [`EntryId`] that names a candidate element, the two-state [`Visibility`]
//! toggle, and the [`Entry`] pair the filter matches against.

use serde::{Deserialize, Serialize};

/// Stable identity of an element within a [`Page`](crate::page::Page).
///
/// This is the element's index in document order. Elements are never
/// created, removed, or reordered while a filter is attached, so the index
/// stays valid for the page's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub usize);

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Presentation toggle of an element. There is no third state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Shown,
    Hidden,
}

impl Visibility {
    pub fn is_shown(self) -> bool {
        matches!(self, Visibility::Shown)
    }
}

impl From<bool> for Visibility {
    fn from(shown: bool) -> Self {
        if shown {
            Visibility::Shown
        } else {
            Visibility::Hidden
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Shown => write!(f, "shown"),
            Visibility::Hidden => write!(f, "hidden"),
        }
    }
}

/// One candidate entry as seen by the filter: its identity plus the search
/// key derived from the element under the active
/// [`KeyPolicy`](crate::profile::KeyPolicy).
///
/// `search_key` is stored as derived; lowercasing happens at match time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub search_key: String,
}

impl Entry {
    pub fn new(id: EntryId, search_key: impl Into<String>) -> Self {
        Self {
            id,
            search_key: search_key.into(),
        }
    }
}
