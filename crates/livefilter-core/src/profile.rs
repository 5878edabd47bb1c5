//! Filter profiles: the three policies that distinguish one deployment of
//! the live filter from another.
//!
//! | Policy | Variants |
//! |--------|----------|
//! | selection | [`SelectionPolicy::Generic`] (`ul > li`), [`SelectionPolicy::Marker`] (`.event-item`) |
//! | search key | [`KeyPolicy::RenderedText`], [`KeyPolicy::Annotation`] (`data-search`) |
//! | normalization | [`Normalization::Lowercase`], [`Normalization::LowercaseTrim`] |
//!
//! [`FilterProfile::strict`] is the default: marker selection, annotation
//! keys, and a trimmed query.

use crate::{error::ProfileError, page::Element};

pub const DEFAULT_CONTAINER: &str = "ul";
pub const DEFAULT_CHILD: &str = "li";
pub const DEFAULT_MARKER_CLASS: &str = "event-item";
pub const DEFAULT_ANNOTATION: &str = "search";

// ---------------------------------------------------------------------------
// Policies
// ---------------------------------------------------------------------------

/// Which elements of a page are candidates for filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Every `child` element whose parent is a `container` element.
    Generic { container: String, child: String },
    /// Every element carrying the marker class.
    Marker { class: String },
}

impl SelectionPolicy {
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            SelectionPolicy::Generic { container, child } => {
                element.tag.eq_ignore_ascii_case(child)
                    && element
                        .parent
                        .as_deref()
                        .is_some_and(|p| p.eq_ignore_ascii_case(container))
            }
            SelectionPolicy::Marker { class } => element.has_class(class),
        }
    }
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionPolicy::Generic { container, child } => write!(f, "{container} {child}"),
            SelectionPolicy::Marker { class } => write!(f, ".{class}"),
        }
    }
}

/// Where an entry's search key comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPolicy {
    /// The element's rendered text.
    RenderedText,
    /// A precomputed annotation attached at render time. Missing annotations
    /// yield the empty key.
    Annotation { name: String },
}

impl KeyPolicy {
    /// Derive the (not yet lowercased) search key of `element`.
    pub fn derive<'a>(&self, element: &'a Element) -> &'a str {
        match self {
            KeyPolicy::RenderedText => element.text.as_str(),
            KeyPolicy::Annotation { name } => element.annotation(name).unwrap_or(""),
        }
    }
}

/// How the raw query is normalized before matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Normalization {
    Lowercase,
    #[default]
    LowercaseTrim,
}

impl Normalization {
    pub fn apply(self, raw: &str) -> String {
        match self {
            Normalization::Lowercase => raw.to_lowercase(),
            Normalization::LowercaseTrim => raw.trim().to_lowercase(),
        }
    }

    pub fn trims(self) -> bool {
        matches!(self, Normalization::LowercaseTrim)
    }
}

// ---------------------------------------------------------------------------
// FilterProfile
// ---------------------------------------------------------------------------

/// One configuration of the live filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterProfile {
    pub selection: SelectionPolicy,
    pub key: KeyPolicy,
    pub normalization: Normalization,
}

impl Default for FilterProfile {
    fn default() -> Self {
        Self::strict()
    }
}

impl FilterProfile {
    /// Marker-selected entries, annotation keys, trimmed query.
    pub fn strict() -> Self {
        Self {
            selection: SelectionPolicy::Marker {
                class: DEFAULT_MARKER_CLASS.to_string(),
            },
            key: KeyPolicy::Annotation {
                name: DEFAULT_ANNOTATION.to_string(),
            },
            normalization: Normalization::LowercaseTrim,
        }
    }

    /// Every `ul > li`, matched on rendered text, query lowercased only.
    pub fn generic() -> Self {
        Self {
            selection: SelectionPolicy::Generic {
                container: DEFAULT_CONTAINER.to_string(),
                child: DEFAULT_CHILD.to_string(),
            },
            key: KeyPolicy::RenderedText,
            normalization: Normalization::Lowercase,
        }
    }

    /// Resolve a preset by name (`strict` or `generic`, case-insensitive).
    pub fn preset(name: &str) -> Result<Self, ProfileError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::strict()),
            "generic" => Ok(Self::generic()),
            _ => Err(ProfileError::UnknownPreset(name.to_string())),
        }
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Short human-readable label, e.g. `.event-item @search trim`.
    pub fn label(&self) -> String {
        let key = match &self.key {
            KeyPolicy::RenderedText => "text".to_string(),
            KeyPolicy::Annotation { name } => format!("@{name}"),
        };
        let norm = if self.normalization.trims() { " trim" } else { "" };
        format!("{} {}{}", self.selection, key, norm)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
