//! The live filter: substring visibility over a fixed set of entries.
//!
//! The decision logic is the pure [`compute_visibility`]. [`LiveFilter`] is
//! the thin adapter around it: it is attached once to a [`Page`], then every
//! input-change notification is routed to [`LiveFilter::on_query_change`],
//! which writes one [`Visibility`] per entry into a [`VisibilitySink`].
//!
//! Matching is a literal, case-insensitive substring test. The empty query
//! matches every entry.

use crate::{
    page::Page,
    profile::{FilterProfile, Normalization},
    types::{Entry, EntryId, Visibility},
};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A normalized query, ready for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn normalize(raw: &str, normalization: Normalization) -> Self {
        Self(normalization.apply(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `search_key` (any case) contains this query.
    pub fn matches(&self, search_key: &str) -> bool {
        self.0.is_empty() || search_key.to_lowercase().contains(self.0.as_str())
    }
}

/// Decide, for every entry, whether it is shown under `query`.
///
/// Entries are independent of one another; the result is keyed by id.
pub fn compute_visibility(query: &Query, entries: &[Entry]) -> BTreeMap<EntryId, bool> {
    entries
        .iter()
        .map(|entry| (entry.id, query.matches(&entry.search_key)))
        .collect()
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Receiver of visibility decisions, i.e. the presentation layer.
pub trait VisibilitySink {
    fn set_visibility(&mut self, id: EntryId, visibility: Visibility);
}

/// Recording sink; the last decision per entry wins.
impl VisibilitySink for BTreeMap<EntryId, Visibility> {
    fn set_visibility(&mut self, id: EntryId, visibility: Visibility) {
        self.insert(id, visibility);
    }
}

// ---------------------------------------------------------------------------
// LiveFilter
// ---------------------------------------------------------------------------

/// Why [`LiveFilter::attach`] declined to activate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InactiveReason {
    /// No element carries the configured input id.
    MissingInput { input_id: String },
    /// The selection policy matched nothing.
    NoEntries,
}

impl std::fmt::Display for InactiveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InactiveReason::MissingInput { input_id } => write!(f, "no input #{input_id}"),
            InactiveReason::NoEntries => write!(f, "no entries"),
        }
    }
}

/// Outcome of [`LiveFilter::attach`].
#[derive(Debug, Clone)]
pub enum Attach {
    /// The filter is subscribed and will react to query changes.
    Active(LiveFilter),
    /// The page is still loading; attach again once it is ready.
    Pending,
    /// The page lacks the input or the entries; nothing will happen.
    Inactive(InactiveReason),
}

impl Attach {
    pub fn into_active(self) -> Option<LiveFilter> {
        match self {
            Attach::Active(filter) => Some(filter),
            Attach::Pending | Attach::Inactive(_) => None,
        }
    }
}

/// A filter attached to one page's input and entries.
#[derive(Debug, Clone)]
pub struct LiveFilter {
    input_id: String,
    profile: FilterProfile,
    entries: Vec<Entry>,
}

impl LiveFilter {
    /// Locate the input `input_id` and the candidate entries of `page`.
    ///
    /// Missing input or an empty candidate set is not an error: the filter
    /// stays [`Attach::Inactive`] and the page is left untouched.
    pub fn attach(page: &Page, input_id: &str, profile: &FilterProfile) -> Attach {
        if !page.ready_state().is_ready() {
            tracing::debug!(input_id, "filter: page still loading, deferring attach");
            return Attach::Pending;
        }

        if page.element_by_id(input_id).is_none() {
            tracing::debug!(input_id, "filter: input element absent, staying inactive");
            return Attach::Inactive(InactiveReason::MissingInput {
                input_id: input_id.to_string(),
            });
        }

        let entries: Vec<Entry> = page
            .select(&profile.selection)
            .into_iter()
            .filter_map(|id| {
                page.element(id)
                    .map(|element| Entry::new(id, profile.key.derive(element)))
            })
            .collect();

        if entries.is_empty() {
            tracing::debug!(
                selection = %profile.selection,
                "filter: no candidate entries, staying inactive"
            );
            return Attach::Inactive(InactiveReason::NoEntries);
        }

        tracing::debug!(
            input_id,
            entries = entries.len(),
            profile = %profile.label(),
            "filter: attached"
        );
        Attach::Active(LiveFilter {
            input_id: input_id.to_string(),
            profile: profile.clone(),
            entries,
        })
    }

    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    pub fn profile(&self) -> &FilterProfile {
        &self.profile
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Visibility decisions for `raw` without touching any sink.
    pub fn visibility(&self, raw: &str) -> BTreeMap<EntryId, bool> {
        let query = Query::normalize(raw, self.profile.normalization);
        compute_visibility(&query, &self.entries)
    }

    /// Handle one input-change notification carrying the input's raw value.
    pub fn on_query_change<S: VisibilitySink + ?Sized>(&self, raw: &str, sink: &mut S) {
        let decisions = self.visibility(raw);
        let shown = decisions.values().filter(|v| **v).count();
        for (id, shown) in decisions {
            sink.set_visibility(id, Visibility::from(shown));
        }
        tracing::debug!(query = raw, shown, total = self.entries.len(), "filter: applied");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Element, ReadyState};
    use pretty_assertions::assert_eq;

    fn entries(keys: &[&str]) -> Vec<Entry> {
        keys.iter()
            .enumerate()
            .map(|(i, k)| Entry::new(EntryId(i), *k))
            .collect()
    }

    fn shown(query: &str, norm: Normalization, keys: &[&str]) -> Vec<bool> {
        compute_visibility(&Query::normalize(query, norm), &entries(keys))
            .into_values()
            .collect()
    }

    const MEETINGS: &[&str] = &["Daily Standup", "Sprint Review", "Retro"];

    #[test]
    fn substring_matches_are_case_insensitive() {
        assert_eq!(shown("day", Normalization::LowercaseTrim, MEETINGS), [false, false, false]);
        assert_eq!(shown("re", Normalization::LowercaseTrim, MEETINGS), [false, true, true]);
        assert_eq!(shown("RE", Normalization::LowercaseTrim, MEETINGS), [false, true, true]);
        assert_eq!(shown("stand", Normalization::Lowercase, MEETINGS), [true, false, false]);
    }

    #[test]
    fn empty_query_shows_everything() {
        assert_eq!(shown("", Normalization::Lowercase, MEETINGS), [true, true, true]);
        assert_eq!(shown("   ", Normalization::LowercaseTrim, MEETINGS), [true, true, true]);
    }

    #[test]
    fn untrimmed_whitespace_is_significant() {
        assert_eq!(
            shown("Q1 ", Normalization::Lowercase, &["Q1Planning"]),
            [false]
        );
        assert_eq!(
            shown("Q1 ", Normalization::LowercaseTrim, &["Q1 Planning"]),
            [true]
        );
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let keys = ["a.b", "axb", "(x)", "c++"];
        assert_eq!(shown("a.b", Normalization::Lowercase, &keys), [true, false, false, false]);
        assert_eq!(shown("(", Normalization::Lowercase, &keys), [false, false, true, false]);
        assert_eq!(shown("+", Normalization::Lowercase, &keys), [false, false, false, true]);
        assert_eq!(shown(".*", Normalization::Lowercase, &keys), [false, false, false, false]);
    }

    #[test]
    fn no_entries_yields_empty_map() {
        assert!(compute_visibility(&Query::default(), &[]).is_empty());
    }

    fn page() -> Page {
        Page::new(
            ReadyState::Complete,
            vec![
                Element::new("input").with_id("userSearch"),
                Element::new("li")
                    .with_parent("ul")
                    .with_class("event-item")
                    .with_text("Daily Standup"),
                Element::new("li")
                    .with_parent("ul")
                    .with_class("event-item")
                    .with_text("Retro")
                    .with_annotation("search", "retro friday"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn attach_snapshots_keys_per_policy() {
        let filter = LiveFilter::attach(&page(), "userSearch", &FilterProfile::strict())
            .into_active()
            .unwrap();
        assert_eq!(
            filter.entries(),
            &[Entry::new(EntryId(1), ""), Entry::new(EntryId(2), "retro friday")]
        );

        let filter = LiveFilter::attach(&page(), "userSearch", &FilterProfile::generic())
            .into_active()
            .unwrap();
        assert_eq!(filter.entries()[0].search_key, "Daily Standup");
    }

    #[test]
    fn attach_guard_missing_input() {
        let attach = LiveFilter::attach(&page(), "nope", &FilterProfile::strict());
        assert!(matches!(
            attach,
            Attach::Inactive(InactiveReason::MissingInput { ref input_id }) if input_id == "nope"
        ));
    }

    #[test]
    fn attach_guard_no_entries() {
        let page = Page::from_lines("userSearch", Vec::<&str>::new());
        assert!(matches!(
            LiveFilter::attach(&page, "userSearch", &FilterProfile::generic()),
            Attach::Inactive(InactiveReason::NoEntries)
        ));
    }

    #[test]
    fn attach_waits_for_ready_page() {
        let mut page = page();
        page.set_ready_state(ReadyState::Loading);
        assert!(matches!(
            LiveFilter::attach(&page, "userSearch", &FilterProfile::strict()),
            Attach::Pending
        ));
        page.set_ready_state(ReadyState::Interactive);
        assert!(LiveFilter::attach(&page, "userSearch", &FilterProfile::strict())
            .into_active()
            .is_some());
    }

    #[test]
    fn on_query_change_writes_every_entry() {
        let mut page = page();
        let filter = LiveFilter::attach(&page, "userSearch", &FilterProfile::generic())
            .into_active()
            .unwrap();

        filter.on_query_change("retro", &mut page);
        assert_eq!(page.display(EntryId(1)), Some(Visibility::Hidden));
        assert_eq!(page.display(EntryId(2)), Some(Visibility::Shown));
        // The input itself is never touched.
        assert_eq!(page.display(EntryId(0)), Some(Visibility::Shown));

        filter.on_query_change("", &mut page);
        assert_eq!(page.display(EntryId(1)), Some(Visibility::Shown));
    }

    #[test]
    fn missing_annotation_only_matches_empty_query() {
        let filter = LiveFilter::attach(&page(), "userSearch", &FilterProfile::strict())
            .into_active()
            .unwrap();
        let mut sink: BTreeMap<EntryId, Visibility> = BTreeMap::new();
        filter.on_query_change("daily", &mut sink);
        assert_eq!(sink[&EntryId(1)], Visibility::Hidden);
        filter.on_query_change(" ", &mut sink);
        assert_eq!(sink[&EntryId(1)], Visibility::Shown);
    }
}
