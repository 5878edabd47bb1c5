//! Entry list widget, the filtered collection below the search box.
//!
//! The list holds every candidate entry of the page in document order and
//! renders only the shown ones. It is the live filter's presentation sink:
//! [`EntryListState`] implements [`VisibilitySink`], so the filter toggles
//! rows without knowing anything about the terminal.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Up one page |
//! | `PageDown` / `Ctrl+d` | Down one page |
//! | `g` / `G` | First / last shown row |
//!
//! `cursor` and `offset` index the *shown* rows, not `rows`.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use livefilter_core::{
    EntryId, FilterProfile, KeyPolicy, Page, SelectionPolicy, Visibility, VisibilitySink,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// Row
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: EntryId,
    pub text: String,
    /// The annotation the filter matches on, when it differs from `text`.
    pub annotation: Option<String>,
    /// First class other than the selection marker.
    pub category: Option<String>,
    pub visibility: Visibility,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct EntryListState {
    pub rows: Vec<Row>,
    pub cursor: usize,
    pub offset: usize,
    /// Normalized query to highlight inside shown rows.
    pub highlight: Option<String>,
    /// The filter matches annotations, so highlights go there.
    matches_annotation: bool,
    /// Cached from the last render so `handle()` can page by screen height.
    last_height: Cell<usize>,
}

impl EntryListState {
    /// Build rows for every element `profile` selects, keeping the page's
    /// current display state.
    pub fn from_page(page: &Page, profile: &FilterProfile) -> Self {
        let marker = match &profile.selection {
            SelectionPolicy::Marker { class } => Some(class.as_str()),
            SelectionPolicy::Generic { .. } => None,
        };

        let rows = page
            .select(&profile.selection)
            .into_iter()
            .filter_map(|id| page.element(id).map(|e| (id, e)))
            .map(|(id, element)| {
                let annotation = match &profile.key {
                    KeyPolicy::Annotation { name } => element
                        .annotation(name)
                        .filter(|a| *a != element.text)
                        .map(str::to_string),
                    KeyPolicy::RenderedText => None,
                };
                let category = element
                    .classes
                    .iter()
                    .find(|c| Some(c.as_str()) != marker)
                    .cloned();
                Row {
                    id,
                    text: element.text.clone(),
                    annotation,
                    category,
                    visibility: element.display,
                }
            })
            .collect();

        Self {
            rows,
            cursor: 0,
            offset: 0,
            highlight: None,
            matches_annotation: matches!(profile.key, KeyPolicy::Annotation { .. }),
            last_height: Cell::new(20),
        }
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn shown_count(&self) -> usize {
        self.rows.iter().filter(|r| r.visibility.is_shown()).count()
    }

    /// Indices into `rows` of the shown rows, in order.
    pub fn shown(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.visibility.is_shown())
            .map(|(i, _)| i)
            .collect()
    }

    /// The row under the cursor, if any row is shown.
    pub fn selected(&self) -> Option<&Row> {
        self.shown().get(self.cursor).map(|&i| &self.rows[i])
    }

    /// Reset the cursor to the top after a new filter pass.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
        self.offset = 0;
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    fn keep_cursor_in_view(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let shown = self.shown_count();
        if shown == 0 {
            return;
        }
        let last = shown - 1;

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => self.cursor = (self.cursor + PAGE_STEP).min(last),
            AppEvent::ScrollToTop => self.cursor = 0,
            AppEvent::ScrollToBottom => self.cursor = last,
            _ => return,
        }
        self.keep_cursor_in_view();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "list: moved");
    }
}

impl VisibilitySink for EntryListState {
    fn set_visibility(&mut self, id: EntryId, visibility: Visibility) {
        if let Ok(i) = self.rows.binary_search_by_key(&id, |r| r.id) {
            self.rows[i].visibility = visibility;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct EntryList<'a> {
    state: &'a EntryListState,
    focused: bool,
    /// Shown when there is nothing to list, e.g. "no entries".
    placeholder: &'a str,
    theme: &'a Theme,
}

impl<'a> EntryList<'a> {
    pub fn new(state: &'a EntryListState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            placeholder: "no matching entries",
            theme,
        }
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for EntryList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered().title(" Entries ").border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        self.state.last_height.set(height);

        let shown = self.state.shown();
        if shown.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                self.placeholder,
                self.theme.entry_empty,
            )))
            .render(inner, buf);
            return;
        }

        let start = self.state.offset.min(shown.len().saturating_sub(1));
        let end = (start + height).min(shown.len());

        let lines: Vec<Line> = shown[start..end]
            .iter()
            .enumerate()
            .map(|(n, &i)| {
                let mut line = render_row(
                    &self.state.rows[i],
                    self.state.highlight.as_deref(),
                    self.state.matches_annotation,
                    self.theme,
                );
                if self.focused && start + n == self.state.cursor {
                    line = line.patch_style(Style::default().add_modifier(Modifier::REVERSED));
                }
                line
            })
            .collect();

        let text_area = Rect { width: inner.width.saturating_sub(1), ..inner };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(shown.len())
            .position(start)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Row rendering
// ---------------------------------------------------------------------------

/// Render one row, highlighting the query inside whichever span the filter
/// matched on. A row without a separate annotation was matched on its text.
fn render_row(
    row: &Row,
    highlight: Option<&str>,
    matches_annotation: bool,
    theme: &Theme,
) -> Line<'static> {
    let (text_hl, annotation_hl) = match (matches_annotation, &row.annotation) {
        (true, Some(_)) => (None, highlight),
        _ => (highlight, None),
    };
    let mut spans: Vec<Span<'static>> = Vec::new();

    if let Some(category) = &row.category {
        spans.push(Span::styled(
            format!("{category:<10} "),
            theme.category_style(category),
        ));
    }

    spans.extend(highlight_spans(
        &row.text,
        text_hl,
        theme.entry_text,
        theme.search_highlight,
    ));

    if let Some(annotation) = &row.annotation {
        spans.push(Span::styled("  · ", theme.entry_annotation));
        spans.extend(highlight_spans(
            annotation,
            annotation_hl,
            theme.entry_annotation,
            theme.search_highlight,
        ));
    }

    Line::from(spans)
}

/// Split `text` into spans with every case-insensitive occurrence of
/// `needle` styled as `hl`.
///
/// Only ASCII text is split: lowercasing keeps byte offsets aligned there.
fn highlight_spans(text: &str, needle: Option<&str>, base: Style, hl: Style) -> Vec<Span<'static>> {
    let needle = match needle {
        Some(n) if !n.is_empty() && text.is_ascii() => n,
        _ => return vec![Span::styled(text.to_string(), base)],
    };

    let lower = text.to_ascii_lowercase();
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(found) = lower[pos..].find(needle) {
        let start = pos + found;
        let end = start + needle.len();
        if start > pos {
            spans.push(Span::styled(text[pos..start].to_string(), base));
        }
        spans.push(Span::styled(text[start..end].to_string(), hl));
        pos = end;
    }
    if pos < text.len() || spans.is_empty() {
        spans.push(Span::styled(text[pos..].to_string(), base));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
