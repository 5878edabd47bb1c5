//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! The search box plays the page's query input and the entry list plays the
//! presentation layer: every edit that changes the query text is delivered
//! to the attached [`LiveFilter`], which writes visibility into the list.

use crate::{
    commands::execute_command,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarOutcome, CommandBarState},
        entry_list::{EntryList, EntryListState},
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        status_bar::{FilterStatus, StatusBar},
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use livefilter_core::{
    config::UiConfig, Attach, FilterProfile, LiveFilter, Page, Query, ReadyState,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    List,
    /// Vim-style `:` command line is active.
    Command,
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub page: Page,
    pub input_id: String,
    pub profile: FilterProfile,
    /// `None` while the filter is pending or inactive.
    pub filter: Option<LiveFilter>,
    pub status: FilterStatus,
    pub query: QueryBarState,
    pub list: EntryListState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub ui: UiConfig,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
}

impl AppState {
    pub fn new(
        page: Page,
        input_id: impl Into<String>,
        profile: FilterProfile,
        ui: UiConfig,
        theme: Theme,
    ) -> Self {
        let list = EntryListState::from_page(&page, &profile);
        let mut state = AppState {
            page,
            input_id: input_id.into(),
            profile,
            filter: None,
            status: FilterStatus::Inactive("page loading".to_string()),
            query: QueryBarState::default(),
            list,
            focus: Focus::Search,
            prev_focus: Focus::Search,
            theme,
            ui,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
        };
        state.attach();
        state
    }

    /// Attach the live filter to the page under the current profile.
    fn attach(&mut self) {
        match LiveFilter::attach(&self.page, &self.input_id, &self.profile) {
            Attach::Active(filter) => {
                self.filter = Some(filter);
                self.refresh_status();
            }
            Attach::Pending => {
                self.filter = None;
                self.status = FilterStatus::Inactive("page loading".to_string());
            }
            Attach::Inactive(reason) => {
                self.filter = None;
                self.status = FilterStatus::Inactive(reason.to_string());
            }
        }
    }

    /// The page finished loading: attach now if attaching was deferred.
    pub fn document_ready(&mut self) {
        if self.page.ready_state().is_ready() {
            return;
        }
        self.page.set_ready_state(ReadyState::Complete);
        self.attach();
        if self.filter.is_some() && !self.query.query.is_empty() {
            self.notify_query_changed();
        }
    }

    /// Input-change notification: the search box text changed.
    pub fn notify_query_changed(&mut self) {
        let Some(filter) = &self.filter else {
            return;
        };
        filter.on_query_change(&self.query.query, &mut self.list);

        let query = Query::normalize(&self.query.query, self.profile.normalization);
        self.list.highlight = (self.ui.highlight_matches && !query.is_empty())
            .then(|| query.as_str().to_string());
        self.list.reset_cursor();
        self.refresh_status();
    }

    /// Switch profile: rebuild the list, re-attach, and re-apply the query.
    pub fn set_profile(&mut self, profile: FilterProfile) {
        tracing::debug!(profile = %profile.label(), "switching profile");
        self.profile = profile;
        self.list = EntryListState::from_page(&self.page, &self.profile);
        self.attach();
        self.notify_query_changed();
    }

    fn refresh_status(&mut self) {
        if self.filter.is_some() {
            self.status = FilterStatus::Active {
                shown: self.list.shown_count(),
                total: self.list.total(),
            };
        }
    }

    /// Route one semantic event.
    pub fn handle(&mut self, event: AppEvent) {
        // Help popup intercepts all events; only close keys pass through.
        if self.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if self.focus == Focus::Command {
            match self.command_bar.handle(&event) {
                CommandBarOutcome::Editing => {}
                CommandBarOutcome::Cancelled => self.focus = self.prev_focus,
                CommandBarOutcome::Submit(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    self.focus = self.prev_focus;
                    if let Some(err) = execute_command(self, cmd) {
                        self.command_bar.error = Some(err);
                        self.focus = Focus::Command;
                    }
                }
            }
            return;
        }

        match event {
            AppEvent::Char('?') if self.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                self.show_help = true;
            }

            AppEvent::Char(':') if self.focus != Focus::Search => {
                tracing::debug!(prev_focus = ?self.focus, "entering command mode");
                self.prev_focus = self.focus;
                self.command_bar.clear();
                self.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                self.quit = true;
            }

            AppEvent::Escape | AppEvent::Enter if self.focus == Focus::Search => {
                tracing::debug!("focus: Search -> List");
                self.focus = Focus::List;
            }

            AppEvent::FocusNext => {
                let next = match self.focus {
                    Focus::Search => Focus::List,
                    Focus::List | Focus::Command => Focus::Search,
                };
                tracing::debug!(from = ?self.focus, to = ?next, "focus cycle");
                self.focus = next;
            }

            AppEvent::QueryFocus => {
                tracing::debug!("focus -> Search");
                self.focus = Focus::Search;
            }

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => match self.focus {
                Focus::Search => {
                    if self.query.handle(&other) {
                        self.notify_query_changed();
                    }
                }
                Focus::List => self.list.handle(&other),
                Focus::Command => {} // handled above
            },
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// letter keys should type rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Search | Focus::Command)
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(state: AppState) -> Self {
        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }
            // The first frame is on screen: the document is ready.
            self.state.document_ready();

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == ct_event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.state.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.state.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: 3-line search box | entry list | 1-line status bar
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let placeholder = match &state.status {
        FilterStatus::Inactive(_) if state.list.total() == 0 => "no entries",
        _ => "no matching entries",
    };

    frame.render_widget(
        QueryBar::new(&state.query, &state.input_id, state.focus == Focus::Search, &state.theme),
        vert[0],
    );
    frame.render_widget(
        EntryList::new(&state.list, state.focus == Focus::List, &state.theme)
            .placeholder(placeholder),
        vert[1],
    );
    let label = state.profile.label();
    frame.render_widget(
        StatusBar::new(&state.status, &label, state.ui.show_counts, &state.theme),
        vert[2],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the status row
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom().saturating_sub(1), height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Search {
        let qb = QueryBar::new(&state.query, &state.input_id, true, &state.theme);
        frame.set_cursor_position(qb.cursor_position(vert[0]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
