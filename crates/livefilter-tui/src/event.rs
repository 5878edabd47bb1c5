//! Key mapping for the two input modes of the viewer.
//!
//! The event loop picks the mode from focus: while the search box or the
//! command line has focus it calls [`to_app_event_insert`], otherwise
//! [`to_app_event`]. Widgets only ever see [`AppEvent`].
//!
//! List mode:
//!
//! | Key                   | Event                  |
//! |-----------------------|------------------------|
//! | `q`, `Ctrl+c`         | `Quit`                 |
//! | `/`                   | `QueryFocus`           |
//! | `Tab`                 | `FocusNext`            |
//! | `↑`/`k`, `↓`/`j`      | `Nav(Up)`, `Nav(Down)` |
//! | `PageUp`/`Ctrl+u`     | `ScrollUp`             |
//! | `PageDown`/`Ctrl+d`   | `ScrollDown`           |
//! | `g`/`Home`, `G`/`End` | first / last entry     |
//!
//! `?` and `:` arrive as `Char` and open the help popup and the command line.
//!
//! Typing mode sends every printable character through as `Char`, so `q`,
//! `j` or `/` land in the search text. `←`/`→` move the cursor, `Ctrl+u`
//! clears the input and `Enter`/`Escape` hand focus back to the list.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cursor or selection movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Toggle between the search box and the entry list.
    FocusNext,
    QueryFocus,
    ScrollUp,
    ScrollDown,
    /// Select the first shown entry.
    ScrollToTop,
    /// Select the last shown entry.
    ScrollToBottom,
    Nav(Direction),
    /// A printable character; typed into the search box or command line.
    Char(char),
    Backspace,
    ClearInput,
    Enter,
    Resize(u16, u16),
    Escape,
}

/// Map an event while the entry list has focus. Unbound keys and mouse
/// events give `None`.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => list_key(key),
        _ => None,
    }
}

/// Map an event while a text input has focus.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => typing_key(key),
        _ => None,
    }
}

fn is_plain(key: &KeyEvent) -> bool {
    key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT
}

fn list_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;

    if key.modifiers == KeyModifiers::CONTROL {
        return match key.code {
            Char('c') => Some(AppEvent::Quit),
            Char('u') => Some(AppEvent::ScrollUp),
            Char('d') => Some(AppEvent::ScrollDown),
            _ => None,
        };
    }
    if !is_plain(&key) {
        return None;
    }

    let event = match key.code {
        Char('q') => AppEvent::Quit,
        Char('/') => AppEvent::QueryFocus,
        Tab => AppEvent::FocusNext,
        Up | Char('k') => AppEvent::Nav(Direction::Up),
        Down | Char('j') => AppEvent::Nav(Direction::Down),
        PageUp => AppEvent::ScrollUp,
        PageDown => AppEvent::ScrollDown,
        Home | Char('g') => AppEvent::ScrollToTop,
        // some terminals report `G` with SHIFT, some without
        End | Char('G') => AppEvent::ScrollToBottom,
        Char(c) => AppEvent::Char(c),
        Backspace => AppEvent::Backspace,
        Enter => AppEvent::Enter,
        Esc => AppEvent::Escape,
        _ => return None,
    };
    Some(event)
}

fn typing_key(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;

    if key.modifiers == KeyModifiers::CONTROL {
        return match key.code {
            Char('c') => Some(AppEvent::Quit),
            Char('u') => Some(AppEvent::ClearInput),
            _ => None,
        };
    }

    match key.code {
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),
        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Esc => Some(AppEvent::Escape),
        Tab if key.modifiers == KeyModifiers::NONE => Some(AppEvent::FocusNext),
        Backspace if key.modifiers == KeyModifiers::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == KeyModifiers::NONE => Some(AppEvent::Enter),
        Char(c) if is_plain(&key) => Some(AppEvent::Char(c)),
        _ => None,
    }
}
