//! `:` commands, parsed and executed against [`AppState`].
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `clear` | Empty the search box |
//! | `profile <name>` | Re-attach with the `strict` or `generic` profile |
//! | `trim` | Toggle trimming of the query |

use crate::{app::AppState, theme::Theme};
use livefilter_core::{FilterProfile, Normalization};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Clear,
    Profile(String),
    Trim,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Blank input; the bar closes without acting.
    #[error("")]
    Empty,
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown command: {0}")]
    Unknown(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "trim" => Ok(Command::Trim),
            "theme" if rest.is_empty() => Err(CommandError::Usage("theme <default|gruvbox>")),
            "theme" => Ok(Command::Theme(rest.to_string())),
            "profile" if rest.is_empty() => Err(CommandError::Usage("profile <strict|generic>")),
            "profile" => Ok(Command::Profile(rest.to_string())),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
///
/// Returns an error message to show in the command bar, if any.
pub fn execute_command(s: &mut AppState, cmd: Command) -> Option<String> {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => match Theme::by_name(&name) {
            Some(theme) => s.theme = theme,
            None => return Some(format!("unknown theme: {name}")),
        },
        Command::Clear => {
            s.query.clear();
            s.notify_query_changed();
        }
        Command::Profile(name) => match FilterProfile::preset(&name) {
            Ok(profile) => s.set_profile(profile),
            Err(e) => return Some(e.to_string()),
        },
        Command::Trim => {
            let normalization = if s.profile.normalization.trims() {
                Normalization::Lowercase
            } else {
                Normalization::LowercaseTrim
            };
            let profile = s.profile.clone().with_normalization(normalization);
            s.set_profile(profile);
        }
    }
    None
}
