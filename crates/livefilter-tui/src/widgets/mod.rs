//! Ratatui widgets for the livefilter TUI.

pub mod command_bar;
pub mod entry_list;
pub mod help;
pub mod query_bar;
pub mod status_bar;
