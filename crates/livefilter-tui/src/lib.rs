//! ratatui application shell for livefilter.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, AppState};

use livefilter_core::{config::UiConfig, FilterProfile, Page};

/// Start the TUI over `page`, filtering through the input `input_id`.
pub fn run(page: Page, input_id: &str, profile: FilterProfile, ui: UiConfig) -> anyhow::Result<()> {
    let theme = theme::Theme::by_name(&ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %ui.theme, "unknown theme, using default");
        theme::Theme::load_default()
    });
    App::new(AppState::new(page, input_id, profile, ui, theme)).run()
}
