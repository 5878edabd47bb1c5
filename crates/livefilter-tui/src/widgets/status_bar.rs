//! Status bar widget.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

/// Filter state as the status bar reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterStatus {
    Active { shown: usize, total: usize },
    /// The filter did not attach; the reason is shown verbatim.
    Inactive(String),
}

/// Renders `shown/total`, the active profile label, and key hints.
pub struct StatusBar<'a> {
    status: &'a FilterStatus,
    profile: &'a str,
    show_counts: bool,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        status: &'a FilterStatus,
        profile: &'a str,
        show_counts: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            status,
            profile,
            show_counts,
            theme,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(" livefilter ", self.theme.status_title)];

        match self.status {
            FilterStatus::Active { shown, total } if self.show_counts => {
                spans.push(Span::raw(format!(" {shown}/{total} shown ")));
            }
            FilterStatus::Active { .. } => {}
            FilterStatus::Inactive(reason) => {
                spans.push(Span::styled(
                    format!(" inactive: {reason} "),
                    self.theme.status_inactive,
                ));
            }
        }

        spans.push(Span::styled(format!(" {} ", self.profile), self.theme.status_hint));

        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        // Keybinding hints at the right edge
        let hint = " /:search  ::cmd  ?:help  q:quit ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.status_hint);
    }
}
