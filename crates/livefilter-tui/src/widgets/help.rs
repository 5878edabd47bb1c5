//! `?` popup listing the key bindings, grouped by which pane has focus.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const LIST: &[(&str, &str)] = &[
    ("j k  ↑ ↓", "select next / previous shown entry"),
    ("PageDown PageUp", "move one page (also Ctrl+d / Ctrl+u)"),
    ("g G", "first / last shown entry"),
    ("/  Tab", "type in the search box"),
    (":", "command line"),
    ("q", "quit"),
];

const SEARCH: &[(&str, &str)] = &[
    ("any text", "filter as you type"),
    ("Ctrl+u", "clear the query, every entry shows again"),
    ("Enter  Esc  Tab", "back to the list"),
];

const COMMANDS: &str = "clear · trim · profile strict|generic · theme <name> · help · q";

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn section(
        &self,
        title: &'static str,
        rows: &[(&'static str, &'static str)],
    ) -> Vec<Line<'static>> {
        let key_style = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::styled(title, self.theme.status_title)];
        lines.extend(rows.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {key:<18}"), key_style),
                Span::raw(*desc),
            ])
        }));
        lines
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut lines = self.section("entry list", LIST);
        lines.push(Line::default());
        lines.extend(self.section("search box", SEARCH));
        lines.push(Line::default());
        lines.push(Line::styled("commands", self.theme.status_title));
        lines.push(Line::styled(format!("  {COMMANDS}"), self.theme.status_hint));

        let popup = centered_rect(70, lines.len() as u16 + 2, area);
        Clear.render(popup, buf);
        let block = Block::bordered()
            .title(" keys (? or Esc to close) ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);
        Paragraph::new(lines).render(inner, buf);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
