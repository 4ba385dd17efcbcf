//! Header bar — one line at the top: app name, record count, sort order and
//! data origin, with key hints right-aligned.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use thumbrank_core::SortOption;
use thumbrank_feeds::DataOrigin;

pub struct HeaderBar<'a> {
    count: usize,
    sort: SortOption,
    origin: &'a DataOrigin,
    theme: &'a Theme,
}

impl<'a> HeaderBar<'a> {
    pub fn new(count: usize, sort: SortOption, origin: &'a DataOrigin, theme: &'a Theme) -> Self {
        Self {
            count,
            sort,
            origin,
            theme,
        }
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let source = match self.origin {
            DataOrigin::Live { source } => source.as_str(),
            DataOrigin::Fallback { .. } => "sample data",
        };

        let line = Line::from(vec![
            Span::styled(" thumbrank ", self.theme.cursor.add_modifier(Modifier::BOLD)),
            Span::raw(format!(" {} thumbnails ", self.count)),
            Span::styled("│", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(format!(" {} ", self.sort.label()), self.theme.rank),
            Span::styled("│", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(format!(" {source}"), Style::default().add_modifier(Modifier::DIM)),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        // Keybinding hints at the right edge
        let hint = " s:sort  enter:analyze  q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.chars().count() as u16);
        buf.set_string(
            hint_x,
            area.y,
            hint,
            Style::default().add_modifier(Modifier::DIM),
        );
    }
}
