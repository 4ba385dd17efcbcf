//! Warning banner shown above the board while the sample data is on screen.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

pub const FALLBACK_NOTICE: &str =
    "Could not read the sheet (check that it is published as CSV). Showing sample data.";

pub struct FallbackBanner<'a> {
    reason: &'a str,
    theme: &'a Theme,
}

impl<'a> FallbackBanner<'a> {
    pub fn new(reason: &'a str, theme: &'a Theme) -> Self {
        Self { reason, theme }
    }
}

impl Widget for FallbackBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(format!(" ⚠ {FALLBACK_NOTICE}"), self.theme.warning)];
        if !self.reason.is_empty() {
            spans.push(Span::raw(format!(" ({})", self.reason)));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
