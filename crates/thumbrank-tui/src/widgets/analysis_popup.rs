//! Commentary popup — centred overlay with the model's take on one thumbnail.
//!
//! Opened by `Enter`/`a` on the board. While the request is in flight the
//! popup shows a pending line; the result (or the error's user message)
//! replaces it when it arrives. `↑↓`/`jk` and paging scroll long answers.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::help::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

pub const POPUP_TITLE: &str = "AI 縮圖成效分析";
pub const PENDING_TEXT: &str = "正在分析縮圖視覺與數據...";

const PAGE_STEP: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisStatus {
    Pending,
    Done(String),
    Failed(String),
}

/// One commentary request and what is known about it so far.
#[derive(Debug, Clone)]
pub struct AnalysisView {
    /// Matches the id carried by the outcome message.
    pub request_id: u64,
    pub record_id: String,
    pub title: String,
    pub provider: String,
    pub status: AnalysisStatus,
    /// Vertical scroll in wrapped lines.
    pub scroll: u16,
}

impl AnalysisView {
    pub fn pending(request_id: u64, record_id: String, title: String, provider: String) -> Self {
        Self {
            request_id,
            record_id,
            title,
            provider,
            status: AnalysisStatus::Pending,
            scroll: 0,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == AnalysisStatus::Pending
    }

    pub fn handle(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Nav(Direction::Up) => self.scroll = self.scroll.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.scroll = self.scroll.saturating_add(1),
            AppEvent::ScrollUp => self.scroll = self.scroll.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => self.scroll = self.scroll.saturating_add(PAGE_STEP),
            AppEvent::ScrollToTop => self.scroll = 0,
            _ => {}
        }
    }
}

pub struct AnalysisPopup<'a> {
    view: &'a AnalysisView,
    theme: &'a Theme,
}

impl<'a> AnalysisPopup<'a> {
    pub fn new(view: &'a AnalysisView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }
}

impl Widget for AnalysisPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (area.width * 4 / 5).max(40);
        let height = (area.height * 4 / 5).max(8);
        let popup = centered_rect(width, height, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(format!(" {POPUP_TITLE} · {} ", self.view.provider))
            .title_bottom(" Esc to close ")
            .border_style(self.theme.border_focused);

        let mut lines = vec![
            Line::from(Span::styled(
                self.view.title.clone(),
                self.theme.rank.add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];

        match &self.view.status {
            AnalysisStatus::Pending => {
                lines.push(Line::from(Span::styled(PENDING_TEXT, self.theme.analysis_pending)));
            }
            AnalysisStatus::Done(text) => {
                lines.extend(text.lines().map(|l| Line::from(l.to_string())));
            }
            AnalysisStatus::Failed(message) => {
                lines.push(Line::from(Span::styled(
                    message.clone(),
                    self.theme.analysis_error,
                )));
            }
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.view.scroll, 0))
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_saturates_at_top() {
        let mut view = AnalysisView::pending(1, "row-1".into(), "t".into(), "m".into());
        view.handle(&AppEvent::Nav(Direction::Up));
        assert_eq!(view.scroll, 0);
        view.handle(&AppEvent::ScrollDown);
        view.handle(&AppEvent::Nav(Direction::Down));
        assert_eq!(view.scroll, 11);
        view.handle(&AppEvent::ScrollToTop);
        assert_eq!(view.scroll, 0);
    }
}
