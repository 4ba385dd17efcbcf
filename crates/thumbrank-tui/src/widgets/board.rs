//! Board widget — the ranked, scrollable list of thumbnails on the left.
//!
//! # Navigation
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Move cursor up one row |
//! | `↓` / `j` | Move cursor down one row |
//! | `PageUp` / `Ctrl+u` | Move up one page |
//! | `PageDown` / `Ctrl+d` | Move down one page |
//! | `g` / `G` | Jump to first / last row |
//!
//! # Scroll semantics
//!
//! `offset` is the index of the first visible row and `cursor` the index of
//! the selected one. The window follows the cursor; the height used for that
//! is cached from the last render.

use std::cell::Cell;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use thumbrank_core::ThumbnailRecord;

const PAGE_STEP: usize = 10;

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

pub struct BoardState {
    /// Records in display (ranked) order.
    pub rows: Vec<ThumbnailRecord>,
    /// Index into `rows` of the selected record.
    pub cursor: usize,
    /// Index into `rows` of the first visible record.
    pub offset: usize,
    last_height: Cell<usize>,
}

impl BoardState {
    pub fn new(rows: Vec<ThumbnailRecord>) -> Self {
        Self {
            rows,
            cursor: 0,
            offset: 0,
            last_height: Cell::new(20),
        }
    }

    fn height(&self) -> usize {
        self.last_height.get().max(1)
    }

    /// The selected record, if any.
    pub fn selected(&self) -> Option<&ThumbnailRecord> {
        self.rows.get(self.cursor)
    }

    /// Replace the rows (after a re-sort), keeping the same record selected.
    pub fn set_rows(&mut self, rows: Vec<ThumbnailRecord>) {
        let selected_id = self.selected().map(|r| r.id.clone());
        self.rows = rows;
        self.cursor = selected_id
            .and_then(|id| self.rows.iter().position(|r| r.id == id))
            .unwrap_or(0);
        self.follow_cursor();
    }

    /// Handle a navigation event from the app shell.
    pub fn handle(&mut self, event: &AppEvent) {
        let total = self.rows.len();
        if total == 0 {
            return;
        }
        let last = total - 1;

        match event {
            AppEvent::Nav(Direction::Up) => self.cursor = self.cursor.saturating_sub(1),
            AppEvent::Nav(Direction::Down) => self.cursor = (self.cursor + 1).min(last),
            AppEvent::ScrollUp => self.cursor = self.cursor.saturating_sub(PAGE_STEP),
            AppEvent::ScrollDown => self.cursor = (self.cursor + PAGE_STEP).min(last),
            AppEvent::ScrollToTop => self.cursor = 0,
            AppEvent::ScrollToBottom => self.cursor = last,
            _ => return,
        }
        self.follow_cursor();
        tracing::debug!(cursor = self.cursor, offset = self.offset, "board: cursor moved");
    }

    /// Scroll the window so the cursor is visible.
    fn follow_cursor(&mut self) {
        let height = self.height();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct Board<'a> {
    state: &'a BoardState,
    focused: bool,
    low_ctr_threshold: f64,
    theme: &'a Theme,
}

impl<'a> Board<'a> {
    pub fn new(
        state: &'a BoardState,
        focused: bool,
        low_ctr_threshold: f64,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            focused,
            low_ctr_threshold,
            theme,
        }
    }
}

impl Widget for Board<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title(" Thumbnails ")
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        self.state.last_height.set(height);

        let total = self.state.rows.len();
        if total == 0 {
            Paragraph::new(Line::from(Span::styled(
                "No thumbnail rows found in the sheet.",
                Style::default().add_modifier(Modifier::DIM),
            )))
            .render(inner, buf);
            return;
        }

        // The cursor may be off-window after a resize; keep it visible.
        let mut start = self.state.offset.min(total.saturating_sub(1));
        if self.state.cursor < start {
            start = self.state.cursor;
        } else if height > 0 && self.state.cursor >= start + height {
            start = self.state.cursor + 1 - height;
        }
        let end = (start + height).min(total);

        let lines: Vec<Line<'static>> = self.state.rows[start..end]
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let rank = start + row + 1;
                let line = render_row(rank, record, self.low_ctr_threshold, self.theme);
                if start + row == self.state.cursor {
                    line.patch_style(self.theme.cursor)
                } else {
                    line
                }
            })
            .collect();

        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        Paragraph::new(lines).render(text_area, buf);

        let mut sb_state = ScrollbarState::new(total)
            .position(start)
            .viewport_content_length(height);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

// ---------------------------------------------------------------------------
// Row rendering
// ---------------------------------------------------------------------------

fn render_row(
    rank: usize,
    record: &ThumbnailRecord,
    low_ctr_threshold: f64,
    theme: &Theme,
) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{rank:>3}. "), theme.rank),
        Span::styled(
            format!("{:>6.1}% ", record.ctr),
            theme.ctr_style(record.ctr, low_ctr_threshold),
        ),
        Span::raw(format!("{:>9} ", format_views(record.views))),
        Span::styled(format!("{:<3} ", record.rating), theme.rating_style(&record.rating)),
        Span::raw(record.title.clone()),
    ])
}

/// Compact view count: `950`, `15.0k`, `1.2M`.
pub fn format_views(views: f64) -> String {
    if views >= 1_000_000.0 {
        format!("{:.1}M", views / 1_000_000.0)
    } else if views >= 1_000.0 {
        format!("{:.1}k", views / 1_000.0)
    } else {
        format!("{views:.0}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
