//! Detail pane — every field of the selected record, raw sheet cells last.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use thumbrank_core::ThumbnailRecord;

use super::board::format_views;

pub struct Detail<'a> {
    record: Option<&'a ThumbnailRecord>,
    low_ctr_threshold: f64,
    theme: &'a Theme,
}

impl<'a> Detail<'a> {
    pub fn new(record: Option<&'a ThumbnailRecord>, low_ctr_threshold: f64, theme: &'a Theme) -> Self {
        Self {
            record,
            low_ctr_threshold,
            theme,
        }
    }
}

fn field<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{label:<11}"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        value,
    ])
}

impl Widget for Detail<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Details ")
            .border_style(self.theme.border_unfocused);

        let Some(record) = self.record else {
            Paragraph::new(Line::from(Span::styled(
                "Nothing selected.",
                Style::default().add_modifier(Modifier::DIM),
            )))
            .block(block)
            .render(area, buf);
            return;
        };

        let thumbnail = if record.thumbnail_url.is_empty() {
            Span::styled("(none)", Style::default().add_modifier(Modifier::DIM))
        } else {
            Span::raw(record.thumbnail_url.as_str())
        };

        let mut lines = vec![
            field("id", Span::raw(record.id.as_str())),
            field("title", Span::raw(record.title.as_str())),
            field("thumbnail", thumbnail),
            field(
                "CTR",
                Span::styled(
                    format!("{:.2}%", record.ctr),
                    self.theme.ctr_style(record.ctr, self.low_ctr_threshold),
                ),
            ),
            field(
                "views",
                Span::raw(format!("{:.0} ({})", record.views, format_views(record.views))),
            ),
            field(
                "rating",
                Span::styled(record.rating.as_str(), self.theme.rating_style(&record.rating)),
            ),
        ];

        if !record.raw_fields.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "Sheet columns",
                Style::default().add_modifier(Modifier::UNDERLINED),
            )));
            for (header, value) in &record.raw_fields {
                lines.push(Line::from(vec![
                    Span::styled(format!("{header}: "), self.theme.rank),
                    Span::raw(value.as_str()),
                ]));
            }
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
