use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::widgets::form::border_style;

pub struct ItemDetailWidget;

impl ItemDetailWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus == Focus::Detail;

        let block = Block::default()
            .title(" Summary ")
            .borders(Borders::ALL)
            .border_style(border_style(theme, is_focused))
            .style(Style::default().bg(theme.bg0));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        let content = match app.current_item() {
            Some(item) => {
                let mut lines = vec![
                    Line::from(Span::styled(
                        item.title.clone(),
                        Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Sentiment: ", Style::default().fg(theme.grey2)),
                        Span::styled(
                            format!("{} ({:+.3})", item.sentiment, item.compound),
                            Style::default().fg(theme.sentiment_color(item.sentiment)),
                        ),
                    ]),
                    Line::from(vec![
                        Span::styled("Source: ", Style::default().fg(theme.grey2)),
                        Span::styled(item.source_name.clone(), Style::default().fg(theme.fg0)),
                    ]),
                ];

                if let Some(published) = item.published_at {
                    lines.push(Line::from(vec![
                        Span::styled("Published: ", Style::default().fg(theme.grey2)),
                        Span::styled(
                            published.format("%Y-%m-%d %H:%M UTC").to_string(),
                            Style::default().fg(theme.fg0),
                        ),
                    ]));
                }

                lines.push(Line::from(vec![
                    Span::styled("Link: ", Style::default().fg(theme.grey2)),
                    Span::styled(
                        item.url.clone(),
                        Style::default().fg(theme.blue).add_modifier(Modifier::UNDERLINED),
                    ),
                ]));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    "Summary",
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                )));

                for paragraph in item.summary.lines() {
                    lines.push(Line::from(Span::styled(
                        paragraph.to_string(),
                        Style::default().fg(theme.fg0),
                    )));
                }

                Text::from(lines)
            }
            None => Text::from(Line::from(Span::styled(
                "No article selected",
                Style::default().fg(theme.grey1),
            ))),
        };

        let paragraph = Paragraph::new(content)
            .wrap(Wrap { trim: true })
            .scroll((app.detail_scroll, 0));

        frame.render_widget(paragraph, inner_area);
    }
}
