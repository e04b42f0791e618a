use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::{App, Focus};
use crate::widgets::form::border_style;

pub struct ResultsWidget;

impl ResultsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus == Focus::Results;

        let title = match &app.last_selection {
            Some(selection) => format!(" Results: {} ({}) ", selection.topic, app.items.len()),
            None => " Results ".to_string(),
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style(theme, is_focused))
            .style(Style::default().bg(theme.bg0));

        if app.items.is_empty() {
            let hint = if app.skipped_count > 0 {
                "Every summary failed; see the status bar."
            } else if app.last_selection.is_some() {
                "No articles found matching your filters."
            } else {
                "Press f to fetch news"
            };
            let paragraph = Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(theme.grey1),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        // Badge plus spacing plus borders
        let title_width = (area.width as usize).saturating_sub(13);

        let items: Vec<ListItem> = app
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let badge_style = Style::default()
                    .fg(theme.sentiment_color(item.sentiment))
                    .add_modifier(Modifier::BOLD);

                let title_style = if i == app.selected_item && is_focused {
                    Style::default().fg(theme.fg1).bg(theme.selection)
                } else {
                    Style::default().fg(theme.fg0)
                };

                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<9}", item.sentiment.as_str()), badge_style),
                    Span::raw(" "),
                    Span::styled(truncate_to_width(&item.title, title_width), title_style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(theme.selection));

        let mut state = ListState::default();
        state.select(Some(app.selected_item));

        frame.render_stateful_widget(list, area, &mut state);
    }
}

/// Truncate to a display width, appending an ellipsis when cut
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width {
            out.pop();
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer title", 6), "a lon…");
        // Wide characters count double
        assert_eq!(truncate_to_width("日本語テキスト", 6), "日本…");
    }
}
