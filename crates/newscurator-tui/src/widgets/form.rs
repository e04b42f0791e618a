use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus, Mode};
use crate::theme::Theme;

/// Topic input, sentiment and length radios, and the fetch button
pub struct FormWidget;

impl FormWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let is_focused = app.focus.is_form();

        let block = Block::default()
            .title(" News Curator ")
            .borders(Borders::ALL)
            .border_style(border_style(theme, is_focused))
            .style(Style::default().bg(theme.bg0));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Topic
                Constraint::Length(1), // Sentiment
                Constraint::Length(1), // Length
                Constraint::Length(1), // Button
            ])
            .split(inner);

        frame.render_widget(Paragraph::new(Self::topic_line(app)), rows[0]);

        let sentiment_labels: Vec<&str> = newscurator_core::SentimentFilter::ALL
            .iter()
            .map(|f| f.as_str())
            .collect();
        let sentiment_line = radio_line(
            theme,
            "Sentiment",
            &sentiment_labels,
            app.sentiment_filter.as_str(),
            app.focus == Focus::Sentiment,
        );
        frame.render_widget(Paragraph::new(sentiment_line), rows[1]);

        let length_labels: Vec<&str> = newscurator_core::ai::SummaryLength::ALL
            .iter()
            .map(|l| l.as_str())
            .collect();
        let length_line = radio_line(
            theme,
            "Summary  ",
            &length_labels,
            app.summary_length.as_str(),
            app.focus == Focus::Length,
        );
        frame.render_widget(Paragraph::new(length_line), rows[2]);

        frame.render_widget(Paragraph::new(Self::button_line(app)), rows[3]);
    }

    fn topic_line(app: &App) -> Line<'static> {
        let theme = &app.theme;
        let editing = app.mode == Mode::EditingTopic;
        let focused = app.focus == Focus::Topic;

        let value_style = if editing {
            Style::default().fg(theme.fg1).bg(theme.bg2)
        } else if focused {
            Style::default().fg(theme.fg1).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme.fg0)
        };

        let mut spans = vec![
            Span::styled(" Topic     ", label_style(theme, focused)),
            Span::styled(app.topic.clone(), value_style),
        ];
        if editing {
            spans.push(Span::styled("█", Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    }

    fn button_line(app: &App) -> Line<'static> {
        let theme = &app.theme;
        let focused = app.focus == Focus::FetchButton;

        let (label, style) = if app.is_fetching {
            (
                format!(" {} Fetching... ", app.spinner()),
                Style::default().fg(theme.yellow),
            )
        } else if focused {
            (
                " [ Fetch News ] ".to_string(),
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (" [ Fetch News ] ".to_string(), Style::default().fg(theme.accent))
        };

        Line::from(vec![Span::raw("           "), Span::styled(label, style)])
    }
}

fn radio_line(
    theme: &Theme,
    label: &str,
    options: &[&str],
    selected: &str,
    focused: bool,
) -> Line<'static> {
    let mut spans = vec![Span::styled(format!(" {} ", label), label_style(theme, focused))];

    for option in options {
        let checked = *option == selected;
        let marker = if checked { "(•) " } else { "( ) " };
        let style = if checked {
            Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.grey1)
        };
        spans.push(Span::styled(format!("{}{}  ", marker, option), style));
    }

    Line::from(spans)
}

fn label_style(theme: &Theme, focused: bool) -> Style {
    if focused {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.grey2)
    }
}

pub(crate) fn border_style(theme: &Theme, focused: bool) -> Style {
    if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.grey0)
    }
}
