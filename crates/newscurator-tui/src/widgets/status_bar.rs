use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus, Mode, StatusKind};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match &app.mode {
            Mode::Normal if app.is_fetching => "FETCHING",
            Mode::Normal => "NORMAL",
            Mode::EditingTopic => "INSERT",
            Mode::Error(_) => "ERROR",
            Mode::Help => "HELP",
        };

        let focus_str = match app.focus {
            Focus::Topic => "Topic",
            Focus::Sentiment => "Sentiment",
            Focus::Length => "Length",
            Focus::FetchButton => "Fetch",
            Focus::Results => "Results",
            Focus::Detail => "Summary",
        };

        let (status_text, status_fg) = match &app.status_message {
            Some(msg) => {
                let fg = match msg.kind {
                    StatusKind::Info => theme.info,
                    StatusKind::Warning => theme.warning,
                    StatusKind::Error => theme.error,
                };
                (format!(" {} | {}", mode_str, msg.text), fg)
            }
            None => (
                format!(" {} | {} | Items: {}", mode_str, focus_str, app.items.len()),
                theme.fg0,
            ),
        };

        let help_hint = if app.is_input_mode() {
            " Enter:fetch Esc:done C-u:clear "
        } else {
            " q:quit Tab:focus i:topic f:fetch b:open ?:help "
        };
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(status_fg).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
