use std::sync::Arc;

use newscurator_core::ai::SummaryLength;
use newscurator_core::{AppConfig, CuratedItem, SentimentFilter, UserSelection};

use crate::event::FetchResult;
use crate::theme::Theme;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Current focus in the UI, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Topic,
    Sentiment,
    Length,
    FetchButton,
    Results,
    Detail,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Topic,
        Focus::Sentiment,
        Focus::Length,
        Focus::FetchButton,
        Focus::Results,
        Focus::Detail,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_form(self) -> bool {
        matches!(
            self,
            Focus::Topic | Focus::Sentiment | Focus::Length | Focus::FetchButton
        )
    }
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation
    Normal,
    /// Typing into the topic field
    EditingTopic,
    /// Error popup, dismissed by any key
    Error(String),
    /// Help overlay
    Help,
}

/// Severity of the status bar message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Active color theme
    pub theme: Theme,
    /// Topic field contents
    pub topic: String,
    pub sentiment_filter: SentimentFilter,
    pub summary_length: SummaryLength,
    /// Current focus
    pub focus: Focus,
    /// Current application mode
    pub mode: Mode,
    /// Items from the last successful run
    pub items: Vec<CuratedItem>,
    /// Currently selected item index
    pub selected_item: usize,
    /// Scroll offset for the detail panel
    pub detail_scroll: u16,
    /// Selection used by the last completed run
    pub last_selection: Option<UserSelection>,
    /// Articles dropped from the last run because their summary failed
    pub skipped_count: usize,
    /// A run is in flight
    pub is_fetching: bool,
    spinner_frame: usize,
    /// Status message
    pub status_message: Option<StatusMessage>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let topic = config.ui.default_topic.clone();
        Self {
            config,
            theme,
            topic,
            sentiment_filter: SentimentFilter::default(),
            summary_length: SummaryLength::default(),
            focus: Focus::Topic,
            mode: Mode::Normal,
            items: Vec::new(),
            selected_item: 0,
            detail_scroll: 0,
            last_selection: None,
            skipped_count: 0,
            is_fetching: false,
            spinner_frame: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn current_item(&self) -> Option<&CuratedItem> {
        self.items.get(self.selected_item)
    }

    pub fn is_input_mode(&self) -> bool {
        self.mode == Mode::EditingTopic
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn focus_results(&mut self) {
        self.focus = if self.focus == Focus::Results {
            Focus::Detail
        } else {
            Focus::Results
        };
    }

    pub fn focus_form(&mut self) {
        self.focus = Focus::Topic;
    }

    /// Move the radio choice under focus forward or backward
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            Focus::Sentiment => {
                self.sentiment_filter = cycle(&SentimentFilter::ALL, self.sentiment_filter, forward);
            }
            Focus::Length => {
                self.summary_length = cycle(&SummaryLength::ALL, self.summary_length, forward);
            }
            _ => {}
        }
    }

    pub fn start_editing(&mut self) {
        self.focus = Focus::Topic;
        self.mode = Mode::EditingTopic;
    }

    pub fn stop_editing(&mut self) {
        if self.mode == Mode::EditingTopic {
            self.mode = Mode::Normal;
        }
    }

    pub fn input_char(&mut self, c: char) {
        if self.is_input_mode() {
            self.topic.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.is_input_mode() {
            self.topic.pop();
        }
    }

    pub fn clear_topic(&mut self) {
        if self.is_input_mode() {
            self.topic.clear();
        }
    }

    /// The form's current values
    pub fn selection(&self) -> UserSelection {
        UserSelection::new(
            self.topic.trim(),
            self.sentiment_filter,
            self.summary_length,
        )
    }

    /// Validate the form and mark a run as started.
    ///
    /// Returns the selection to run with, or `None` when the topic is empty
    /// or a run is already in flight.
    pub fn begin_fetch(&mut self) -> Option<UserSelection> {
        if self.is_fetching {
            return None;
        }

        let selection = self.selection();
        if selection.topic.is_empty() {
            self.set_status(StatusKind::Error, "Please enter a topic to search.");
            self.focus = Focus::Topic;
            return None;
        }

        self.stop_editing();
        self.is_fetching = true;
        self.set_status(StatusKind::Info, "Fetching and analyzing news...");
        Some(selection)
    }

    /// Apply the outcome of a run
    pub fn finish_fetch(&mut self, result: FetchResult) {
        self.is_fetching = false;

        match result {
            FetchResult::Success { selection, report } => {
                self.items = report.items;
                self.selected_item = 0;
                self.detail_scroll = 0;
                self.last_selection = Some(selection);

                self.skipped_count = report.skipped.len();

                if let (true, Some(first)) = (self.items.is_empty(), report.skipped.first()) {
                    let message = format!(
                        "All {} summaries failed: {}",
                        report.skipped.len(),
                        first.reason
                    );
                    self.set_status(StatusKind::Error, message.clone());
                    self.mode = Mode::Error(message);
                } else if self.items.is_empty() {
                    self.set_status(StatusKind::Warning, "No articles found matching your filters.");
                } else if report.skipped.is_empty() {
                    let message = format!(
                        "{} articles curated from {} fetched",
                        self.items.len(),
                        report.fetched
                    );
                    self.set_status(StatusKind::Info, message);
                    self.focus = Focus::Results;
                } else {
                    let message = format!(
                        "{} articles curated, {} skipped (summary failed: {})",
                        self.items.len(),
                        report.skipped.len(),
                        report.skipped[0].reason
                    );
                    self.set_status(StatusKind::Warning, message);
                    self.focus = Focus::Results;
                }
            }
            FetchResult::Failure { error } => {
                self.set_status(StatusKind::Error, error.clone());
                self.mode = Mode::Error(error);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Results => {
                if self.selected_item + 1 < self.items.len() {
                    self.selected_item += 1;
                    self.detail_scroll = 0;
                }
            }
            Focus::Detail => self.detail_scroll = self.detail_scroll.saturating_add(1),
            _ => self.focus_next(),
        }
    }

    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Results => {
                if self.selected_item > 0 {
                    self.selected_item -= 1;
                    self.detail_scroll = 0;
                }
            }
            Focus::Detail => self.detail_scroll = self.detail_scroll.saturating_sub(1),
            _ => self.focus_prev(),
        }
    }

    pub fn jump_to_top(&mut self) {
        self.selected_item = 0;
        self.detail_scroll = 0;
    }

    pub fn jump_to_bottom(&mut self) {
        self.selected_item = self.items.len().saturating_sub(1);
        self.detail_scroll = 0;
    }

    pub fn show_help(&mut self) {
        self.mode = Mode::Help;
    }

    pub fn exit_mode(&mut self) {
        self.mode = Mode::Normal;
    }

    pub fn tick(&mut self) {
        if self.is_fetching {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward { (idx + 1) % len } else { (idx + len - 1) % len };
    options[next]
}
