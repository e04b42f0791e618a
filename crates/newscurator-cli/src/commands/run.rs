use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::mpsc;

use newscurator_core::{AppConfig, CurationPipeline, UserSelection};
use newscurator_tui::{
    app::{App, Mode, StatusKind},
    event::{AppEvent, EventHandler, FetchResult},
    input::{apply_action, handle_key_event, Action},
    load_theme,
    widgets::{FormWidget, ItemDetailWidget, PopupWidget, ResultsWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Missing keys surface here, before the terminal is taken over
    let pipeline = Arc::new(CurationPipeline::from_config(&config)?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("News Curator"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), theme);
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    // Channel for async curation results
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchResult>();

    let result = event_loop(
        &mut terminal,
        &mut app,
        &event_handler,
        &pipeline,
        &fetch_tx,
        &mut fetch_rx,
    )
    .await;

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    pipeline: &Arc<CurationPipeline>,
    fetch_tx: &mpsc::UnboundedSender<FetchResult>,
    fetch_rx: &mut mpsc::UnboundedReceiver<FetchResult>,
) -> Result<()> {
    loop {
        // Apply finished runs
        while let Ok(result) = fetch_rx.try_recv() {
            app.finish_fetch(result);
        }

        let view: &App = app;
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: form, content, status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(6),
                    Constraint::Min(1),
                    Constraint::Length(1),
                ])
                .split(size);

            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(2, 5), Constraint::Ratio(3, 5)])
                .split(main_layout[1]);

            FormWidget::render(frame, main_layout[0], view);
            ResultsWidget::render(frame, columns[0], view);
            ItemDetailWidget::render(frame, columns[1], view);
            StatusBarWidget::render(frame, main_layout[2], view);

            match &view.mode {
                Mode::Error(message) => PopupWidget::render_error(frame, &view.theme, message),
                Mode::Help => PopupWidget::render_help(frame, &view.theme),
                _ => {}
            }
        })?;

        if let Some(event) = event_handler.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    if action == Action::OpenInBrowser {
                        open_current_item(app);
                    } else if let Some(selection) = apply_action(action, app) {
                        spawn_fetch(pipeline.clone(), selection, fetch_tx.clone());
                    }
                }
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => app.tick(),
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Run the pipeline off the UI loop and send the outcome back
fn spawn_fetch(
    pipeline: Arc<CurationPipeline>,
    selection: UserSelection,
    tx: mpsc::UnboundedSender<FetchResult>,
) {
    tokio::spawn(async move {
        let result = match pipeline.run(selection.clone()).await {
            Ok(report) => FetchResult::Success { selection, report },
            Err(e) => {
                tracing::error!("Curation run failed: {}", e);
                FetchResult::Failure {
                    error: e.to_string(),
                }
            }
        };
        let _ = tx.send(result);
    });
}

fn open_current_item(app: &mut App) {
    let Some(url) = app.current_item().map(|item| item.url.clone()) else {
        app.set_status(StatusKind::Warning, "No article selected");
        return;
    };

    if let Err(e) = open::that(&url) {
        app.set_status(StatusKind::Error, format!("Failed to open browser: {}", e));
    } else {
        app.set_status(StatusKind::Info, format!("Opening: {}", url));
    }
}
