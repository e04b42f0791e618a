use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Focus, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    FocusResults,
    FocusForm,
    NextChoice,
    PrevChoice,
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    EditTopic,
    Fetch,
    OpenInBrowser,
    ShowHelp,
    ExitMode,
    Confirm,
    ClearInput,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    match &app.mode {
        // Any key dismisses overlays
        Mode::Help | Mode::Error(_) => return Action::ExitMode,
        _ => {}
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Tab, _) => Action::FocusNext,
        (KeyCode::BackTab, _) => Action::FocusPrev,

        // Radio buttons
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, KeyModifiers::NONE)
            if is_choice(app.focus) =>
        {
            Action::PrevChoice
        }
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, KeyModifiers::NONE)
            if is_choice(app.focus) =>
        {
            Action::NextChoice
        }
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, KeyModifiers::NONE) => {
            Action::FocusResults
        }
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, KeyModifiers::NONE) => {
            Action::FocusForm
        }

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, KeyModifiers::NONE) => {
            Action::MoveDown
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, KeyModifiers::NONE) => {
            Action::MoveUp
        }
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpToTop,
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,

        (KeyCode::Char('i'), KeyModifiers::NONE) | (KeyCode::Char('/'), KeyModifiers::NONE) => {
            Action::EditTopic
        }
        (KeyCode::Char('f'), KeyModifiers::NONE) | (KeyCode::Char('r'), KeyModifiers::NONE) => {
            Action::Fetch
        }

        (KeyCode::Enter, KeyModifiers::NONE) => match app.focus {
            Focus::Topic => Action::EditTopic,
            Focus::Sentiment | Focus::Length => Action::NextChoice,
            Focus::FetchButton => Action::Fetch,
            Focus::Results => Action::FocusResults,
            Focus::Detail => Action::OpenInBrowser,
        },

        (KeyCode::Char('b'), KeyModifiers::NONE)
            if matches!(app.focus, Focus::Results | Focus::Detail) =>
        {
            Action::OpenInBrowser
        }

        (KeyCode::Char('?'), _) => Action::ShowHelp,
        (KeyCode::Esc, _) if !app.focus.is_form() => Action::FocusForm,

        _ => Action::None,
    }
}

fn is_choice(focus: Focus) -> bool {
    matches!(focus, Focus::Sentiment | Focus::Length)
}

fn handle_input_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Action::ExitMode,
        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ClearInput,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::InputChar(c)
        }
        _ => Action::None,
    }
}

/// Apply an action to the app state.
///
/// Returns the selection to run when the action starts a fetch.
pub fn apply_action(action: Action, app: &mut App) -> Option<newscurator_core::UserSelection> {
    match action {
        Action::Quit => app.should_quit = true,
        Action::FocusNext => app.focus_next(),
        Action::FocusPrev => app.focus_prev(),
        Action::FocusResults => app.focus_results(),
        Action::FocusForm => app.focus_form(),
        Action::NextChoice => app.cycle_choice(true),
        Action::PrevChoice => app.cycle_choice(false),
        Action::MoveUp => app.move_up(),
        Action::MoveDown => app.move_down(),
        Action::JumpToTop => app.jump_to_top(),
        Action::JumpToBottom => app.jump_to_bottom(),
        Action::EditTopic => app.start_editing(),
        Action::Fetch | Action::Confirm => return app.begin_fetch(),
        Action::ShowHelp => app.show_help(),
        Action::ExitMode => app.exit_mode(),
        Action::ClearInput => app.clear_topic(),
        Action::InputChar(c) => app.input_char(c),
        Action::Backspace => app.backspace(),
        // Needs the terminal, handled by the caller
        Action::OpenInBrowser | Action::None => {}
    }
    None
}
