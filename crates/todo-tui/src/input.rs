use crossterm::event::{KeyCode, KeyEvent};

use todo_core::{Action, Filter};

use crate::ui::{App, InputMode};

pub(crate) fn handle_key(app: &mut App, key: KeyEvent) {
    // Any keypress retires the previous status message
    app.clear_status();

    match app.input_mode {
        InputMode::Editing => handle_editing_key(app, key),
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_editing_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => app.submit_draft(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Char(c) => app.enter_char(c),
        _ => {}
    }
}

fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('p') => app.go_prev(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('n') => app.go_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('x') => app.toggle_selected(),
        KeyCode::Tab | KeyCode::Char('f') => app.dispatch(Action::CycleFilter),
        KeyCode::Char('1') => app.dispatch(Action::SetFilter(Filter::All)),
        KeyCode::Char('2') => app.dispatch(Action::SetFilter(Filter::Open)),
        KeyCode::Char('3') => app.dispatch(Action::SetFilter(Filter::Completed)),
        KeyCode::Char('a') | KeyCode::Char('i') => app.input_mode = InputMode::Editing,
        KeyCode::Char('r') => app.retry(),
        KeyCode::Char('u') => app.dispatch(Action::Revalidate),
        _ => {}
    }
}
