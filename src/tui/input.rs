use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Activate,
    NextRecord,
    Cancel,
    CycleCategory,
    CycleRole,
    CycleUniverse,
    ToggleFocus,
    ToggleGraph,
    ToggleHelp,
    Quit,
    Noop,
}

pub fn action_for_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up => Action::Move(Direction::Up),
        KeyCode::Down => Action::Move(Direction::Down),
        KeyCode::Char('k') => Action::Move(Direction::Up),
        KeyCode::Char('j') => Action::Move(Direction::Down),
        KeyCode::Enter => Action::Activate,
        KeyCode::Tab => Action::NextRecord,
        KeyCode::Esc => Action::Cancel,
        KeyCode::Backspace => Action::Cancel,
        KeyCode::Char('c') => Action::CycleCategory,
        KeyCode::Char('r') => Action::CycleRole,
        KeyCode::Char('u') => Action::CycleUniverse,
        KeyCode::Char('f') => Action::ToggleFocus,
        KeyCode::Char('g') => Action::ToggleGraph,
        KeyCode::Char('?') => Action::ToggleHelp,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::Noop,
    }
}
