use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy)]
pub enum KeyCommand {
    Quit,
    FocusNext,
    FocusPrev,
    Dismiss,
    Forward(KeyEvent),
    None,
}

pub fn classify(key: &KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            // Ctrl-U and friends belong to the text editor.
            _ => KeyCommand::Forward(*key),
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => KeyCommand::FocusNext,
        KeyCode::BackTab | KeyCode::Up => KeyCommand::FocusPrev,
        KeyCode::Esc => KeyCommand::Dismiss,
        KeyCode::Null => KeyCommand::None,
        _ => KeyCommand::Forward(*key),
    }
}
