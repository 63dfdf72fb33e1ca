use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    LineUp,
    LineDown,
    HalfPageUp,
    HalfPageDown,
    JumpTop,
    JumpBottom,
    None,
}

pub fn handle_key(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _)
        | (KeyCode::Char('Q'), _)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Line scroll: arrow keys and vim jk
        (KeyCode::Up,   _) | (KeyCode::Char('k'), _) => Action::LineUp,
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Action::LineDown,

        // Space pages on, like `more`
        (KeyCode::Char(' '), _)
        | (KeyCode::PageDown, _)
        | (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::HalfPageDown,
        (KeyCode::PageUp, _)
        | (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::HalfPageUp,

        // Jump to first / last
        (KeyCode::Char('g'), _) | (KeyCode::Home, _) => Action::JumpTop,
        (KeyCode::Char('G'), _) | (KeyCode::End,  _) => Action::JumpBottom,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_space_pages_down() {
        assert_eq!(handle_key(key(KeyCode::Char(' '))), Action::HalfPageDown);
        assert_eq!(handle_key(key(KeyCode::PageDown)), Action::HalfPageDown);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(handle_key(key(KeyCode::Char('c'))), Action::None);
    }

    #[test]
    fn test_vim_navigation() {
        assert_eq!(handle_key(key(KeyCode::Char('j'))), Action::LineDown);
        assert_eq!(handle_key(key(KeyCode::Char('k'))), Action::LineUp);
        assert_eq!(handle_key(key(KeyCode::Char('G'))), Action::JumpBottom);
    }
}
