use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrev,
    TogglePause,
    Refresh,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,

        // Panel focus
        (KeyCode::Tab, KeyModifiers::NONE) => Action::FocusNext,
        (KeyCode::BackTab, KeyModifiers::SHIFT) => Action::FocusPrev,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::FocusNext,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::FocusPrev,

        // Pause toggle on the focused panel
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::TogglePause,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::TogglePause,

        // Manual content refresh
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Refresh,

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
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_pause_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' '))),
            Action::TogglePause
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('p'))),
            Action::TogglePause
        );
    }

    #[test]
    fn test_unbound_key_is_none() {
        assert_eq!(handle_key_event(key(KeyCode::Char('z'))), Action::None);
    }
}
