use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePlay,
    Play,
    Pause,
    SpeedUp,
    SpeedDown,
    FontSizeUp,
    FontSizeDown,
    WordSpacingUp,
    WordSpacingDown,
    JumpToTop,
    PageUp,
    PageDown,
    DismissWarnings,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    // Ctrl+C always quits, even with the warning popup open
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // Any other key just closes the popup
    if app.warnings_visible() {
        return Action::DismissWarnings;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

        KeyCode::Char(' ') => Action::TogglePlay,
        KeyCode::Char('p') => Action::Play,
        KeyCode::Char('s') => Action::Pause,

        KeyCode::Up | KeyCode::Char('k') => Action::SpeedUp,
        KeyCode::Down | KeyCode::Char('j') => Action::SpeedDown,

        KeyCode::Char('+') | KeyCode::Char('=') => Action::FontSizeUp,
        KeyCode::Char('-') => Action::FontSizeDown,

        KeyCode::Char(']') => Action::WordSpacingUp,
        KeyCode::Char('[') => Action::WordSpacingDown,

        KeyCode::Home | KeyCode::Char('g') => Action::JumpToTop,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,

        _ => Action::None,
    }
}

/// Apply an action to the app. Returns false once the app should exit.
pub fn apply_action(action: Action, app: &mut App) -> bool {
    match action {
        Action::Quit => return false,
        Action::TogglePlay => app.toggle_play(),
        Action::Play => app.play(),
        Action::Pause => app.pause(),
        Action::SpeedUp => app.speed_up(),
        Action::SpeedDown => app.speed_down(),
        Action::FontSizeUp => app.font_size_up(),
        Action::FontSizeDown => app.font_size_down(),
        Action::WordSpacingUp => app.change_word_spacing(1),
        Action::WordSpacingDown => app.change_word_spacing(-1),
        Action::JumpToTop => app.jump_to_top(),
        Action::PageUp => app.page(-1),
        Action::PageDown => app.page(1),
        Action::DismissWarnings => app.dismiss_warnings(),
        Action::None => {}
    }
    true
}

/// Text shown in the status bar hint
pub const HELP_HINT: &str = " space:play/pause ↑↓:speed +-:size []:spacing g:top q:quit ";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Preferences;
    use autocue_core::ScrollEngine;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_key_bindings() {
        let app = App::new(ScrollEngine::with_defaults(|_| {}), None, Preferences::default());

        assert_eq!(handle_key_event(key(KeyCode::Char(' ')), &app), Action::TogglePlay);
        assert_eq!(handle_key_event(key(KeyCode::Up), &app), Action::SpeedUp);
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::SpeedDown);
        assert_eq!(handle_key_event(key(KeyCode::Char('=')), &app), Action::FontSizeUp);
        assert_eq!(handle_key_event(key(KeyCode::Char('-')), &app), Action::FontSizeDown);
        assert_eq!(handle_key_event(key(KeyCode::Char(']')), &app), Action::WordSpacingUp);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('z')), &app), Action::None);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Action::Quit
        );

        app.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_popup_swallows_keys() {
        let mut app = App::new(ScrollEngine::with_defaults(|_| {}), None, Preferences::default());
        app.set_warnings(vec!["speed 900 out of range, clamped".to_string()]);

        assert_eq!(handle_key_event(key(KeyCode::Char(' ')), &app), Action::DismissWarnings);
        assert!(apply_action(Action::DismissWarnings, &mut app));
        assert!(!app.warnings_visible());
        assert_eq!(handle_key_event(key(KeyCode::Char(' ')), &app), Action::TogglePlay);

        app.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_apply_action_quit() {
        let mut app = App::new(ScrollEngine::with_defaults(|_| {}), None, Preferences::default());
        assert!(!apply_action(Action::Quit, &mut app));
        assert!(apply_action(Action::SpeedUp, &mut app));
        assert_eq!(app.speed(), 40.0);
        app.shutdown().await.unwrap();
    }
}
