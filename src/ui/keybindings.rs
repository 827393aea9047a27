// src/ui/keybindings.rs
//! Keyboard input handling and key mappings.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::Screen;

/// Map digit keys to a screen number (1..4).
pub fn map_key_to_digit(k: &KeyEvent) -> Option<usize> {
    if let KeyCode::Char(c) = k.code {
        match c {
            '1' => Some(1),
            '2' => Some(2),
            '3' => Some(3),
            '4' => Some(4),
            _ => None,
        }
    } else {
        None
    }
}

/// Navigation actions derived from key events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationAction {
    Up,
    Down,
    Enter,
    Back,
    Stop,
    Delete,
    ToggleRecord,
    GoTo(Screen),
    Quit,
    None,
}

/// Convert a key event to a navigation action.
pub fn key_to_action(key: &KeyEvent) -> NavigationAction {
    if let Some(screen) = map_key_to_digit(key).and_then(Screen::from_number) {
        return NavigationAction::GoTo(screen);
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
        KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
        KeyCode::Enter | KeyCode::Right | KeyCode::Char(' ') => NavigationAction::Enter,
        KeyCode::Left | KeyCode::Esc | KeyCode::Backspace => NavigationAction::Back,
        KeyCode::Char('s') => NavigationAction::Stop,
        KeyCode::Char('d') | KeyCode::Delete => NavigationAction::Delete,
        KeyCode::Char('r') => NavigationAction::ToggleRecord,
        KeyCode::Char('q') => NavigationAction::Quit,
        _ => NavigationAction::None,
    }
}
