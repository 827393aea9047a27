// src/app/screen.rs
//! The four named screens.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    PlaySounds,
    RecordSounds,
    UserSounds,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Home,
        Screen::PlaySounds,
        Screen::RecordSounds,
        Screen::UserSounds,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::PlaySounds => "PlaySounds",
            Screen::RecordSounds => "RecordSounds",
            Screen::UserSounds => "UserSounds",
        }
    }

    /// Screens are numbered 1..4 for the jump keys.
    pub fn from_number(n: usize) -> Option<Screen> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
