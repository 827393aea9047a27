// src/ui/icons.rs
//! Icons for list rows and screen titles (Nerd Font glyphs).

use crate::app::Screen;

pub const PLAYING: &str = "\u{f04b}";
pub const IDLE: &str = "\u{f001}";
pub const MICROPHONE: &str = "\u{f130}";
pub const RECORDING: &str = "\u{f111}";

/// Get the icon shown next to a screen's title.
pub fn icon_for_screen(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => "\u{f015}",
        Screen::PlaySounds => "\u{f028}",
        Screen::RecordSounds => MICROPHONE,
        Screen::UserSounds => "\u{f03a}",
    }
}

/// Get the icon for a sound row.
pub fn icon_for_row(is_playing: bool) -> &'static str {
    if is_playing { PLAYING } else { IDLE }
}
