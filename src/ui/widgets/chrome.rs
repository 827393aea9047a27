// src/ui/widgets/chrome.rs
//! Header and footer shared by every screen.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::Screen;
use crate::audio::SoundSource;
use crate::ui::icons::{icon_for_screen, PLAYING};

/// Render the title bar: app name, current screen and the active clip.
pub fn render_header(f: &mut Frame<'_>, area: Rect, screen: Screen, now_playing: Option<&SoundSource>) {
    let mut spans = vec![
        Span::styled(
            " SOUNDBOARD! ",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD | Modifier::ITALIC),
        ),
        Span::raw(format!(" {} {}", icon_for_screen(screen), screen)),
    ];
    if let Some(source) = now_playing {
        spans.push(Span::styled(
            format!("   {} {}", PLAYING, source),
            Style::default().fg(Color::Green),
        ));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Key hints for `screen`.
pub fn hints(screen: Screen, is_recording: bool) -> &'static str {
    match screen {
        Screen::Home => "↑/↓ select  enter open  1-4 jump  q quit",
        Screen::PlaySounds => "↑/↓ select  enter play  s stop  esc home  q quit",
        Screen::RecordSounds if is_recording => "enter/r stop & save  esc home  q quit",
        Screen::RecordSounds => "enter/r record  esc home  q quit",
        Screen::UserSounds => "↑/↓ select  enter play  s stop  d delete  esc home  q quit",
    }
}

/// Render the key hint line.
pub fn render_footer(f: &mut Frame<'_>, area: Rect, screen: Screen, is_recording: bool) {
    f.render_widget(
        Paragraph::new(hints(screen, is_recording))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}
