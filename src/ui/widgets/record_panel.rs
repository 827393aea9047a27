// src/ui/widgets/record_panel.rs
//! Record button and input level meter.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::audio::RecordingState;
use crate::ui::icons::{MICROPHONE, RECORDING};

/// Render the record screen.
pub fn render_record_panel(f: &mut Frame<'_>, area: Rect, state: &RecordingState, level: f32) {
    f.render_widget(
        Block::default().borders(Borders::ALL).title("Record Sounds"),
        area,
    );

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let (label, detail) = match state {
        RecordingState::Idle => (
            Span::styled(
                format!(" {} START RECORDING ", MICROPHONE),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            String::from("Press enter to record"),
        ),
        RecordingState::Recording { path } => (
            Span::styled(
                format!(" {} STOP RECORDING ", RECORDING),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            format!("Recording to {}", path.display()),
        ),
        RecordingState::Stopping => (
            Span::styled(" SAVING… ", Style::default().fg(Color::Yellow)),
            String::new(),
        ),
    };

    f.render_widget(
        Paragraph::new(detail).alignment(Alignment::Center),
        inner[0],
    );
    f.render_widget(
        Paragraph::new(Line::from(label)).alignment(Alignment::Center),
        inner[1],
    );

    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Magenta))
            .ratio(f64::from(level).clamp(0.0, 1.0))
            .label("input level"),
        inner[2],
    );
}
