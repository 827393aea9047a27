// src/ui/widgets/home_menu.rs
//! Home screen menu.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::Screen;
use crate::ui::icons::icon_for_screen;

/// Render the home menu.
pub fn render_home_menu(
    f: &mut Frame<'_>,
    area: Rect,
    entries: &[(&str, Screen)],
    state: &mut ListState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    f.render_widget(
        Paragraph::new("Well.. A more structured version!")
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        chunks[0],
    );

    let items: Vec<ListItem> = entries
        .iter()
        .map(|(label, screen)| ListItem::new(format!("{} {}", icon_for_screen(*screen), label)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, chunks[1], state);
}
