// src/ui/widgets/sound_list.rs
//! Selectable list of clips, used by both the bundled and recorded screens.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::ui::icons::icon_for_row;

/// Render a list of clips; `playing` marks the row whose clip is active.
pub fn render_sound_list(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    rows: &[String],
    playing: Option<usize>,
    state: &mut ListState,
) {
    let items: Vec<ListItem> = if rows.is_empty() {
        vec![ListItem::new("No recordings yet").style(Style::default().fg(Color::DarkGray))]
    } else {
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                let is_playing = playing == Some(i);
                let item = ListItem::new(format!("{} {}", icon_for_row(is_playing), row));
                if is_playing {
                    item.style(Style::default().fg(Color::Green))
                } else {
                    item
                }
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, state);
}
