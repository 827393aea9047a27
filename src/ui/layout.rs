// src/ui/layout.rs
//! Layout computation for the UI panels.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Computed layout areas for rendering.
pub struct ComputedLayout {
    /// Title bar with the current screen and what is playing
    pub header: Rect,
    /// Screen content
    pub body: Rect,
    /// Key hints
    pub footer: Rect,
}

/// Split the terminal into header, body and footer.
pub fn compute_layout(area: Rect) -> ComputedLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    ComputedLayout {
        header: chunks[0],
        body: chunks[1],
        footer: chunks[2],
    }
}
