pub mod detail_panel;
pub mod footer;
pub mod item_list;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // main content
            Constraint::Length(1), // footer
        ])
        .split(size);

    // Items (60%) + Detail (40%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(vertical[0]);

    item_list::render(f, horizontal[0], app);
    detail_panel::render(f, horizontal[1], app);
    footer::render(f, vertical[1], app);
}
