use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::app::App;
use crate::ui::theme::{priority_color, status_color};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = i == app.selected_item;

            let status_span = match &item.status {
                Some(status) => Span::styled("● ", Style::default().fg(status_color(status))),
                None => Span::raw("  "),
            };

            // Truncate title to fit
            let max_title = area.width.saturating_sub(24) as usize;
            let title: String = item
                .title
                .as_deref()
                .unwrap_or("(untitled)")
                .chars()
                .take(max_title)
                .collect();
            let title_style = if selected {
                Style::default()
                    .fg(ratatui::style::Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut spans = vec![status_span, Span::styled(title, title_style)];

            if let Some(priority) = &item.priority {
                spans.push(Span::styled(
                    format!(" [{priority}]"),
                    Style::default().fg(priority_color(priority)),
                ));
            }
            if let Some(deadline) = &item.deadline {
                spans.push(Span::styled(
                    format!(" {deadline}"),
                    Style::default().fg(ratatui::style::Color::DarkGray),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let name = app
        .details
        .as_ref()
        .map(|d| d.title.as_str())
        .unwrap_or("Project");
    let title = if app.loading {
        format!(" {name} (loading...) ")
    } else {
        format!(" {name} ({}) ", app.items.len())
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Cyan))
            .title(title),
    );

    f.render_widget(list, area);
}
