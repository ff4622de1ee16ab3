use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::theme::{priority_color, status_color};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ratatui::style::Color::Cyan))
        .title(" Details ");

    let Some(item) = app.selected() else {
        f.render_widget(block, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    if let Some(title) = &item.title {
        lines.push(Line::styled(
            title.as_str(),
            Style::default().add_modifier(ratatui::style::Modifier::BOLD),
        ));
        lines.push(Line::raw(""));
    }

    if let Some(status) = &item.status {
        lines.push(Line::from(vec![
            label("Status: "),
            Span::styled(status, Style::default().fg(status_color(status))),
        ]));
    }

    if let Some(priority) = &item.priority {
        lines.push(Line::from(vec![
            label("Priority: "),
            Span::styled(priority, Style::default().fg(priority_color(priority))),
        ]));
    }

    if let Some(deadline) = &item.deadline {
        lines.push(Line::from(vec![label("Deadline: "), Span::raw(deadline)]));
    }

    if let Some(members) = item.members_display() {
        lines.push(Line::from(vec![label("Members: "), Span::raw(members)]));
    }

    if let Some(created) = &item.created {
        lines.push(Line::from(vec![label("Created: "), Span::raw(created)]));
    }

    if let Some(url) = app.details.as_ref().map(|d| &d.url) {
        lines.push(Line::from(vec![
            label("Board: "),
            Span::styled(url, Style::default().fg(ratatui::style::Color::Blue)),
        ]));
    }

    if let Some(notes) = &item.notes {
        lines.push(Line::raw(""));
        let truncated: String = notes.chars().take(300).collect();
        lines.push(Line::raw(truncated));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn label(text: &'static str) -> Span<'static> {
    Span::styled(text, Style::default().fg(ratatui::style::Color::Gray))
}
