use ratatui::style::Color;

pub fn status_color(status: &str) -> Color {
    match status.to_lowercase().as_str() {
        "done" => Color::Green,
        "in progress" => Color::Cyan,
        "todo" => Color::Yellow,
        "blocked" => Color::Red,
        _ => Color::Gray,
    }
}

pub fn priority_color(priority: &str) -> Color {
    match priority {
        "Urgent" => Color::Red,
        "High" => Color::Yellow,
        "Medium" => Color::Blue,
        "Low" => Color::Gray,
        _ => Color::Gray,
    }
}
