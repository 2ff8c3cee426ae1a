//! Help Overlay
//!
//! Shows keyboard shortcuts and help information.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
}

fn key(keys: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", keys), Style::default().fg(Color::Yellow)),
        Span::raw(description),
    ])
}

pub fn render(f: &mut Frame, _app: &App) {
    let area = f.area();
    let popup_area = centered_rect(70, 80, area);

    f.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Navigation"),
        key("j/k, ↑/↓", "Move up/down"),
        key("gg", "Go to top"),
        key("G", "Go to bottom"),
        key("Ctrl+d/u", "Page down/up"),
        Line::from(""),
        section("Views"),
        key("1 / 2 / 3", "Dashboard / Users / Posts"),
        key("Enter", "Open selected user or post"),
        key("u", "Open the author of a post"),
        key("b/Backspace", "Go back"),
        key("R", "Refresh current view"),
        Line::from(""),
        section("Filtering"),
        key("/", "Search users or posts"),
        key("Esc", "Clear search"),
        Line::from(""),
        section("Commands"),
        key(":", "Enter command mode"),
        key(":users [id]", "Users list or one profile"),
        key(":posts [id]", "Posts list or one post"),
        key(":dashboard", "Summary dashboard"),
        Line::from(""),
        key("?/Esc", "Close help"),
        key("q", "Quit application"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
