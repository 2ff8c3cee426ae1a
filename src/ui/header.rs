//! Header Component
//!
//! Displays the API endpoint, the active view and record counts.

use crate::app::App;
use placedash::view::{ViewData, ViewStatus};
use placedash::VERSION;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" placedash v{} ", VERSION),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    // Row 1: API endpoint
    let api_line = Line::from(vec![
        Span::styled(" API: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            &app.api_url,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(api_line), rows[0]);

    // Row 2: Current view, status and count
    let status = app.view.status();
    let status_color = match status {
        ViewStatus::Ready => Color::Green,
        ViewStatus::Loading => Color::Yellow,
        ViewStatus::Error => Color::Red,
    };

    let mut view_info = vec![
        Span::styled(" View: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.route().title(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Status: ", Style::default().fg(Color::DarkGray)),
        Span::styled(status.as_str(), Style::default().fg(status_color)),
    ];

    if let Some(data) = app.view.data() {
        if !matches!(data, ViewData::Dashboard { .. }) {
            view_info.push(Span::raw("  "));
            view_info.push(Span::styled("Count: ", Style::default().fg(Color::DarkGray)));
            view_info.push(Span::styled(
                data.row_count().to_string(),
                Style::default().fg(Color::White),
            ));
        }
    }
    if !app.search().is_empty() {
        view_info.push(Span::styled(
            format!(" (filter: {})", app.search()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(view_info)), rows[1]);

    // Row 3: Help hint
    let help_line = Line::from(Span::styled(
        " ?:help  ::cmd  /:filter  1:dashboard  2:users  3:posts  R:refresh  q:quit",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(help_line), rows[2]);
}
