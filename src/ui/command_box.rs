//! Command Box
//!
//! `:` command input with ghost-text completion of the highlighted suggestion.

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Suggestions shown at once
const MAX_SUGGESTIONS: usize = 8;

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(MAX_SUGGESTIONS as u16 + 5),
        ])
        .split(f.area());

    let command_area = chunks[1];
    f.render_widget(Clear, command_area);

    let inner_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(command_area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Command ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    // Typed text in white, the rest of the preview as ghost text
    let ghost = app
        .command_preview
        .as_deref()
        .and_then(|preview| preview.strip_prefix(app.command_text.as_str()))
        .unwrap_or("");

    let input = Line::from(vec![
        Span::styled(":", Style::default().fg(Color::Cyan)),
        Span::styled(app.command_text.as_str(), Style::default().fg(Color::White)),
        Span::styled(ghost, Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(input).block(input_block), inner_chunks[0]);

    let suggestions_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(
                " Suggestions [{}] (↑/↓ select, Tab complete) ",
                app.command_suggestions.len()
            ),
            Style::default().fg(Color::DarkGray),
        ));

    // Keep the highlighted suggestion inside the visible window
    let offset = app
        .command_suggestion_selected
        .saturating_sub(MAX_SUGGESTIONS - 1);
    let items: Vec<ListItem> = app
        .command_suggestions
        .iter()
        .skip(offset)
        .take(MAX_SUGGESTIONS)
        .map(|cmd| ListItem::new(format!("  {}", cmd)))
        .collect();

    let list = List::new(items)
        .block(suggestions_block)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.command_suggestions.is_empty() {
        state.select(Some(app.command_suggestion_selected - offset));
    }
    f.render_stateful_widget(list, inner_chunks[1], &mut state);
}
