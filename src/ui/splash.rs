//! Splash Screen
//!
//! Loading screen shown while the first view is fetched.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Configuration, client, first view
const TOTAL_STEPS: usize = 3;

const LOGO: &[&str] = &[
    "       _                    _           _     ",
    " _ __ | | __ _  ___ ___  __| | __ _ ___| |__  ",
    "| '_ \\| |/ _` |/ __/ _ \\/ _` |/ _` / __| '_ \\ ",
    "| |_) | | (_| | (_|  __/ (_| | (_| \\__ \\ | | |",
    "| .__/|_|\\__,_|\\___\\___|\\__,_|\\__,_|___/_| |_|",
    "|_|                                           ",
];

/// Splash screen state
pub struct SplashState {
    message: String,
    completed_steps: usize,
}

impl SplashState {
    pub fn new() -> Self {
        Self {
            message: "Initializing...".to_string(),
            completed_steps: 0,
        }
    }

    pub fn set_message(&mut self, message: &str) {
        self.message = message.to_string();
    }

    pub fn complete_step(&mut self) {
        self.completed_steps = (self.completed_steps + 1).min(TOTAL_STEPS);
    }

    fn progress(&self) -> f64 {
        self.completed_steps as f64 / TOTAL_STEPS as f64
    }
}

impl Default for SplashState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render(f: &mut Frame, state: &SplashState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Length(12),
            Constraint::Percentage(35),
        ])
        .split(f.area());

    let center = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(chunks[1])[1];

    let mut logo: Vec<Line> = LOGO
        .iter()
        .map(|l| Line::from(Span::styled(*l, Style::default().fg(Color::Cyan))))
        .collect();
    logo.push(Line::from(""));
    logo.push(Line::from(Span::styled(
        "Users, posts and comments in your terminal",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));

    let logo_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let inner = logo_block.inner(center);
    f.render_widget(logo_block, center);

    let inner_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    f.render_widget(
        Paragraph::new(logo).alignment(Alignment::Center),
        inner_chunks[0],
    );

    let progress = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(state.progress())
        .label(Span::styled(
            state.message.as_str(),
            Style::default().fg(Color::White),
        ));

    f.render_widget(progress, inner_chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_caps_at_total() {
        let mut state = SplashState::new();
        assert_eq!(state.progress(), 0.0);
        for _ in 0..5 {
            state.complete_step();
        }
        assert_eq!(state.progress(), 1.0);
    }
}
