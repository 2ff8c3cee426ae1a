//! Terminal User Interface rendering module
//!
//! This module handles all UI rendering for placedash using the ratatui
//! framework. It only ever reads the resolved view state held by the app;
//! the cache and the fetcher stay behind the view layer.
//!
//! # Architecture
//!
//! - [`splash`] - Startup splash screen
//! - `header` - Header bar with API and view info
//! - `dashboard` - Summary cards, count chart and share gauges
//! - `tables` - Virtual-scrolled tables for users, posts and comments
//! - `detail` - User profile (with map) and post detail
//! - `help` - Help overlay showing keybindings
//! - `command_box` - Command mode input (`:` key)

mod command_box;
mod dashboard;
mod detail;
mod header;
mod help;
pub mod splash;
mod tables;

use crate::app::{App, Mode};
use placedash::api::http::format_fetch_error;
use placedash::api::FetchError;
use placedash::view::{ViewData, ViewState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header (multi-line)
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Footer/crumb
        ])
        .split(f.area());

    header::render(f, app, chunks[0]);
    render_main_content(f, app, chunks[1]);
    render_crumb(f, app, chunks[2]);

    // Overlays
    match app.mode {
        Mode::Help => {
            help::render(f, app);
        },
        Mode::Command => {
            command_box::render(f, app);
        },
        Mode::Normal => {},
    }
}

fn render_main_content(f: &mut Frame, app: &mut App, area: Rect) {
    // If filter is active or has text, show filter input above the view
    let show_filter = app.filter_active || !app.filter_text.is_empty();

    let area = if show_filter {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(area);

        render_filter_bar(f, app, chunks[0]);
        chunks[1]
    } else {
        area
    };

    // Renderers borrow the app mutably for scrolling, so the view is moved
    // out for the frame and put back afterwards
    let view = std::mem::replace(&mut app.view, ViewState::Loading);
    render_view(f, app, &view, area);
    app.view = view;
}

fn render_view(f: &mut Frame, app: &mut App, view: &ViewState<ViewData>, area: Rect) {
    match view {
        ViewState::Loading => render_loading(f, app, area),
        ViewState::Error(err) => render_error(f, app, err, area),
        ViewState::Ready(data) => match data {
            ViewData::Dashboard { counts, shares } => {
                dashboard::render(f, Some((counts, shares)), area);
            },
            ViewData::Users { users } => tables::render_users(f, app, users, area),
            ViewData::Posts { posts } => tables::render_posts(f, app, posts, area),
            ViewData::UserProfile {
                user,
                location,
                embed_url,
                posts,
            } => {
                detail::render_profile(
                    f,
                    app,
                    detail::Profile {
                        user,
                        location: *location,
                        embed_url: embed_url.as_deref(),
                        posts,
                    },
                    area,
                );
            },
            ViewData::PostDetail {
                post,
                author_name,
                comments,
                ..
            } => {
                detail::render_post(f, app, post, author_name, comments, area);
            },
        },
    }
}

fn render_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let cursor_style = if app.filter_active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let filter_display = if app.filter_active {
        format!("/{}_", app.filter_text)
    } else {
        format!("/{}", app.filter_text)
    };

    let paragraph = Paragraph::new(Line::from(vec![Span::styled(filter_display, cursor_style)]));
    f.render_widget(paragraph, area);
}

/// Placeholder while the route's dependencies are in flight
fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    if app.route() == placedash::view::Route::Dashboard {
        dashboard::render(f, None, area);
        return;
    }

    let block = titled_block(&app.route().title(), Color::DarkGray);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "Loading...",
        Style::default().fg(Color::Yellow),
    )))
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(paragraph, area);
}

/// Generic failure notice; only this view fails, the app keeps running
fn render_error(f: &mut Frame, app: &App, err: &FetchError, area: Rect) {
    let notice = format_fetch_error(err);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            notice,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "R: retry  b: back  1/2/3: switch view",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(titled_block(&app.route().title(), Color::Red));
    f.render_widget(paragraph, area);
}

/// Bordered block with a centered bold title
fn titled_block(title: &str, border: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
}

/// Truncate string for display (Unicode-safe)
fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

fn render_crumb(f: &mut Frame, app: &App, area: Rect) {
    let crumb_display = app.get_breadcrumb().join(" > ");

    let notice = app.view_notice();
    let status_text = if let Some(err) = &app.error_message {
        format!("Error: {}", err)
    } else if let Some(notice) = &notice {
        notice.clone()
    } else if matches!(app.view, ViewState::Loading) {
        "Loading...".to_string()
    } else if app.filter_active {
        "Type to filter | Enter: apply | Esc: clear".to_string()
    } else {
        key_hints(app).to_string()
    };

    let style = if app.error_message.is_some() || notice.is_some() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if matches!(app.view, ViewState::Loading) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let crumb = Line::from(vec![
        Span::styled(
            format!("<{}>", crumb_display),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(status_text, style),
    ]);

    f.render_widget(Paragraph::new(crumb), area);
}

fn key_hints(app: &App) -> &'static str {
    match app.view.data() {
        Some(ViewData::Users { .. }) | Some(ViewData::Posts { .. }) => {
            "Enter: open | /: filter | R: refresh"
        },
        Some(ViewData::UserProfile { .. }) => "Enter: open post | /: filter | b: back",
        Some(ViewData::PostDetail { .. }) => "u: author | j/k: comments | b: back",
        _ => "1: dashboard | 2: users | 3: posts | R: refresh",
    }
}
