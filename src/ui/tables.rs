//! List Tables
//!
//! Virtual-scrolled tables: only the visible rows are built, with a
//! scrollbar indicating position.

use super::{titled_block, truncate_string};
use crate::app::App;
use placedash::api::types::{Comment, Post, User};
use placedash::view::PostRow;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    symbols,
    widgets::{Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table, TableState},
    Frame,
};

/// Column header and width percentage
pub type Column = (&'static str, u16);

const USER_COLUMNS: &[Column] = &[
    ("Name", 24),
    ("Username", 16),
    ("Email", 26),
    ("City", 16),
    ("Company", 18),
];

const POST_COLUMNS: &[Column] = &[("ID", 6), ("Title", 64), ("Author", 30)];

const USER_POST_COLUMNS: &[Column] = &[("ID", 6), ("Title", 94)];

const COMMENT_COLUMNS: &[Column] = &[("Name", 30), ("Email", 25), ("Comment", 45)];

pub fn render_users(f: &mut Frame, app: &mut App, users: &[User], area: Rect) {
    let rows: Vec<Vec<String>> = users
        .iter()
        .map(|u| {
            vec![
                u.name.clone(),
                u.username.clone(),
                u.email.clone(),
                u.address.city.clone(),
                u.company.name.clone(),
            ]
        })
        .collect();

    render_table(f, app, "Users", USER_COLUMNS, &rows, area);
}

pub fn render_posts(f: &mut Frame, app: &mut App, posts: &[PostRow], area: Rect) {
    let rows: Vec<Vec<String>> = posts
        .iter()
        .map(|row| {
            vec![
                row.post.id.to_string(),
                row.post.title.clone(),
                row.author.clone(),
            ]
        })
        .collect();

    render_table(f, app, "Posts", POST_COLUMNS, &rows, area);
}

pub fn render_user_posts(f: &mut Frame, app: &mut App, posts: &[Post], area: Rect) {
    let rows: Vec<Vec<String>> = posts
        .iter()
        .map(|p| vec![p.id.to_string(), p.title.clone()])
        .collect();

    render_table(f, app, "Posts", USER_POST_COLUMNS, &rows, area);
}

pub fn render_comments(f: &mut Frame, app: &mut App, comments: &[Comment], area: Rect) {
    let rows: Vec<Vec<String>> = comments
        .iter()
        .map(|c| vec![c.name.clone(), c.email.clone(), c.body.replace('\n', " ")])
        .collect();

    render_table(f, app, "Comments", COMMENT_COLUMNS, &rows, area);
}

/// Render `rows` with the app's selection and scroll position
fn render_table(
    f: &mut Frame,
    app: &mut App,
    title: &str,
    columns: &[Column],
    rows: &[Vec<String>],
    area: Rect,
) {
    let block = titled_block(&format!("{}[{}]", title, rows.len()), Color::DarkGray);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    // Calculate viewport - account for header row
    let visible_height = (inner_area.height as usize).saturating_sub(1);
    app.update_viewport(visible_height);
    app.ensure_visible();

    let total_items = rows.len();
    let needs_scrollbar = total_items > visible_height;

    let table_area = if needs_scrollbar {
        Rect {
            width: inner_area.width.saturating_sub(1),
            ..inner_area
        }
    } else {
        inner_area
    };

    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        columns
            .iter()
            .map(|(name, _)| Cell::from(format!(" {}", name)).style(header_style)),
    )
    .height(1);

    // Build only visible rows (virtual scrolling)
    let range = app.visible_range();
    let visible = rows.get(range.clone()).unwrap_or_default();
    let table_rows: Vec<Row> = visible
        .iter()
        .map(|cells| {
            Row::new(cells.iter().zip(columns).map(|(value, (_, width))| {
                // Approximate characters available in a percentage column
                let max = (table_area.width as usize * *width as usize / 100).max(4);
                Cell::from(format!(" {}", truncate_string(value, max.saturating_sub(1))))
            }))
        })
        .collect();

    let widths: Vec<Constraint> = columns
        .iter()
        .map(|(_, width)| Constraint::Percentage(*width))
        .collect();

    let table = Table::new(table_rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    // Adjust selected index for virtual scrolling
    let mut state = TableState::default();
    if app.selected >= range.start && app.selected < range.end {
        state.select(Some(app.selected - range.start));
    }

    f.render_stateful_widget(table, table_area, &mut state);

    if needs_scrollbar {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .symbols(symbols::scrollbar::VERTICAL)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));

        let mut scrollbar_state = ScrollbarState::new(total_items.saturating_sub(visible_height))
            .position(app.scroll_offset);

        f.render_stateful_widget(scrollbar, inner_area, &mut scrollbar_state);
    }
}
