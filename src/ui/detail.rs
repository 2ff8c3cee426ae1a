//! Detail Views
//!
//! User profile (contact details, a world map marking the user's location,
//! their posts) and post detail (body, author, comments).

use super::{tables, titled_block};
use crate::app::App;
use placedash::api::types::{Comment, Location, Post, User};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span, Text},
    widgets::{
        canvas::{Canvas, Map, MapResolution, Points},
        Paragraph, Wrap,
    },
    Frame,
};

pub struct Profile<'a> {
    pub user: &'a User,
    pub location: Option<Location>,
    pub embed_url: Option<&'a str>,
    pub posts: &'a [Post],
}

/// Label/value lines in the detail panel style
fn field_lines(fields: Vec<(&str, String)>) -> Vec<Line<'static>> {
    fields
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!(" {:<10}", label), Style::default().fg(Color::DarkGray)),
                Span::raw(value),
            ])
        })
        .collect()
}

pub fn render_profile(f: &mut Frame, app: &mut App, profile: Profile<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(3)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let user = profile.user;
    let mut lines = vec![Line::from(Span::styled(
        format!(" {} (@{})", user.name, user.username),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ))];
    lines.extend(field_lines(vec![
        ("Email", user.email.clone()),
        ("Phone", user.phone.clone()),
        ("Website", user.website.clone()),
        ("Company", user.company.name.clone()),
        ("", user.company.catch_phrase.clone()),
        ("Address", user.address_line()),
        (
            "Location",
            profile
                .location
                .map(|loc| loc.label())
                .unwrap_or_else(|| "unknown".to_string()),
        ),
        ("Map", profile.embed_url.unwrap_or("-").to_string()),
    ]));

    let info = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(titled_block("Profile", Color::DarkGray));
    f.render_widget(info, top[0]);

    render_map(f, profile.location, top[1]);

    tables::render_user_posts(f, app, profile.posts, rows[1]);
}

/// World map with the user's position marked
fn render_map(f: &mut Frame, location: Option<Location>, area: Rect) {
    let coords: Vec<(f64, f64)> = location.iter().map(|loc| (loc.lng, loc.lat)).collect();

    let canvas = Canvas::default()
        .block(titled_block("Location", Color::DarkGray))
        .marker(symbols::Marker::Braille)
        .x_bounds([-180.0, 180.0])
        .y_bounds([-90.0, 90.0])
        .paint(|ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Red,
            });
            if let Some(loc) = location {
                ctx.print(
                    loc.lng,
                    loc.lat,
                    Span::styled(" X", Style::default().fg(Color::Red)),
                );
            }
        });

    f.render_widget(canvas, area);
}

pub fn render_post(
    f: &mut Frame,
    app: &mut App,
    post: &Post,
    author: &str,
    comments: &[Comment],
    area: Rect,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(3)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", post.title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(" by ", Style::default().fg(Color::DarkGray)),
            Span::styled(author.to_string(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
    ];
    lines.extend(post.body.lines().map(|l| Line::from(format!(" {}", l))));

    let body = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: false })
        .block(titled_block(&format!("Post {}", post.id), Color::DarkGray));
    f.render_widget(body, rows[0]);

    tables::render_comments(f, app, comments, rows[1]);
}
