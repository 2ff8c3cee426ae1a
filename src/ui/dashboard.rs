//! Dashboard
//!
//! Summary cards for each resource type, a bar chart of the counts and a
//! gauge per type showing its share of all records.

use super::titled_block;
use placedash::derive::Counts;
use placedash::resource::ResourceType;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Gauge, Paragraph},
    Frame,
};

fn color_for(resource: ResourceType) -> Color {
    match resource {
        ResourceType::Users => Color::Cyan,
        ResourceType::Posts => Color::Green,
        ResourceType::Comments => Color::Magenta,
    }
}

/// Render the dashboard; `None` draws loading placeholders
pub fn render(f: &mut Frame, data: Option<(&Counts, &[f64; 3])>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);

    for (resource, card_area) in ResourceType::ALL.into_iter().zip(cards.iter()) {
        let value = data.map(|(counts, _)| counts.get(resource));
        render_card(f, resource, value, *card_area);
    }

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[1]);

    match data {
        Some((counts, shares)) => {
            render_bar_chart(f, counts, charts[0]);
            render_shares(f, shares, charts[1]);
        },
        None => {
            for chart_area in charts.iter() {
                let placeholder = Paragraph::new("Loading...")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow))
                    .block(titled_block("", Color::DarkGray));
                f.render_widget(placeholder, *chart_area);
            }
        },
    }
}

fn render_card(f: &mut Frame, resource: ResourceType, value: Option<usize>, area: Rect) {
    let color = color_for(resource);
    let text = match value {
        Some(count) => Span::styled(
            count.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("...", Style::default().fg(Color::DarkGray)),
    };

    let card = Paragraph::new(vec![Line::from(""), Line::from(text)])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(format!(" Total {} ", resource.label())),
        );
    f.render_widget(card, area);
}

fn render_bar_chart(f: &mut Frame, counts: &Counts, area: Rect) {
    let series = counts.series();
    let bar_width = (area.width.saturating_sub(8) / 3).clamp(3, 20);

    let chart = BarChart::default()
        .block(titled_block("Records per type", Color::DarkGray))
        .data(&series[..])
        .bar_width(bar_width)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(chart, area);
}

fn render_shares(f: &mut Frame, shares: &[f64; 3], area: Rect) {
    let block = titled_block("Share of records", Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(inner);

    for ((resource, share), row) in ResourceType::ALL.into_iter().zip(shares).zip(rows.iter()) {
        let ratio = (share / 100.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .block(Block::default().title(resource.label()).borders(Borders::ALL))
            .gauge_style(Style::default().fg(color_for(resource)))
            .ratio(ratio)
            .label(format!("{:.1}%", share));
        f.render_widget(gauge, *row);
    }
}
