// Ratings page: aggregate figures above the individual ratings

use super::records::{render_filter_bar, render_table};
use crate::models::{stars, RatingRecord};
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .split(area);

    render_summary(f, chunks[0], app);
    render_filter_bar::<RatingRecord>(f, chunks[1], app, false);
    render_table(f, chunks[2], &app.ratings.page, &app.theme);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let stats = app.ratings.stats();

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" Average ", Style::default().fg(theme.muted)),
            Span::styled(
                format!("{:.1} ", stats.average),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(stars(stats.average), Style::default().fg(theme.star)),
        ]),
        Line::from(vec![
            Span::styled(" Total   ", Style::default().fg(theme.muted)),
            Span::styled(
                stats.total.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border)),
    );
    f.render_widget(summary, halves[0]);

    let ratio = (stats.positive / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .ratio(ratio)
        .label(format!(
            "Positive {:.0}% · Negative {:.0}%",
            stats.positive, stats.negative
        ))
        .gauge_style(Style::default().fg(theme.success))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border)),
        );
    f.render_widget(gauge, halves[1]);
}
