// Dashboard: category and location tables on top; legal policy, reports and
// the rating split below. Rendered only after all four fetches succeeded.

use super::render_notice;
use crate::controller::{DashboardData, DashboardState};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    match (app.dashboard.state(), app.dashboard.data()) {
        (DashboardState::Ready, Some(data)) => render_cards(f, area, data, theme),
        (DashboardState::Failed, _) => render_notice(
            f,
            area,
            "Could not load the dashboard. Press R to retry.",
            Style::default().fg(theme.error),
        ),
        _ => render_notice(f, area, "Loading...", Style::default().fg(theme.muted)),
    }
}

fn card<'a>(title: &'a str, key: char, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .title_top(
            Line::from(Span::styled(
                format!(" [{}] View ", key),
                Style::default().fg(theme.accent),
            ))
            .right_aligned(),
        )
}

fn simple_table<'a>(
    headers: [&'a str; 4],
    rows: Vec<[String; 4]>,
    block: Block<'a>,
    theme: &Theme,
) -> Table<'a> {
    let header_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(headers.map(|h| Cell::from(h).style(header_style)));
    let widths = [
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ];
    Table::new(rows.into_iter().map(Row::new), widths)
        .header(header)
        .block(block)
}

fn render_cards(f: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(rows[1]);

    let categories = data
        .categories
        .iter()
        .enumerate()
        .map(|(i, c)| {
            [
                (i + 1).to_string(),
                c.role.to_string(),
                c.category.clone(),
                c.product.clone(),
            ]
        })
        .collect();
    f.render_widget(
        simple_table(
            ["S.no", "Role", "Category", "Product"],
            categories,
            card("Categories", '2', theme),
            theme,
        ),
        top[0],
    );

    let locations = data
        .locations
        .iter()
        .enumerate()
        .map(|(i, l)| {
            [
                (i + 1).to_string(),
                l.role.to_string(),
                l.location.clone(),
                l.region.clone(),
            ]
        })
        .collect();
    f.render_widget(
        simple_table(
            ["S.no", "Role", "Location", "Region"],
            locations,
            card("Location", '3', theme),
            theme,
        ),
        top[1],
    );

    let policy_lines: Vec<Line> = data
        .policy
        .iter()
        .flat_map(|entry| {
            if entry.open {
                vec![
                    Line::from(Span::styled(
                        format!(" {}", entry.title),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!(" {}", entry.desc),
                        Style::default().fg(theme.muted),
                    )),
                ]
            } else {
                vec![Line::from(format!(" {} ›", entry.title))]
            }
        })
        .collect();
    f.render_widget(
        Paragraph::new(policy_lines)
            .wrap(Wrap { trim: true })
            .block(card("Legal Policy", '6', theme)),
        bottom[0],
    );

    f.render_widget(
        Paragraph::new(" Overview of recent user reports & activities...")
            .style(Style::default().fg(theme.muted))
            .wrap(Wrap { trim: true })
            .block(card("Reports", '5', theme)),
        bottom[1],
    );

    let stats = &data.rating_stats;
    let rating_block = card("Rating", '4', theme);
    let inner = rating_block.inner(bottom[2]);
    f.render_widget(rating_block, bottom[2]);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);
    f.render_widget(
        Gauge::default()
            .ratio((stats.positive / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", stats.positive))
            .gauge_style(Style::default().fg(theme.success)),
        parts[0],
    );
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!(" Positive · {}%", stats.positive),
                Style::default().fg(theme.success),
            )),
            Line::from(Span::styled(
                format!(" Negative · {}%", stats.negative),
                Style::default().fg(theme.error),
            )),
        ]),
        parts[2],
    );
}
