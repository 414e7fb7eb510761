// Sidebar component
//
// Logo, the six pages with their number keys, and the logout entry.

use crate::router::Route;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let current = app.route();

    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(
                " (V) ",
                Style::default()
                    .fg(theme.selected_fg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " Searchkro",
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::raw(""),
    ];

    for (i, page) in Route::PAGES.iter().enumerate() {
        let label = format!(" {} {:<14}", i + 1, page.title());
        let style = if page == current {
            Style::default()
                .fg(theme.selected_fg)
                .bg(theme.selected_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };
        lines.push(Line::from(Span::styled(label, style)));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        " L Logout",
        Style::default().fg(theme.error),
    )));

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(theme.border)),
    );

    f.render_widget(sidebar, area);
}
