// Topbar component
//
// Page title on the left, profile name and avatar letter on the right.

use crate::tui::app::App;
use crate::util::truncate_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let name = truncate_width(app.profile.display_name(), 24);
    // " name  (A) "
    let profile_width = name.width() as u16 + 8;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(profile_width)])
        .split(inner);

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {}", app.route().title()),
        Style::default()
            .fg(theme.foreground)
            .add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, chunks[0]);

    let profile = Paragraph::new(Line::from(vec![
        Span::styled(format!("{}  ", name), Style::default().fg(theme.foreground)),
        Span::styled(
            format!("({})", app.profile.avatar_letter()),
            Style::default()
                .fg(theme.selected_fg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▾", Style::default().fg(theme.muted)),
    ]))
    .right_aligned();
    f.render_widget(profile, chunks[1]);
}
