// Legal policy page: an accordion where at most one entry is expanded

use super::records::render_filter_bar;
use super::render_notice;
use crate::controller::LoadState;
use crate::models::PolicyRecord;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_filter_bar::<PolicyRecord>(f, chunks[0], app, true);

    let page = &app.policy;
    if matches!(page.state(), LoadState::Idle | LoadState::Loading) {
        render_notice(f, chunks[1], "Loading...", Style::default().fg(theme.muted));
        return;
    }

    let visible = page.visible();
    if visible.is_empty() {
        render_notice(f, chunks[1], "No records found", Style::default().fg(theme.muted));
        return;
    }

    let mut lines = Vec::new();
    for (i, entry) in visible.iter().enumerate() {
        let selected = i == page.selected();
        let marker = if entry.open { "▾" } else { "›" };
        let mut style = Style::default().fg(theme.foreground);
        if selected {
            style = style.fg(theme.selected_fg).bg(theme.selected_bg);
        }
        if entry.open {
            style = style.add_modifier(Modifier::BOLD);
        }

        lines.push(Line::from(Span::styled(
            format!(" {} {}", marker, entry.title),
            style,
        )));
        if entry.open {
            lines.push(Line::from(Span::styled(
                format!("   {}", entry.desc),
                Style::default().fg(theme.muted),
            )));
        }
        lines.push(Line::raw(""));
    }

    let body = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title_bottom(Line::from(" Enter expand/collapse ").right_aligned()),
    );
    f.render_widget(body, chunks[1]);
}
