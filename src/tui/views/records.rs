// List pages: search/role bar above a numbered table

use super::render_notice;
use crate::controller::{LoadState, PageController, Resource};
use crate::tui::app::{App, ListSlot};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub fn render<R: ListSlot>(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_filter_bar::<R>(f, chunks[0], app, true);
    render_table(f, chunks[1], R::slot(app), &app.theme);
}

/// Search box, role filter and the add hint
pub(super) fn render_filter_bar<R: ListSlot>(f: &mut Frame, area: Rect, app: &App, can_add: bool) {
    let theme = &app.theme;
    let page = R::slot(app);
    let filter = page.filter();

    let search_style = if app.searching {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.foreground)
    };
    let cursor = if app.searching { "▏" } else { "" };

    let mut spans = vec![
        Span::styled(" Search: ", Style::default().fg(theme.muted)),
        Span::styled(format!("{}{}", filter.text, cursor), search_style),
    ];
    if filter.text.is_empty() && !app.searching {
        spans.push(Span::styled("(press /)", Style::default().fg(theme.muted)));
    }
    if R::FILTERS_BY_ROLE {
        spans.push(Span::styled("   Role: ", Style::default().fg(theme.muted)));
        spans.push(Span::styled(
            filter.role.label(),
            Style::default().fg(theme.accent),
        ));
    }
    if can_add {
        spans.push(Span::styled(
            format!("   [a] Add {}", R::SINGULAR),
            Style::default().fg(theme.muted),
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" {} ", R::LABEL)),
    );
    f.render_widget(bar, area);
}

/// Numbered table of the visible rows, or a loading/empty notice
pub(super) fn render_table<R: Resource>(
    f: &mut Frame,
    area: Rect,
    page: &PageController<R>,
    theme: &Theme,
) {
    match page.state() {
        LoadState::Idle | LoadState::Loading => {
            render_notice(f, area, "Loading...", Style::default().fg(theme.muted));
            return;
        }
        LoadState::Ready | LoadState::Degraded => {}
    }

    let visible = page.visible();
    if visible.is_empty() {
        render_notice(f, area, "No records found", Style::default().fg(theme.muted));
        return;
    }

    let header_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        std::iter::once("S.no")
            .chain(R::COLUMNS.iter().copied())
            .map(|h| Cell::from(h).style(header_style)),
    );

    let rows = visible.iter().enumerate().map(|(i, record)| {
        let mut cells = vec![Cell::from((i + 1).to_string())];
        cells.extend(record.cells().into_iter().map(Cell::from));
        Row::new(cells)
    });

    let widths = std::iter::once(Constraint::Length(6))
        .chain(R::COLUMNS.iter().map(|_| Constraint::Fill(1)))
        .collect::<Vec<_>>();

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .fg(theme.selected_fg)
                .bg(theme.selected_bg),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border)),
        );

    let mut state = TableState::default().with_selected(Some(page.selected()));
    f.render_stateful_widget(table, area, &mut state);
}
