// Views module - screen-level rendering logic
//
// Auth screens take the whole terminal. Protected pages share a shell:
// sidebar on the left, topbar, page content, status bar. Modals and the
// toast are drawn last, on top of everything.

mod auth;
mod dashboard;
mod modal;
mod policy;
mod ratings;
mod records;

use super::app::App;
use crate::models::{CategoryRecord, LocationRecord, ReportRecord};
use crate::router::Route;
use crate::tui::components;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

const SIDEBAR_WIDTH: u16 = 22;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let bg_block = Block::default().style(
        Style::default()
            .bg(app.theme.background)
            .fg(app.theme.foreground),
    );
    f.render_widget(bg_block, f.area());

    if app.auth_form().is_some() {
        auth::render(f, f.area(), app);
    } else {
        draw_shell(f, app);
    }

    if let Some(modal) = &app.modal {
        modal::render(f, modal, app);
    }

    if let Some(toast) = &app.toast {
        toast.render(f, f.area(), &app.theme);
    }
}

fn draw_shell(f: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(f.area());

    components::render_sidebar(f, columns[0], app);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(columns[1]);

    components::render_topbar(f, rows[0], app);
    components::render_status(f, rows[2], app);

    let content = rows[1];
    match app.route() {
        Route::Dashboard => dashboard::render(f, content, app),
        Route::Categories => records::render::<CategoryRecord>(f, content, app),
        Route::Location => records::render::<LocationRecord>(f, content, app),
        Route::Reports => records::render::<ReportRecord>(f, content, app),
        Route::LegalPolicy => policy::render(f, content, app),
        Route::Rating => ratings::render(f, content, app),
        // Auth screens never reach the shell
        Route::Login | Route::Register | Route::Forgot | Route::ResetPassword(_) => {}
    }
}

/// Centered placeholder text ("Loading...")
pub(crate) fn render_notice(f: &mut Frame, area: Rect, text: &str, style: Style) {
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
    f.render_widget(
        Paragraph::new(text.to_string())
            .style(style)
            .alignment(Alignment::Center),
        line_area,
    );
}

/// Rect of `width` x `height` centered in `area`
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
