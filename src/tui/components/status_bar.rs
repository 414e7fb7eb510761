// Status bar component
//
// Current path and page state on the left, key hints on the right. The most
// recent warning or error from the log buffer replaces the hints while it is
// fresh, so failed fetches are noticed without a log panel.

use crate::controller::{DashboardState, LoadState};
use crate::logging::LogLevel;
use crate::router::Route;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// How long an alert stays in the status bar
const ALERT_SECS: i64 = 10;

fn state_label(app: &App) -> &'static str {
    if let Some(state) = app.page_state() {
        return match state {
            LoadState::Idle => "idle",
            LoadState::Loading => "loading…",
            LoadState::Ready | LoadState::Degraded => "ready",
        };
    }
    if *app.route() == Route::Dashboard {
        return match app.dashboard.state() {
            DashboardState::Idle => "idle",
            DashboardState::Loading => "loading…",
            DashboardState::Ready => "ready",
            DashboardState::Failed => "failed",
        };
    }
    ""
}

fn hints(app: &App) -> &'static str {
    if app.searching {
        "type to search · Enter/Esc done"
    } else if app.is_list_page() {
        "1-6 pages · / search · r role · a add · j/k move · ? help"
    } else {
        "1-6 pages · p profile · L logout · ? help · q quit"
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.route()),
            Style::default().fg(theme.selected_fg).bg(theme.accent),
        ),
        Span::styled(
            format!(" {} ", state_label(app)),
            Style::default().fg(theme.muted),
        ),
        Span::raw("│ "),
    ];

    let alert = app
        .log_buffer
        .last_alert()
        .filter(|e| (chrono::Utc::now() - e.timestamp).num_seconds() < ALERT_SECS);

    match alert {
        Some(entry) => {
            let color = match entry.level {
                LogLevel::Error => theme.error,
                _ => theme.highlight,
            };
            spans.push(Span::styled(entry.message, Style::default().fg(color)));
        }
        None => spans.push(Span::styled(hints(app), Style::default().fg(theme.muted))),
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
