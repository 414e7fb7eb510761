// Login, register, forgot-password and reset-password screens

use super::centered_rect;
use crate::controller::auth_forms::AuthForm;
use crate::router::Route;
use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const WIDTH: u16 = 60;

fn subtitle(route: &Route) -> &'static str {
    match route {
        Route::Login => "Sign in to manage the marketplace",
        Route::Register => "Create an admin account",
        Route::Forgot => "We will email you a reset link",
        Route::ResetPassword(_) => "Choose a new password",
        _ => "",
    }
}

fn hints(route: &Route) -> &'static str {
    match route {
        Route::Login => "Enter sign in · Tab next · F3 register · F4 forgot · Ctrl+G Google",
        Route::Register => "Enter create · Tab next · F2 login",
        Route::Forgot => "Enter send · F2 login",
        _ => "Enter reset · Tab next · F2 login",
    }
}

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.auth_form() else {
        return;
    };
    let theme = &app.theme;
    let route = app.route();

    let mut lines = vec![
        Line::from(Span::styled(
            subtitle(route),
            Style::default().fg(theme.muted),
        ))
        .alignment(Alignment::Center),
        Line::raw(""),
    ];
    lines.extend(field_lines(form, app));

    if form.busy {
        lines.push(Line::from(Span::styled(
            "Please wait...",
            Style::default().fg(theme.muted),
        )));
    }
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    }
    if let Some(notice) = &form.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(theme.success),
        )));
    }

    let height = (lines.len() as u16 + 6).max(12);
    let rect = centered_rect(WIDTH, height, area);

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.accent))
            .title(Span::styled(
                format!(" Searchkro · {} ", route.title()),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(format!(" {} ", hints(route))).centered()),
    );
    f.render_widget(panel, rect);
}

fn field_lines<'a>(form: &'a AuthForm, app: &App) -> Vec<Line<'a>> {
    let theme = &app.theme;
    let mut lines = Vec::new();

    for (i, field) in form.fields.items.iter().enumerate() {
        let focused = i == form.fields.focus;
        let shown = if field.secret {
            "•".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        let cursor = if focused { "▏" } else { "" };
        let box_style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.border)
        };

        lines.push(Line::from(Span::styled(
            field.label,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled("› ", box_style),
            Span::raw(format!("{}{}", shown, cursor)),
        ]));
        lines.push(Line::raw(""));
    }
    lines
}
