// Modal overlay rendering
//
// - Help: keyboard shortcuts
// - Add record: the current page's form
// - Logout: the countdown popup
// - Profile menu: dropdown under the topbar avatar

use super::centered_rect;
use crate::controller::{AddForm, Resource};
use crate::models::{CategoryRecord, LocationRecord, PolicyRecord, ReportRecord};
use crate::router::Route;
use crate::tui::app::App;
use crate::tui::modal::Modal;
use crate::util::truncate_width;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::AddRecord => render_add_form(f, app),
        Modal::Logout { remaining } => render_logout(f, app, *remaining),
        Modal::ProfileMenu => render_profile_menu(f, app),
    }
}

fn overlay_block<'a>(app: &App, title: &'a str) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.accent))
        .title(title)
        .style(Style::default().bg(app.theme.background))
}

fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.accent);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);

    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<10}", key), key_style),
            Span::raw(desc.to_string()),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Pages", header_style)),
        kb("1-6", "Dashboard, Categories, Location,"),
        kb("", "Rating, Reports, Legal Policy"),
        kb("Esc", "Back"),
        kb("R", "Reload page"),
        Line::raw(""),
        Line::from(Span::styled("  Lists", header_style)),
        kb("/", "Search"),
        kb("r", "Cycle role filter"),
        kb("a", "Add record"),
        kb("j/k", "Move selection"),
        kb("Enter", "Expand policy entry"),
        Line::raw(""),
        Line::from(Span::styled("  Session", header_style)),
        kb("p", "Profile menu"),
        kb("L", "Logout countdown"),
        kb("o", "Logout now"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("?, F1", "Toggle this help"),
        kb("q, Ctrl+C", "Quit"),
    ]);

    let area = centered_rect(46, 26, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(content).block(
            overlay_block(app, " Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        ),
        area,
    );
}

/// Form of the current page with its singular label
fn current_form(app: &App) -> Option<(&'static str, &AddForm)> {
    match app.route() {
        Route::Categories => app.categories.form().map(|f| (CategoryRecord::SINGULAR, f)),
        Route::Location => app.locations.form().map(|f| (LocationRecord::SINGULAR, f)),
        Route::LegalPolicy => app.policy.form().map(|f| (PolicyRecord::SINGULAR, f)),
        Route::Reports => app.reports.form().map(|f| (ReportRecord::SINGULAR, f)),
        _ => None,
    }
}

fn render_add_form(f: &mut Frame, app: &App) {
    let Some((singular, form)) = current_form(app) else {
        return;
    };
    let theme = &app.theme;

    let mut lines = vec![Line::raw("")];
    if form.has_role {
        lines.push(Line::from(vec![
            Span::styled("  Role  ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("‹ {} ›", form.role),
                Style::default().fg(theme.accent),
            ),
            Span::styled("  (←/→)", Style::default().fg(theme.muted)),
        ]));
        lines.push(Line::raw(""));
    }

    for (i, field) in form.fields.items.iter().enumerate() {
        let focused = i == form.fields.focus;
        let marker_style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.border)
        };
        lines.push(Line::from(Span::styled(
            format!("  {}", field.label),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(vec![
            Span::styled("  › ", marker_style),
            Span::raw(truncate_width(&field.value, 40)),
            Span::raw(if focused { "▏" } else { "" }),
        ]));
    }

    lines.push(Line::raw(""));
    if form.saving {
        lines.push(Line::from(Span::styled(
            "  Saving...",
            Style::default().fg(theme.muted),
        )));
    }
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(theme.error),
        )));
    }

    let height = lines.len() as u16 + 2;
    let area = centered_rect(52, height, f.area());
    let title = format!(" Add {} ", singular);

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            overlay_block(app, &title)
                .title_bottom(Line::from(" Enter save · Tab next · Esc cancel ").centered()),
        ),
        area,
    );
}

fn render_logout(f: &mut Frame, app: &App, remaining: u32) {
    let theme = &app.theme;
    let lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            "You are Logged Out?",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::raw("You are about to logout in "),
            Span::styled(
                format!("{} secs", remaining),
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("."),
        ]),
        Line::raw("Do you want to continue?"),
        Line::raw(""),
        Line::from(Span::styled(
            " Log Out (Enter) ",
            Style::default().fg(theme.selected_fg).bg(theme.accent),
        )),
    ];

    let area = centered_rect(50, 10, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(overlay_block(app, "").title_top(Line::from(" × (Esc) ").right_aligned())),
        area,
    );
}

fn render_profile_menu(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let name = truncate_width(app.profile.menu_name(), 20);

    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", name),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(avatar) = app.profile.avatar_url() {
        lines.push(Line::from(Span::styled(
            format!(" {}", truncate_width(avatar, 20)),
            Style::default().fg(theme.muted),
        )));
    }
    lines.push(Line::from(Span::styled(
        " ⏻ Logout (Enter)",
        Style::default().fg(theme.error),
    )));

    let screen = f.area();
    let width = 26_u16.min(screen.width);
    let height = lines.len() as u16 + 2;
    let area = Rect::new(screen.right().saturating_sub(width + 1), 2, width, height)
        .intersection(screen);

    f.render_widget(Clear, area);
    f.render_widget(Paragraph::new(lines).block(overlay_block(app, "")), area);
}
