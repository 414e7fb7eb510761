// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, background task updates)
// - Layered key dispatch

pub mod app;
pub mod components;
pub mod modal;
pub mod theme;
pub mod views;

use crate::api::ApiClient;
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::router::Route;
use crate::session::SessionStore;
use anyhow::{Context, Result};
use app::{App, ListKey, UpdateReceiver};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::ModalAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop starting at `start`, and
/// restores the terminal when done (also when the loop failed).
pub async fn run_tui(
    config: Config,
    api: ApiClient,
    session: SessionStore,
    log_buffer: LogBuffer,
    start: Route,
) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let (mut app, mut updates) = App::new(config, api, session, log_buffer, start);

    let result = run_event_loop(&mut terminal, &mut app, &mut updates).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input, a redraw tick and updates sent back by
/// background tasks, whichever comes first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    updates: &mut UpdateReceiver,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick for redrawing (toast expiry, countdown)
            _ = tick_interval.tick() => {
                app.clear_expired_toast();
            }

            // Results of fetches, session changes, countdown ticks
            Some(update) = updates.recv() => {
                update(app);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Modal → Global → Screen
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: Modal captures all input when active
    if handle_modal_input(app, &key_event) {
        return;
    }

    // Layer 2: Global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 3: Screen keys
    if app.auth_form().is_some() {
        handle_auth_keys(app, &key_event);
    } else if app.searching {
        handle_search_keys(app, key_event.code);
    } else {
        handle_page_keys(app, key_event.code);
    }
}

/// Returns true if a modal consumed the key
fn handle_modal_input(app: &mut App, key_event: &KeyEvent) -> bool {
    // Ctrl+C always quits, even from a modal
    if is_quit(key_event) {
        return false;
    }

    let Some(modal) = app.modal.as_mut() else {
        return false;
    };

    let action = modal.handle_input(key_event.code);
    let kind = modal.clone();

    match action {
        ModalAction::None => {}
        ModalAction::Close => match kind {
            modal::Modal::AddRecord => {
                app.close_add_form();
                app.modal = None;
            }
            modal::Modal::Logout { .. } => app.cancel_logout(),
            modal::Modal::ProfileMenu => app.close_profile_menu(),
            modal::Modal::Help => app.modal = None,
        },
        ModalAction::Edit(edit) => app.edit_form(edit),
        ModalAction::Submit => app.submit_form(),
        ModalAction::Logout => {
            app.close_profile_menu();
            app.logout_now();
            app.modal = None;
        }
    }
    true
}

fn is_quit(key_event: &KeyEvent) -> bool {
    key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
}

/// Keys that work on every screen. Returns true if handled.
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    if is_quit(key_event) {
        app.should_quit = true;
        return true;
    }

    match key_event.code {
        KeyCode::F(1) => {
            app.modal = Some(modal::Modal::Help);
            true
        }
        _ => false,
    }
}

fn handle_auth_keys(app: &mut App, key_event: &KeyEvent) {
    match key_event.code {
        KeyCode::F(2) => app.navigate(Route::Login),
        KeyCode::F(3) => app.navigate(Route::Register),
        KeyCode::F(4) => app.navigate(Route::Forgot),
        KeyCode::Char('g') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            if *app.route() == Route::Login {
                app.show_google_login();
            }
        }
        KeyCode::Esc => app.back(),
        KeyCode::Enter => app.submit_auth(),
        code => {
            let Some(form) = app.auth_form_mut() else {
                return;
            };
            if form.busy {
                return;
            }
            match code {
                KeyCode::Tab | KeyCode::Down => form.fields.focus_next(),
                KeyCode::BackTab | KeyCode::Up => form.fields.focus_prev(),
                KeyCode::Backspace => form.fields.pop_char(),
                KeyCode::Char(c) => form.fields.push_char(c),
                _ => {}
            }
        }
    }
}

fn handle_search_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Enter => app.searching = false,
        KeyCode::Backspace => app.list_key(ListKey::SearchBackspace),
        KeyCode::Char(c) => app.list_key(ListKey::SearchChar(c)),
        _ => {}
    }
}

fn handle_page_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            app.navigate(Route::PAGES[index].clone());
        }
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.modal = Some(modal::Modal::Help),
        KeyCode::Char('p') => app.open_profile_menu(),
        KeyCode::Char('L') => app.open_logout_popup(),
        KeyCode::Char('o') => app.logout_now(),
        KeyCode::Char('R') => app.reload(),
        KeyCode::Esc => app.back(),
        KeyCode::Char('/') if app.is_list_page() => app.searching = true,
        KeyCode::Char('r') => app.list_key(ListKey::CycleRole),
        KeyCode::Char('a') => app.open_add_form(),
        KeyCode::Down | KeyCode::Char('j') => app.list_key(ListKey::Next),
        KeyCode::Up | KeyCode::Char('k') => app.list_key(ListKey::Prev),
        KeyCode::Enter if *app.route() == Route::LegalPolicy => app.policy.toggle_selected(),
        _ => {}
    }
}
