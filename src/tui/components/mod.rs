// Components module - reusable UI building blocks
//
// Shell components are rendered around every protected page:
// - Sidebar: logo, page list, logout
// - Topbar: page title, profile name and avatar
// - Status bar: route, load state, latest warning
//
// Each component is a focused, single-responsibility module.

pub mod sidebar;
pub mod status_bar;
pub mod toast;
pub mod topbar;

pub use toast::Toast;

// Re-export render functions for convenient access
// Usage: components::sidebar::render(f, area, app)
//    or: components::render_sidebar(f, area, app)

use crate::tui::app::App;
use ratatui::{layout::Rect, Frame};

/// Render the sidebar (convenience wrapper)
pub fn render_sidebar(f: &mut Frame, area: Rect, app: &App) {
    sidebar::render(f, area, app);
}

/// Render the topbar (convenience wrapper)
pub fn render_topbar(f: &mut Frame, area: Rect, app: &App) {
    topbar::render(f, area, app);
}

/// Render the status bar (convenience wrapper)
pub fn render_status(f: &mut Frame, area: Rect, app: &App) {
    status_bar::render(f, area, app);
}
