// Searchkro Admin - terminal console for the Searchkro marketplace
//
// Architecture:
// - API client (reqwest): JSON requests with bearer auth and envelope unwrapping
// - Session: persisted token with a watch channel for login/logout broadcasts
// - Router: path-addressed screens with a route guard and history
// - Controllers: per-page load/filter/add state, UI-agnostic
// - TUI (ratatui): renders controller state, dispatches keys

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod countdown;
pub mod logging;
pub mod models;
pub mod router;
pub mod session;
pub mod tui;
pub mod util;

#[cfg(test)]
mod testing;
