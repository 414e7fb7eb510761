// CLI module - command-line argument parsing and handlers
//
// Without a subcommand the TUI starts. Subcommands:
// - config --show|--path|--reset: inspect or regenerate the config file
// - logout: clear the persisted session
// - oauth-callback <URL>: finish Google sign-in from the redirect URL
// - list <resource>: print one page's table without the TUI

use crate::api::auth::token_from_callback;
use crate::api::ApiClient;
use crate::config::{Config, VERSION};
use crate::controller::{Filter, LoadState, PageController, RatingsController, Resource, RoleFilter};
use crate::models::{
    CategoryRecord, LocationRecord, PolicyRecord, RatingStats, ReportRecord,
};
use crate::session::SessionStore;
use crate::util::fit_width;
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// Searchkro Admin - terminal console for the Searchkro marketplace
#[derive(Parser)]
#[command(name = "searchkro-admin")]
#[command(version = VERSION)]
#[command(about = "Terminal admin console for the Searchkro marketplace", long_about = None)]
pub struct Cli {
    /// Override the API base URL for this run
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Screen to open, as a path ("/categories", "/reset-password/<token>")
    #[arg(long, default_value = "/")]
    pub route: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Clear the stored session token
    Logout,

    /// Store the token from a Google sign-in redirect URL
    OauthCallback {
        /// The full URL the browser was redirected to
        url: String,
    },

    /// Print a resource table without starting the TUI
    List {
        resource: ResourceKind,

        /// Case-insensitive text filter
        #[arg(long)]
        search: Option<String>,

        /// buyer, seller or all
        #[arg(long)]
        role: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Categories,
    Locations,
    Policy,
    Reports,
    Ratings,
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else {
        // No flag provided, show help
        println!("Usage: searchkro-admin config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// session
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_logout(session: &SessionStore) -> Result<()> {
    if !session.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    session.logout();
    println!("Logged out.");
    Ok(())
}

pub fn handle_oauth_callback(session: &SessionStore, url: &str) -> Result<()> {
    let token = token_from_callback(url)
        .ok_or_else(|| anyhow!("No token found in redirect URL {}", url))?;
    session.login(token);
    println!("Logged in. Start `searchkro-admin` to open the dashboard.");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// list
// ─────────────────────────────────────────────────────────────────────────────

pub async fn handle_list(
    api: &ApiClient,
    session: &SessionStore,
    resource: ResourceKind,
    search: Option<String>,
    role: Option<String>,
) -> Result<()> {
    let role = match role {
        Some(r) => RoleFilter::parse(&r)
            .ok_or_else(|| anyhow!("Unknown role {:?} (expected buyer, seller or all)", r))?,
        None => RoleFilter::All,
    };
    let filter = Filter::new(role, search.unwrap_or_default());

    if !session.is_authenticated() {
        bail!("Not logged in. Sign in through the TUI or run `searchkro-admin oauth-callback <URL>`.");
    }

    let output = match resource {
        ResourceKind::Categories => list_page::<CategoryRecord>(api, session, filter).await,
        ResourceKind::Locations => list_page::<LocationRecord>(api, session, filter).await,
        ResourceKind::Policy => list_page::<PolicyRecord>(api, session, filter).await,
        ResourceKind::Reports => list_page::<ReportRecord>(api, session, filter).await,
        ResourceKind::Ratings => {
            let mut ratings = RatingsController::new();
            ratings.page.set_filter(filter);
            let state = ratings.load(api, session).await;
            format!(
                "{}\n{}",
                format_stats(ratings.stats()),
                format_table(&ratings.page, state)
            )
        }
    };

    print!("{}", output);
    Ok(())
}

async fn list_page<R: Resource>(api: &ApiClient, session: &SessionStore, filter: Filter) -> String {
    let mut page = PageController::<R>::new();
    page.set_filter(filter);
    let state = page.load(api, session).await;
    format_table(&page, state)
}

fn format_stats(stats: &RatingStats) -> String {
    format!(
        "Average {:.1} · Total {} · Positive {}% · Negative {}%\n",
        stats.average, stats.total, stats.positive, stats.negative
    )
}

/// Plain-text table of the visible rows, columns padded to their widest cell
pub fn format_table<R: Resource>(page: &PageController<R>, state: LoadState) -> String {
    let mut out = String::new();
    if state == LoadState::Degraded {
        out.push_str("# API request failed; showing sample data\n");
    }

    let header: Vec<String> = std::iter::once("S.no")
        .chain(R::COLUMNS.iter().copied())
        .map(str::to_string)
        .collect();
    let rows: Vec<Vec<String>> = page
        .visible()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut cells = vec![(i + 1).to_string()];
            cells.extend(record.cells());
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(rows.iter())
                .filter_map(|row| row.get(col))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0)
                .min(40)
        })
        .collect();

    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| fit_width(cell, *w))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }

    if rows.is_empty() {
        out.push_str("(no records)\n");
    }
    out
}
