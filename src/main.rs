// Searchkro Admin entry point
//
// Parses the command line, layers configuration, installs tracing and opens
// the persisted session, then either runs a one-shot subcommand or the TUI.

use anyhow::{Context, Result};
use clap::Parser;
use searchkro_admin::api::ApiClient;
use searchkro_admin::cli::{self, Cli, Commands};
use searchkro_admin::config::Config;
use searchkro_admin::logging::{init_tracing, LogBuffer};
use searchkro_admin::router::Route;
use searchkro_admin::session::{FileTokenStore, SessionStore};
use searchkro_admin::tui;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config commands must work even when the file is broken
    if let Some(Commands::Config { show, reset, path }) = cli.command {
        return cli::handle_config(show, reset, path);
    }

    // Create config file with defaults if it doesn't exist
    Config::ensure_config_exists();

    // Load configuration (env vars > config file > defaults)
    let mut config = Config::load()?;
    if let Some(url) = &cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }

    let tui_mode = cli.command.is_none();

    // Keep the guard alive for the whole run or buffered file logs are lost
    let log_buffer = LogBuffer::new();
    let _log_guard = init_tracing(&config, &log_buffer, tui_mode);

    tracing::info!(
        "Starting searchkro-admin v{} against {}",
        searchkro_admin::config::VERSION,
        config.api_url
    );

    let session = SessionStore::open(FileTokenStore::new(&config.session_file));
    let api = ApiClient::new(&config).context("Failed to build HTTP client")?;

    match cli.command {
        None => tui::run_tui(config, api, session, log_buffer, Route::parse(&cli.route)).await,
        Some(Commands::Logout) => cli::handle_logout(&session),
        Some(Commands::OauthCallback { url }) => cli::handle_oauth_callback(&session, &url),
        Some(Commands::List {
            resource,
            search,
            role,
        }) => cli::handle_list(&api, &session, resource, search, role).await,
        Some(Commands::Config { show, reset, path }) => cli::handle_config(show, reset, path),
    }
}
