//! Command dispatch logic for vocab-search
use std::env;
use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::commands;
use vocab_search_core::config::WidgetConfig;
use vocab_search_core::error::Result;

pub async fn run(cli: &Cli, start: Instant) -> Result<()> {
    let config = load_config(cli)?;
    debug!(endpoint = %config.search_endpoint, elapsed = ?start.elapsed(), "load_config");

    match &cli.command {
        Commands::Search(args) => commands::search::execute(cli, config, args).await,
        Commands::Resolve(args) => commands::resolve::execute(cli, config, args).await,
        Commands::Hydrate(args) => commands::hydrate::execute(cli, config, args).await,
    }
}

/// Config file, then environment, then `--endpoint`
fn load_config(cli: &Cli) -> Result<WidgetConfig> {
    let dir = env::current_dir()?;
    let mut config = WidgetConfig::discover(cli.config.as_deref(), &dir)?;

    if let Some(endpoint) = &cli.endpoint {
        config.search_endpoint = endpoint.clone();
    }
    // Unresolved references are printed by the commands; only log them too
    // when asked for verbose output.
    config.show_console_error &= cli.verbose;

    Ok(config)
}
