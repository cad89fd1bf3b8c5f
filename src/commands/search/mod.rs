//! `vocab-search search` command - search concepts
//!
//! Connects a search bar (alias resolution and selection hydration), feeds
//! it the query as user input and prints the merged candidate list: search
//! results first, then selected concepts outside them.

pub mod format;

use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, OutputFormat, SearchArgs};
use crate::commands::{apply_scope_args, report_unresolved};
use vocab_search_core::backend::HttpBackend;
use vocab_search_core::config::WidgetConfig;
use vocab_search_core::error::Result;
use vocab_search_core::widget::SearchBar;

use self::format::{output_human, output_json};

/// Execute the search command
pub async fn execute(cli: &Cli, mut config: WidgetConfig, args: &SearchArgs) -> Result<()> {
    let start = Instant::now();

    apply_scope_args(&mut config, &args.scope);
    if !args.tag.is_empty() {
        config.scope.tags = args.tag.clone();
    }
    if args.languages.is_some() {
        config.scope.languages = args.languages.clone();
    }
    if let Some(size) = args.size {
        config.page_size = size;
    }
    config.single_select |= args.single_select;
    config.validate()?;

    let backend = HttpBackend::from_config(&config)?;
    let mut bar = SearchBar::new(backend, config);
    bar.set_selections(args.select.clone());
    bar.connect().await?;
    debug!(selected = bar.selection().len(), elapsed = ?start.elapsed(), "connect");

    bar.set_page(args.page);
    bar.set_sort(args.sort.clone());
    bar.user_query_changed(&args.query);
    bar.update().await?;
    debug!(
        results = bar.last_results().len(),
        candidates = bar.candidates().len(),
        elapsed = ?start.elapsed(),
        "search"
    );

    report_unresolved(cli, bar.config().show_error, bar.errors());

    match cli.format {
        OutputFormat::Human => output_human(cli, &bar, &args.query),
        OutputFormat::Json => output_json(&bar)?,
    }
    Ok(())
}
