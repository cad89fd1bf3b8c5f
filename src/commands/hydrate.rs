//! `vocab-search hydrate` command - fetch full records of selected uris

use crate::cli::{Cli, HydrateArgs, OutputFormat};
use crate::commands::{apply_scope_args, report_unresolved};
use vocab_search_core::backend::HttpBackend;
use vocab_search_core::config::WidgetConfig;
use vocab_search_core::error::Result;
use vocab_search_core::widget::SearchBar;

/// Execute the hydrate command
pub async fn execute(cli: &Cli, mut config: WidgetConfig, args: &HydrateArgs) -> Result<()> {
    apply_scope_args(&mut config, &args.scope);

    let backend = HttpBackend::from_config(&config)?;
    let mut bar = SearchBar::new(backend, config);
    bar.set_selections(args.uris.clone());
    bar.connect().await?;

    report_unresolved(cli, bar.config().show_error, bar.errors());

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "selection": bar.selection(),
                "scope": {
                    "datasets": bar.scope().datasets,
                    "vocabularies": bar.scope().vocabularies,
                },
                "errors": bar.errors(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            if bar.selection().is_empty() && !cli.quiet {
                println!("No concepts found");
            }
            for entry in bar.selection().iter() {
                println!("{}  {}", entry.uri(), entry.display_label);
            }
        }
    }
    Ok(())
}
