//! `vocab-search resolve` command - resolve dataset and vocabulary aliases

use serde::Serialize;

use crate::cli::{Cli, OutputFormat, ResolveArgs};
use crate::commands::report_unresolved;
use vocab_search_core::backend::HttpBackend;
use vocab_search_core::config::WidgetConfig;
use vocab_search_core::error::Result;
use vocab_search_core::resolve::{resolve_scope, ScopeKind};

#[derive(Debug, Serialize)]
struct ResolvedEntry<'a> {
    identifier: &'a str,
    uri: &'a str,
    resolved: bool,
}

/// Execute the resolve command
pub async fn execute(cli: &Cli, config: WidgetConfig, args: &ResolveArgs) -> Result<()> {
    let backend = HttpBackend::from_config(&config)?;
    let kind = ScopeKind::from(args.kind);
    let resolution = resolve_scope(&backend, kind, &args.identifiers).await?;

    let entries: Vec<ResolvedEntry> = args
        .identifiers
        .iter()
        .zip(&resolution.resolved)
        .map(|(identifier, uri)| ResolvedEntry {
            identifier,
            uri,
            resolved: !resolution
                .unresolved
                .iter()
                .any(|miss| miss.identifier == *identifier),
        })
        .collect();

    match cli.format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "kind": kind.resource(),
                "entries": entries,
                "replaced": resolution.replaced,
                "unresolved": resolution.unresolved,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Human => {
            for entry in entries.iter().filter(|e| e.resolved) {
                if entry.identifier == entry.uri {
                    println!("{}", entry.uri);
                } else {
                    println!("{} -> {}", entry.identifier, entry.uri);
                }
            }
            report_unresolved(cli, config.show_error, &resolution.unresolved);
        }
    }
    Ok(())
}
