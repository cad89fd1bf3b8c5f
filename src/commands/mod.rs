pub mod dispatch;
pub mod hydrate;
pub mod resolve;
pub mod search;

use crate::cli::{Cli, OutputFormat, ScopeArgs};
use vocab_search_core::config::WidgetConfig;
use vocab_search_core::error::UnresolvedReference;

/// Replace the configured dataset/vocabulary scope with the one given on
/// the command line, if any
pub fn apply_scope_args(config: &mut WidgetConfig, scope: &ScopeArgs) {
    if !scope.dataset.is_empty() {
        config.scope.datasets = scope.dataset.clone();
    }
    if !scope.vocabulary.is_empty() {
        config.scope.vocabularies = scope.vocabulary.clone();
    }
}

/// Print unresolved references to stderr. JSON output carries them in the
/// payload instead.
pub fn report_unresolved(cli: &Cli, show_error: bool, errors: &[UnresolvedReference]) {
    if cli.quiet || !show_error || cli.format == OutputFormat::Json {
        return;
    }
    for error in errors {
        eprintln!("warning: {}", error);
    }
}
