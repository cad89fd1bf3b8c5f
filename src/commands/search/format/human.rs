//! Human-readable output formatting for search command

use crate::cli::Cli;
use vocab_search_core::backend::HttpBackend;
use vocab_search_core::highlight::CandidateRow;
use vocab_search_core::widget::SearchBar;

/// Output in human-readable format. Selected concepts are marked with `*`.
pub fn output_human(cli: &Cli, bar: &SearchBar<HttpBackend>, query: &str) {
    if bar.candidates().is_empty() {
        if !cli.quiet {
            println!("No results found for '{}'", query);
        }
        return;
    }

    let highlight = bar.config().highlight_enabled;
    for record in bar.candidates() {
        let row = CandidateRow::from_record(record, highlight);
        let marker = if bar.selection().contains(&record.uri) {
            "*"
        } else {
            " "
        };

        println!("{} {}", marker, row.uri);
        for line in &row.lines {
            match &line.language {
                Some(language) => println!("    {}: {}", language, line.text),
                None => println!("    tags: {}", line.text),
            }
        }
    }

    if cli.quiet {
        return;
    }
    if let Some(pagination) = bar.pagination() {
        let pages = pagination.last.map_or(0, |last| last.number + 1);
        println!();
        println!(
            "{} results, page {} of {}",
            bar.result_count(),
            pagination.current.number + 1,
            pages
        );
    }
}
