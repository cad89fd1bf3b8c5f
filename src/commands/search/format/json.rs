//! JSON output formatting for search command

use vocab_search_core::backend::HttpBackend;
use vocab_search_core::error::Result;
use vocab_search_core::widget::SearchBar;

/// Output in JSON format
pub fn output_json(bar: &SearchBar<HttpBackend>) -> Result<()> {
    let output = serde_json::json!({
        "query": bar.query(),
        "count": bar.result_count(),
        "pagination": bar.pagination(),
        "results": bar.last_results(),
        "candidates": bar.candidates(),
        "selection": bar.selection(),
        "errors": bar.errors(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
