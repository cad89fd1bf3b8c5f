//! Highlighted display rows for candidate records

use serde::Serialize;

use crate::query::{PREF_LABEL_FIELD, TAG_LABELS_FIELD};
use crate::records::CandidateRecord;

const MARK_OPEN: &str = "<em>";
const MARK_CLOSE: &str = "</em>";

/// Replace the first plain occurrence of each fragment's text in `original`
/// with the marked-up fragment.
pub fn apply_highlights(original: &str, fragments: &[String]) -> String {
    let mut marked = original.to_string();
    for fragment in fragments {
        let plain = fragment.replace(MARK_OPEN, "").replace(MARK_CLOSE, "");
        if plain.is_empty() {
            continue;
        }
        marked = marked.replacen(&plain, fragment, 1);
    }
    marked
}

/// One line of a rendered candidate row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowLine {
    /// Language code, or `None` for the tag line
    pub language: Option<String>,
    pub text: String,
}

/// Display projection of a candidate record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRow {
    pub uri: String,
    pub lines: Vec<RowLine>,
}

impl CandidateRow {
    pub fn from_record(record: &CandidateRecord, highlight_enabled: bool) -> Self {
        let highlight = record.highlight.as_ref().filter(|_| highlight_enabled);

        let mut lines: Vec<RowLine> = record
            .pref_label
            .iter()
            .filter_map(|(lang, labels)| {
                let first = labels.first()?;
                let field = format!("{PREF_LABEL_FIELD}.{lang}");
                let text = match highlight.and_then(|h| h.get(&field)) {
                    Some(fragments) => apply_highlights(first, fragments),
                    None => first.clone(),
                };
                Some(RowLine {
                    language: Some(lang.clone()),
                    text,
                })
            })
            .collect();

        if let Some(tags) = highlight.and_then(|h| h.get(TAG_LABELS_FIELD)) {
            lines.push(RowLine {
                language: None,
                text: tags.join(", "),
            });
        }

        Self {
            uri: record.uri.clone(),
            lines,
        }
    }
}
