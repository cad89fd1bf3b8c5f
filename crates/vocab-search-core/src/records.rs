//! Concept records as produced by the search and resource backends
//!
//! The search backend returns language-keyed labels (`{"en": ["cat"]}`)
//! while the resource backend returns a list of language-tagged strings
//! (`[{"content": "cat", "language": "en"}]`). Both end up as a
//! [`CandidateRecord`] with the language-keyed form; key order follows the
//! backend response.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;

/// Language code to ordered labels
pub type LanguageLabels = IndexMap<String, Vec<String>>;

/// Field path to marked-up fragments (`<em>...</em>`)
pub type Highlight = IndexMap<String, Vec<String>>;

/// Default number of characters kept by [`LabelStrategy::Truncated`]
pub const DEFAULT_LABEL_LENGTH: usize = 15;

/// One element of a search response's `data` array
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
    #[serde(default)]
    pub highlight: Option<Highlight>,
}

/// One element of a resource lookup response's `data` array
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceItem {
    pub id: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

/// A concept eligible for selection, identified by its uri
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub uri: String,
    #[serde(default)]
    pub pref_label: LanguageLabels,
    #[serde(default, deserialize_with = "string_or_list")]
    pub tag_labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Highlight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dataset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary: Option<String>,
}

impl CandidateRecord {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            id: None,
            uri: uri.into(),
            pref_label: LanguageLabels::new(),
            tag_labels: Vec::new(),
            highlight: None,
            source_dataset: None,
            vocabulary: None,
        }
    }

    pub fn with_label(mut self, language: &str, label: &str) -> Self {
        self.pref_label
            .entry(language.to_string())
            .or_default()
            .push(label.to_string());
        self
    }

    /// Default row mapper for search hits
    pub fn from_hit(hit: SearchHit) -> Result<Self> {
        let mut record: CandidateRecord = serde_json::from_value(hit.attributes)?;
        record.id = Some(hit.id);
        record.highlight = hit.highlight;
        Ok(record)
    }

    /// Build a record from a resource lookup item, normalizing its
    /// language-tagged label list
    pub fn from_resource(item: ResourceItem) -> Result<Self> {
        let attributes: ConceptAttributes = serde_json::from_value(item.attributes)?;
        Ok(Self {
            id: Some(item.id),
            uri: attributes.uri,
            pref_label: normalize_pref_labels(&attributes.pref_label),
            tag_labels: attributes.tag_labels,
            highlight: None,
            source_dataset: attributes.source_dataset,
            vocabulary: attributes.vocabulary,
        })
    }

    /// First label of the first language, if any
    pub fn first_label(&self) -> Option<&str> {
        self.pref_label
            .values()
            .find_map(|labels| labels.first())
            .map(String::as_str)
    }
}

/// A language-tagged string as returned by the resource backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LanguageString {
    Tagged { content: String, language: String },
    Plain(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ConceptAttributes {
    uri: String,
    #[serde(default)]
    pref_label: Vec<LanguageString>,
    #[serde(default, deserialize_with = "string_or_list")]
    tag_labels: Vec<String>,
    #[serde(default)]
    source_dataset: Option<String>,
    #[serde(default)]
    vocabulary: Option<String>,
}

/// Convert `[{content, language}, ...]` into `{language: [content, ...]}`,
/// keeping first-seen language order and per-language label order.
/// Untagged strings are grouped under the empty language code.
pub fn normalize_pref_labels(labels: &[LanguageString]) -> LanguageLabels {
    let mut normalized = LanguageLabels::new();
    for label in labels {
        let (language, content) = match label {
            LanguageString::Tagged { content, language } => (language.as_str(), content),
            LanguageString::Plain(content) => ("", content),
        };
        normalized
            .entry(language.to_string())
            .or_default()
            .push(content.clone());
    }
    normalized
}

fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Null(Option<()>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
        OneOrMany::Null(_) => Vec::new(),
    })
}

/// How the display label of a selected entry is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelStrategy {
    /// First label, cut to `max_chars` characters followed by `...`
    Truncated { max_chars: usize },
    /// First label as-is
    Full,
    /// The concept uri
    Uri,
}

impl Default for LabelStrategy {
    fn default() -> Self {
        LabelStrategy::Truncated {
            max_chars: DEFAULT_LABEL_LENGTH,
        }
    }
}

impl LabelStrategy {
    pub fn display_label(&self, record: &CandidateRecord) -> String {
        let label = match self {
            LabelStrategy::Uri => return record.uri.clone(),
            _ => record.first_label().unwrap_or(&record.uri),
        };

        match *self {
            LabelStrategy::Truncated { max_chars } if label.chars().count() >= max_chars => {
                let cut: String = label.chars().take(max_chars).collect();
                format!("{cut}...")
            }
            _ => label.to_string(),
        }
    }
}

/// A selected record with its derived display label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionEntry {
    #[serde(flatten)]
    pub record: CandidateRecord,
    #[serde(rename = "trimmedPrefLabel")]
    pub display_label: String,
}

impl SelectionEntry {
    pub fn new(record: CandidateRecord, strategy: &LabelStrategy) -> Self {
        let display_label = strategy.display_label(&record);
        Self {
            record,
            display_label,
        }
    }

    pub fn uri(&self) -> &str {
        &self.record.uri
    }
}
