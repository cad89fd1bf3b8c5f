//! Search scope and backend filter compilation

pub mod filter;

pub use filter::{compile_filter, FilterExpression};

/// Field holding the language-keyed preferred labels of a concept
pub const PREF_LABEL_FIELD: &str = "prefLabel";
/// Field holding the tag labels of a concept
pub const TAG_LABELS_FIELD: &str = "tagLabels";
/// Field holding the dataset a concept was imported from
pub const SOURCE_DATASET_FIELD: &str = "sourceDataset";
/// Field holding the vocabulary a concept belongs to
pub const VOCABULARY_FIELD: &str = "vocabulary";

/// Constraint lists narrowing which concepts are eligible
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchScope {
    /// Comma-joined language codes; `None` or empty means every language
    pub languages: Option<String>,
    pub tags: Vec<String>,
    pub datasets: Vec<String>,
    pub vocabularies: Vec<String>,
}

impl SearchScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_languages(mut self, languages: Option<&str>) -> Self {
        self.languages = languages.map(str::to_string);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_datasets(mut self, datasets: Vec<String>) -> Self {
        self.datasets = datasets;
        self
    }

    pub fn with_vocabularies(mut self, vocabularies: Vec<String>) -> Self {
        self.vocabularies = vocabularies;
        self
    }

    /// Language codes to search labels in, defaulting to the `*` wildcard
    pub fn language_list(&self) -> Vec<&str> {
        let languages: Vec<&str> = self
            .languages
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .collect();

        if languages.is_empty() {
            vec!["*"]
        } else {
            languages
        }
    }
}
