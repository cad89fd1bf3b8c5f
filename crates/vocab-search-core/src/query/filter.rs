//! Compile query text and scope into backend filter parameters

use std::collections::BTreeMap;

use super::{
    SearchScope, PREF_LABEL_FIELD, SOURCE_DATASET_FIELD, TAG_LABELS_FIELD, VOCABULARY_FIELD,
};

/// Key prefix of the simple-query-string clause
pub const SQS_PREFIX: &str = ":sqs:";
/// Key prefix of a terms clause
pub const TERMS_PREFIX: &str = ":terms:";
/// Match-all query value
pub const MATCH_ALL: &str = "*";

/// Backend filter parameters, keyed by filter key (without the `filter[...]`
/// wrapper). A missing key means the corresponding scope is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    clauses: BTreeMap<String, String>,
}

impl FilterExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.clauses.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.clauses.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.clauses.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.clauses.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The field list targeted by the simple-query-string clause, if any
    pub fn search_target(&self) -> Option<&str> {
        self.clauses.keys().find_map(|k| k.strip_prefix(SQS_PREFIX))
    }

    /// The simple-query-string value, if any
    pub fn search_value(&self) -> Option<&str> {
        self.clauses
            .iter()
            .find(|(k, _)| k.starts_with(SQS_PREFIX))
            .map(|(_, v)| v.as_str())
    }
}

/// Build the simple-query-string value for a free-text query.
///
/// Every whitespace-separated token matches as prefix or exact term; the
/// backend ANDs space-joined terms. Absent or blank queries match everything.
pub fn query_string(query: Option<&str>) -> String {
    let tokens: Vec<String> = query
        .unwrap_or_default()
        .split_whitespace()
        .map(|word| format!("({word}*|{word})"))
        .collect();

    if tokens.is_empty() {
        MATCH_ALL.to_string()
    } else {
        tokens.join(" ")
    }
}

/// Compile query text and scope into a filter expression.
///
/// Pure: identical inputs always produce identical output. Empty scope lists
/// produce no clause at all.
pub fn compile_filter(query: Option<&str>, scope: &SearchScope) -> FilterExpression {
    let mut filter = FilterExpression::new();

    let label_fields = scope
        .language_list()
        .iter()
        .map(|lang| format!("{PREF_LABEL_FIELD}.{lang}"))
        .collect::<Vec<_>>()
        .join(",");

    filter.insert(
        format!("{SQS_PREFIX}{label_fields},{TAG_LABELS_FIELD}"),
        query_string(query),
    );

    let terms = [
        (TAG_LABELS_FIELD, &scope.tags),
        (SOURCE_DATASET_FIELD, &scope.datasets),
        (VOCABULARY_FIELD, &scope.vocabularies),
    ];
    for (field, values) in terms {
        if !values.is_empty() {
            filter.insert(format!("{TERMS_PREFIX}{field}"), values.join(","));
        }
    }

    filter
}
