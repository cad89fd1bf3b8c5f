//! Phase, change tracking and notifications of the search bar

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::records::{CandidateRecord, SelectionEntry};

/// Host-settable attributes whose changes drive an update pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    Query,
    Selections,
    Datasets,
    Vocabularies,
    Tags,
    Languages,
    SingleSelect,
    Page,
    Sort,
    ShowError,
    ShowConsoleError,
}

impl Attribute {
    /// Attribute name as exposed on the host surface
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Query => "query",
            Attribute::Selections => "selections",
            Attribute::Datasets => "source-datasets",
            Attribute::Vocabularies => "source-vocabularies",
            Attribute::Tags => "tags-filter",
            Attribute::Languages => "languages-string",
            Attribute::SingleSelect => "single-select",
            Attribute::Page => "page",
            Attribute::Sort => "sort",
            Attribute::ShowError => "show-error",
            Attribute::ShowConsoleError => "show-console-error",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "query" => Attribute::Query,
            "selections" => Attribute::Selections,
            "source-datasets" => Attribute::Datasets,
            "source-vocabularies" => Attribute::Vocabularies,
            "tags-filter" => Attribute::Tags,
            "languages-string" => Attribute::Languages,
            "single-select" => Attribute::SingleSelect,
            "page" => Attribute::Page,
            "sort" => Attribute::Sort,
            "show-error" => Attribute::ShowError,
            "show-console-error" => Attribute::ShowConsoleError,
            _ => return None,
        })
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attributes changed since the last update pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet(BTreeSet<Attribute>);

impl ChangeSet {
    pub fn mark(&mut self, attribute: Attribute) {
        self.0.insert(attribute);
    }

    pub fn remove(&mut self, attribute: Attribute) {
        self.0.remove(&attribute);
    }

    /// Add every change of `other`
    pub fn merge(&mut self, other: ChangeSet) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.0.contains(&attribute)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Take every pending change, leaving the set empty
    pub fn take(&mut self) -> ChangeSet {
        std::mem::take(self)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.0.iter().copied()
    }
}

/// Lifecycle phase of the search bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Alias resolution or selection hydration in flight; input is ignored
    #[default]
    Loading,
    /// Interactive
    Ready,
    /// A user selection was just emitted. The next update pass skips the
    /// query and selection reactions it caused, then returns to `Ready`.
    Suppressed,
}

impl Phase {
    /// Leave `Suppressed`, reporting whether it was active
    pub fn consume_suppression(&mut self) -> bool {
        if *self == Phase::Suppressed {
            *self = Phase::Ready;
            true
        } else {
            false
        }
    }
}

/// Events emitted towards the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "detail", rename_all = "kebab-case")]
pub enum Notification {
    SelectionChanged(Vec<SelectionEntry>),
    /// Fresh backend results only, without carried-over selected entries
    SearchResultsChanged(Vec<CandidateRecord>),
}

/// Monotonic tag of an issued search
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct SearchTicket(pub u64);
