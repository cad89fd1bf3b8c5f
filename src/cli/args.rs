use clap::{Args, ValueEnum};
use vocab_search_core::resolve::ScopeKind;

/// Dataset and vocabulary scope flags shared by several commands
#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Source dataset uri or alias (repeatable, or comma-separated)
    #[arg(long, value_delimiter = ',', action = clap::ArgAction::Append)]
    pub dataset: Vec<String>,

    /// Vocabulary uri or alias (repeatable, or comma-separated)
    #[arg(long, value_delimiter = ',', action = clap::ArgAction::Append)]
    pub vocabulary: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Free-text query; every word matches as prefix or exact term
    pub query: String,

    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Tag label filter (repeatable, or comma-separated)
    #[arg(long, short, value_delimiter = ',', action = clap::ArgAction::Append)]
    pub tag: Vec<String>,

    /// Comma-separated label languages to search (default: all)
    #[arg(long)]
    pub languages: Option<String>,

    /// Initially selected concept uris
    #[arg(long, value_delimiter = ',', action = clap::ArgAction::Append)]
    pub select: Vec<String>,

    /// Keep at most one selected concept
    #[arg(long)]
    pub single_select: bool,

    /// Zero-based page number
    #[arg(long, default_value_t = 0)]
    pub page: u64,

    /// Results per page
    #[arg(long)]
    pub size: Option<u64>,

    /// Sort field, prefixed with '-' for descending (default: relevance)
    #[arg(long, allow_hyphen_values = true)]
    pub sort: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Uris or aliases to resolve
    #[arg(required = true)]
    pub identifiers: Vec<String>,

    /// Which kind of resource the identifiers name
    #[arg(long, value_enum, default_value = "vocabulary")]
    pub kind: ScopeKindArg,
}

#[derive(Args, Debug, Clone)]
pub struct HydrateArgs {
    /// Concept uris to hydrate
    #[arg(required = true)]
    pub uris: Vec<String>,

    #[command(flatten)]
    pub scope: ScopeArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKindArg {
    Dataset,
    Vocabulary,
}

impl From<ScopeKindArg> for ScopeKind {
    fn from(kind: ScopeKindArg) -> Self {
        match kind {
            ScopeKindArg::Dataset => ScopeKind::Dataset,
            ScopeKindArg::Vocabulary => ScopeKind::Vocabulary,
        }
    }
}
