//! Dataset and vocabulary alias resolution
//!
//! Scope entries may be canonical uris or short aliases. Each entry is
//! looked up first as an exact alias, then as an exact uri. Entries found by
//! alias are replaced with the canonical uri; entries found by neither stay
//! as they are and are reported as [`UnresolvedReference`]s.
//!
//! Resolution never edits a scope list in place: [`resolve_scope`] returns a
//! new list which the caller swaps in once the whole batch has settled.

use std::time::Instant;

use futures_util::future::join_all;
use serde::Deserialize;
use tracing::debug;

use crate::backend::Backend;
use crate::error::{ReferenceKind, Result, UnresolvedReference};
use crate::trace_time;

/// Filter key matching an alias exactly
pub const ALIAS_FILTER: &str = "filter[:or:][:exact:alias]";
/// Filter key matching a resource uri exactly
pub const URI_FILTER: &str = "filter[:uri:]";

/// Which scope list an identifier belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Dataset,
    Vocabulary,
}

impl ScopeKind {
    /// Resource collection holding records of this kind
    pub fn resource(self) -> &'static str {
        match self {
            ScopeKind::Dataset => "datasets",
            ScopeKind::Vocabulary => "vocabularies",
        }
    }

    pub fn reference_kind(self) -> ReferenceKind {
        match self {
            ScopeKind::Dataset => ReferenceKind::Dataset,
            ScopeKind::Vocabulary => ReferenceKind::Vocabulary,
        }
    }
}

/// Outcome of resolving one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The identifier already is the canonical uri
    Canonical(String),
    /// The identifier is an alias of `canonical`
    Alias { alias: String, canonical: String },
    /// Neither an alias nor a uri known to the backend
    Unresolved(UnresolvedReference),
}

impl Resolution {
    /// The value that should take the identifier's place in the scope list
    pub fn scope_value(&self) -> &str {
        match self {
            Resolution::Canonical(uri) => uri,
            Resolution::Alias { canonical, .. } => canonical,
            Resolution::Unresolved(miss) => &miss.identifier,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScopeAttributes {
    uri: String,
}

async fn lookup<B: Backend>(
    backend: &B,
    kind: ScopeKind,
    key: &str,
    identifier: &str,
) -> Result<Option<String>> {
    let filters = [(key.to_string(), identifier.to_string())];
    let document = backend.fetch_resource(kind.resource(), &filters).await?;
    match document.data.into_iter().next() {
        Some(item) => {
            let attributes: ScopeAttributes = serde_json::from_value(item.attributes)?;
            Ok(Some(attributes.uri))
        }
        None => Ok(None),
    }
}

/// Resolve one scope identifier to its canonical uri.
///
/// Transport and decode failures propagate; a miss is an
/// [`Resolution::Unresolved`] value, not an error.
pub async fn resolve_identifier<B: Backend>(
    backend: &B,
    kind: ScopeKind,
    identifier: &str,
) -> Result<Resolution> {
    // The lookup backend cannot OR an alias filter with a uri filter, so
    // these are two requests.
    let found = match lookup(backend, kind, ALIAS_FILTER, identifier).await? {
        Some(uri) => Some(uri),
        None => lookup(backend, kind, URI_FILTER, identifier).await?,
    };

    Ok(match found {
        Some(uri) if uri == identifier => Resolution::Canonical(uri),
        Some(canonical) => {
            debug!(kind = kind.resource(), identifier, %canonical, "alias_resolved");
            Resolution::Alias {
                alias: identifier.to_string(),
                canonical,
            }
        }
        None => Resolution::Unresolved(UnresolvedReference::scope(
            kind.reference_kind(),
            identifier,
        )),
    })
}

/// Result of resolving a whole scope list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeResolution {
    /// The scope list with aliases replaced, in the original order
    pub resolved: Vec<String>,
    pub unresolved: Vec<UnresolvedReference>,
    /// Number of aliases replaced by canonical uris
    pub replaced: usize,
}

/// Resolve every identifier of a scope list concurrently.
///
/// The returned list only exists once every lookup has settled. If any
/// lookup fails at the transport level the first such error is returned and
/// no partial list is produced.
pub async fn resolve_scope<B: Backend>(
    backend: &B,
    kind: ScopeKind,
    identifiers: &[String],
) -> Result<ScopeResolution> {
    let start = Instant::now();
    let outcomes = join_all(
        identifiers
            .iter()
            .map(|identifier| resolve_identifier(backend, kind, identifier)),
    )
    .await;

    let mut resolution = ScopeResolution::default();
    for outcome in outcomes {
        let outcome = outcome?;
        resolution.resolved.push(outcome.scope_value().to_string());
        match outcome {
            Resolution::Alias { .. } => resolution.replaced += 1,
            Resolution::Unresolved(miss) => resolution.unresolved.push(miss),
            Resolution::Canonical(_) => {}
        }
    }

    trace_time!(start, "resolve_scope", entries = identifiers.len());
    Ok(resolution)
}
