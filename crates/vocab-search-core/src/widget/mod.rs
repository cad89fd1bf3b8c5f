//! The search bar controller
//!
//! [`SearchBar`] owns every piece of mutable widget state: query, selection,
//! scope lists, phase, error log and the merged candidate list. The host
//! sets attributes through setters, which only record the change; the
//! reaction happens in the next [`SearchBar::update`] pass, evaluated in
//! this order:
//!
//! 1. dataset/vocabulary scope changed: resolve aliases, then search
//! 2. tag/language/page/sort changed: search
//! 3. selection attribute changed externally: re-hydrate the selection
//! 4. query changed: search
//! 5. single-select switched on: keep the first selected entry
//!
//! The error toggles `show-error` and `show-console-error` take effect
//! immediately and cause no reaction.
//!
//! A pass searches at most once. User selections emitted by the widget put
//! it in [`Phase::Suppressed`] so the echo they cause (the rendering surface
//! clearing its filter text, the selection attribute being rewritten) is
//! skipped by the following pass.

pub mod state;


use tracing::{debug, warn};

use crate::attributes::{parse_comma_list, to_comma_list};
use crate::backend::{Backend, SearchPage, SearchRequest};
use crate::config::WidgetConfig;
use crate::error::{Result, SearchBarError, UnresolvedReference};
use crate::pagination::PaginationMetadata;
use crate::query::{compile_filter, FilterExpression, SearchScope};
use crate::records::{CandidateRecord, SelectionEntry};
use crate::resolve::{resolve_scope, ScopeKind, ScopeResolution};
use crate::selection::{Hydrator, Selection};

pub use state::{Attribute, ChangeSet, Notification, Phase, SearchTicket};

fn assign<T: PartialEq>(slot: &mut T, value: T, changes: &mut ChangeSet, attribute: Attribute) {
    if *slot != value {
        *slot = value;
        changes.mark(attribute);
    }
}

/// Search-and-select widget state machine over a [`Backend`]
pub struct SearchBar<B> {
    backend: B,
    config: WidgetConfig,
    query: Option<String>,
    /// The selection attribute: uris only
    selections: Vec<String>,
    selection: Selection,
    /// Snapshot taken before an external selection change
    previous: Selection,
    scope: SearchScope,
    single_select: bool,
    page: u64,
    sort: Option<String>,
    phase: Phase,
    changes: ChangeSet,
    candidates: Vec<CandidateRecord>,
    last_results: Vec<CandidateRecord>,
    pagination: Option<PaginationMetadata>,
    result_count: u64,
    errors: Vec<UnresolvedReference>,
    outbox: Vec<Notification>,
    /// A search was triggered but has not completed yet
    search_pending: bool,
    issued: SearchTicket,
    applied: Option<SearchTicket>,
}

impl<B: Backend> SearchBar<B> {
    /// A widget in [`Phase::Loading`] until [`SearchBar::connect`] completes
    pub fn new(backend: B, config: WidgetConfig) -> Self {
        Self {
            scope: config.initial_scope(),
            single_select: config.single_select,
            backend,
            config,
            query: None,
            selections: Vec::new(),
            selection: Selection::new(),
            previous: Selection::new(),
            page: 0,
            sort: None,
            phase: Phase::Loading,
            changes: ChangeSet::default(),
            candidates: Vec::new(),
            last_results: Vec::new(),
            pagination: None,
            result_count: 0,
            errors: Vec::new(),
            outbox: Vec::new(),
            search_pending: false,
            issued: SearchTicket::default(),
            applied: None,
        }
    }

    pub fn set_query(&mut self, query: Option<String>) {
        assign(&mut self.query, query, &mut self.changes, Attribute::Query);
    }

    pub fn set_selections(&mut self, uris: Vec<String>) {
        assign(&mut self.selections, uris, &mut self.changes, Attribute::Selections);
    }

    pub fn set_datasets(&mut self, datasets: Vec<String>) {
        assign(&mut self.scope.datasets, datasets, &mut self.changes, Attribute::Datasets);
    }

    pub fn set_vocabularies(&mut self, vocabularies: Vec<String>) {
        assign(
            &mut self.scope.vocabularies,
            vocabularies,
            &mut self.changes,
            Attribute::Vocabularies,
        );
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        assign(&mut self.scope.tags, tags, &mut self.changes, Attribute::Tags);
    }

    pub fn set_languages(&mut self, languages: Option<String>) {
        assign(&mut self.scope.languages, languages, &mut self.changes, Attribute::Languages);
    }

    pub fn set_single_select(&mut self, single_select: bool) {
        assign(
            &mut self.single_select,
            single_select,
            &mut self.changes,
            Attribute::SingleSelect,
        );
    }

    pub fn set_page(&mut self, page: u64) {
        assign(&mut self.page, page, &mut self.changes, Attribute::Page);
    }

    /// Sort specifier such as `prefLabel` or `-prefLabel`; `None` sorts by
    /// relevance
    pub fn set_sort(&mut self, sort: Option<String>) {
        assign(&mut self.sort, sort, &mut self.changes, Attribute::Sort);
    }

    /// Show the latest unresolved reference through [`SearchBar::visible_error`]
    pub fn set_show_error(&mut self, show: bool) {
        self.config.show_error = show;
    }

    /// Log unresolved references as warnings
    pub fn set_show_console_error(&mut self, show: bool) {
        self.config.show_console_error = show;
    }

    /// Set an attribute from its serialized host form. `None` removes it.
    /// Boolean attributes are on when present with any value but `"false"`.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        let attribute = Attribute::from_name(name)
            .ok_or_else(|| SearchBarError::UsageError(format!("unknown attribute '{name}'")))?;
        let list = || value.map(parse_comma_list).unwrap_or_default();
        let flag = value.is_some_and(|v| v != "false");

        match attribute {
            Attribute::Query => self.set_query(value.map(str::to_string)),
            Attribute::Selections => self.set_selections(list()),
            Attribute::Datasets => self.set_datasets(list()),
            Attribute::Vocabularies => self.set_vocabularies(list()),
            Attribute::Tags => self.set_tags(list()),
            Attribute::Languages => {
                self.set_languages(value.filter(|v| !v.is_empty()).map(str::to_string))
            }
            Attribute::SingleSelect => self.set_single_select(flag),
            Attribute::ShowError => self.set_show_error(flag),
            Attribute::ShowConsoleError => self.set_show_console_error(flag),
            Attribute::Page => {
                let page = match value {
                    Some(v) => v
                        .parse()
                        .map_err(|_| SearchBarError::invalid_value("page", v))?,
                    None => 0,
                };
                self.set_page(page);
            }
            Attribute::Sort => self.set_sort(value.filter(|v| !v.is_empty()).map(str::to_string)),
        }
        Ok(())
    }

    /// Current value of an attribute in its serialized host form
    pub fn attribute(&self, attribute: Attribute) -> Option<String> {
        let list = |values: &[String]| Some(to_comma_list(values)).filter(|v| !v.is_empty());

        match attribute {
            Attribute::Query => self.query.clone(),
            Attribute::Selections => list(&self.selections),
            Attribute::Datasets => list(&self.scope.datasets),
            Attribute::Vocabularies => list(&self.scope.vocabularies),
            Attribute::Tags => list(&self.scope.tags),
            Attribute::Languages => self.scope.languages.clone(),
            Attribute::SingleSelect => self.single_select.then(String::new),
            Attribute::Page => Some(self.page.to_string()),
            Attribute::Sort => self.sort.clone(),
            Attribute::ShowError => self.config.show_error.then(String::new),
            Attribute::ShowConsoleError => self.config.show_console_error.then(String::new),
        }
    }

    /// The rendering surface's filter text changed
    pub fn user_query_changed(&mut self, query: &str) {
        self.set_query(Some(query.to_string()));
    }

    /// The rendering surface reports its full new selection.
    ///
    /// Returns `false` without any effect while loading, or when the report
    /// is an echo of the current selection (same size, nothing added).
    pub fn user_selected(&mut self, records: Vec<CandidateRecord>) -> bool {
        if self.phase == Phase::Loading {
            return false;
        }

        let old = self.selection.uris();
        let mut added = records
            .iter()
            .map(|r| r.uri.as_str())
            .filter(|uri| !old.iter().any(|o| o == uri));
        let first_added = added.next().map(str::to_string);
        if records.len() == old.len() && first_added.is_none() {
            debug!(count = records.len(), "selection_echo_ignored");
            return false;
        }

        let strategy = self.config.label_strategy;
        let mut selection = Selection::from_entries(
            records
                .into_iter()
                .map(|record| SelectionEntry::new(record, &strategy)),
        );
        if self.single_select {
            let kept = first_added.and_then(|uri| selection.remove(&uri));
            selection = Selection::from_entries(kept);
        }

        self.selection = selection;
        self.outbox.push(Notification::SelectionChanged(
            self.selection.entries().to_vec(),
        ));
        self.selections = self.selection.uris();
        self.changes.mark(Attribute::Selections);
        self.phase = Phase::Suppressed;
        true
    }

    /// Initial load: resolve scope aliases, then hydrate the selection
    /// attribute. Changes made before or during the load are absorbed by it.
    pub async fn connect(&mut self) -> Result<()> {
        self.phase = Phase::Loading;
        let outcome = self.initial_load().await;
        self.changes.clear();
        self.phase = Phase::Ready;
        outcome
    }

    async fn initial_load(&mut self) -> Result<()> {
        self.resolve_scopes(true, true).await?;
        self.hydrate_selections().await?;
        if self.single_select {
            self.keep_first_selected();
        }
        Ok(())
    }

    /// Run one update pass over the changes recorded since the last one.
    ///
    /// On failure the reactions that did not complete stay pending, so the
    /// next pass retries them.
    pub async fn update(&mut self) -> Result<()> {
        if self.phase == Phase::Loading {
            return Ok(());
        }
        let mut changes = self.changes.take();
        let suppressed = self.phase.consume_suppression();
        if suppressed {
            changes.remove(Attribute::Query);
            changes.remove(Attribute::Selections);
        }
        if changes.is_empty() && !self.search_pending {
            return Ok(());
        }
        debug!(changes = ?changes.iter().map(Attribute::name).collect::<Vec<_>>(), suppressed, "update");

        let outcome = self.react(&mut changes).await;
        if outcome.is_err() {
            self.changes.merge(changes);
        }
        outcome
    }

    /// Apply the reactions of one pass, removing each from `changes` once
    /// it has completed
    async fn react(&mut self, changes: &mut ChangeSet) -> Result<()> {
        let datasets = changes.contains(Attribute::Datasets);
        let vocabularies = changes.contains(Attribute::Vocabularies);
        if datasets || vocabularies {
            self.resolve_scopes(datasets, vocabularies).await?;
            changes.remove(Attribute::Datasets);
            changes.remove(Attribute::Vocabularies);
            self.search_pending = true;
        }

        if [
            Attribute::Tags,
            Attribute::Languages,
            Attribute::Page,
            Attribute::Sort,
            Attribute::Query,
        ]
        .into_iter()
        .any(|attribute| changes.contains(attribute))
        {
            self.search_pending = true;
        }

        if changes.contains(Attribute::Selections) {
            self.previous = std::mem::take(&mut self.selection);
            self.phase = Phase::Loading;
            let outcome = self.hydrate_selections().await;
            self.phase = Phase::Ready;
            if outcome.is_err() {
                self.selection = std::mem::take(&mut self.previous);
            }
            outcome?;
            changes.remove(Attribute::Selections);
        }

        if changes.contains(Attribute::SingleSelect) && self.single_select {
            self.keep_first_selected();
        }

        if self.search_pending {
            self.search().await?;
        }
        changes.clear();
        Ok(())
    }

    /// Resolve the requested scope lists concurrently and swap them in once
    /// both have settled
    async fn resolve_scopes(&mut self, datasets: bool, vocabularies: bool) -> Result<()> {
        let backend = &self.backend;
        let scope = &self.scope;
        let (dataset_resolution, vocabulary_resolution) = futures_util::join!(
            async {
                if datasets {
                    Some(resolve_scope(backend, ScopeKind::Dataset, &scope.datasets).await)
                } else {
                    None
                }
            },
            async {
                if vocabularies {
                    Some(resolve_scope(backend, ScopeKind::Vocabulary, &scope.vocabularies).await)
                } else {
                    None
                }
            },
        );
        let dataset_resolution = dataset_resolution.transpose()?;
        let vocabulary_resolution = vocabulary_resolution.transpose()?;

        if let Some(resolution) = dataset_resolution {
            let datasets = self.absorb(resolution);
            self.scope.datasets = datasets;
        }
        if let Some(resolution) = vocabulary_resolution {
            let vocabularies = self.absorb(resolution);
            self.scope.vocabularies = vocabularies;
        }
        Ok(())
    }

    fn absorb(&mut self, resolution: ScopeResolution) -> Vec<String> {
        for miss in resolution.unresolved {
            self.record_unresolved(miss);
        }
        resolution.resolved
    }

    async fn hydrate_selections(&mut self) -> Result<()> {
        let mut live = std::mem::take(&mut self.selection);
        let hydrator = Hydrator {
            backend: &self.backend,
            resource: &self.config.index,
            scope: &self.scope,
            previous: &self.previous,
            strategy: &self.config.label_strategy,
        };
        let outcome = hydrator.hydrate(&self.selections, &mut live).await;
        self.selection = live;

        for miss in outcome?.unresolved {
            self.record_unresolved(miss);
        }
        Ok(())
    }

    fn keep_first_selected(&mut self) {
        if self.selection.len() > 1 {
            self.selection.truncate_to_first();
            self.selections = self.selection.uris();
        }
    }

    /// Search with the current query and scope and merge the results
    pub async fn search(&mut self) -> Result<bool> {
        let (ticket, filter) = self.begin_search();
        let page = self.backend.search(&self.request(&filter)).await?;
        self.search_pending = false;
        Ok(self.apply_search(ticket, page))
    }

    /// Issue a ticket and compile the filter for a new search
    pub fn begin_search(&mut self) -> (SearchTicket, FilterExpression) {
        self.issued = SearchTicket(self.issued.0 + 1);
        let filter = compile_filter(self.query.as_deref(), &self.scope);
        debug!(ticket = self.issued.0, filters = filter.len(), "begin_search");
        (self.issued, filter)
    }

    /// Search request for the current page, size and sort
    pub fn request<'a>(&'a self, filter: &'a FilterExpression) -> SearchRequest<'a> {
        SearchRequest {
            index: &self.config.index,
            page: self.page,
            size: self.config.page_size,
            sort: self.sort.as_deref(),
            filter,
        }
    }

    /// Apply a settled search. The candidate list becomes the results
    /// followed by selected entries absent from them.
    ///
    /// With strict ordering, a completion older than the last applied one is
    /// discarded and `false` returned.
    pub fn apply_search(&mut self, ticket: SearchTicket, page: SearchPage<CandidateRecord>) -> bool {
        if self.config.strict_ordering && self.applied.is_some_and(|applied| ticket < applied) {
            debug!(ticket = ticket.0, "stale_search_discarded");
            return false;
        }
        self.applied = Some(ticket);

        let results = page.content;
        self.candidates = results
            .iter()
            .chain(self.selection.records_outside(&results))
            .cloned()
            .collect();
        self.pagination = Some(page.meta.pagination);
        self.result_count = page.meta.count;
        self.last_results = results.clone();
        self.outbox.push(Notification::SearchResultsChanged(results));
        true
    }

    fn record_unresolved(&mut self, miss: UnresolvedReference) {
        if self.config.show_console_error {
            warn!(kind = %miss.kind, identifier = %miss.identifier, "{}", miss.message);
        }
        self.errors.push(miss);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The selection attribute as last written by the host or the widget
    pub fn selection_uris(&self) -> &[String] {
        &self.selections
    }

    pub fn candidates(&self) -> &[CandidateRecord] {
        &self.candidates
    }

    /// Results of the last applied search, without carried-over entries
    pub fn last_results(&self) -> &[CandidateRecord] {
        &self.last_results
    }

    pub fn pagination(&self) -> Option<&PaginationMetadata> {
        self.pagination.as_ref()
    }

    /// Total hit count of the last applied search
    pub fn result_count(&self) -> u64 {
        self.result_count
    }

    pub fn scope(&self) -> &SearchScope {
        &self.scope
    }

    pub fn single_select(&self) -> bool {
        self.single_select
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn pending_changes(&self) -> &ChangeSet {
        &self.changes
    }

    /// Most recent unresolved reference
    pub fn last_error(&self) -> Option<&UnresolvedReference> {
        self.errors.last()
    }

    /// Error message to render inline, if errors are shown
    pub fn visible_error(&self) -> Option<&str> {
        self.last_error()
            .filter(|_| self.config.show_error)
            .map(|miss| miss.message.as_str())
    }

    pub fn errors(&self) -> &[UnresolvedReference] {
        &self.errors
    }

    /// Drain notifications emitted since the last call
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }
}
