//! Vocab Search Core Library
//!
//! Search-and-select logic for concept vocabularies: filter compilation,
//! paginated search, alias resolution, selection hydration and the
//! [`widget::SearchBar`] state machine that reconciles them.

pub mod attributes;
pub mod backend;
pub mod config;
pub mod error;
pub mod highlight;
pub mod logging;
pub mod pagination;
pub mod query;
pub mod records;
pub mod resolve;
pub mod selection;
pub mod widget;

#[cfg(test)]
mod test_support;
