//! Core traits for the filtering stage.
//!
//! This module defines the Filter trait that lets the filter stages of a
//! card be chained by a `FilterPipeline`.

use fleet_context::GlobalFilters;
use std::collections::BTreeSet;

/// Everything a filter stage may consult besides the items themselves.
///
/// Built once per recomputation: one snapshot of the global filters plus
/// the card's own local filter state.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'c> {
    pub global: &'c GlobalFilters,
    pub local_clusters: &'c BTreeSet<String>,
    pub local_search: &'c str,
}

/// One stage of the filtering pipeline.
///
/// ## Design Note
/// - `Send + Sync` allows one configured card to be shared across threads
/// - Stages work on references into the caller's collection, so filtering
///   never clones or reorders records
/// - Stages are infallible: a stage that cannot evaluate an item drops it
pub trait Filter<T>: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Returns `false` when the stage has nothing to do for this context,
    /// e.g. an empty query or "all clusters" selected.
    fn is_active(&self, context: &FilterContext<'_>) -> bool;

    /// Keep the items matching this stage, preserving their order.
    fn apply<'a>(&self, items: Vec<&'a T>, context: &FilterContext<'_>) -> Vec<&'a T>;
}
