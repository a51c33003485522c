//! Filter sub-control of a card.
//!
//! Owns the card's local filter state (search text, cluster chips, dropdown
//! visibility), persists the cluster chips, and runs the filter pipeline
//! against a snapshot of the global filters.

use crate::config::FilterConfig;
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{GlobalClusterFilter, LocalClusterFilter, SearchScope, StatusFilter, TextSearchFilter};
use crate::traits::FilterContext;
use card_store::{SharedStore, json, keys};
use fleet_context::{ClusterInfo, GlobalFilterContext, GlobalFilters, available_clusters_for_filter};
use std::collections::BTreeSet;
use tracing::debug;

/// Local filter state and filtering logic of one card.
pub struct CardFilters<T> {
    config: FilterConfig<T>,
    pipeline: FilterPipeline<T>,
    global: GlobalFilterContext,
    store: SharedStore,
    search: String,
    local_clusters: BTreeSet<String>,
    dropdown_open: bool,
}

impl<T: 'static> CardFilters<T> {
    /// Create the filter control, restoring persisted cluster chips.
    ///
    /// # Arguments
    /// * `config` - Declared fields and storage key of the card
    /// * `global` - Read-only handle to the dashboard's global filters
    /// * `store` - Durable storage for the cluster chips
    pub fn new(config: FilterConfig<T>, global: GlobalFilterContext, store: SharedStore) -> Self {
        let pipeline = build_pipeline(&config);
        let local_clusters = config
            .storage_key
            .as_deref()
            .and_then(|key| json::read_json::<Vec<String>>(store.as_ref(), &keys::local_cluster_filter(key)))
            .map(|clusters| clusters.into_iter().collect())
            .unwrap_or_default();

        debug!(
            "Card filters ready (stages: {:?}, restored clusters: {:?})",
            pipeline.stage_names(),
            local_clusters
        );

        Self {
            config,
            pipeline,
            global,
            store,
            search: String::new(),
            local_clusters,
            dropdown_open: false,
        }
    }
}

impl<T> CardFilters<T> {
    pub fn config(&self) -> &FilterConfig<T> {
        &self.config
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Set the local search text. Returns `true` if it changed.
    pub fn set_search(&mut self, search: impl Into<String>) -> bool {
        let search = search.into();
        if search == self.search {
            return false;
        }
        self.search = search;
        true
    }

    pub fn local_clusters(&self) -> &BTreeSet<String> {
        &self.local_clusters
    }

    pub fn has_local_cluster_filter(&self) -> bool {
        !self.local_clusters.is_empty()
    }

    /// Add `cluster` to the local filter, or remove it if already present.
    pub fn toggle_cluster(&mut self, cluster: &str) {
        if !self.local_clusters.remove(cluster) {
            self.local_clusters.insert(cluster.to_string());
        }
        debug!("Local cluster filter: {:?}", self.local_clusters);
        self.persist_clusters();
    }

    /// Replace the local filter. Returns `true` if it changed.
    pub fn set_local_clusters<I, S>(&mut self, clusters: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let clusters: BTreeSet<String> = clusters.into_iter().map(Into::into).collect();
        if clusters == self.local_clusters {
            return false;
        }
        self.local_clusters = clusters;
        self.persist_clusters();
        true
    }

    /// Drop the local filter and its persisted entry. Returns `true` if it changed.
    pub fn clear_local_clusters(&mut self) -> bool {
        self.set_local_clusters(Vec::<String>::new())
    }

    /// Cluster chips the user may pick from.
    pub fn available_clusters(&self, clusters: &[ClusterInfo]) -> Vec<String> {
        available_clusters_for_filter(clusters, &self.global.snapshot())
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    /// Close the cluster dropdown, e.g. on a click outside of it.
    pub fn dismiss_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    /// Snapshot of the global filters this card reads.
    pub fn global_filters(&self) -> GlobalFilters {
        self.global.snapshot()
    }

    /// Filter `items` against the current global filters.
    pub fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        self.apply_with(items, &self.global.snapshot())
    }

    /// Filter `items` against an already taken snapshot of the global filters.
    pub fn apply_with<'a>(&self, items: &'a [T], global: &GlobalFilters) -> Vec<&'a T> {
        let context = FilterContext {
            global,
            local_clusters: &self.local_clusters,
            local_search: &self.search,
        };
        self.pipeline.apply(items.iter().collect(), &context)
    }

    fn persist_clusters(&self) {
        let Some(key) = self.config.storage_key.as_deref() else {
            return;
        };
        let key = keys::local_cluster_filter(key);
        if self.local_clusters.is_empty() {
            json::remove_key(self.store.as_ref(), &key);
        } else {
            let clusters: Vec<&String> = self.local_clusters.iter().collect();
            json::write_json(self.store.as_ref(), &key, &clusters);
        }
    }
}

/// Stages in their fixed order; undeclared fields contribute no stage.
fn build_pipeline<T: 'static>(config: &FilterConfig<T>) -> FilterPipeline<T> {
    let mut pipeline = FilterPipeline::new();
    if let Some(cluster) = &config.cluster_field {
        pipeline = pipeline.add_filter(GlobalClusterFilter::new(cluster.clone()));
    }
    if let Some(status) = &config.status_field {
        pipeline = pipeline.add_filter(StatusFilter::new(status.clone()));
    }
    if let Some(cluster) = &config.cluster_field {
        pipeline = pipeline.add_filter(LocalClusterFilter::new(cluster.clone()));
    }
    if config.is_searchable() {
        pipeline = pipeline
            .add_filter(TextSearchFilter::new(
                SearchScope::Global,
                config.search_fields.clone(),
                config.custom_predicate.clone(),
            ))
            .add_filter(TextSearchFilter::new(
                SearchScope::Local,
                config.search_fields.clone(),
                config.custom_predicate.clone(),
            ));
    }
    pipeline
}
