//! Single-select cluster choice of a card.

use crate::field::Field;
use card_store::{SharedStore, json, keys};
use fleet_context::{GlobalFilterContext, GlobalFilters};
use tracing::debug;

/// One cluster picked from a dropdown, or none for "all clusters".
///
/// Unlike the multi-select chips of [`crate::CardFilters`], the choice may
/// point at a cluster the global filter currently hides. The card keeps the
/// choice and reports it through [`ClusterSelection::is_outside_global_filter`]
/// so the host can warn instead of silently dropping it.
pub struct ClusterSelection {
    key: String,
    store: SharedStore,
    global: GlobalFilterContext,
    selected: Option<String>,
}

impl ClusterSelection {
    pub fn new(storage_key: &str, global: GlobalFilterContext, store: SharedStore) -> Self {
        let key = keys::cluster_selection(storage_key);
        let selected = json::read_string(store.as_ref(), &key).filter(|s| !s.is_empty());
        debug!("Cluster selection {} restored: {:?}", key, selected);
        Self {
            key,
            store,
            global,
            selected,
        }
    }

    /// The chosen cluster, `None` meaning all clusters.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Choose `cluster`; an empty name is the same as [`ClusterSelection::clear`].
    pub fn select(&mut self, cluster: &str) {
        if cluster.is_empty() {
            self.clear();
            return;
        }
        self.selected = Some(cluster.to_string());
        json::write_string(self.store.as_ref(), &self.key, cluster);
    }

    pub fn clear(&mut self) {
        self.selected = None;
        json::remove_key(self.store.as_ref(), &self.key);
    }

    /// Whether the choice names a cluster the global filter excludes.
    pub fn is_outside_global_filter(&self) -> bool {
        self.is_outside(&self.global.snapshot())
    }

    fn is_outside(&self, global: &GlobalFilters) -> bool {
        self.selected
            .as_deref()
            .is_some_and(|cluster| !global.matches_cluster(cluster))
    }

    /// Global cluster filter first, then equality with the chosen cluster.
    pub fn filter<'a, T>(&self, items: &'a [T], cluster_field: &Field<T>) -> Vec<&'a T> {
        let global = self.global.snapshot();
        items
            .iter()
            .filter(|item| {
                let Some(cluster) = cluster_field.value(item) else {
                    return global.is_all_clusters_selected() && self.selected.is_none();
                };
                global.matches_cluster(&cluster) && self.selected.as_deref().is_none_or(|s| s == cluster)
            })
            .collect()
    }
}
