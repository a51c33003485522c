//! Cluster inventory helpers.
//!
//! The dashboard's data source reports every cluster it knows about; only
//! the reachable ones are offered as filter choices.

use crate::types::GlobalFilters;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A cluster as reported by the dashboard's data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub name: String,
    /// kubeconfig context backing the cluster, when different from the name
    #[serde(default)]
    pub context: Option<String>,
    /// `Some(true)` once a health probe succeeded, `Some(false)` when it failed
    #[serde(default)]
    pub reachable: Option<bool>,
    #[serde(default)]
    pub healthy: Option<bool>,
}

impl ClusterInfo {
    pub fn new(name: impl Into<String>, reachable: Option<bool>) -> Self {
        Self {
            name: name.into(),
            context: None,
            reachable,
            healthy: None,
        }
    }

    /// Only clusters confirmed live are reachable; unknown counts as unreachable.
    pub fn is_reachable(&self) -> bool {
        self.reachable == Some(true)
    }
}

/// Names of reachable clusters, de-duplicated, in input order.
pub fn reachable_clusters(clusters: &[ClusterInfo]) -> Vec<&str> {
    let mut seen = HashSet::new();
    clusters
        .iter()
        .filter(|cluster| cluster.is_reachable())
        .map(|cluster| cluster.name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Cluster choices for a card's filter dropdown.
///
/// Reachable clusters, narrowed to the global selection unless all clusters
/// are selected.
pub fn available_clusters_for_filter(clusters: &[ClusterInfo], global: &GlobalFilters) -> Vec<String> {
    reachable_clusters(clusters)
        .into_iter()
        .filter(|name| global.matches_cluster(name))
        .map(str::to_string)
        .collect()
}
