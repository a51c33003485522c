//! Cluster-scoped filter stages.
//!
//! The global stage applies the dashboard-wide cluster selection; the local
//! stage applies the card's own cluster chips on top of it. Running both
//! yields the intersection, never a replacement.

use crate::field::Field;
use crate::traits::{Filter, FilterContext};

/// Keeps items whose cluster is in the global cluster selection.
///
/// Inactive while "all clusters" is selected. Items without a cluster value
/// are dropped while active.
pub struct GlobalClusterFilter<T> {
    field: Field<T>,
}

impl<T> GlobalClusterFilter<T> {
    pub fn new(field: Field<T>) -> Self {
        Self { field }
    }
}

impl<T> Filter<T> for GlobalClusterFilter<T> {
    fn name(&self) -> &str {
        "GlobalClusterFilter"
    }

    fn is_active(&self, context: &FilterContext<'_>) -> bool {
        !context.global.is_all_clusters_selected()
    }

    fn apply<'a>(&self, items: Vec<&'a T>, context: &FilterContext<'_>) -> Vec<&'a T> {
        items
            .into_iter()
            .filter(|item| {
                self.field
                    .value(item)
                    .is_some_and(|cluster| context.global.matches_cluster(&cluster))
            })
            .collect()
    }
}

/// Keeps items whose cluster is one of the card's local cluster chips.
///
/// Inactive while the card has no local cluster filter.
pub struct LocalClusterFilter<T> {
    field: Field<T>,
}

impl<T> LocalClusterFilter<T> {
    pub fn new(field: Field<T>) -> Self {
        Self { field }
    }
}

impl<T> Filter<T> for LocalClusterFilter<T> {
    fn name(&self) -> &str {
        "LocalClusterFilter"
    }

    fn is_active(&self, context: &FilterContext<'_>) -> bool {
        !context.local_clusters.is_empty()
    }

    fn apply<'a>(&self, items: Vec<&'a T>, context: &FilterContext<'_>) -> Vec<&'a T> {
        items
            .into_iter()
            .filter(|item| {
                self.field
                    .value(item)
                    .is_some_and(|cluster| context.local_clusters.contains(&cluster))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_context::{GlobalFilters, Selection};
    use std::collections::BTreeSet;

    #[derive(Debug)]
    struct Node {
        name: &'static str,
        cluster: Option<&'static str>,
    }

    fn cluster_field() -> Field<Node> {
        Field::new("cluster", |node: &Node| node.cluster.map(str::to_string))
    }

    fn nodes() -> Vec<Node> {
        vec![
            Node { name: "n1", cluster: Some("prod") },
            Node { name: "n2", cluster: Some("dev") },
            Node { name: "n3", cluster: None },
            Node { name: "n4", cluster: Some("prod") },
        ]
    }

    #[test]
    fn test_global_cluster_filter() {
        let global = GlobalFilters {
            clusters: Selection::only(["prod"]),
            ..Default::default()
        };
        let local = BTreeSet::new();
        let context = FilterContext {
            global: &global,
            local_clusters: &local,
            local_search: "",
        };

        let nodes = nodes();
        let filter = GlobalClusterFilter::new(cluster_field());
        assert!(filter.is_active(&context));

        let filtered = filter.apply(nodes.iter().collect(), &context);
        let names: Vec<&str> = filtered.iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["n1", "n4"]);
    }

    #[test]
    fn test_global_cluster_filter_inactive_for_all() {
        let global = GlobalFilters::default();
        let local = BTreeSet::new();
        let context = FilterContext {
            global: &global,
            local_clusters: &local,
            local_search: "",
        };
        assert!(!GlobalClusterFilter::new(cluster_field()).is_active(&context));
    }

    #[test]
    fn test_local_cluster_filter() {
        let global = GlobalFilters::default();
        let local: BTreeSet<String> = ["dev".to_string()].into();
        let context = FilterContext {
            global: &global,
            local_clusters: &local,
            local_search: "",
        };

        let nodes = nodes();
        let filter = LocalClusterFilter::new(cluster_field());
        assert!(filter.is_active(&context));

        let filtered = filter.apply(nodes.iter().collect(), &context);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "n2");
    }
}
