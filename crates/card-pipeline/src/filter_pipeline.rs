//! The FilterPipeline chains filter stages in a fixed order.

use crate::traits::{Filter, FilterContext};
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GlobalClusterFilter::new(cluster.clone()))
///     .add_filter(StatusFilter::new(status))
///     .add_filter(LocalClusterFilter::new(cluster));
///
/// let filtered = pipeline.apply(items.iter().collect(), &context);
/// ```
pub struct FilterPipeline<T> {
    filters: Vec<Box<dyn Filter<T>>>,
}

impl<T> FilterPipeline<T> {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the end of the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter<T> + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the configured stages, in application order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.filters.iter().map(|filter| filter.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the items.
    ///
    /// ## Algorithm
    /// 1. Start with the input items
    /// 2. For each filter in order:
    ///    a. Skip it if inactive for this context
    ///    b. Apply the filter, logging input and output counts
    /// 3. Return the surviving items in their original order
    pub fn apply<'a>(&self, items: Vec<&'a T>, context: &FilterContext<'_>) -> Vec<&'a T> {
        let mut current = items;
        for filter in &self.filters {
            if !filter.is_active(context) {
                continue;
            }
            let input_count = current.len();
            current = filter.apply(current, context);
            debug!(
                "Filter applied: {} ({} -> {} items)",
                filter.name(),
                input_count,
                current.len()
            );
        }
        current
    }
}

impl<T> Default for FilterPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::filters::{GlobalClusterFilter, LocalClusterFilter};
    use fleet_context::{GlobalFilters, Selection};
    use std::collections::BTreeSet;

    fn cluster_field() -> Field<(&'static str, &'static str)> {
        Field::new("cluster", |item: &(&'static str, &'static str)| Some(item.1.to_string()))
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline: FilterPipeline<(&str, &str)> = FilterPipeline::new();
        let global = GlobalFilters::default();
        let local = BTreeSet::new();
        let context = FilterContext {
            global: &global,
            local_clusters: &local,
            local_search: "",
        };

        let items = vec![("a", "prod"), ("b", "dev")];
        let filtered = pipeline.apply(items.iter().collect(), &context);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_local_filter_narrows_global() {
        let pipeline = FilterPipeline::new()
            .add_filter(GlobalClusterFilter::new(cluster_field()))
            .add_filter(LocalClusterFilter::new(cluster_field()));
        assert_eq!(pipeline.stage_names(), vec!["GlobalClusterFilter", "LocalClusterFilter"]);

        let global = GlobalFilters {
            clusters: Selection::only(["prod", "staging"]),
            ..Default::default()
        };
        // "dev" is not in the global selection, so it cannot come back locally
        let local: BTreeSet<String> = ["staging", "dev"].into_iter().map(String::from).collect();
        let context = FilterContext {
            global: &global,
            local_clusters: &local,
            local_search: "",
        };

        let items = vec![("a", "prod"), ("b", "dev"), ("c", "staging"), ("d", "staging")];
        let filtered = pipeline.apply(items.iter().collect(), &context);
        let names: Vec<&str> = filtered.iter().map(|item| item.0).collect();
        assert_eq!(names, vec!["c", "d"]);
    }
}
