//! The composed card data pipeline: filter, then sort, then paginate.
//!
//! `CardData` owns the view-session state of one card and turns a
//! caller-supplied collection into a `CardView` on every `recompute`.
//! Mutations that change which items are shown (search text, local cluster
//! filter, sort field) send the card back to page 1; a direction change
//! only reorders and keeps the page.

use crate::card_filters::CardFilters;
use crate::config::FilterConfig;
use crate::pagination::{PageMeta, PageSize, Paginator};
use crate::sort::{CardSort, SortConfig, SortDirection};
use card_store::SharedStore;
use fleet_context::{ClusterInfo, GlobalFilterContext};
use tracing::debug;

/// Everything a card declares up front.
pub struct CardDataConfig<T> {
    pub filter: FilterConfig<T>,
    pub sort: SortConfig<T>,
    pub default_page_size: PageSize,
}

impl<T> CardDataConfig<T> {
    pub fn new(filter: FilterConfig<T>, sort: SortConfig<T>) -> Self {
        Self {
            filter,
            sort,
            default_page_size: PageSize::default(),
        }
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.default_page_size = page_size;
        self
    }
}

/// View model handed to the rendering layer.
#[derive(Debug, Clone)]
pub struct CardView<'a, T> {
    /// Items of the current page, in display order
    pub items: Vec<&'a T>,
    pub pagination: PageMeta,
}

impl<T> CardView<'_, T> {
    /// Number of items after filtering, before pagination.
    pub fn total_items(&self) -> usize {
        self.pagination.total_items
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages
    }

    pub fn needs_pagination(&self) -> bool {
        self.pagination.needs_pagination
    }
}

/// Filter, sort and pagination state of one card.
///
/// ## Usage
/// ```ignore
/// let mut card = CardData::new(config, provider.context(), store.clone());
/// card.set_search("nginx");
/// card.set_sort_field("restarts");
///
/// let view = card.recompute(&pods);
/// render(view.items, view.pagination);
/// ```
pub struct CardData<T> {
    filters: CardFilters<T>,
    sort: CardSort<T>,
    paginator: Paginator,
}

impl<T: 'static> CardData<T> {
    pub fn new(config: CardDataConfig<T>, global: GlobalFilterContext, store: SharedStore) -> Self {
        Self {
            filters: CardFilters::new(config.filter, global, store),
            sort: CardSort::new(config.sort),
            paginator: Paginator::new(config.default_page_size),
        }
    }
}

impl<T> CardData<T> {
    /// Run the pipeline over `items` and return the current page.
    ///
    /// ## Algorithm
    /// 1. Filter with one snapshot of the global filters plus local state
    /// 2. Sort the survivors with the active comparator
    /// 3. Clamp the current page to the new total and slice it out
    pub fn recompute<'a>(&mut self, items: &'a [T]) -> CardView<'a, T> {
        let global = self.filters.global_filters();
        let filtered = self.filters.apply_with(items, &global);
        let sorted = self.sort.apply(&filtered);
        let page = self.paginator.paginate(&sorted);

        debug!(
            "Card recomputed: {} items -> {} filtered, page {}/{}",
            items.len(),
            page.meta.total_items,
            page.meta.current_page,
            page.meta.total_pages
        );

        CardView {
            items: page.items,
            pagination: page.meta,
        }
    }

    pub fn filters(&self) -> &CardFilters<T> {
        &self.filters
    }

    pub fn sort(&self) -> &CardSort<T> {
        &self.sort
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        if self.filters.set_search(search) {
            self.paginator.reset();
        }
    }

    pub fn toggle_cluster(&mut self, cluster: &str) {
        self.filters.toggle_cluster(cluster);
        self.paginator.reset();
    }

    pub fn set_local_clusters<I, S>(&mut self, clusters: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.filters.set_local_clusters(clusters) {
            self.paginator.reset();
        }
    }

    pub fn clear_cluster_filter(&mut self) {
        if self.filters.clear_local_clusters() {
            self.paginator.reset();
        }
    }

    pub fn available_clusters(&self, clusters: &[ClusterInfo]) -> Vec<String> {
        self.filters.available_clusters(clusters)
    }

    pub fn toggle_cluster_dropdown(&mut self) {
        self.filters.toggle_dropdown();
    }

    pub fn dismiss_cluster_dropdown(&mut self) {
        self.filters.dismiss_dropdown();
    }

    pub fn set_sort_field(&mut self, field: impl Into<String>) {
        if self.sort.set_field(field) {
            self.paginator.reset();
        }
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.sort.set_direction(direction);
    }

    pub fn toggle_sort_direction(&mut self) {
        self.sort.toggle_direction();
    }

    /// Navigate to `page`, clamped against the last recomputed total.
    pub fn go_to_page(&mut self, page: usize) {
        self.paginator.go_to_page(page);
    }

    pub fn next_page(&mut self) {
        self.paginator.next_page();
    }

    pub fn prev_page(&mut self) {
        self.paginator.prev_page();
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.paginator.set_page_size(page_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use card_store::MemoryStore;

    #[derive(Debug, Clone, PartialEq)]
    struct Volume {
        name: String,
        cluster: String,
        size_gb: u32,
    }

    fn volume(name: &str, cluster: &str, size_gb: u32) -> Volume {
        Volume {
            name: name.to_string(),
            cluster: cluster.to_string(),
            size_gb,
        }
    }

    fn card() -> CardData<Volume> {
        let filter = FilterConfig::new()
            .search_field(Field::new("name", |v: &Volume| Some(v.name.clone())))
            .cluster_field(Field::new("cluster", |v: &Volume| Some(v.cluster.clone())));
        let sort = SortConfig::new("size", SortDirection::Desc)
            .field_by_key("size", "Size", |v: &Volume| v.size_gb)
            .field_by_key("name", "Name", |v: &Volume| v.name.clone());
        CardData::new(
            CardDataConfig::new(filter, sort).page_size(PageSize::fixed(2)),
            GlobalFilterContext::default(),
            MemoryStore::new().shared(),
        )
    }

    fn volumes() -> Vec<Volume> {
        vec![
            volume("data-a", "prod", 50),
            volume("data-b", "prod", 10),
            volume("logs-a", "dev", 30),
            volume("logs-b", "dev", 40),
            volume("cache", "prod", 20),
        ]
    }

    #[test]
    fn test_filter_then_sort_then_paginate() {
        let mut card = card();
        let volumes = volumes();

        let view = card.recompute(&volumes);
        assert_eq!(view.total_items(), 5);
        assert_eq!(view.total_pages(), 3);
        assert!(view.needs_pagination());
        let sizes: Vec<u32> = view.items.iter().map(|v| v.size_gb).collect();
        assert_eq!(sizes, vec![50, 40]);

        card.toggle_cluster("dev");
        let view = card.recompute(&volumes);
        let names: Vec<&str> = view.items.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["logs-b", "logs-a"]);
        assert!(!view.needs_pagination());
    }

    #[test]
    fn test_search_resets_page() {
        let mut card = card();
        let volumes = volumes();
        card.recompute(&volumes);
        card.go_to_page(2);
        assert_eq!(card.recompute(&volumes).current_page(), 2);

        card.set_search("data");
        let view = card.recompute(&volumes);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.total_items(), 2);
    }

    #[test]
    fn test_sort_field_resets_page_but_direction_does_not() {
        let mut card = card();
        let volumes = volumes();
        card.recompute(&volumes);

        card.go_to_page(2);
        card.toggle_sort_direction();
        let view = card.recompute(&volumes);
        assert_eq!(view.current_page(), 2);
        let sizes: Vec<u32> = view.items.iter().map(|v| v.size_gb).collect();
        assert_eq!(sizes, vec![30, 40]);

        card.set_sort_field("name");
        assert_eq!(card.recompute(&volumes).current_page(), 1);

        // Re-selecting the same field is not a change
        card.go_to_page(3);
        card.set_sort_field("name");
        assert_eq!(card.recompute(&volumes).current_page(), 3);
    }

    #[test]
    fn test_local_cluster_filter_resets_page() {
        let mut card = card();
        let volumes = volumes();
        card.recompute(&volumes);
        card.go_to_page(3);

        card.toggle_cluster("prod");
        let view = card.recompute(&volumes);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.total_items(), 3);

        card.go_to_page(2);
        card.clear_cluster_filter();
        assert_eq!(card.recompute(&volumes).current_page(), 1);
    }

    #[test]
    fn test_page_size_change() {
        let mut card = card();
        let volumes = volumes();
        card.recompute(&volumes);
        card.go_to_page(3);

        card.set_page_size(PageSize::Unlimited);
        let view = card.recompute(&volumes);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.total_pages(), 1);
        assert_eq!(view.items.len(), 5);
        assert!(!view.needs_pagination());
    }

    #[test]
    fn test_sub_controls_are_exposed() {
        let mut card = card();
        card.set_search("logs");
        card.toggle_cluster_dropdown();

        assert_eq!(card.filters().search(), "logs");
        assert!(card.filters().is_dropdown_open());
        card.dismiss_cluster_dropdown();
        assert!(!card.filters().is_dropdown_open());

        assert_eq!(card.sort().field(), "size");
        assert_eq!(card.sort().direction(), SortDirection::Desc);
        assert_eq!(card.sort().options().len(), 2);
        assert_eq!(card.paginator().page_size(), PageSize::Fixed(2));
    }
}
