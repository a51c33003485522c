//! Per-card filter configuration.

use crate::field::Field;
use std::fmt;
use std::sync::Arc;

/// Extra match logic for free-text search, called as `(item, lowercased query)`.
pub type CustomPredicate<T> = Arc<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// Which fields of a record take part in filtering.
///
/// Every stage whose field is not declared is skipped: no cluster field
/// means no cluster filtering at all, and so on.
///
/// ## Usage
/// ```ignore
/// let config = FilterConfig::new()
///     .search_field(Field::key("name"))
///     .search_field(Field::key("namespace"))
///     .cluster_field(Field::key("cluster"))
///     .status_field(Field::key("status"))
///     .storage_key("pod-issues");
/// ```
pub struct FilterConfig<T> {
    pub search_fields: Vec<Field<T>>,
    pub cluster_field: Option<Field<T>>,
    pub status_field: Option<Field<T>>,
    pub custom_predicate: Option<CustomPredicate<T>>,
    /// Key under which the local cluster filter is persisted
    pub storage_key: Option<String>,
}

impl<T> FilterConfig<T> {
    pub fn new() -> Self {
        Self {
            search_fields: Vec::new(),
            cluster_field: None,
            status_field: None,
            custom_predicate: None,
            storage_key: None,
        }
    }

    pub fn search_field(mut self, field: Field<T>) -> Self {
        self.search_fields.push(field);
        self
    }

    pub fn cluster_field(mut self, field: Field<T>) -> Self {
        self.cluster_field = Some(field);
        self
    }

    pub fn status_field(mut self, field: Field<T>) -> Self {
        self.status_field = Some(field);
        self
    }

    pub fn custom_predicate(mut self, predicate: impl Fn(&T, &str) -> bool + Send + Sync + 'static) -> Self {
        self.custom_predicate = Some(Arc::new(predicate));
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    /// Whether free-text search has anything to match against.
    pub fn is_searchable(&self) -> bool {
        !self.search_fields.is_empty() || self.custom_predicate.is_some()
    }
}

impl<T> Default for FilterConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FilterConfig<T> {
    fn clone(&self) -> Self {
        Self {
            search_fields: self.search_fields.clone(),
            cluster_field: self.cluster_field.clone(),
            status_field: self.status_field.clone(),
            custom_predicate: self.custom_predicate.clone(),
            storage_key: self.storage_key.clone(),
        }
    }
}

impl<T> fmt::Debug for FilterConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterConfig")
            .field("search_fields", &self.search_fields)
            .field("cluster_field", &self.cluster_field)
            .field("status_field", &self.status_field)
            .field("custom_predicate", &self.custom_predicate.is_some())
            .field("storage_key", &self.storage_key)
            .finish()
    }
}
