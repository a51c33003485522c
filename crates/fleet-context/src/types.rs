//! Dashboard-wide filter state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Either "everything" or an explicit set of names.
///
/// An explicit empty set is normalized to `All` by [`Selection::only`], so
/// "nothing picked yet" and "all picked" behave the same. Deserialization
/// goes through the same normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "SelectionRepr")]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

/// Wire form of [`Selection`] before normalization.
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum SelectionRepr {
    All,
    Only(BTreeSet<String>),
}

impl From<SelectionRepr> for Selection {
    fn from(repr: SelectionRepr) -> Self {
        match repr {
            SelectionRepr::All => Selection::All,
            SelectionRepr::Only(names) => Selection::only(names),
        }
    }
}

impl Selection {
    /// Build a selection from names; no names means `All`.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            Selection::All
        } else {
            Selection::Only(names)
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// Exact membership test; `All` contains everything.
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(names) => names.contains(name),
        }
    }

    /// Case-insensitive membership test; `All` contains everything.
    pub fn contains_ignore_case(&self, name: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(names) => names.iter().any(|n| n.eq_ignore_ascii_case(name)),
        }
    }

    /// The explicit names, or `None` for `All`.
    pub fn names(&self) -> Option<&BTreeSet<String>> {
        match self {
            Selection::All => None,
            Selection::Only(names) => Some(names),
        }
    }
}

/// Snapshot of the global filter bar shared by every card.
///
/// Cards only ever read this; the host owns the writer side
/// (see [`crate::GlobalFilterProvider`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalFilters {
    /// Clusters the user scoped the dashboard to
    #[serde(default)]
    pub clusters: Selection,
    /// Status values the user scoped the dashboard to
    #[serde(default)]
    pub statuses: Selection,
    /// Free-text query from the global search box
    #[serde(default)]
    pub search: String,
}

impl GlobalFilters {
    pub fn is_all_clusters_selected(&self) -> bool {
        self.clusters.is_all()
    }

    pub fn matches_cluster(&self, cluster: &str) -> bool {
        self.clusters.contains(cluster)
    }

    /// Status predicate: case-insensitive, everything passes when no status is selected.
    pub fn matches_status(&self, status: &str) -> bool {
        self.statuses.contains_ignore_case(status)
    }

    /// Lowercased global query, or `None` when blank.
    pub fn search_query(&self) -> Option<String> {
        normalize_query(&self.search)
    }
}

/// Lowercase a free-text query; blank queries become `None`.
///
/// Surrounding whitespace is kept and takes part in matching.
pub fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_all() {
        let selection = Selection::only(Vec::<String>::new());
        assert!(selection.is_all());
        assert!(selection.contains("anything"));
        assert_eq!(selection.names(), None);
    }

    #[test]
    fn test_explicit_selection() {
        let selection = Selection::only(["prod-east", "prod-west"]);
        assert!(!selection.is_all());
        assert!(selection.contains("prod-east"));
        assert!(!selection.contains("PROD-EAST"));
        assert!(selection.contains_ignore_case("PROD-EAST"));
        assert!(!selection.contains("staging"));
    }

    #[test]
    fn test_status_predicate() {
        let filters = GlobalFilters {
            statuses: Selection::only(["Running"]),
            ..Default::default()
        };
        assert!(filters.matches_status("running"));
        assert!(!filters.matches_status("Pending"));
        assert!(GlobalFilters::default().matches_status("Pending"));
    }

    #[test]
    fn test_search_query_normalization() {
        let mut filters = GlobalFilters::default();
        assert_eq!(filters.search_query(), None);

        filters.search = "   ".to_string();
        assert_eq!(filters.search_query(), None);

        filters.search = "NGINX".to_string();
        assert_eq!(filters.search_query().as_deref(), Some("nginx"));

        filters.search = "Api ".to_string();
        assert_eq!(filters.search_query().as_deref(), Some("api "));
    }

    #[test]
    fn test_deserialize_selection() {
        let filters: GlobalFilters =
            serde_json::from_str(r#"{"clusters": {"only": ["a", "b"]}, "search": "x"}"#).unwrap();
        assert!(filters.matches_cluster("a"));
        assert!(!filters.matches_cluster("c"));
        assert!(filters.statuses.is_all());
    }

    #[test]
    fn test_deserialize_empty_only_is_all() {
        let selection: Selection = serde_json::from_str(r#"{"only": []}"#).unwrap();
        assert_eq!(selection, Selection::All);
        assert!(selection.contains("anything"));

        let filters: GlobalFilters = serde_json::from_str(r#"{"clusters": {"only": []}}"#).unwrap();
        assert!(filters.is_all_clusters_selected());

        let all: Selection = serde_json::from_str(r#""all""#).unwrap();
        assert!(all.is_all());
        assert_eq!(serde_json::to_string(&Selection::only(["a"])).unwrap(), r#"{"only":["a"]}"#);
    }
}
