//! Two-level cascading selection, e.g. cluster then namespace.
//!
//! The second level only makes sense under the first, so picking a new
//! first-level value always drops the second. The first level also follows
//! the global cluster filter: while that filter is active a hidden choice is
//! replaced in memory, and the user's own choice comes back once the filter
//! is cleared.

use card_store::{SharedStore, json, keys};
use fleet_context::GlobalFilters;
use tracing::debug;

pub struct CascadingSelection {
    primary_key: String,
    secondary_key: String,
    store: SharedStore,
    primary: String,
    secondary: String,
    /// User choice remembered while the global cluster filter is active
    saved_primary: Option<String>,
    global_active: bool,
}

impl CascadingSelection {
    pub fn new(storage_key: &str, store: SharedStore) -> Self {
        let primary_key = keys::cascade_primary(storage_key);
        let secondary_key = keys::cascade_secondary(storage_key);
        let primary = json::read_string(store.as_ref(), &primary_key).unwrap_or_default();
        let secondary = json::read_string(store.as_ref(), &secondary_key).unwrap_or_default();
        Self {
            primary_key,
            secondary_key,
            store,
            primary,
            secondary,
            saved_primary: None,
            global_active: false,
        }
    }

    /// First-level value; empty means none chosen.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// Second-level value; empty means none chosen.
    pub fn secondary(&self) -> &str {
        &self.secondary
    }

    /// Choose the first level. A different value clears the second level
    /// together with its persisted entry.
    pub fn select_primary(&mut self, value: &str) {
        // An explicit choice supersedes whatever was remembered
        self.saved_primary = None;
        if value == self.primary {
            return;
        }
        self.primary = value.to_string();
        persist(&self.store, &self.primary_key, &self.primary);

        self.secondary.clear();
        json::remove_key(self.store.as_ref(), &self.secondary_key);
    }

    /// Choose the second level. While the first level shows a stand-in for
    /// a hidden choice, the value stays in memory and the persisted pair is
    /// left untouched.
    pub fn select_secondary(&mut self, value: &str) {
        self.secondary = value.to_string();
        if self.is_replacement() {
            debug!("Not persisting {} under stand-in primary {}", value, self.primary);
            return;
        }
        persist(&self.store, &self.secondary_key, &self.secondary);
    }

    /// Whether `primary` currently stands in for a choice hidden by the global filter.
    fn is_replacement(&self) -> bool {
        self.global_active
            && self
                .saved_primary
                .as_deref()
                .is_some_and(|saved| saved != self.primary)
    }

    /// Follow a change of the global cluster filter.
    ///
    /// Call after every global filter change. Replacements made here are
    /// not persisted, so a reload still sees the user's own choice.
    pub fn sync_with_global(&mut self, global: &GlobalFilters) {
        let active = !global.is_all_clusters_selected();

        if active {
            if !self.global_active {
                self.saved_primary = Some(self.primary.clone());
                self.global_active = true;
            }
            if !self.primary.is_empty() && !global.matches_cluster(&self.primary) {
                let replacement = global
                    .clusters
                    .names()
                    .and_then(|names| names.iter().next().cloned())
                    .unwrap_or_default();
                debug!(
                    "Primary selection {} hidden by global filter, showing {}",
                    self.primary, replacement
                );
                self.primary = replacement;
                self.secondary.clear();
            }
        } else if self.global_active {
            self.global_active = false;
            if let Some(saved) = self.saved_primary.take() {
                debug!("Global cluster filter cleared, restoring {}", saved);
                self.primary = saved;
                self.secondary = json::read_string(self.store.as_ref(), &self.secondary_key).unwrap_or_default();
            }
        }
    }
}

fn persist(store: &SharedStore, key: &str, value: &str) {
    if value.is_empty() {
        json::remove_key(store.as_ref(), key);
    } else {
        json::write_string(store.as_ref(), key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_store::{KeyValueStore, MemoryStore};
    use fleet_context::Selection;

    fn global(clusters: &[&str]) -> GlobalFilters {
        GlobalFilters {
            clusters: Selection::only(clusters.iter().copied()),
            ..GlobalFilters::default()
        }
    }

    #[test]
    fn test_new_primary_clears_secondary() {
        let store = MemoryStore::new();
        let mut selection = CascadingSelection::new("events", store.clone().shared());

        selection.select_primary("prod");
        selection.select_secondary("kube-system");
        assert_eq!(
            store.get("card-cascade:events:secondary").unwrap().as_deref(),
            Some("kube-system")
        );

        // Same value keeps the second level
        selection.select_primary("prod");
        assert_eq!(selection.secondary(), "kube-system");

        selection.select_primary("dev");
        assert_eq!(selection.secondary(), "");
        assert_eq!(store.get("card-cascade:events:secondary").unwrap(), None);
        assert_eq!(store.get("card-cascade:events:primary").unwrap().as_deref(), Some("dev"));
    }

    #[test]
    fn test_restores_from_store() {
        let store = MemoryStore::new();
        {
            let mut selection = CascadingSelection::new("events", store.clone().shared());
            selection.select_primary("prod");
            selection.select_secondary("default");
        }
        let selection = CascadingSelection::new("events", store.shared());
        assert_eq!(selection.primary(), "prod");
        assert_eq!(selection.secondary(), "default");
    }

    #[test]
    fn test_global_filter_round_trip() {
        let store = MemoryStore::new();
        let mut selection = CascadingSelection::new("events", store.clone().shared());
        selection.select_primary("prod");
        selection.select_secondary("default");

        selection.sync_with_global(&global(&["staging", "dev"]));
        assert_eq!(selection.primary(), "dev");
        assert_eq!(selection.secondary(), "");
        // Replacement stays in memory
        assert_eq!(store.get("card-cascade:events:primary").unwrap().as_deref(), Some("prod"));

        selection.sync_with_global(&GlobalFilters::default());
        assert_eq!(selection.primary(), "prod");
        assert_eq!(selection.secondary(), "default");
    }

    #[test]
    fn test_secondary_under_stand_in_primary_not_persisted() {
        let store = MemoryStore::new();
        let mut selection = CascadingSelection::new("events", store.clone().shared());
        selection.select_primary("prod");
        selection.select_secondary("prod-ns");

        selection.sync_with_global(&global(&["dev"]));
        assert_eq!(selection.primary(), "dev");
        selection.select_secondary("dev-only-ns");
        assert_eq!(selection.secondary(), "dev-only-ns");
        assert_eq!(
            store.get("card-cascade:events:secondary").unwrap().as_deref(),
            Some("prod-ns")
        );

        selection.sync_with_global(&GlobalFilters::default());
        assert_eq!(selection.primary(), "prod");
        assert_eq!(selection.secondary(), "prod-ns");

        let reloaded = CascadingSelection::new("events", store.shared());
        assert_eq!(reloaded.primary(), "prod");
        assert_eq!(reloaded.secondary(), "prod-ns");
    }

    #[test]
    fn test_visible_primary_is_kept() {
        let mut selection = CascadingSelection::new("events", MemoryStore::new().shared());
        selection.select_primary("prod");
        selection.select_secondary("default");

        selection.sync_with_global(&global(&["prod", "dev"]));
        assert_eq!(selection.primary(), "prod");
        assert_eq!(selection.secondary(), "default");
    }

    #[test]
    fn test_explicit_choice_under_global_filter_wins() {
        let mut selection = CascadingSelection::new("events", MemoryStore::new().shared());
        selection.select_primary("prod");

        selection.sync_with_global(&global(&["dev"]));
        selection.select_primary("dev");
        selection.sync_with_global(&GlobalFilters::default());
        assert_eq!(selection.primary(), "dev");
    }
}
