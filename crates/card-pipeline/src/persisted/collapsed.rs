//! Dashboard-wide registry of collapsed cards.

use card_store::{SharedStore, StoreError, json, keys::COLLAPSED_CARDS_KEY};
use std::collections::BTreeSet;
use tracing::warn;

/// Set of collapsed card ids, stored as one JSON array.
///
/// Several cards share the entry, so every mutation re-reads the stored set
/// and changes only its own id. A card toggled elsewhere in the meantime is
/// not overwritten with a stale copy.
pub struct CollapsedCards {
    store: SharedStore,
    cache: BTreeSet<String>,
}

impl CollapsedCards {
    pub fn new(store: SharedStore) -> Self {
        let mut registry = Self {
            store,
            cache: BTreeSet::new(),
        };
        registry.cache = registry.load();
        registry
    }

    pub fn is_collapsed(&self, card_id: &str) -> bool {
        self.cache.contains(card_id)
    }

    pub fn collapsed(&self) -> &BTreeSet<String> {
        &self.cache
    }

    /// Pick up changes made through other handles.
    pub fn refresh(&mut self) {
        self.cache = self.load();
    }

    /// Flip `card_id`. Returns whether it is now collapsed.
    pub fn toggle(&mut self, card_id: &str) -> bool {
        let mut collapsed = self.load();
        let now_collapsed = if collapsed.remove(card_id) {
            false
        } else {
            collapsed.insert(card_id.to_string());
            true
        };
        self.save(collapsed);
        now_collapsed
    }

    pub fn set_collapsed(&mut self, card_id: &str, collapsed: bool) {
        let mut current = self.load();
        let changed = if collapsed {
            current.insert(card_id.to_string())
        } else {
            current.remove(card_id)
        };
        if changed {
            self.save(current);
        } else {
            self.cache = current;
        }
    }

    pub fn expand_all(&mut self) {
        self.save(BTreeSet::new());
    }

    /// Stored set. A corrupt value reads as empty; an unreadable store
    /// keeps the last known state.
    fn load(&self) -> BTreeSet<String> {
        match json::try_read_json::<Vec<String>>(self.store.as_ref(), COLLAPSED_CARDS_KEY) {
            Ok(Some(ids)) => ids.into_iter().collect(),
            Ok(None) => BTreeSet::new(),
            Err(e @ StoreError::Json { .. }) => {
                warn!("Ignoring corrupt collapsed cards: {}", e);
                BTreeSet::new()
            }
            Err(e) => {
                warn!("Using cached collapsed cards: {}", e);
                self.cache.clone()
            }
        }
    }

    fn save(&mut self, collapsed: BTreeSet<String>) {
        if collapsed.is_empty() {
            json::remove_key(self.store.as_ref(), COLLAPSED_CARDS_KEY);
        } else {
            json::write_json(self.store.as_ref(), COLLAPSED_CARDS_KEY, &collapsed);
        }
        self.cache = collapsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_store::{KeyValueStore, MemoryStore};

    #[test]
    fn test_toggle_round_trip() {
        let store = MemoryStore::new();
        let mut registry = CollapsedCards::new(store.clone().shared());

        assert!(registry.toggle("pods"));
        assert!(registry.is_collapsed("pods"));
        assert_eq!(store.get(COLLAPSED_CARDS_KEY).unwrap().as_deref(), Some(r#"["pods"]"#));

        assert!(!registry.toggle("pods"));
        assert!(!registry.is_collapsed("pods"));
        assert_eq!(store.get(COLLAPSED_CARDS_KEY).unwrap(), None);
    }

    #[test]
    fn test_toggle_only_touches_own_entry() {
        let store = MemoryStore::new().shared();
        let mut first = CollapsedCards::new(store.clone());
        let mut second = CollapsedCards::new(store.clone());

        first.toggle("pods");
        second.toggle("events");
        assert!(!second.is_collapsed("nodes"));
        assert!(second.is_collapsed("pods"));

        first.refresh();
        let ids: Vec<&String> = first.collapsed().iter().collect();
        assert_eq!(ids, vec!["events", "pods"]);
    }

    #[test]
    fn test_set_collapsed_and_expand_all() {
        let store = MemoryStore::new();
        let mut registry = CollapsedCards::new(store.clone().shared());

        registry.set_collapsed("pods", true);
        registry.set_collapsed("pods", true);
        registry.set_collapsed("nodes", true);
        assert_eq!(registry.collapsed().len(), 2);

        registry.set_collapsed("pods", false);
        assert!(!registry.is_collapsed("pods"));

        registry.expand_all();
        assert!(registry.collapsed().is_empty());
        assert_eq!(store.get(COLLAPSED_CARDS_KEY).unwrap(), None);
    }

    #[test]
    fn test_corrupt_registry_reads_as_empty_and_recovers() {
        let store = MemoryStore::new();
        store.set(COLLAPSED_CARDS_KEY, "{oops").unwrap();

        let mut registry = CollapsedCards::new(store.clone().shared());
        assert!(registry.collapsed().is_empty());

        registry.toggle("pods");
        assert_eq!(store.get(COLLAPSED_CARDS_KEY).unwrap().as_deref(), Some(r#"["pods"]"#));

        // Corrupted after construction: cached ids are not written back
        store.set(COLLAPSED_CARDS_KEY, "{garbage").unwrap();
        assert!(registry.toggle("nodes"));
        assert_eq!(store.get(COLLAPSED_CARDS_KEY).unwrap().as_deref(), Some(r#"["nodes"]"#));
        assert!(!registry.is_collapsed("pods"));
    }

    #[test]
    fn test_unavailable_store_keeps_cached_state() {
        let store = MemoryStore::new();
        let mut registry = CollapsedCards::new(store.clone().shared());
        registry.toggle("pods");

        let mut offline = CollapsedCards {
            store: MemoryStore::disabled().shared(),
            cache: registry.collapsed().clone(),
        };
        offline.refresh();
        assert!(offline.is_collapsed("pods"));
        assert!(offline.toggle("nodes"));
        assert!(offline.is_collapsed("pods"));
    }
}
