//! Single active status chip of a card.

use crate::field::Field;
use card_store::{SharedStore, json, keys};
use tracing::{debug, warn};

/// Chip value that shows every status.
pub const ALL_STATUSES: &str = "all";

/// One active status out of a fixed set of chips.
///
/// The persisted value is validated against the allowed set on load, so a
/// chip that disappeared between releases falls back to [`ALL_STATUSES`].
pub struct StatusChips {
    key: String,
    store: SharedStore,
    allowed: Vec<String>,
    active: String,
}

impl StatusChips {
    pub fn new<I, S>(storage_key: &str, allowed: I, store: SharedStore) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = keys::status_filter(storage_key);
        let mut allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        if !allowed.iter().any(|s| s == ALL_STATUSES) {
            allowed.insert(0, ALL_STATUSES.to_string());
        }

        let active = match json::read_string(store.as_ref(), &key) {
            Some(stored) if allowed.contains(&stored) => stored,
            Some(stored) => {
                debug!("Dropping unknown persisted status {} for {}", stored, key);
                ALL_STATUSES.to_string()
            }
            None => ALL_STATUSES.to_string(),
        };

        Self {
            key,
            store,
            allowed,
            active,
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    pub fn is_all(&self) -> bool {
        self.active == ALL_STATUSES
    }

    /// Activate `status`. Returns `false` if it is not one of the chips.
    pub fn select(&mut self, status: &str) -> bool {
        if !self.allowed.iter().any(|s| s == status) {
            warn!("Ignoring unknown status chip {}", status);
            return false;
        }
        self.active = status.to_string();
        if self.is_all() {
            json::remove_key(self.store.as_ref(), &self.key);
        } else {
            json::write_string(self.store.as_ref(), &self.key, status);
        }
        true
    }

    pub fn reset(&mut self) {
        self.select(ALL_STATUSES);
    }

    /// Case-insensitive match; absent statuses only pass the "all" chip.
    pub fn matches(&self, status: Option<&str>) -> bool {
        self.is_all() || status.is_some_and(|s| s.eq_ignore_ascii_case(&self.active))
    }

    pub fn filter<'a, T>(&self, items: &'a [T], status_field: &Field<T>) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.matches(status_field.value(item).as_deref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_store::{KeyValueStore, MemoryStore};
    use serde_json::{Value, json};

    #[test]
    fn test_invalid_persisted_status_falls_back() {
        let store = MemoryStore::new();
        store.set("card-status:pvcs", "Deleted").unwrap();

        let chips = StatusChips::new("pvcs", ["all", "Bound", "Pending"], store.shared());
        assert_eq!(chips.active(), "all");
    }

    #[test]
    fn test_select_persists_and_default_removes() {
        let store = MemoryStore::new();
        let mut chips = StatusChips::new("pvcs", ["Bound", "Pending"], store.clone().shared());
        assert_eq!(chips.allowed(), ["all", "Bound", "Pending"]);

        assert!(chips.select("Pending"));
        assert_eq!(store.get("card-status:pvcs").unwrap().as_deref(), Some("Pending"));
        let restored = StatusChips::new("pvcs", ["Bound", "Pending"], store.clone().shared());
        assert_eq!(restored.active(), "Pending");

        assert!(!chips.select("Lost"));
        assert_eq!(chips.active(), "Pending");

        chips.reset();
        assert!(chips.is_all());
        assert_eq!(store.get("card-status:pvcs").unwrap(), None);
    }

    #[test]
    fn test_filter_by_status() {
        let claims = vec![
            json!({"name": "data", "status": "Bound"}),
            json!({"name": "scratch", "status": "pending"}),
            json!({"name": "unknown"}),
        ];
        let field = Field::key("status");
        let mut chips = StatusChips::new("pvcs", ["Bound", "Pending"], MemoryStore::new().shared());

        assert_eq!(chips.filter(&claims, &field).len(), 3);

        chips.select("Pending");
        let pending: Vec<&Value> = chips.filter(&claims, &field);
        let names: Vec<&str> = pending.iter().filter_map(|c| c["name"].as_str()).collect();
        assert_eq!(names, vec!["scratch"]);
    }
}
