//! Well-known storage keys and prefixes.
//!
//! Each persisted feature owns a distinct prefix so that a card's storage key
//! can be reused across features without collisions.

/// Local cluster filter of a card (JSON array of cluster names)
pub const LOCAL_CLUSTER_FILTER_PREFIX: &str = "card-filter:";

/// Single-select cluster choice (plain string, absent = all clusters)
pub const CLUSTER_SELECTION_PREFIX: &str = "card-cluster:";

/// Two-level cascading selection (plain strings, one key per level)
pub const CASCADE_PREFIX: &str = "card-cascade:";

/// Active status chip (plain string, absent = default)
pub const STATUS_FILTER_PREFIX: &str = "card-status:";

/// Registry of collapsed card ids (JSON array)
pub const COLLAPSED_CARDS_KEY: &str = "collapsed-cards";

pub fn local_cluster_filter(storage_key: &str) -> String {
    format!("{LOCAL_CLUSTER_FILTER_PREFIX}{storage_key}")
}

pub fn cluster_selection(storage_key: &str) -> String {
    format!("{CLUSTER_SELECTION_PREFIX}{storage_key}")
}

pub fn cascade_primary(storage_key: &str) -> String {
    format!("{CASCADE_PREFIX}{storage_key}:primary")
}

pub fn cascade_secondary(storage_key: &str) -> String {
    format!("{CASCADE_PREFIX}{storage_key}:secondary")
}

pub fn status_filter(storage_key: &str) -> String {
    format!("{STATUS_FILTER_PREFIX}{storage_key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_distinct() {
        let keys = [
            local_cluster_filter("pods"),
            cluster_selection("pods"),
            cascade_primary("pods"),
            cascade_secondary("pods"),
            status_filter("pods"),
            COLLAPSED_CARDS_KEY.to_string(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(local_cluster_filter("demo"), "card-filter:demo");
    }
}
