//! # Fleet Context Crate
//!
//! Ambient, dashboard-wide state that every card reads but none owns.
//!
//! ## Components
//!
//! ### Global filters
//! The filter bar at the top of the dashboard: cluster selection, status
//! selection and a free-text query (`GlobalFilters`). The host mutates it
//! through a `GlobalFilterProvider`; cards hold a read-only
//! `GlobalFilterContext` and take snapshots when they recompute.
//!
//! ### Cluster inventory
//! `ClusterInfo` as reported by the data source, and the derivation of the
//! reachable clusters offered in per-card cluster dropdowns.
//!
//! ## Example Usage
//!
//! ```ignore
//! use fleet_context::{GlobalFilterProvider, Selection};
//!
//! let provider = GlobalFilterProvider::default();
//! let context = provider.context(); // hand this to every card
//!
//! provider.set_clusters(Selection::only(["prod-east"]));
//! assert!(!context.snapshot().is_all_clusters_selected());
//! ```

pub mod clusters;
pub mod provider;
pub mod types;

pub use clusters::{ClusterInfo, available_clusters_for_filter, reachable_clusters};
pub use provider::{GlobalFilterContext, GlobalFilterProvider};
pub use types::{GlobalFilters, Selection, normalize_query};
