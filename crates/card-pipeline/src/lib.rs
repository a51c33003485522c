//! Data-view pipeline shared by every dashboard card.
//!
//! This crate provides:
//! - Field accessors and filter/sort configuration declared per card
//! - Filter trait, concrete filter stages and FilterPipeline for composing them
//! - CardSort and Paginator sub-controls
//! - CardData, which composes all of the above behind one `recompute` call
//! - Persisted helpers for single-select, cascading, status-chip and collapse state
//!
//! ## Architecture
//! Every recomputation processes the card's items in stages:
//! 1. Filters remove items outside the global and local filters
//!    (global cluster, status, local cluster, global search, local search)
//! 2. The active comparator orders the survivors
//! 3. The paginator clamps the current page and slices it out
//!
//! The pipeline is generic over the record type and never clones records:
//! every stage passes references into the caller's collection.
//!
//! ## Example Usage
//! ```ignore
//! use card_pipeline::{CardData, CardDataConfig, Field, FilterConfig, SortConfig, SortDirection};
//!
//! let filter = FilterConfig::new()
//!     .search_field(Field::key("name"))
//!     .cluster_field(Field::key("cluster"))
//!     .storage_key("pods");
//! let sort = SortConfig::new("restarts", SortDirection::Desc)
//!     .field("restarts", "Restarts", compare_number(Field::key("restarts")));
//!
//! let mut card = CardData::new(CardDataConfig::new(filter, sort), provider.context(), store);
//! card.toggle_cluster("prod-east");
//! let view = card.recompute(&pods);
//! ```

pub mod card_data;
pub mod card_filters;
pub mod config;
pub mod field;
pub mod filter_pipeline;
pub mod filters;
pub mod pagination;
pub mod persisted;
pub mod sort;
pub mod traits;

// Re-export main types
pub use card_data::{CardData, CardDataConfig, CardView};
pub use card_filters::CardFilters;
pub use config::{CustomPredicate, FilterConfig};
pub use field::{Field, FieldGetter};
pub use filter_pipeline::FilterPipeline;
pub use pagination::{InvalidPageSize, Page, PageMeta, PageSize, Paginator};
pub use persisted::{CascadingSelection, ClusterSelection, CollapsedCards, StatusChips};
pub use sort::{
    CardSort, Comparator, InvalidSortDirection, SortConfig, SortDirection, SortOption, compare_number,
    compare_text, sort_items,
};
pub use traits::{Filter, FilterContext};
