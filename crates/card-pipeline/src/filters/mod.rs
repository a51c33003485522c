//! Filter stage implementations.
//!
//! This module contains the concrete stages that a card's `FilterPipeline`
//! is built from, in the order they run: global cluster, status, local
//! cluster, global search, local search.

pub mod cluster;
pub mod status;
pub mod text_search;

pub use cluster::{GlobalClusterFilter, LocalClusterFilter};
pub use status::StatusFilter;
pub use text_search::{SearchScope, TextSearchFilter};
