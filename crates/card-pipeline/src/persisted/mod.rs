//! Small pieces of per-card state that survive a reload.
//!
//! Each helper owns one storage prefix (see `card_store::keys`) and follows
//! the same policy as the local cluster filter: the default value is never
//! written, storage failures are logged and ignored, and corrupt values read
//! back as the default.

pub mod cascading;
pub mod cluster_selection;
pub mod collapsed;
pub mod status_chips;

pub use cascading::CascadingSelection;
pub use cluster_selection::ClusterSelection;
pub use collapsed::CollapsedCards;
pub use status_chips::{ALL_STATUSES, StatusChips};
