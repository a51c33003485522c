//! Shared handles to the global filter state.
//!
//! The host holds a [`GlobalFilterProvider`] and mutates it in response to
//! the global filter bar. Every card receives a [`GlobalFilterContext`],
//! which can only take snapshots.

use crate::types::{GlobalFilters, Selection};
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Writer side of the global filter state.
#[derive(Clone, Default)]
pub struct GlobalFilterProvider {
    state: Arc<RwLock<GlobalFilters>>,
}

impl GlobalFilterProvider {
    pub fn new(initial: GlobalFilters) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial)),
        }
    }

    /// Read-only handle to hand to cards.
    pub fn context(&self) -> GlobalFilterContext {
        GlobalFilterContext {
            state: self.state.clone(),
        }
    }

    /// Apply an arbitrary change to the shared state.
    pub fn update(&self, change: impl FnOnce(&mut GlobalFilters)) {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        change(&mut state);
        debug!("Global filters updated: {:?}", *state);
    }

    pub fn set_clusters(&self, clusters: Selection) {
        self.update(|state| state.clusters = clusters);
    }

    pub fn select_all_clusters(&self) {
        self.set_clusters(Selection::All);
    }

    pub fn set_statuses(&self, statuses: Selection) {
        self.update(|state| state.statuses = statuses);
    }

    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.update(|state| state.search = search);
    }

    pub fn snapshot(&self) -> GlobalFilters {
        self.context().snapshot()
    }
}

/// Reader side of the global filter state, held by every card.
#[derive(Clone, Default)]
pub struct GlobalFilterContext {
    state: Arc<RwLock<GlobalFilters>>,
}

impl GlobalFilterContext {
    /// A context not connected to any provider, fixed at `filters`.
    pub fn fixed(filters: GlobalFilters) -> Self {
        Self {
            state: Arc::new(RwLock::new(filters)),
        }
    }

    /// Copy of the current global filter state.
    pub fn snapshot(&self) -> GlobalFilters {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}
