//! Filter on the global status selection.

use crate::field::Field;
use crate::traits::{Filter, FilterContext};

/// Keeps items whose status passes the global status predicate.
///
/// Matching is case-insensitive; items without a status are dropped while
/// a status selection is active.
pub struct StatusFilter<T> {
    field: Field<T>,
}

impl<T> StatusFilter<T> {
    pub fn new(field: Field<T>) -> Self {
        Self { field }
    }
}

impl<T> Filter<T> for StatusFilter<T> {
    fn name(&self) -> &str {
        "StatusFilter"
    }

    fn is_active(&self, context: &FilterContext<'_>) -> bool {
        !context.global.statuses.is_all()
    }

    fn apply<'a>(&self, items: Vec<&'a T>, context: &FilterContext<'_>) -> Vec<&'a T> {
        items
            .into_iter()
            .filter(|item| {
                self.field
                    .value(item)
                    .is_some_and(|status| context.global.matches_status(&status))
            })
            .collect()
    }
}
