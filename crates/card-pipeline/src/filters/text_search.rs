//! Free-text search stages.
//!
//! The global search box and the card's own search box are separate stages:
//! with both filled in, an item has to match both queries.

use crate::config::CustomPredicate;
use crate::field::Field;
use crate::traits::{Filter, FilterContext};
use fleet_context::normalize_query;

/// Which search box a [`TextSearchFilter`] reads its query from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Global,
    Local,
}

/// Case-insensitive substring search over the declared search fields.
///
/// ## Algorithm
/// 1. Lowercase the query; a blank query disables the stage
/// 2. An item matches if any search field contains the query
/// 3. Otherwise it matches if the custom predicate accepts `(item, query)`
pub struct TextSearchFilter<T> {
    scope: SearchScope,
    fields: Vec<Field<T>>,
    custom: Option<CustomPredicate<T>>,
}

impl<T> TextSearchFilter<T> {
    pub fn new(scope: SearchScope, fields: Vec<Field<T>>, custom: Option<CustomPredicate<T>>) -> Self {
        Self { scope, fields, custom }
    }

    fn query(&self, context: &FilterContext<'_>) -> Option<String> {
        match self.scope {
            SearchScope::Global => context.global.search_query(),
            SearchScope::Local => normalize_query(context.local_search),
        }
    }

    fn matches(&self, item: &T, query: &str) -> bool {
        self.fields.iter().any(|field| field.contains(item, query))
            || self.custom.as_ref().is_some_and(|custom| custom(item, query))
    }
}

impl<T> Filter<T> for TextSearchFilter<T> {
    fn name(&self) -> &str {
        match self.scope {
            SearchScope::Global => "GlobalSearchFilter",
            SearchScope::Local => "LocalSearchFilter",
        }
    }

    fn is_active(&self, context: &FilterContext<'_>) -> bool {
        (!self.fields.is_empty() || self.custom.is_some()) && self.query(context).is_some()
    }

    fn apply<'a>(&self, items: Vec<&'a T>, context: &FilterContext<'_>) -> Vec<&'a T> {
        let Some(query) = self.query(context) else {
            return items;
        };
        items
            .into_iter()
            .filter(|item| self.matches(item, &query))
            .collect()
    }
}
