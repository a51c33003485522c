//! Sorting stage: field selection, direction and caller-supplied comparators.

use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Three-way comparison of two records.
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Orient a comparator result: descending negates it.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid sort direction '{0}', expected 'asc' or 'desc'")]
pub struct InvalidSortDirection(String);

impl FromStr for SortDirection {
    type Err = InvalidSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(InvalidSortDirection(s.to_string())),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// One entry of a card's sort dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub field: String,
    pub label: String,
}

struct SortField<T> {
    option: SortOption,
    comparator: Comparator<T>,
}

/// Sortable fields of a card and its default ordering.
///
/// ## Usage
/// ```ignore
/// let sort = SortConfig::new("restarts", SortDirection::Desc)
///     .field_by_key("restarts", "Restarts", |pod: &Pod| pod.restarts)
///     .field("name", "Name", compare_text(Field::key("name")));
/// ```
pub struct SortConfig<T> {
    default_field: String,
    default_direction: SortDirection,
    fields: Vec<SortField<T>>,
}

impl<T: 'static> SortConfig<T> {
    pub fn new(default_field: impl Into<String>, default_direction: SortDirection) -> Self {
        Self {
            default_field: default_field.into(),
            default_direction,
            fields: Vec::new(),
        }
    }

    /// Register a sortable field with an explicit comparator.
    pub fn field(
        mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        comparator: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        self.fields.push(SortField {
            option: SortOption {
                field: name.into(),
                label: label.into(),
            },
            comparator: Arc::new(comparator),
        });
        self
    }

    /// Register a sortable field ordered by an `Ord` key.
    pub fn field_by_key<K: Ord + 'static>(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        key: impl Fn(&T) -> K + Send + Sync + 'static,
    ) -> Self {
        self.field(name, label, move |a, b| key(a).cmp(&key(b)))
    }
}

impl<T> SortConfig<T> {
    pub fn default_field(&self) -> &str {
        &self.default_field
    }

    pub fn default_direction(&self) -> SortDirection {
        self.default_direction
    }

    pub fn comparator(&self, field: &str) -> Option<&Comparator<T>> {
        self.fields
            .iter()
            .find(|f| f.option.field == field)
            .map(|f| &f.comparator)
    }

    pub fn options(&self) -> Vec<SortOption> {
        self.fields.iter().map(|f| f.option.clone()).collect()
    }
}

/// Compare a field's text case-insensitively; absent values sort first.
pub fn compare_text<T: 'static>(field: Field<T>) -> impl Fn(&T, &T) -> Ordering + Send + Sync + 'static {
    move |a, b| {
        let a = field.value(a).map(|v| v.to_lowercase());
        let b = field.value(b).map(|v| v.to_lowercase());
        a.cmp(&b)
    }
}

/// Compare a field numerically; absent or non-numeric values sort first.
pub fn compare_number<T: 'static>(field: Field<T>) -> impl Fn(&T, &T) -> Ordering + Send + Sync + 'static {
    move |a, b| {
        let parse = |item: &T| field.value(item).and_then(|v| v.trim().parse::<f64>().ok());
        match (parse(a), parse(b)) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (a, b) => a.is_some().cmp(&b.is_some()),
        }
    }
}

/// Return a sorted copy of `items`.
///
/// Falls back to the input order when `field` has no comparator. The sort
/// is stable, so ties keep their relative order.
pub fn sort_items<'a, T>(
    items: &[&'a T],
    config: &SortConfig<T>,
    field: &str,
    direction: SortDirection,
) -> Vec<&'a T> {
    let mut sorted = items.to_vec();
    match config.comparator(field) {
        Some(comparator) => {
            sorted.sort_by(|a, b| direction.apply(comparator(a, b)));
        }
        None => {
            warn!("No comparator registered for sort field '{}', leaving items unsorted", field);
        }
    }
    sorted
}

/// Sort sub-control of a card: the active field and direction.
pub struct CardSort<T> {
    config: SortConfig<T>,
    field: String,
    direction: SortDirection,
}

impl<T> CardSort<T> {
    pub fn new(config: SortConfig<T>) -> Self {
        let field = config.default_field.clone();
        let direction = config.default_direction;
        Self {
            config,
            field,
            direction,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn options(&self) -> Vec<SortOption> {
        self.config.options()
    }

    /// Select the sort field. Returns `true` if it changed.
    pub fn set_field(&mut self, field: impl Into<String>) -> bool {
        let field = field.into();
        if field == self.field {
            return false;
        }
        debug!("Sort field: {} -> {}", self.field, field);
        self.field = field;
        true
    }

    pub fn set_direction(&mut self, direction: SortDirection) {
        self.direction = direction;
    }

    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.toggled();
    }

    pub fn apply<'a>(&self, items: &[&'a T]) -> Vec<&'a T> {
        sort_items(items, &self.config, &self.field, self.direction)
    }
}
