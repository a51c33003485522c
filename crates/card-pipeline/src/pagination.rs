//! Pagination stage: page sizes, page clamping and slicing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Requested page size of a card.
///
/// `Unlimited` means a single page holding every item. Serialized as a
/// number or the string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PageSizeRepr", into = "PageSizeRepr")]
pub enum PageSize {
    Fixed(usize),
    Unlimited,
}

impl PageSize {
    /// A fixed page size; zero is raised to one.
    pub fn fixed(size: usize) -> Self {
        PageSize::Fixed(size.max(1))
    }

    pub fn is_unlimited(self) -> bool {
        matches!(self, PageSize::Unlimited)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Fixed(5)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid page size '{0}', expected a positive number or 'unlimited'")]
pub struct InvalidPageSize(String);

impl FromStr for PageSize {
    type Err = InvalidPageSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("unlimited") {
            return Ok(PageSize::Unlimited);
        }
        match trimmed.parse::<usize>() {
            Ok(size) if size > 0 => Ok(PageSize::Fixed(size)),
            _ => Err(InvalidPageSize(s.to_string())),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Fixed(size) => write!(f, "{size}"),
            PageSize::Unlimited => write!(f, "unlimited"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PageSizeRepr {
    Number(usize),
    Text(String),
}

impl TryFrom<PageSizeRepr> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(repr: PageSizeRepr) -> Result<Self, Self::Error> {
        match repr {
            PageSizeRepr::Number(0) => Err(InvalidPageSize("0".to_string())),
            PageSizeRepr::Number(size) => Ok(PageSize::Fixed(size)),
            PageSizeRepr::Text(text) => text.parse(),
        }
    }
}

impl From<PageSize> for PageSizeRepr {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::Fixed(size) => PageSizeRepr::Number(size),
            PageSize::Unlimited => PageSizeRepr::Text("unlimited".to_string()),
        }
    }
}

/// Navigation metadata of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Total number of pages, never less than 1
    pub total_pages: usize,

    /// Total number of items before pagination
    pub total_items: usize,

    /// Page size as requested
    pub page_size: PageSize,

    /// Page size actually used for slicing
    pub effective_page_size: usize,

    /// Index of the first item on this page
    pub start_index: usize,

    /// Index one past the last item on this page
    pub end_index: usize,

    pub has_next: bool,
    pub has_prev: bool,

    /// Whether pager controls should be shown at all
    pub needs_pagination: bool,
}

/// One page of items plus its metadata.
#[derive(Debug, Clone)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    pub meta: PageMeta,
}

/// Pagination state of a card.
///
/// Keeps the current page valid against the latest item count: every
/// recomputation and every navigation clamps it into `[1, total_pages]`.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: PageSize,
    current_page: usize,
    total_items: usize,
}

impl Paginator {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            current_page: 1,
            total_items: 0,
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Collection length when unlimited, otherwise the requested size.
    pub fn effective_page_size(&self) -> usize {
        match self.page_size {
            PageSize::Fixed(size) => size.max(1),
            PageSize::Unlimited => self.total_items,
        }
    }

    /// `ceil(total_items / effective_page_size)`, at least 1.
    pub fn total_pages(&self) -> usize {
        let size = self.effective_page_size();
        if size == 0 {
            return 1;
        }
        self.total_items.div_ceil(size).max(1)
    }

    pub fn needs_pagination(&self) -> bool {
        match self.page_size {
            PageSize::Fixed(size) => self.total_items > size.max(1),
            PageSize::Unlimited => false,
        }
    }

    /// Record a new item count and clamp the current page to it.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        let clamped = self.current_page.clamp(1, self.total_pages());
        if clamped != self.current_page {
            debug!("Clamping page {} to {}", self.current_page, clamped);
            self.current_page = clamped;
        }
    }

    /// Navigate to `page`, clamped into the valid range.
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.total_pages());
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    /// Change the page size and go back to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn meta(&self) -> PageMeta {
        let size = self.effective_page_size();
        let start_index = ((self.current_page - 1) * size).min(self.total_items);
        let end_index = (start_index + size).min(self.total_items);
        PageMeta {
            current_page: self.current_page,
            total_pages: self.total_pages(),
            total_items: self.total_items,
            page_size: self.page_size,
            effective_page_size: size,
            start_index,
            end_index,
            has_next: self.current_page < self.total_pages(),
            has_prev: self.current_page > 1,
            needs_pagination: self.needs_pagination(),
        }
    }

    /// Slice the current page out of `items`.
    pub fn paginate<'a, T>(&mut self, items: &[&'a T]) -> Page<'a, T> {
        self.set_total_items(items.len());
        let meta = self.meta();
        Page {
            items: items[meta.start_index..meta.end_index].to_vec(),
            meta,
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PageSize::default())
    }
}
