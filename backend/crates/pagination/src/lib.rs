//! Page-number pagination primitives shared by listing endpoints.
//!
//! Listing endpoints accept a 1-based page number from untrusted input and
//! answer with a page of items plus a paging envelope describing the full
//! filtered result set. This crate keeps the clamping and arithmetic in one
//! place so every adapter agrees on offsets and page counts.
//!
//! # Examples
//!
//! ```
//! use pagination::{Page, PageNumber, PageRequest};
//!
//! let request = PageRequest::with_default_size(PageNumber::from_requested(Some(2)));
//! assert_eq!(request.offset(), 10);
//!
//! let page = Page::new(vec!["k", "l"], request, 12);
//! assert_eq!(page.paging().total_page(), 2);
//! ```

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Number of items returned per page when callers cannot choose a size.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = NonZeroU32::MIN.saturating_add(9);

/// A 1-based page number.
///
/// ## Invariants
/// - The wrapped value is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Normalise a caller-supplied page number.
    ///
    /// Missing values and values below 1 select the first page; values above
    /// `u32::MAX` saturate.
    #[must_use]
    pub fn from_requested(requested: Option<i64>) -> Self {
        let Some(raw) = requested else {
            return Self::FIRST;
        };
        let clamped = u32::try_from(raw.max(1)).unwrap_or(u32::MAX);
        NonZeroU32::new(clamped).map_or(Self::FIRST, Self)
    }

    /// The page number as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// A validated request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: PageNumber,
    size: NonZeroU32,
}

impl PageRequest {
    /// Build a request for `page` holding [`DEFAULT_PAGE_SIZE`] items.
    #[must_use]
    pub const fn with_default_size(page: PageNumber) -> Self {
        Self {
            page,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> PageNumber {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.size.get()
    }

    /// Number of items preceding the requested page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page.get() as u64 - 1) * self.size.get() as u64
    }

    /// Number of pages needed to hold `total_items`.
    #[must_use]
    pub const fn total_pages(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.size.get() as u64)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::with_default_size(PageNumber::FIRST)
    }
}

/// Paging envelope returned next to a page of items.
///
/// `total_item` counts the whole filtered set, not just the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    page: u32,
    total_page: u64,
    total_item: u64,
}

impl Paging {
    /// Describe `request` against a result set of `total_items`.
    #[must_use]
    pub const fn new(request: PageRequest, total_items: u64) -> Self {
        Self {
            page: request.page().get(),
            total_page: request.total_pages(total_items),
            total_item: total_items,
        }
    }

    /// Current 1-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of pages in the filtered set.
    #[must_use]
    pub const fn total_page(&self) -> u64 {
        self.total_page
    }

    /// Number of items in the filtered set.
    #[must_use]
    pub const fn total_item(&self) -> u64 {
        self.total_item
    }
}

/// One page of items with its paging envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    items: Vec<T>,
    paging: Paging,
}

impl<T> Page<T> {
    /// Wrap `items` fetched for `request` out of `total_items` matches.
    #[must_use]
    pub const fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        Self {
            items,
            paging: Paging::new(request, total_items),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Paging envelope.
    #[must_use]
    pub const fn paging(&self) -> Paging {
        self.paging
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Convert every item while keeping the envelope.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            paging: self.paging,
        }
    }
}
