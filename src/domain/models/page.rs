//! Pagination parameters and result pages.

use serde::{Deserialize, Serialize};

/// Default page size used by most listings.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on any requested page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw pagination input as received from the caller.
///
/// Values are clamped, never rejected: an out-of-range page or size is
/// silently normalized via [`PageRequest::clamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self { page, page_size }
    }

    /// Normalize the request: page < 1 becomes 1; a size outside
    /// `(0, MAX_PAGE_SIZE]` falls back to `default_size`.
    pub fn clamp(self, default_size: i64) -> Self {
        let page = if self.page < 1 { 1 } else { self.page };
        let page_size = if self.page_size <= 0 || self.page_size > MAX_PAGE_SIZE {
            default_size
        } else {
            self.page_size
        };
        Self { page, page_size }
    }

    /// Row offset for the repository query: `(page - 1) * page_size`.
    ///
    /// Only meaningful on a clamped request.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of results plus the total row count reported by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    /// Map the page's items while keeping the pagination envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}
