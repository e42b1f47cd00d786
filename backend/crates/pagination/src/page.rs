//! Page envelope returned by paginated queries.

use crate::PageRequest;

/// One page of results plus the total number of matching items.
///
/// # Examples
/// ```
/// use pagination::{Page, PageRequest};
///
/// let request = PageRequest::new(1, 2).expect("valid request");
/// let page = Page::new(vec!["a", "b"], 5, request);
/// assert!(page.has_more_pages());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    request: PageRequest,
}

impl<T> Page<T> {
    /// Wrap the items selected for `request`.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Number of matching items before pagination.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Request that produced this page.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// True when items remain beyond this page.
    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        u64::from(self.request.page()) * u64::from(self.request.page_size()) < self.total
    }

    /// Transform every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}
