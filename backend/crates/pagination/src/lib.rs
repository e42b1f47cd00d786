//! Page-number pagination primitives shared by backend endpoints.
//!
//! Requests are 1-based page numbers with a bounded page size. Responses are
//! wrapped in [`Page`], which carries the pre-pagination `total` so callers
//! can derive whether more pages exist without a second query.

mod limits;
mod page;

pub use limits::PageLimits;
pub use page::Page;

use serde::{Deserialize, Serialize};

/// Page size applied when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors raised when constructing a [`PageRequest`] or [`PageLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page must be at least 1, got {page}")]
    PageOutOfRange {
        /// Rejected page number.
        page: u32,
    },
    /// Page size must be between one and the configured maximum.
    #[error("page size must be between 1 and {max}, got {page_size}")]
    PageSizeOutOfRange {
        /// Rejected page size.
        page_size: u32,
        /// Maximum accepted page size.
        max: u32,
    },
    /// Default page size exceeds the maximum or either bound is zero.
    #[error("invalid page limits: default {default_size}, max {max_size}")]
    InvalidLimits {
        /// Configured default page size.
        default_size: u32,
        /// Configured maximum page size.
        max_size: u32,
    },
}

/// Validated 1-based page selection.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 12).expect("valid request");
/// assert_eq!(request.offset(), 24);
/// assert_eq!(request.limit(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "RawPageRequest")]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageRequest {
    page: u32,
    page_size: u32,
}

impl TryFrom<RawPageRequest> for PageRequest {
    type Error = PageRequestError;

    fn try_from(value: RawPageRequest) -> Result<Self, Self::Error> {
        Self::new(value.page, value.page_size)
    }
}

impl PageRequest {
    /// Build a request bounded by [`MAX_PAGE_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` is zero or `page_size` falls
    /// outside `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        Self::bounded(page, page_size, MAX_PAGE_SIZE)
    }

    /// Resolve optional query parameters against configured limits.
    ///
    /// Missing values fall back to page one and the default page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when a supplied value is out of range.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageLimits, PageRequest};
    ///
    /// let request = PageRequest::from_optional(None, None, PageLimits::default())
    ///     .expect("defaults are valid");
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.page_size(), 12);
    /// ```
    pub fn from_optional(
        page: Option<u32>,
        page_size: Option<u32>,
        limits: PageLimits,
    ) -> Result<Self, PageRequestError> {
        Self::bounded(
            page.unwrap_or(1),
            page_size.unwrap_or(limits.default_size()),
            limits.max_size(),
        )
    }

    fn bounded(page: u32, page_size: u32, max: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::PageOutOfRange { page });
        }
        if page_size == 0 || page_size > max {
            return Err(PageRequestError::PageSizeOutOfRange { page_size, max });
        }
        Ok(Self { page, page_size })
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
