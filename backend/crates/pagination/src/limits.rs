//! Configurable page size bounds.

use crate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequestError};

/// Default and maximum page sizes applied to optional request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    default_size: u32,
    max_size: u32,
}

impl PageLimits {
    /// Build limits, rejecting zero sizes and defaults above the maximum.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::InvalidLimits`] when the bounds are
    /// inconsistent.
    pub fn new(default_size: u32, max_size: u32) -> Result<Self, PageRequestError> {
        if default_size == 0 || max_size == 0 || default_size > max_size {
            return Err(PageRequestError::InvalidLimits {
                default_size,
                max_size,
            });
        }
        Ok(Self {
            default_size,
            max_size,
        })
    }

    /// Page size used when the caller omits one.
    #[must_use]
    pub const fn default_size(&self) -> u32 {
        self.default_size
    }

    /// Largest accepted page size.
    #[must_use]
    pub const fn max_size(&self) -> u32 {
        self.max_size
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}
