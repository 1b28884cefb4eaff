//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
///
/// Pages are numbered from 1. Page 0 lies before the first page and, like any
/// page past the end, yields no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: usize = 100;
    /// The maximum allowed page size.
    pub const MAX_SIZE: usize = 1000;

    /// Creates a new page request.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(1, Self::DEFAULT_SIZE)
    }

    /// Returns `true` if the request cannot match any row.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        self.page == 0
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Information about a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The current page number (1-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
    /// The total number of items across all pages.
    pub total_elements: u64,
    /// The total number of pages.
    pub total_pages: u64,
    /// The number of items on this page.
    pub number_of_elements: usize,
}

impl PageInfo {
    /// Creates a new page info.
    #[must_use]
    pub fn new(page: usize, size: usize, total_elements: u64, number_of_elements: usize) -> Self {
        let total_pages = if size > 0 {
            total_elements.div_ceil(size as u64)
        } else {
            0
        };

        Self {
            page,
            size,
            total_elements,
            total_pages,
            number_of_elements,
        }
    }
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// Information about this page.
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(content: Vec<T>, page: usize, size: usize, total_elements: u64) -> Self {
        let number_of_elements = content.len();
        Self {
            content,
            info: PageInfo::new(page, size, total_elements, number_of_elements),
        }
    }

    /// Creates an empty page that still reports the overall total.
    #[must_use]
    pub fn empty(request: PageRequest, total_elements: u64) -> Self {
        Self::new(Vec::new(), request.page, request.size, total_elements)
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns the total number of elements across all pages.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.info.total_elements
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.info.total_pages
    }

    /// Returns true if there is a next page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.info.page as u64) < self.info.total_pages
    }

    /// Consumes the page, returning its rows.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}
