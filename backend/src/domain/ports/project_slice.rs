//! Page-numbered slices of a user's liked or applied postings.
//!
//! These listings are short per-user lists, so they are sliced in memory
//! by page number instead of using cursors.

use std::ops::Range;

use pagination::{page_slice, total_pages};
use serde::{Deserialize, Serialize};

use crate::domain::Project;

/// Default number of postings per slice.
pub const DEFAULT_SLICE_SIZE: usize = 12;
/// Largest slice a client may request.
pub const MAX_SLICE_SIZE: usize = 100;

/// 1-based page number and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceRequest {
    pub page: usize,
    pub size: usize,
}

impl Default for SliceRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_SLICE_SIZE,
        }
    }
}

impl SliceRequest {
    /// Build a request, clamping the page to at least 1 and the size to
    /// `1..=MAX_SLICE_SIZE`.
    #[must_use]
    pub fn new(page: Option<usize>, size: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            size: size.unwrap_or(DEFAULT_SLICE_SIZE).clamp(1, MAX_SLICE_SIZE),
        }
    }

    /// Index range of the requested page within a list of `len` items.
    #[must_use]
    pub fn range(&self, len: usize) -> Range<usize> {
        page_slice(len, self.page, self.size)
    }
}

/// One page of postings plus the counts needed to render page links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSlice {
    pub items: Vec<Project>,
    pub page: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl ProjectSlice {
    /// Wrap the postings of one page cut from a list of `total_items`.
    #[must_use]
    pub fn new(items: Vec<Project>, request: SliceRequest, total_items: usize) -> Self {
        Self {
            items,
            page: request.page,
            size: request.size,
            total_items,
            total_pages: total_pages(total_items, request.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(0), Some(0), 1, 1)]
    #[case(None, None, 1, DEFAULT_SLICE_SIZE)]
    #[case(Some(3), Some(500), 3, MAX_SLICE_SIZE)]
    fn request_is_clamped(
        #[case] page: Option<usize>,
        #[case] size: Option<usize>,
        #[case] expected_page: usize,
        #[case] expected_size: usize,
    ) {
        let request = SliceRequest::new(page, size);
        assert_eq!((request.page, request.size), (expected_page, expected_size));
    }

    #[rstest]
    #[case(5, 3, 2, 4..5)]
    #[case(5, 1, 2, 0..2)]
    #[case(2, 9, 2, 2..2)]
    fn range_stays_in_bounds(
        #[case] len: usize,
        #[case] page: usize,
        #[case] size: usize,
        #[case] expected: Range<usize>,
    ) {
        assert_eq!(SliceRequest::new(Some(page), Some(size)).range(len), expected);
    }

    #[rstest]
    fn slice_reports_rounded_up_page_count() {
        let slice = ProjectSlice::new(Vec::new(), SliceRequest::new(Some(3), Some(2)), 5);
        assert_eq!(slice.total_pages, 3);
        assert_eq!(slice.page, 3);
    }
}
