//! Numbered pagination over fully materialised lists.

use std::ops::Range;

/// Half-open index range covering 1-based `page` of `size` items within a
/// list of `len` items.
///
/// The range is always within `0..=len`: page `0` is treated as page `1`,
/// pages past the end and a `size` of zero yield an empty range.
///
/// # Examples
/// ```
/// use pagination::page_slice;
///
/// assert_eq!(page_slice(10, 1, 4), 0..4);
/// assert_eq!(page_slice(10, 3, 4), 8..10);
/// assert!(page_slice(10, 4, 4).is_empty());
/// ```
#[must_use]
pub fn page_slice(len: usize, page: usize, size: usize) -> Range<usize> {
    let start = page.max(1).saturating_sub(1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

/// Number of pages needed to show `len` items `size` at a time.
///
/// Uses ceiling division; a `size` of zero yields zero pages.
///
/// # Examples
/// ```
/// use pagination::total_pages;
///
/// assert_eq!(total_pages(0, 5), 0);
/// assert_eq!(total_pages(10, 5), 2);
/// assert_eq!(total_pages(11, 5), 3);
/// ```
#[must_use]
pub const fn total_pages(len: usize, size: usize) -> usize {
    if size == 0 { 0 } else { len.div_ceil(size) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1, 10, 0..0)]
    #[case(5, 0, 2, 0..2)]
    #[case(5, 1, 2, 0..2)]
    #[case(5, 3, 2, 4..5)]
    #[case(5, 9, 2, 5..5)]
    #[case(5, 2, 0, 0..0)]
    #[case(5, usize::MAX, usize::MAX, 5..5)]
    fn slices_stay_in_bounds(
        #[case] len: usize,
        #[case] page: usize,
        #[case] size: usize,
        #[case] expected: Range<usize>,
    ) {
        assert_eq!(page_slice(len, page, size), expected);
    }

    #[rstest]
    fn every_item_lands_on_exactly_one_page() {
        for len in 0..40_usize {
            for size in 1..9_usize {
                let pages = total_pages(len, size);
                let covered: usize = (1..=pages)
                    .map(|page| page_slice(len, page, size).len())
                    .sum();
                assert_eq!(covered, len, "len={len} size={size}");
                assert!(page_slice(len, pages + 1, size).is_empty());
            }
        }
    }

    #[rstest]
    #[case(1, 1, 1)]
    #[case(9, 10, 1)]
    #[case(10, 10, 1)]
    #[case(21, 10, 3)]
    #[case(7, 0, 0)]
    fn total_pages_rounds_up(#[case] len: usize, #[case] size: usize, #[case] expected: usize) {
        assert_eq!(total_pages(len, size), expected);
    }
}
