//! Request parameters and response envelopes for cursor pagination.

use serde::{Deserialize, Serialize};
use url::Url;

/// Page size used when the client does not ask for one.
pub const DEFAULT_LIMIT: usize = 12;
/// Largest page size a client may request.
pub const MAX_LIMIT: usize = 100;

/// Query-string parameters accepted by cursor-paginated endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageParams {
    /// Opaque cursor returned by the previous page, if any.
    pub cursor: Option<String>,
    /// Requested page size.
    pub limit: Option<usize>,
}

impl PageParams {
    /// Build parameters for the first page with the given limit.
    #[must_use]
    pub const fn first(limit: usize) -> Self {
        Self {
            cursor: None,
            limit: Some(limit),
        }
    }

    /// Build parameters resuming after `cursor`.
    #[must_use]
    pub fn after(cursor: impl Into<String>, limit: usize) -> Self {
        Self {
            cursor: Some(cursor.into()),
            limit: Some(limit),
        }
    }

    /// Effective page size, clamped to `1..=MAX_LIMIT`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{DEFAULT_LIMIT, MAX_LIMIT, PageParams};
    ///
    /// assert_eq!(PageParams::default().normalized_limit(), DEFAULT_LIMIT);
    /// assert_eq!(PageParams::first(0).normalized_limit(), 1);
    /// assert_eq!(PageParams::first(1_000).normalized_limit(), MAX_LIMIT);
    /// ```
    #[must_use]
    pub fn normalized_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Cursor token with surrounding whitespace removed; blank means absent.
    #[must_use]
    pub fn cursor(&self) -> Option<&str> {
        self.cursor
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page, in listing order.
    pub items: Vec<T>,
    /// Cursor resuming after the last item, when more items exist.
    pub next_cursor: Option<String>,
    /// Whether another page is available.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build a page from an over-fetched batch.
    ///
    /// Callers fetch `limit + 1` items; the extra item only signals that more
    /// data exists and is dropped here. `make_cursor` renders the cursor for
    /// the last retained item.
    ///
    /// # Errors
    /// Propagates failures from `make_cursor`.
    pub fn from_overfetch<E>(
        mut items: Vec<T>,
        limit: usize,
        make_cursor: impl FnOnce(&T) -> Result<String, E>,
    ) -> Result<Self, E> {
        let has_more = items.len() > limit;
        items.truncate(limit);
        let next_cursor = match (has_more, items.last()) {
            (true, Some(last)) => Some(make_cursor(last)?),
            _ => None,
        };
        Ok(Self {
            items,
            next_cursor,
            has_more,
        })
    }

    /// Transform every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        }
    }
}

/// Navigation links attached to a page response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationLinks {
    /// The request URL for the current page.
    #[serde(rename = "self")]
    pub current: String,
    /// The request URL for the following page, when one exists.
    pub next: Option<String>,
}

impl PaginationLinks {
    /// Derive links from the current request URL.
    ///
    /// The `next` link keeps every query parameter except `cursor`, which is
    /// replaced with `next_cursor`.
    ///
    /// # Examples
    /// ```
    /// use pagination::PaginationLinks;
    /// use url::Url;
    ///
    /// let url = Url::parse("http://jam.test/api/v1/projects?sort=popular&cursor=abc")
    ///     .expect("valid url");
    /// let links = PaginationLinks::from_request_url(&url, Some("def"));
    /// assert_eq!(
    ///     links.next.as_deref(),
    ///     Some("http://jam.test/api/v1/projects?sort=popular&cursor=def")
    /// );
    /// ```
    #[must_use]
    pub fn from_request_url(url: &Url, next_cursor: Option<&str>) -> Self {
        let next = next_cursor.map(|cursor| {
            let retained: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(name, _)| name != "cursor")
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
                .collect();
            let mut next_url = url.clone();
            next_url
                .query_pairs_mut()
                .clear()
                .extend_pairs(retained)
                .append_pair("cursor", cursor);
            next_url.to_string()
        });
        Self {
            current: url.to_string(),
            next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ok_cursor(item: &u32) -> Result<String, std::convert::Infallible> {
        Ok(format!("after-{item}"))
    }

    #[rstest]
    fn overfetch_reports_more_and_cursor_of_last_kept_item() {
        let page = Page::from_overfetch(vec![1, 2, 3, 4], 3, ok_cursor).expect("page");
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("after-3"));
    }

    #[rstest]
    fn map_keeps_cursor_state() {
        let page = Page::from_overfetch(vec![1, 2, 3], 2, ok_cursor)
            .expect("page")
            .map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert!(page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("after-2"));
    }

    #[rstest]
    #[case(vec![1, 2, 3], 3)]
    #[case(vec![1], 3)]
    #[case(vec![], 3)]
    fn exact_or_short_batches_end_the_feed(#[case] items: Vec<u32>, #[case] limit: usize) {
        let expected = items.clone();
        let page = Page::from_overfetch(items, limit, ok_cursor).expect("page");
        assert_eq!(page.items, expected);
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }

    #[rstest]
    #[case(Some("  "), None)]
    #[case(Some(" abc "), Some("abc"))]
    #[case(None, None)]
    fn cursor_is_trimmed(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        let params = PageParams {
            cursor: raw.map(str::to_owned),
            limit: None,
        };
        assert_eq!(params.cursor(), expected);
    }

    #[rstest]
    fn links_without_next_cursor_have_no_next() {
        let url = Url::parse("http://jam.test/api/v1/projects").expect("url");
        let links = PaginationLinks::from_request_url(&url, None);
        assert_eq!(links.current, "http://jam.test/api/v1/projects");
        assert!(links.next.is_none());
    }
}
