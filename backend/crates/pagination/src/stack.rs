//! Next/previous bookkeeping over a cursor feed.

/// Stack of cursors discovered while walking a cursor-paginated feed.
///
/// Page `0` is the first page and needs no cursor; the cursor for page `n`
/// is the `n`th entry pushed. Moving forward past the known frontier records
/// the cursor returned with the current page; moving forward within known
/// pages reuses the recorded cursor. The stack grows without bound and lives
/// only as long as the value.
///
/// # Examples
/// ```
/// use pagination::CursorStack;
///
/// let mut stack = CursorStack::new();
/// assert_eq!(stack.current(), None);
/// stack.next("c1");
/// stack.next("c2");
/// assert_eq!(stack.current(), Some("c2"));
/// stack.previous();
/// assert_eq!(stack.current(), Some("c1"));
/// stack.previous();
/// stack.previous();
/// assert_eq!(stack.index(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorStack {
    cursors: Vec<String>,
    index: usize,
}

impl CursorStack {
    /// Start on the first page with no known cursors.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursors: Vec::new(),
            index: 0,
        }
    }

    /// Advance one page.
    ///
    /// `latest` is the cursor returned with the page currently shown. It is
    /// recorded only when the stack is at its frontier; otherwise the
    /// previously recorded cursor for the next page is kept.
    pub fn next(&mut self, latest: impl Into<String>) {
        if self.index == self.cursors.len() {
            self.cursors.push(latest.into());
        }
        self.index = self.index.saturating_add(1);
    }

    /// Step back one page, stopping at the first page.
    pub const fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Forget every recorded cursor and return to the first page.
    pub fn reset(&mut self) {
        self.cursors.clear();
        self.index = 0;
    }

    /// Cursor to resume from for the current page; `None` on the first page.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        let position = self.index.checked_sub(1)?;
        self.cursors.get(position).map(String::as_str)
    }

    /// Zero-based index of the current page.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of cursors recorded so far.
    #[must_use]
    pub const fn known_cursors(&self) -> usize {
        self.cursors.len()
    }

    /// Whether [`CursorStack::previous`] would move.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.index > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn walked() -> CursorStack {
        let mut stack = CursorStack::new();
        stack.next("c1");
        stack.next("c2");
        stack.next("c3");
        stack
    }

    #[rstest]
    fn first_page_has_no_cursor() {
        let stack = CursorStack::new();
        assert_eq!(stack.current(), None);
        assert!(!stack.has_previous());
    }

    #[rstest]
    fn revisiting_known_pages_keeps_recorded_cursors(mut walked: CursorStack) {
        walked.previous();
        walked.previous();
        walked.next("ignored");
        assert_eq!(walked.current(), Some("c2"));
        assert_eq!(walked.known_cursors(), 3);
    }

    #[rstest]
    fn previous_floors_at_zero(mut walked: CursorStack) {
        for _ in 0..10 {
            walked.previous();
        }
        assert_eq!(walked.index(), 0);
        assert_eq!(walked.current(), None);
    }

    #[rstest]
    fn reset_clears_history(mut walked: CursorStack) {
        walked.reset();
        assert_eq!(walked, CursorStack::new());
    }
}
