//! Client-side pagination over an already-fetched collection.

use std::ops::Range;

pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One-based page cursor. The slice is computed, never stored, so the row
/// vector stays the single source of truth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    total: usize,
}

impl Pager {
    pub fn new() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub(crate) fn set_total(&mut self, total: usize) {
        self.total = total;
    }

    /// Number of pages; 0 when the collection is empty.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Accepts only the fixed size options; resets to the first page.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !PAGE_SIZE_OPTIONS.contains(&size) {
            return false;
        }
        self.page_size = size;
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn next_page(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.has_prev() {
            self.page -= 1;
        }
    }

    /// Index range of the current page; empty outside `1..=page_count`.
    pub fn slice(&self) -> Range<usize> {
        // set_page accepts any number; a huge one must fall through to the
        // empty range rather than overflow the start computation.
        let start = self.page.saturating_sub(1).saturating_mul(self.page_size);
        if start >= self.total {
            return self.total..self.total;
        }
        start..(start + self.page_size).min(self.total)
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_hold_min_of_size_and_remainder() {
        let mut pager = Pager::new();
        pager.set_total(12);
        for (page, expected) in [(1, 5), (2, 5), (3, 2), (4, 0)] {
            pager.set_page(page);
            assert_eq!(pager.slice().len(), expected, "page {page}");
        }
        assert_eq!(pager.page_count(), 3);
    }

    #[test]
    fn size_change_resets_to_first_page() {
        let mut pager = Pager::new();
        pager.set_total(40);
        pager.set_page(3);
        assert!(pager.set_page_size(20));
        assert_eq!(pager.page(), 1);
        assert_eq!(pager.slice(), 0..20);
    }

    #[test]
    fn rejects_sizes_outside_the_options() {
        let mut pager = Pager::new();
        pager.set_total(40);
        pager.set_page(2);
        assert!(!pager.set_page_size(7));
        assert_eq!(pager.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn arrows_stop_at_the_edges() {
        let mut pager = Pager::new();
        pager.set_total(6);
        assert!(!pager.has_prev());
        pager.prev_page();
        assert_eq!(pager.page(), 1);
        pager.next_page();
        assert_eq!(pager.page(), 2);
        assert!(!pager.has_next());
        pager.next_page();
        assert_eq!(pager.page(), 2);
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let pager = Pager::new();
        assert_eq!(pager.page_count(), 0);
        assert_eq!(pager.slice(), 0..0);
        assert!(!pager.has_next());
    }

    #[test]
    fn absurd_page_numbers_stay_empty() {
        let mut pager = Pager::new();
        pager.set_total(12);
        pager.set_page(usize::MAX);
        assert_eq!(pager.slice(), 12..12);
        assert!(!pager.has_next());
        pager.set_page(usize::MAX / DEFAULT_PAGE_SIZE + 2);
        assert_eq!(pager.slice(), 12..12);
    }
}
