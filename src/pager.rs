//! Pagination derivation.
//!
//! [`derive_view`] is a pure function from the engine inputs (dataset,
//! search term, requested page, page size, field restriction) to a complete
//! [`ViewState`]. The engine calls it after every input change and swaps the
//! whole result in at once.
use std::num::NonZeroUsize;
use std::ops::Range;

use crate::search::{self, SearchFields, Searchable};

/// Page sizes offered by a page-size selector.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Next entry of [`PAGE_SIZE_OPTIONS`] after `current`, wrapping around.
pub fn next_page_size(current: usize) -> usize {
    PAGE_SIZE_OPTIONS
        .iter()
        .copied()
        .find(|&n| n > current)
        .unwrap_or(PAGE_SIZE_OPTIONS[0])
}

/// Page size used when neither the command line nor the config sets one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages needed for `total_items`; 0 when there are no items.
pub fn total_pages(total_items: usize, page_size: NonZeroUsize) -> usize {
    total_items.div_ceil(page_size.get())
}

/// Clamp a 1-indexed page into `[1, max(1, total_pages)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Range of positions shown on `page` out of `total_items`.
pub fn page_range(page: usize, page_size: NonZeroUsize, total_items: usize) -> Range<usize> {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size).min(total_items);
    let end = start.saturating_add(size).min(total_items);
    start..end
}

/// Derived, read-only state of a paginated search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub search_term: String,
    /// Dataset indices of the matching items, in dataset order.
    pub filtered: Vec<usize>,
    pub current_page: usize,
    pub page_size: NonZeroUsize,
    pub total_pages: usize,
    /// Positions within `filtered` shown on the current page.
    pub paged: Range<usize>,
}

impl ViewState {
    pub fn total_items(&self) -> usize {
        self.filtered.len()
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page > 1
    }

    /// 1-indexed position of the first item on the page, 0 when empty.
    pub fn start_index(&self) -> usize {
        if self.paged.is_empty() { 0 } else { self.paged.start + 1 }
    }

    /// 1-indexed position of the last item on the page, 0 when empty.
    pub fn end_index(&self) -> usize {
        self.paged.end.min(self.total_items())
    }

    /// Dataset indices of the items on the current page.
    pub fn paged_indices(&self) -> &[usize] {
        &self.filtered[self.paged.clone()]
    }
}

/// Recompute the full view from its inputs.
///
/// `current_page` is clamped against the page count of the filtered result.
pub fn derive_view<T: Searchable>(
    data: &[T],
    search_term: &str,
    current_page: usize,
    page_size: NonZeroUsize,
    fields: &SearchFields,
) -> ViewState {
    let filtered = search::filter_indices(data, search_term, fields);
    let total_pages = total_pages(filtered.len(), page_size);
    let current_page = clamp_page(current_page, total_pages);
    let paged = page_range(current_page, page_size, filtered.len());
    ViewState {
        search_term: search_term.to_string(),
        filtered,
        current_page,
        page_size,
        total_pages,
        paged,
    }
}

/// One entry of a pager control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    /// Elided run of pages.
    Gap,
}

/// Page links for a pager widget.
///
/// Up to 7 pages are listed in full; beyond that the first and last page
/// stay visible along with the neighbours of the current page.
pub fn page_numbers(current_page: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages <= 7 {
        return (1..=total_pages).map(PageLink::Page).collect();
    }
    let current = clamp_page(current_page, total_pages);
    let mut links = vec![PageLink::Page(1)];
    if current > 3 {
        links.push(PageLink::Gap);
    }
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total_pages - 1);
    links.extend((start..=end).map(PageLink::Page));
    if current + 2 < total_pages {
        links.push(PageLink::Gap);
    }
    links.push(PageLink::Page(total_pages));
    links
}
