//! Paginated search view-model.
//!
//! [`PaginatedSearch`] wraps a caller-owned dataset and keeps a consistent
//! filtered, paged window over it. Every mutating operation updates the
//! inputs and re-derives the whole [`ViewState`] through
//! [`pager::derive_view`].
use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::PagerError;
use crate::pager::{self, ViewState};
use crate::search::{SearchFields, Searchable};

/// Construction options for [`PaginatedSearch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewOptions {
    /// Maximum items per page; must be greater than zero.
    pub items_per_page: usize,
    /// 1-indexed page to start on. Pages past the end are clamped.
    pub initial_page: usize,
    pub searchable_fields: SearchFields,
}

impl ViewOptions {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            items_per_page,
            initial_page: 1,
            searchable_fields: SearchFields::All,
        }
    }

    pub fn initial_page(mut self, page: usize) -> Self {
        self.initial_page = page;
        self
    }

    pub fn searchable_fields(mut self, fields: SearchFields) -> Self {
        self.searchable_fields = fields;
        self
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::new(pager::DEFAULT_PAGE_SIZE)
    }
}

/// Client-side pagination and search over an in-memory dataset.
#[derive(Clone, Debug)]
pub struct PaginatedSearch<T> {
    data: Arc<[T]>,
    fields: SearchFields,
    search_term: String,
    page_size: NonZeroUsize,
    dataset_version: u64,
    view: ViewState,
}

impl<T: Searchable> PaginatedSearch<T> {
    /// Build an engine over `data`.
    ///
    /// Fails fast on a zero page size or a zero initial page.
    pub fn new(data: impl Into<Arc<[T]>>, options: ViewOptions) -> Result<Self, PagerError> {
        let page_size = NonZeroUsize::new(options.items_per_page)
            .ok_or(PagerError::InvalidPageSize(options.items_per_page))?;
        if options.initial_page == 0 {
            return Err(PagerError::InvalidInitialPage(0));
        }
        let data = data.into();
        let view = pager::derive_view(
            &*data,
            "",
            options.initial_page,
            page_size,
            &options.searchable_fields,
        );
        Ok(Self {
            data,
            fields: options.searchable_fields,
            search_term: String::new(),
            page_size,
            dataset_version: 0,
            view,
        })
    }

    /// Shorthand for [`PaginatedSearch::new`] with default options.
    pub fn with_page_size(
        data: impl Into<Arc<[T]>>,
        items_per_page: usize,
    ) -> Result<Self, PagerError> {
        Self::new(data, ViewOptions::new(items_per_page))
    }

    fn rederive(&mut self, page: usize) {
        self.view = pager::derive_view(
            &*self.data,
            &self.search_term,
            page,
            self.page_size,
            &self.fields,
        );
    }

    /// Set the search term and go back to the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.rederive(1);
        debug!(
            term = %self.search_term,
            matches = self.view.total_items(),
            "search term changed"
        );
    }

    /// Move to `page` if it exists; otherwise do nothing.
    ///
    /// Returns whether the current page changed.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page == 0 || page > self.view.total_pages || page == self.view.current_page {
            trace!(page, total_pages = self.view.total_pages, "page navigation ignored");
            return false;
        }
        self.rederive(page);
        trace!(page, "page changed");
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.view.current_page + 1)
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.view.current_page.saturating_sub(1))
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(self.view.total_pages)
    }

    /// Change the page size and go back to the first page.
    ///
    /// A size of zero is rejected and leaves the state untouched.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), PagerError> {
        self.page_size = NonZeroUsize::new(size).ok_or(PagerError::InvalidPageSize(size))?;
        self.rederive(1);
        debug!(size, total_pages = self.view.total_pages, "page size changed");
        Ok(())
    }

    /// Replace the dataset, keeping the search term, and go back to the first page.
    pub fn set_data(&mut self, data: impl Into<Arc<[T]>>) {
        self.data = data.into();
        self.dataset_version += 1;
        self.rederive(1);
        debug!(
            version = self.dataset_version,
            items = self.data.len(),
            matches = self.view.total_items(),
            "dataset replaced"
        );
    }
}

impl<T> PaginatedSearch<T> {
    pub fn data(&self) -> &Arc<[T]> {
        &self.data
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Items on the current page, in order.
    pub fn paged_items(&self) -> Vec<&T> {
        self.view.paged_indices().iter().map(|&i| &self.data[i]).collect()
    }

    /// Every item matching the search term, in dataset order.
    pub fn filtered_items(&self) -> Vec<&T> {
        self.view.filtered.iter().map(|&i| &self.data[i]).collect()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn searchable_fields(&self) -> &SearchFields {
        &self.fields
    }

    pub fn current_page(&self) -> usize {
        self.view.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn total_pages(&self) -> usize {
        self.view.total_pages
    }

    pub fn total_items(&self) -> usize {
        self.view.total_items()
    }

    pub fn has_next_page(&self) -> bool {
        self.view.has_next_page()
    }

    pub fn has_prev_page(&self) -> bool {
        self.view.has_prev_page()
    }

    pub fn start_index(&self) -> usize {
        self.view.start_index()
    }

    pub fn end_index(&self) -> usize {
        self.view.end_index()
    }

    /// Incremented on every [`PaginatedSearch::set_data`].
    pub fn dataset_version(&self) -> u64 {
        self.dataset_version
    }
}
