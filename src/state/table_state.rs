//! Table State
//!
//! Holds one grid's sort/page/filter state and the rows last applied.
//!
//! The state is the sole writer of its fields; the cache never mutates the
//! descriptors derived from it. Responses are applied only when they match
//! the descriptor of the most recent `begin_fetch`, so fetches for different
//! keys may resolve out of order without a stale page overwriting a newer
//! one. A failed fetch records the error but keeps the last-good rows.

use std::sync::Arc;

use crate::config::{FeatureFlags, Settings};
use crate::query::{ColumnFilter, PageRequest, QueryDescriptor, SortRule};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TableLoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(Arc<str>),
}

/// State for one paginated, sortable, filterable table.
pub struct TableState<T> {
    features: FeatureFlags,
    sorting: Vec<SortRule>,
    column_filters: Vec<ColumnFilter>,
    global_filter: String,
    page_index: u32,
    page_size: u32,
    rows: Vec<T>,
    row_count: u64,
    page_count: u32,
    load_state: TableLoadState,
    pending: Option<QueryDescriptor>,
}

impl<T> TableState<T> {
    pub fn new() -> Self {
        Self {
            features: FeatureFlags::default(),
            sorting: Vec::new(),
            column_filters: Vec::new(),
            global_filter: String::new(),
            page_index: 0,
            page_size: PageRequest::default().size,
            rows: Vec::new(),
            row_count: 0,
            page_count: 0,
            load_state: TableLoadState::Idle,
            pending: None,
        }
    }

    /// State seeded from the configuration surface: page size, initial sort,
    /// feature flags
    pub fn from_settings(settings: &Settings) -> Self {
        let mut state = Self::new();
        state.features = settings.features;
        state.page_size = settings.page_size.max(1);
        state.sorting = settings.initial_sort.clone();
        state
    }

    pub fn load_state(&self) -> &TableLoadState {
        &self.load_state
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn sorting(&self) -> &[SortRule] {
        &self.sorting
    }

    pub fn global_filter(&self) -> &str {
        &self.global_filter
    }

    pub fn column_filters(&self) -> &[ColumnFilter] {
        &self.column_filters
    }

    /// The descriptor for the current state. Disabled features contribute
    /// nothing, whatever the state holds for them.
    pub fn descriptor(&self) -> QueryDescriptor {
        let mut query = QueryDescriptor::new();
        if self.features.sorting {
            query.sorting = self.sorting.clone();
        }
        if self.features.pagination {
            query.pagination = Some(PageRequest::new(self.page_index, self.page_size));
        }
        if self.features.column_filters {
            query.column_filters = self.column_filters.clone();
        }
        if self.features.global_filter {
            query.global_filter = self.global_filter.clone();
        }
        query
    }

    /// Mark the table loading and record the descriptor the next `apply`
    /// must match. Returns that descriptor for the caller to fetch with.
    pub fn begin_fetch(&mut self) -> QueryDescriptor {
        let query = self.descriptor();
        self.load_state = TableLoadState::Loading;
        self.pending = Some(query.clone());
        query
    }

    /// Apply a resolved response. Ignored unless `query` matches the pending
    /// descriptor, so responses racing in for an older state are discarded.
    pub fn apply(&mut self, query: &QueryDescriptor, rows: Vec<T>, row_count: u64, page_count: u32) {
        if self.pending.as_ref() != Some(query) {
            tracing::trace!("discarding response for a superseded table state");
            return;
        }
        self.pending = None;
        self.rows = rows;
        self.row_count = row_count;
        self.page_count = page_count;
        // The server may know fewer pages than the index we asked for.
        if self.page_count > 0 {
            self.page_index = self.page_index.min(self.page_count - 1);
        }
        self.load_state = TableLoadState::Ready;
    }

    /// Record a failed fetch. Previously rendered rows stay visible.
    pub fn set_error(&mut self, message: impl Into<Arc<str>>) {
        self.pending = None;
        self.load_state = TableLoadState::Error(message.into());
    }

    /// Cycle a column's sort: ascending, then descending, then none.
    /// Repeated toggles on a field update its existing rule in place.
    pub fn toggle_sort(&mut self, field: &str) {
        if !self.features.sorting {
            return;
        }
        match self.sorting.iter().position(|rule| rule.field == field) {
            Some(pos) if self.sorting[pos].descending => {
                self.sorting.remove(pos);
            }
            Some(pos) => self.sorting[pos].descending = true,
            None => self.sorting.push(SortRule::asc(field)),
        }
        self.page_index = 0;
    }

    pub fn set_page_index(&mut self, index: u32) {
        if !self.features.pagination {
            return;
        }
        self.page_index = if self.page_count > 0 {
            index.min(self.page_count - 1)
        } else {
            index
        };
    }

    pub fn set_page_size(&mut self, size: u32) {
        if !self.features.pagination {
            return;
        }
        self.page_size = size.max(1);
        self.page_index = 0;
    }

    pub fn next_page(&mut self) {
        self.set_page_index(self.page_index.saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page_index(self.page_index.saturating_sub(1));
    }

    /// Set a column filter; the last value applied per field wins and an
    /// empty value removes the filter. Page resets to the first.
    pub fn set_column_filter(&mut self, field: &str, value: impl Into<String>) {
        if !self.features.column_filters {
            return;
        }
        let value = value.into();
        let existing = self
            .column_filters
            .iter()
            .position(|filter| filter.field == field);
        match existing {
            Some(pos) if value.is_empty() => {
                self.column_filters.remove(pos);
            }
            Some(pos) => self.column_filters[pos].value = value,
            None if value.is_empty() => {}
            None => self.column_filters.push(ColumnFilter::new(field, value)),
        }
        self.page_index = 0;
    }

    pub fn clear_column_filters(&mut self) {
        self.column_filters.clear();
        self.page_index = 0;
    }

    /// Set the free-text filter. Page resets to the first.
    pub fn set_global_filter(&mut self, filter: impl Into<String>) {
        if !self.features.global_filter {
            return;
        }
        self.global_filter = filter.into();
        self.page_index = 0;
    }
}

impl<T> Default for TableState<T> {
    fn default() -> Self {
        Self::new()
    }
}
