//! Query Descriptor
//!
//! Value objects describing one table query: sort order, page, column filters,
//! free-text filter, plus open extension parameters. Descriptors are built
//! once per grid state change and never mutated by the cache.

use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DEFAULT_PAGE_SIZE;

/// One sort criterion. Order within `QueryDescriptor::sorting` is significant
/// (primary/secondary/tertiary sort).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    /// Field name to sort by
    pub field: String,
    /// Descending when true, ascending when false
    pub descending: bool,
}

impl SortRule {
    /// Ascending sort on a field
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Descending sort on a field
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

/// A page request: zero-based index plus page size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index
    pub index: u32,
    /// Rows per page, always at least 1
    pub size: u32,
}

impl PageRequest {
    /// Create a page request. A zero size is bumped to 1.
    pub fn new(index: u32, size: u32) -> Self {
        Self {
            index,
            size: size.max(1),
        }
    }

    /// The following page, same size
    pub fn next(self) -> Self {
        Self {
            index: self.index + 1,
            ..self
        }
    }

    /// The preceding page, same size; `None` on the first page
    pub fn prev(self) -> Option<Self> {
        self.index.checked_sub(1).map(|index| Self { index, ..self })
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            index: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One column filter: field id plus the filter value as sent on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    /// Field id the filter applies to
    pub field: String,
    /// Filter value, emitted verbatim as a query parameter
    pub value: String,
}

impl ColumnFilter {
    /// Create a column filter
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Open extension parameters carried by a query.
///
/// Insertion order is preserved and is the enumeration order used during key
/// derivation, so the same insertions always derive the same key.
#[derive(Clone, Debug, Default)]
pub struct ExtraParams {
    entries: LinkedHashMap<String, Value>,
}

impl ExtraParams {
    /// Empty parameter map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter. The last value written under a key wins.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Look up a parameter by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Remove a parameter by key
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Equality is order-sensitive, matching key derivation.
impl PartialEq for ExtraParams {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(other.entries.iter()).all(|(a, b)| a == b)
    }
}

/// A complete table query: what the grid is currently asking for.
///
/// Immutable once constructed; the cache and adapters only ever read it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryDescriptor {
    /// Sort criteria in priority order
    pub sorting: Vec<SortRule>,
    /// Requested page; `None` means unpaginated and the cache substitutes
    /// the default page for key derivation and transport
    pub pagination: Option<PageRequest>,
    /// Per-column filters in application order
    pub column_filters: Vec<ColumnFilter>,
    /// Free-text filter; an empty string means "no filter"
    pub global_filter: String,
    /// Open extension parameters
    pub extra: ExtraParams,
}

impl QueryDescriptor {
    /// Empty query: no sort, no pagination, no filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sort rule
    pub fn with_sort(mut self, rule: SortRule) -> Self {
        self.sorting.push(rule);
        self
    }

    /// Set the requested page
    pub fn with_pagination(mut self, page: PageRequest) -> Self {
        self.pagination = Some(page);
        self
    }

    /// Append a column filter
    pub fn with_column_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.column_filters.push(ColumnFilter::new(field, value));
        self
    }

    /// Set the free-text filter
    pub fn with_global_filter(mut self, filter: impl Into<String>) -> Self {
        self.global_filter = filter.into();
        self
    }

    /// Insert an extension parameter
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value);
        self
    }

    /// The requested page, or the default page when unpaginated
    pub fn page_or_default(&self) -> PageRequest {
        self.pagination.unwrap_or_default()
    }

    /// The same query pointed at a different page index
    pub fn at_page_index(&self, index: u32) -> Self {
        let mut query = self.clone();
        let size = query.page_or_default().size;
        query.pagination = Some(PageRequest::new(index, size));
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_neighbors() {
        let page = PageRequest::new(5, 25);
        assert_eq!(page.next(), PageRequest::new(6, 25));
        assert_eq!(page.prev(), Some(PageRequest::new(4, 25)));
        assert_eq!(PageRequest::new(0, 25).prev(), None);
    }

    #[test]
    fn test_page_request_zero_size() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
    }

    #[test]
    fn test_page_or_default() {
        let query = QueryDescriptor::new();
        assert_eq!(query.page_or_default(), PageRequest { index: 0, size: 10 });

        let query = query.with_pagination(PageRequest::new(3, 50));
        assert_eq!(query.page_or_default(), PageRequest::new(3, 50));
    }

    #[test]
    fn test_at_page_index_keeps_everything_else() {
        let query = QueryDescriptor::new()
            .with_sort(SortRule::desc("price"))
            .with_pagination(PageRequest::new(5, 25))
            .with_column_filter("category", "tools")
            .with_global_filter("drill");

        let neighbor = query.at_page_index(6);
        assert_eq!(neighbor.pagination, Some(PageRequest::new(6, 25)));
        assert_eq!(neighbor.sorting, query.sorting);
        assert_eq!(neighbor.column_filters, query.column_filters);
        assert_eq!(neighbor.global_filter, query.global_filter);
    }

    #[test]
    fn test_extra_params_preserve_insertion_order() {
        let mut extra = ExtraParams::new();
        extra.insert("zeta", 1);
        extra.insert("alpha", "two");
        extra.insert("mid", true);

        let keys: Vec<&str> = extra.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_extra_params_equality_is_order_sensitive() {
        let mut a = ExtraParams::new();
        a.insert("x", 1);
        a.insert("y", 2);

        let mut b = ExtraParams::new();
        b.insert("y", 2);
        b.insert("x", 1);

        assert_ne!(a, b);
    }
}
