//! Cache Key Derivation
//!
//! Maps a query descriptor to its canonical cache-key string. The format is
//! shared with other implementations talking to the same backend, so every
//! segment must be reproduced byte-for-byte.
//!
//! Segments are order-sensitive: two descriptors that differ only in the
//! ordering of their sort rules or column filters derive different keys even
//! when they describe the same logical state. Callers that want key stability
//! must build their arrays in a stable order (as `TableState` does).

use super::QueryDescriptor;

/// Extension-parameter names that are never part of the extra segment; they
/// are already covered by the dedicated segments.
const RESERVED_PARAMS: [&str; 4] = ["sorting", "pagination", "columnFilters", "globalFilter"];

/// Derive the canonical cache key for a query against an endpoint.
///
/// Layout: `endpoint|sort|page|globalFilter|columnFilters[|extra]` where the
/// extra segment appears only when at least one non-reserved extension
/// parameter exists.
pub fn derive_key(query: &QueryDescriptor, endpoint: &str) -> String {
    let sort_seg = query
        .sorting
        .iter()
        .map(|rule| format!("{}:{}", rule.field, rule.descending))
        .collect::<Vec<_>>()
        .join(",");

    let page = query.page_or_default();
    let page_seg = format!("page={},size={}", page.index, page.size);

    let column_seg = query
        .column_filters
        .iter()
        .map(|filter| format!("{}:{}", filter.field, filter.value))
        .collect::<Vec<_>>()
        .join(",");

    let mut key = format!(
        "{}|{}|{}|{}|{}",
        endpoint, sort_seg, page_seg, query.global_filter, column_seg
    );

    // Extension parameters, compact-JSON encoded, in insertion order.
    let extra_seg = query
        .extra
        .iter()
        .filter(|(name, _)| !RESERVED_PARAMS.contains(name))
        .map(|(name, value)| format!("{name}:{value}"))
        .collect::<Vec<_>>()
        .join("|");
    if !extra_seg.is_empty() {
        key.push('|');
        key.push_str(&extra_seg);
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{PageRequest, SortRule};
    use serde_json::json;

    #[test]
    fn test_derive_key_reference_scenario() {
        let query = QueryDescriptor::new()
            .with_sort(SortRule::asc("name"))
            .with_pagination(PageRequest::new(0, 10));
        assert_eq!(
            derive_key(&query, "products"),
            "products|name:false|page=0,size=10||"
        );
    }

    #[test]
    fn test_derive_key_defaults_missing_pagination() {
        let query = QueryDescriptor::new();
        assert_eq!(derive_key(&query, "orders"), "orders||page=0,size=10||");
    }

    #[test]
    fn test_derive_key_multi_sort_in_array_order() {
        let query = QueryDescriptor::new()
            .with_sort(SortRule::desc("price"))
            .with_sort(SortRule::asc("name"))
            .with_pagination(PageRequest::new(2, 25));
        assert_eq!(
            derive_key(&query, "products"),
            "products|price:true,name:false|page=2,size=25||"
        );
    }

    #[test]
    fn test_derive_key_sort_order_is_significant() {
        let a = QueryDescriptor::new()
            .with_sort(SortRule::asc("name"))
            .with_sort(SortRule::desc("price"));
        let b = QueryDescriptor::new()
            .with_sort(SortRule::desc("price"))
            .with_sort(SortRule::asc("name"));
        assert_ne!(derive_key(&a, "products"), derive_key(&b, "products"));
    }

    #[test]
    fn test_derive_key_column_filter_order_is_significant() {
        let a = QueryDescriptor::new()
            .with_column_filter("category", "tools")
            .with_column_filter("brand", "acme");
        let b = QueryDescriptor::new()
            .with_column_filter("brand", "acme")
            .with_column_filter("category", "tools");
        assert_ne!(derive_key(&a, "products"), derive_key(&b, "products"));
    }

    #[test]
    fn test_derive_key_filters_and_global_filter() {
        let query = QueryDescriptor::new()
            .with_pagination(PageRequest::new(1, 10))
            .with_global_filter("drill")
            .with_column_filter("category", "tools")
            .with_column_filter("in_stock", "true");
        assert_eq!(
            derive_key(&query, "products"),
            "products||page=1,size=10|drill|category:tools,in_stock:true"
        );
    }

    #[test]
    fn test_derive_key_appends_extra_params_in_insertion_order() {
        let query = QueryDescriptor::new()
            .with_extra("locale", "en-US")
            .with_extra("include_archived", false);
        assert_eq!(
            derive_key(&query, "products"),
            "products||page=0,size=10|||locale:\"en-US\"|include_archived:false"
        );
    }

    #[test]
    fn test_derive_key_skips_reserved_extra_params() {
        let query = QueryDescriptor::new()
            .with_extra("sorting", json!([{"id": "name"}]))
            .with_extra("globalFilter", "x");
        // All extras reserved: the extra segment is omitted entirely.
        assert_eq!(derive_key(&query, "products"), "products||page=0,size=10||");
    }

    #[test]
    fn test_derive_key_extra_values_use_compact_json() {
        let query = QueryDescriptor::new().with_extra("tags", json!(["a", "b"]));
        assert_eq!(
            derive_key(&query, "products"),
            "products||page=0,size=10|||tags:[\"a\",\"b\"]"
        );
    }
}
