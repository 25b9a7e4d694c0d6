//! Paginated Response Envelope
//!
//! The json-server-style envelope one concrete provider profile speaks:
//! page links, page count, total item count, and the row data itself.
//! Custom envelopes implement `DataProvider` directly instead.

use serde::{Deserialize, Serialize};

/// One page of rows plus pagination metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// First page number
    #[serde(default)]
    pub first: Option<u32>,
    /// Previous page number, absent on the first page
    #[serde(default)]
    pub prev: Option<u32>,
    /// Next page number, absent on the last page
    #[serde(default)]
    pub next: Option<u32>,
    /// Last page number
    #[serde(default)]
    pub last: Option<u32>,
    /// Total page count
    pub pages: u32,
    /// Total row count across all pages
    pub items: u64,
    /// Rows of the requested page
    pub data: Vec<T>,
}

// Hand-written so `T` itself does not need a `Default` impl.
impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            first: None,
            prev: None,
            next: None,
            last: None,
            pages: 0,
            items: 0,
            data: Vec::new(),
        }
    }
}
