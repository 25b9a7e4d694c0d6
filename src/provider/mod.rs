//! Data Provider Layer
//!
//! The uniform contract the grid consumes: fetch one page of data, interpret
//! the opaque response (rows, row count, page count), and optionally warm
//! neighboring pages. `RestProvider` is the cache-backed base implementation
//! for the json-server envelope; anything else implements the trait over its
//! own response shape.

mod response;
mod rest;

pub use response::PaginatedResponse;
pub use rest::RestProvider;

use std::sync::Arc;

use async_trait::async_trait;

use crate::cache::CachedResponse;
use crate::query::QueryDescriptor;

/// Contract between the grid and a data source.
///
/// Row extraction is the one genuinely shape-specific accessor; the counts
/// exist so the grid can size its pager without knowing the envelope.
#[async_trait]
pub trait DataProvider: Send + Sync + 'static {
    type Row: Clone + Send + Sync + 'static;
    type Response: Clone + Send + Sync + 'static;

    /// Fetch (or reuse) the response for a table query
    async fn fetch_data(&self, query: &QueryDescriptor) -> CachedResponse<Self::Response>;

    /// Extract the rows of the page
    fn rows(&self, response: &Self::Response) -> Vec<Self::Row>;

    /// Total row count across all pages
    fn row_count(&self, response: &Self::Response) -> u64;

    /// Total page count
    fn page_count(&self, response: &Self::Response) -> u32;

    /// Placeholder response shown before the first fetch resolves
    fn initial_data(&self) -> Self::Response;

    /// Warm neighboring pages. Default: no prefetching.
    fn prefetch_adjacent_pages(&self, _query: &QueryDescriptor) {}
}

/// Blanket impl so providers can be shared behind `Arc` without wrappers
#[async_trait]
impl<P: DataProvider> DataProvider for Arc<P> {
    type Row = P::Row;
    type Response = P::Response;

    async fn fetch_data(&self, query: &QueryDescriptor) -> CachedResponse<Self::Response> {
        (**self).fetch_data(query).await
    }

    fn rows(&self, response: &Self::Response) -> Vec<Self::Row> {
        (**self).rows(response)
    }

    fn row_count(&self, response: &Self::Response) -> u64 {
        (**self).row_count(response)
    }

    fn page_count(&self, response: &Self::Response) -> u32 {
        (**self).page_count(response)
    }

    fn initial_data(&self) -> Self::Response {
        (**self).initial_data()
    }

    fn prefetch_adjacent_pages(&self, query: &QueryDescriptor) {
        (**self).prefetch_adjacent_pages(query)
    }
}
