//! Remote Fetch Layer
//!
//! Builds transport-level requests from query descriptors and executes them.
//! The `FetchAdapter` trait is the seam the request cache fetches through;
//! `RestAdapter` is the HTTP implementation.

mod rest;

pub use rest::RestAdapter;

use async_trait::async_trait;

use crate::error::Result;
use crate::query::QueryDescriptor;

/// Executes one transport call per cache miss.
///
/// Implementations make a single attempt: no retry, no timeout, no backoff.
/// Whatever fails (connect, status, decode) surfaces as the `Err` the cache
/// stores under the descriptor's key.
#[async_trait]
pub trait FetchAdapter: Send + Sync + 'static {
    type Response: Send + Sync + 'static;

    /// Endpoint name this adapter serves; the leading cache-key segment
    fn endpoint(&self) -> &str;

    /// Execute the request described by `query`
    async fn fetch(&self, query: &QueryDescriptor) -> Result<Self::Response>;
}
