//! Request Cache Layer
//!
//! The memoizing layer between grid state changes and the remote data source.
//!
//! ```text
//! grid state change
//!       │
//!       ▼
//! DataProvider::fetch_data(descriptor)
//!       │
//!       ▼
//! RequestCache ── derive_key ──► hit: stored shared future
//!       │                        miss: FetchAdapter request, stored first
//!       ▼
//! PrefetchPolicy ──► neighbor pages warmed through the same cache
//! ```

mod prefetch;
mod request_cache;

pub use prefetch::PrefetchPolicy;
pub use request_cache::{CachedResponse, PendingFetch, RequestCache};
