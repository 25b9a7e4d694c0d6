//! Request Cache
//!
//! Maps derived query keys to in-flight-or-completed fetches. Concurrent
//! callers with identical descriptors observe the same underlying request
//! (request coalescing); entries are removed only by explicit invalidation
//! or a full clear, never by size or age.
//!
//! Failures are cached too: a rejected fetch stays under its key until the
//! caller invalidates it, so a persistently failing endpoint is re-attempted
//! only on demand.

use std::sync::{Arc, Mutex};

use ahash::AHashMap;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};

use super::PrefetchPolicy;
use crate::error::Error;
use crate::fetch::FetchAdapter;
use crate::query::{PageRequest, QueryDescriptor, derive_key};
use crate::runtime;

/// Settled value of a cached fetch. Both arms are `Arc`ed so the one stored
/// future clones cheaply to every coalesced waiter.
pub type CachedResponse<R> = Result<Arc<R>, Arc<Error>>;

/// A cached fetch: one shared future, any number of waiters
pub type PendingFetch<R> = Shared<BoxFuture<'static, CachedResponse<R>>>;

/// Request-deduplicating cache in front of one fetch adapter.
///
/// The cache exclusively owns its entry map; providers share the cache itself
/// via `Arc`. Growth is unbounded for a session-scoped grid; long-lived hosts
/// schedule `invalidate`/`clear` themselves, using `len`/`contains` to decide
/// when.
pub struct RequestCache<A: FetchAdapter> {
    adapter: Arc<A>,
    entries: Mutex<AHashMap<String, PendingFetch<A::Response>>>,
    prefetch: PrefetchPolicy,
}

impl<A: FetchAdapter> RequestCache<A> {
    /// Create a cache owning the given adapter, with the default prefetch
    /// policy
    pub fn new(adapter: A) -> Self {
        Self {
            adapter: Arc::new(adapter),
            entries: Mutex::new(AHashMap::new()),
            prefetch: PrefetchPolicy::default(),
        }
    }

    /// Replace the prefetch policy
    pub fn with_prefetch_policy(mut self, prefetch: PrefetchPolicy) -> Self {
        self.prefetch = prefetch;
        self
    }

    /// The adapter this cache fetches through
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Fetch the response for a query, reusing any in-flight or completed
    /// request under the same key.
    ///
    /// On a miss the fetch future is stored before it settles, so callers
    /// arriving while it is in flight resolve together with exactly one
    /// transport call.
    pub fn fetch_data(&self, query: &QueryDescriptor) -> PendingFetch<A::Response> {
        let key = derive_key(query, self.adapter.endpoint());
        let mut entries = self.entries.lock().expect("cache entry map poisoned");

        if let Some(pending) = entries.get(&key) {
            tracing::trace!(key = %key, "request cache hit");
            return pending.clone();
        }

        tracing::debug!(key = %key, "request cache miss");
        let pending = {
            let adapter = Arc::clone(&self.adapter);
            let query = query.clone();
            async move { adapter.fetch(&query).await.map(Arc::new).map_err(Arc::new) }
                .boxed()
                .shared()
        };
        entries.insert(key, pending.clone());
        pending
    }

    /// Warm the neighboring pages of a paginated query. No-op when the query
    /// carries no pagination.
    ///
    /// Entries land in the map immediately; the fetches themselves run on
    /// detached tasks after the policy delay. Their failures are logged and
    /// never surfaced.
    pub fn prefetch_adjacent_pages(&self, query: &QueryDescriptor) {
        let Some(page) = query.pagination else {
            return;
        };

        for neighbor in self.prefetch.neighbors(page) {
            let pending = self.fetch_data(&query.at_page_index(neighbor.index));
            let delay = self.prefetch.delay;
            let index = neighbor.index;
            runtime::spawn_detached(async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if let Err(error) = pending.await {
                    tracing::debug!(page = index, error = %error, "neighbor-page prefetch failed");
                }
            });
        }
    }

    /// Fetch the first page (or the caller's partial query defaulted onto
    /// it), returning the pending fetch so startup code can await it once
    /// before the grid mounts.
    pub fn prefetch_initial_data(&self, partial: QueryDescriptor) -> PendingFetch<A::Response> {
        let mut query = partial;
        if query.pagination.is_none() {
            query.pagination = Some(PageRequest::default());
        }
        self.fetch_data(&query)
    }

    /// Drop the entry for one query; no-op if absent
    pub fn invalidate(&self, query: &QueryDescriptor) {
        let key = derive_key(query, self.adapter.endpoint());
        let mut entries = self.entries.lock().expect("cache entry map poisoned");
        if entries.remove(&key).is_some() {
            tracing::debug!(key = %key, "cache entry invalidated");
        }
    }

    /// Drop all entries unconditionally
    pub fn clear(&self) {
        let mut entries = self.entries.lock().expect("cache entry map poisoned");
        let dropped = entries.len();
        entries.clear();
        tracing::debug!(dropped, "request cache cleared");
    }

    /// Whether an entry exists for this query
    pub fn contains(&self, query: &QueryDescriptor) -> bool {
        let key = derive_key(query, self.adapter.endpoint());
        self.entries
            .lock()
            .expect("cache entry map poisoned")
            .contains_key(&key)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache entry map poisoned").len()
    }

    /// Check if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
