//! Data-layer Constants
//!
//! Centralized tuning constants for the cache and prefetch layers.

/// Page size substituted when a query carries no pagination
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Highest page index the prefetcher will walk forward from.
/// The cache has no visibility into the real page count at prefetch time,
/// so this hard ceiling guards against runaway prefetch chains.
pub const PREFETCH_PAGE_CEILING: u32 = 1000;

/// Delay before a prefetched neighbor page is actually polled, so warming
/// never competes with the just-issued primary fetch
pub const PREFETCH_DELAY_MS: u64 = 50;

/// Environment variable overriding the configured API base URL
pub const ENV_BASE_URL: &str = "GRIDSOURCE_API_URL";

/// Fallback API base URL when neither config nor environment provides one
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
