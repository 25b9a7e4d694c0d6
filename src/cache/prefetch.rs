//! Prefetch Policy
//!
//! Decides which neighboring pages to warm when the grid lands on a page.
//! Fixed radius: exactly one page forward and one back (when in range),
//! regardless of viewport or scroll velocity.

use std::time::Duration;

use crate::constants::{PREFETCH_DELAY_MS, PREFETCH_PAGE_CEILING};
use crate::query::PageRequest;

/// Neighbor-page warming policy owned by the request cache
#[derive(Clone, Copy, Debug)]
pub struct PrefetchPolicy {
    /// Highest page index that still prefetches forward
    pub page_ceiling: u32,
    /// Delay before a warmed fetch is first polled, so it never competes
    /// with the just-issued primary fetch
    pub delay: Duration,
}

impl Default for PrefetchPolicy {
    fn default() -> Self {
        Self {
            page_ceiling: PREFETCH_PAGE_CEILING,
            delay: Duration::from_millis(PREFETCH_DELAY_MS),
        }
    }
}

impl PrefetchPolicy {
    /// Policy without a start delay, for hosts that schedule their own
    /// debounce (and for tests)
    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Pages to warm around `page`: forward first, then back.
    ///
    /// The ceiling is checked against the current index, not the real page
    /// count; the policy has no visibility into it at call time.
    pub fn neighbors(&self, page: PageRequest) -> Vec<PageRequest> {
        let mut pages = Vec::with_capacity(2);
        if page.index < self.page_ceiling {
            pages.push(page.next());
        }
        if let Some(prev) = page.prev() {
            pages.push(prev);
        }
        pages
    }
}
