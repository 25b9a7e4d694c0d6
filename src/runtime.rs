//! Tokio Runtime Bridge
//!
//! Grid hosts usually run their own event loop (GPUI, winit, a REPL), while
//! the fetch stack requires tokio. This module runs tokio futures from any
//! thread: inside a tokio context it uses the ambient handle, elsewhere it
//! falls back to a lazily created runtime owned by this module.

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Handle, Runtime};

/// Fallback tokio runtime for non-tokio host threads
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the fallback runtime
fn get_runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| Runtime::new().expect("Failed to create tokio runtime"))
}

/// Spawn a detached task.
///
/// Used for fire-and-forget work like neighbor-page prefetching. The task
/// runs independently and its result is not awaited.
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match Handle::try_current() {
        Ok(handle) => {
            handle.spawn(future);
        }
        Err(_) => {
            get_runtime().spawn(future);
        }
    }
}

/// Block on a future synchronously (use sparingly, mainly for startup
/// warming).
///
/// **Warning**: This blocks the current thread and must not be called from
/// inside a tokio runtime.
pub fn block_on<F, T>(future: F) -> T
where
    F: Future<Output = T>,
{
    get_runtime().block_on(future)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_detached_runs_without_ambient_runtime() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();

        spawn_detached(async move {
            flag_clone.store(true, Ordering::SeqCst);
        });

        // Give the task time to complete
        std::thread::sleep(std::time::Duration::from_millis(100));
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_block_on_returns_the_value() {
        let value = block_on(async { 40 + 2 });
        assert_eq!(value, 42);
    }
}
