use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Suspends scrolling of the results page while an overlay is open.
///
/// Holders get a [`ScrollGuard`]; the page is locked while any guard is alive.
/// Dropping the guard (close, new search, teardown) releases it.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn acquire(&self) -> ScrollGuard {
        self.holders.fetch_add(1, Ordering::SeqCst);
        ScrollGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }
}

/// Keeps a [`ScrollLock`] engaged until dropped
#[derive(Debug)]
pub struct ScrollGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_releases_on_drop() {
        let lock = ScrollLock::default();
        assert!(!lock.is_locked());

        let guard = lock.acquire();
        assert!(lock.is_locked());

        drop(guard);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_nested_guards() {
        let lock = ScrollLock::default();
        let outer = lock.acquire();
        let inner = lock.clone().acquire();

        drop(outer);
        assert!(lock.is_locked());
        drop(inner);
        assert!(!lock.is_locked());
    }
}
