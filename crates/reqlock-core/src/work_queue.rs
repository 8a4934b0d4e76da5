//! Lock-free work queue distributing environments across verification workers

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Lock-free work queue handing out items together with their index.
///
/// Workers call [`next()`](WorkQueue::next) to atomically claim the next item.
/// After [`close()`](WorkQueue::close) no further items are handed out, which
/// lets a worker that hit a fatal error stop the others.
pub struct WorkQueue<'a, S> {
    items: &'a [S],
    cursor: AtomicUsize,
    closed: AtomicBool,
}

impl<'a, S> WorkQueue<'a, S> {
    pub fn new(items: &'a [S]) -> Self {
        Self {
            items,
            cursor: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    /// Claim the next item and its position in the original slice
    pub fn next(&self) -> Option<(usize, &'a S)> {
        if self.is_closed() {
            return None;
        }
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.items.get(i).map(|item| (i, item))
    }

    /// Stop handing out items
    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    /// Total items in queue
    pub fn total(&self) -> usize {
        self.items.len()
    }
}
