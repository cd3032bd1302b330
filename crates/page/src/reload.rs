//! Full page reloads as an injected capability.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Re-renders the whole page from the server.
pub trait PageReloader: Send + Sync {
    fn reload(&self);
}

/// Counts reload requests instead of performing them (headless drivers,
/// tests).
#[derive(Debug, Default)]
pub struct RecordingReloader {
    count: AtomicUsize,
}

impl RecordingReloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl PageReloader for RecordingReloader {
    fn reload(&self) {
        let n = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(reloads = n, "page reload requested");
    }
}
